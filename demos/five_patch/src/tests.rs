//! Tests for the reference scenario.

use pfsi_core::{PatchId, SimConfig};
use pfsi_human::PfsiState;

use crate::run_once;
use crate::scenario::Scenario;

fn read_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn default_is_the_reference_layout() {
        let s = Scenario::default();
        assert_eq!(s.n_patches, 5);
        assert_eq!(s.human_count(), 5_000);

        let layer = s.patch_layer().unwrap();
        for i in 0..5 {
            let row = layer.movement_row(PatchId(i));
            assert_eq!(row[i as usize], 0.0);
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
        assert_eq!(layer.diffusion().nnz(), 5);
        assert_eq!(s.mosquitoes().unwrap().patch_count(), 5);
    }

    #[test]
    fn residents_are_numbered_patch_by_patch() {
        let s = Scenario::default();
        let humans = s.humans(42).unwrap();
        assert_eq!(humans.len(), 5_000);
        for (i, h) in humans.iter().enumerate() {
            assert_eq!(h.id.index(), i);
            assert_eq!(h.home, PatchId((i / 1_000) as u32));
            assert_eq!(h.trip_duration[h.home.index()], 0.0);
        }
        let infected = humans.iter().filter(|h| h.state == PfsiState::Infected).count();
        assert!((2_300..2_700).contains(&infected), "got {infected}");
    }

    #[test]
    fn same_seed_same_initial_states() {
        let s = Scenario::default();
        let states = |seed| s.humans(seed).unwrap().into_iter().map(|h| h.state).collect::<Vec<_>>();
        assert_eq!(states(7), states(7));
        assert_ne!(states(7), states(8));
    }
}

#[cfg(test)]
mod reference_run {
    use super::*;

    /// Full 5 × 1,000 residents over 1,000 days.  Slow in debug builds; run
    /// with `--release -- --ignored`.
    #[test]
    #[ignore]
    fn full_reference_run_log_shapes() {
        let s = Scenario::default();
        let dir = tempfile::tempdir().expect("create temp dir");
        let summary = run_once(&s, SimConfig::new(1_000, 42), dir.path(), None).unwrap();
        assert_eq!(summary.days, 1_000);

        let pfsi = read_rows(&dir.path().join("pfsi.csv"));
        assert_eq!(pfsi.len(), 5_000);
        for row in &pfsi {
            let v: Vec<u64> = (2..11).map(|i| row[i].parse().unwrap()).collect();
            let visitors: u64 = v[..3].iter().sum();
            assert_eq!(v.iter().sum::<u64>(), 1_000 + visitors);
        }
        assert_eq!(read_rows(&dir.path().join("mosy.csv")).len(), 3_000);
        assert!(read_rows(&dir.path().join("vaxx.csv")).is_empty());
    }
}
