//! Unit tests for pfsi-mosquito.

use pfsi_core::{Day, PatchId};
use pfsi_patch::{MovementMatrix, PatchLayer, PatchParams, SparseMatrix};

use crate::{Compartment, MosquitoError, MosquitoParams, MosquitoPopulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn layer(n: usize, diffusion: SparseMatrix) -> PatchLayer {
    PatchLayer::new(vec![PatchParams::human_only(); n], MovementMatrix::stay_home(n), diffusion)
        .unwrap()
}

fn params(n: usize, survival: f64, lambda: f64, eip: u32) -> MosquitoParams {
    MosquitoParams::constant(
        survival,
        0.3,
        vec![lambda; n],
        eip,
        (vec![100.0; n], vec![0.0; n], vec![10.0; n]),
    )
}

fn run(pop: &mut MosquitoPopulation, layer: &PatchLayer, days: std::ops::Range<u32>) {
    let weights = vec![1.0; pop.patch_count()];
    for d in days {
        pop.tick(Day(d), layer, &weights).unwrap();
    }
}

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn rejects_bad_survival() {
        let err = MosquitoPopulation::new(params(2, 1.5, 1.0, 10), 2).unwrap_err();
        assert!(matches!(err, MosquitoError::Config(_)));
    }

    #[test]
    fn rejects_wrong_patch_count() {
        let err = MosquitoPopulation::new(params(3, 0.9, 1.0, 10), 2).unwrap_err();
        assert!(matches!(err, MosquitoError::Dimension { .. }));
    }

    #[test]
    fn rejects_negative_initial_counts() {
        let mut p = params(2, 0.9, 1.0, 10);
        p.initial_z[1] = -3.0;
        assert!(MosquitoPopulation::new(p, 2).is_err());
    }

    #[test]
    fn rejects_empty_tables() {
        let mut p = params(2, 0.9, 1.0, 10);
        p.eip.clear();
        assert!(MosquitoPopulation::new(p, 2).is_err());
    }
}

#[cfg(test)]
mod dynamics {
    use super::*;

    #[test]
    fn identity_diffusion_conserves_each_patch() {
        // No death, no emergence, no feeds: nothing should change anywhere.
        let l = layer(3, SparseMatrix::identity(3));
        let mut pop = MosquitoPopulation::new(params(3, 1.0, 0.0, 10), 3).unwrap();
        run(&mut pop, &l, 0..50);
        assert_eq!(pop.susceptible(), &[100.0, 100.0, 100.0]);
        assert_eq!(pop.infectious(), &[10.0, 10.0, 10.0]);
    }

    #[test]
    fn column_stochastic_diffusion_conserves_total() {
        let n = 4;
        let mut triplets = Vec::new();
        for j in 0..n {
            triplets.push((j, j, 0.7));
            triplets.push(((j + 1) % n, j, 0.3));
        }
        let l = layer(n, SparseMatrix::from_triplets(n, &triplets).unwrap());
        let mut p = params(n, 1.0, 0.0, 5);
        p.initial_m = vec![400.0, 0.0, 0.0, 0.0];
        p.initial_y = vec![0.0, 20.0, 0.0, 0.0];
        let mut pop = MosquitoPopulation::new(p, n).unwrap();
        let before = pop.total();
        run(&mut pop, &l, 0..30);
        assert!((pop.total() - before).abs() < 1e-9);
        // Mass has spread out of patch 0.
        assert!(pop.susceptible()[2] > 0.0);
    }

    #[test]
    fn equilibrium_is_lambda_over_mortality() {
        let l = layer(1, SparseMatrix::identity(1));
        let mut p = params(1, 0.9, 10.0, 10);
        p.initial_m = vec![0.0];
        p.initial_z = vec![0.0];
        let mut pop = MosquitoPopulation::new(p, 1).unwrap();
        run(&mut pop, &l, 0..400);
        assert!((pop.susceptible()[0] - 100.0).abs() < 1e-6, "got {}", pop.susceptible()[0]);
    }

    #[test]
    fn exposed_cohort_becomes_infectious_after_eip() {
        let l = layer(1, SparseMatrix::identity(1));
        let mut p = params(1, 1.0, 0.0, 3);
        p.initial_z = vec![0.0];
        let mut pop = MosquitoPopulation::new(p, 1).unwrap();

        pop.record_infected_feeds(PatchId(0), 5.0);
        pop.tick(Day(0), &l, &[1.0]).unwrap();
        assert_eq!(pop.exposed(), vec![5.0]);
        assert_eq!(pop.susceptible(), &[95.0]);

        pop.tick(Day(1), &l, &[1.0]).unwrap();
        pop.tick(Day(2), &l, &[1.0]).unwrap();
        assert_eq!(pop.infectious(), &[0.0]);

        // Age 3 on day 3 reaches the EIP.
        pop.tick(Day(3), &l, &[1.0]).unwrap();
        assert_eq!(pop.infectious(), &[5.0]);
        assert_eq!(pop.exposed(), vec![0.0]);
    }

    #[test]
    fn shortened_eip_releases_older_cohorts_together() {
        let l = layer(1, SparseMatrix::identity(1));
        let mut p = params(1, 1.0, 0.0, 10);
        p.initial_z = vec![0.0];
        p.eip = vec![10; 10];
        p.eip[4] = 2; // day 4 runs warm
        let mut pop = MosquitoPopulation::new(p, 1).unwrap();

        pop.record_infected_feeds(PatchId(0), 1.0);
        pop.tick(Day(0), &l, &[1.0]).unwrap();
        pop.record_infected_feeds(PatchId(0), 2.0);
        pop.tick(Day(1), &l, &[1.0]).unwrap();
        pop.record_infected_feeds(PatchId(0), 4.0);
        pop.tick(Day(3), &l, &[1.0]).unwrap();
        assert_eq!(pop.cohorts().count(), 3);

        // On day 4 the cohorts from days 0 and 1 are ≥ 2 days old; day 3's is not.
        pop.tick(Day(4), &l, &[1.0]).unwrap();
        assert_eq!(pop.infectious(), &[3.0]);
        assert_eq!(pop.exposed(), vec![4.0]);
    }

    #[test]
    fn seeding_is_capped_by_susceptibles() {
        let l = layer(1, SparseMatrix::identity(1));
        let mut p = params(1, 1.0, 0.0, 10);
        p.initial_m = vec![3.0];
        let mut pop = MosquitoPopulation::new(p, 1).unwrap();
        pop.record_infected_feeds(PatchId(0), 50.0);
        pop.tick(Day(0), &l, &[1.0]).unwrap();
        assert_eq!(pop.susceptible(), &[0.0]);
        assert_eq!(pop.exposed(), vec![3.0]);
        assert_eq!(pop.pending_infected_feeds(), &[0.0]);
    }

    #[test]
    fn toxic_hosts_raise_mortality() {
        let mut toxic = PatchParams::human_only();
        toxic.zootox_weight = 1.0;
        let l = PatchLayer::new(
            vec![PatchParams::human_only(), toxic],
            MovementMatrix::stay_home(2),
            SparseMatrix::identity(2),
        )
        .unwrap();
        let mut pop = MosquitoPopulation::new(params(2, 1.0, 0.0, 10), 2).unwrap();
        pop.tick(Day(0), &l, &[1.0, 1.0]).unwrap();
        assert_eq!(pop.susceptible()[0], 100.0);
        // Half the meals are toxic and f = 0.3: survival 1 − 0.15.
        assert!((pop.susceptible()[1] - 85.0).abs() < 1e-9);
    }

    #[test]
    fn reservoir_patch_is_held_out_of_diffusion() {
        let psi = SparseMatrix::from_dense(&[vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
        let l = PatchLayer::new(
            vec![PatchParams::human_only(), PatchParams::reservoir(0.1)],
            MovementMatrix::stay_home(2),
            psi,
        )
        .unwrap();
        let mut p = params(2, 1.0, 0.0, 10);
        p.initial_m = vec![100.0, 40.0];
        let mut pop = MosquitoPopulation::new(p, 2).unwrap();
        pop.tick(Day(0), &l, &[1.0, 1.0]).unwrap();
        assert_eq!(pop.susceptible(), &[50.0, 40.0]);
    }

    #[test]
    fn ticks_must_advance() {
        let l = layer(1, SparseMatrix::identity(1));
        let mut pop = MosquitoPopulation::new(params(1, 0.9, 1.0, 10), 1).unwrap();
        pop.tick(Day(2), &l, &[1.0]).unwrap();
        let err = pop.tick(Day(2), &l, &[1.0]).unwrap_err();
        assert!(matches!(err, MosquitoError::OutOfOrderTick { .. }));
    }

    #[test]
    fn compartments_in_log_order() {
        let pop = MosquitoPopulation::new(params(2, 0.9, 1.0, 10), 2).unwrap();
        let labels: Vec<&str> = Compartment::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["M", "Y", "Z"]);
        assert_eq!(pop.compartment(Compartment::Z), vec![10.0, 10.0]);
        let d = pop.density(PatchId(1));
        assert!((d.feeds_per_day - 0.3 * 110.0).abs() < 1e-12);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    const PROPTEST_CASES: u32 = 32;

    /// A random column-stochastic diffusion operator plus initial M, Y, Z.
    fn patches_and_counts() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>, Vec<f64>, Vec<f64>)> {
        (1usize..6).prop_flat_map(|n| {
            let counts = proptest::collection::vec(0.0f64..500.0, n);
            (
                proptest::collection::vec(proptest::collection::vec(0.01f64..1.0, n), n),
                counts.clone(),
                counts.clone(),
                counts,
            )
        })
    }

    fn column_stochastic(w: &[Vec<f64>]) -> SparseMatrix {
        let n = w.len();
        let mut triplets = Vec::new();
        for j in 0..n {
            let sum: f64 = (0..n).map(|i| w[i][j]).sum();
            for i in 0..n {
                triplets.push((i, j, w[i][j] / sum));
            }
        }
        SparseMatrix::from_triplets(n, &triplets).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

        #[test]
        fn closed_population_total_is_conserved(
            (w, m, y, z) in patches_and_counts(),
            feeds in proptest::collection::vec(0.0f64..50.0, 5),
        ) {
            let n = m.len();
            let l = layer(n, column_stochastic(&w));
            let p = MosquitoParams::constant(1.0, 0.3, vec![0.0; n], 3, (m, y, z));
            let mut pop = MosquitoPopulation::new(p, n).unwrap();
            let before = pop.total();

            let weights = vec![1.0; n];
            for (d, f) in feeds.iter().enumerate() {
                pop.record_infected_feeds(PatchId((d % n) as u32), *f);
                pop.tick(Day(d as u32), &l, &weights).unwrap();
            }

            let after = pop.total();
            prop_assert!((before - after).abs() <= 1e-9 * before.max(1.0), "{} vs {}", before, after);
            for c in Compartment::ALL {
                prop_assert!(pop.compartment(c).iter().all(|&v| v >= 0.0));
            }
        }
    }
}
