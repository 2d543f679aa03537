//! five_patch — reference scenario for the PfSI patch simulator.
//!
//! Five patches of 1,000 residents each, initial PfPR 0.5, uniform travel
//! between patches, no mosquito movement, Poisson biting.  Writes the PfSI,
//! mosquito, and vaccination logs for each replicate under `--output-dir`.
//!
//! ```text
//! five_patch --days 1000 --seed 42 --replicates 4 --verbose
//! five_patch --config scenario.json --vaccinations vaxx.csv
//! ```

mod logger;
mod scenario;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;

use pfsi_core::{SimConfig, SimRng};
use pfsi_human::{PfsiModel, PopulationBuilder};
use pfsi_output::{LoggingAggregator, StreamDescriptor, StreamKey};
use pfsi_schedule::{load_vaccinations_csv, VaccinationFeed};
use pfsi_sim::{RunSummary, SimBuilder};

use scenario::Scenario;

// ── Constants ─────────────────────────────────────────────────────────────────

const PFSI_HEADER: &str = "time,patch,S_visitor,I_visitor,P_visitor,S_resident_home,I_resident_home,\
P_resident_home,S_resident_away,I_resident_away,P_resident_away,incidence_resident,incidence_traveller";
const VAXX_HEADER: &str = "time,patch,vaxx_events";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Run the five-patch PfSI reference scenario")]
struct Args {
    /// Simulated days.
    #[arg(short, long, default_value = "1000")]
    days: u32,

    /// Root random seed; replicates derive their seeds from it.
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Independent runs, executed in parallel.
    #[arg(short, long, default_value = "1")]
    replicates: u32,

    /// Directory for the log files.
    #[arg(short, long, default_value = "output/five_patch")]
    output_dir: PathBuf,

    /// JSON scenario overriding the built-in reference parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vaccination CSV (`id,time,treat,type`).
    #[arg(long)]
    vaccinations: Option<PathBuf>,

    /// Log progress at info level.
    #[arg(short, long)]
    verbose: bool,
}

// ── Single run ────────────────────────────────────────────────────────────────

fn run_once(scenario: &Scenario, config: SimConfig, dir: &Path, vaccinations: Option<&Path>) -> Result<RunSummary> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let n = scenario.n_patches;

    let (humans, rngs) = PopulationBuilder::new(scenario.humans(config.seed)?, n, config.seed).build()?;
    let feed = match vaccinations {
        Some(path) => load_vaccinations_csv(path)?,
        None => VaccinationFeed::empty(),
    };
    let mut sim = SimBuilder::new(
        config.clone(),
        scenario.patch_layer()?,
        scenario.mosquitoes()?,
        humans,
        rngs,
        PfsiModel::new(scenario.pfsi.clone())?,
    )
    .vaccinations(feed)
    .build()?;

    let mosy_header = std::iter::once("time,state".to_string())
        .chain((1..=n).map(|i| format!("patch{i}")))
        .collect::<Vec<_>>()
        .join(",");
    let streams = [
        StreamDescriptor::new(dir.join("pfsi.csv"), StreamKey::Pfsi, PFSI_HEADER),
        StreamDescriptor::new(dir.join("mosy.csv"), StreamKey::Mosquito, &mosy_header),
        StreamDescriptor::new(dir.join("vaxx.csv"), StreamKey::Vaccination, VAXX_HEADER),
    ];
    let mut log = LoggingAggregator::open(&streams, n, config.flush_every)?;

    let result = sim.run(&mut log);
    // A sink failure is the root cause of an aborted run; report it first.
    log.finish().context("writing logs")?;
    result?;
    Ok(sim.summary.clone())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose)?;

    let scenario = match &args.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    info!(
        "{} patches × {} residents, {} days, {} replicate(s)",
        scenario.n_patches, scenario.residents_per_patch, args.days, args.replicates
    );

    let mut root = SimRng::new(args.seed);
    let seeds: Vec<u64> = match args.replicates {
        1 => vec![args.seed],
        r => (0..r).map(|i| root.child(i as u64).next_seed()).collect(),
    };

    let t0 = Instant::now();
    let summaries: Vec<RunSummary> = seeds
        .par_iter()
        .enumerate()
        .map(|(i, &seed)| {
            let mut config = SimConfig::new(args.days, seed);
            config.verbose = args.verbose;
            let dir = if seeds.len() == 1 { args.output_dir.clone() } else { args.output_dir.join(format!("rep_{i}")) };
            run_once(&scenario, config, &dir, args.vaccinations.as_deref())
                .with_context(|| format!("replicate {i} (seed {seed})"))
        })
        .collect::<Result<_>>()?;

    println!("Simulation complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!("{:<10} {:>12} {:>12} {:>12}", "Replicate", "Infections", "Treatments", "Vaccinated");
    println!("{}", "-".repeat(50));
    for (i, s) in summaries.iter().enumerate() {
        println!("{:<10} {:>12} {:>12} {:>12}", i, s.infections, s.treatments, s.vaccinations);
    }
    Ok(())
}
