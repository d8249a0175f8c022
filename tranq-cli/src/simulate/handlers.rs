use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;

use tranq_core::ReferencePool;
use tranq_sim::consts::DEFAULT_OUTPUT;
use tranq_sim::{BatchSimulator, BatchStats, SimulationConfig, write_batch};

/// Apply command line overrides on top of the loaded config.
fn apply_overrides(config: &mut SimulationConfig, matches: &ArgMatches) {
    if let Some(output) = matches.get_one::<String>("output") {
        config.output = Some(PathBuf::from(output));
    }
    if let Some(&reads) = matches.get_one::<usize>("reads") {
        config.num_reads = reads;
    }
    if let Some(&threads) = matches.get_one::<usize>("threads") {
        config.num_workers = threads;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if matches.get_flag("progress") {
        config.show_progress = true;
    }
}

pub fn run_simulate(matches: &ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .expect("A path to a config file is required.");

    let mut config = SimulationConfig::from_file(Path::new(config_path))?;
    apply_overrides(&mut config, matches);

    let architecture = config.architecture()?;
    let params = config.to_params()?;

    let references = match &config.reference {
        Some(path) => ReferencePool::from_fasta(path)
            .with_context(|| format!("Failed to load reference transcripts from {}", path.display()))?,
        None => {
            log::info!("No reference given, cDNA inserts will be random bases");
            ReferencePool::empty()
        }
    };

    let start = Instant::now();
    let batch = BatchSimulator::new(params).generate_training_reads(&architecture, &references)?;
    log::info!("Simulation took {:.2?}", start.elapsed());

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    write_batch(&batch, &output)?;

    BatchStats::from_batch(&batch).log_summary();

    Ok(())
}
