use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use tranq_sim::SimulationConfig;

use super::cli::DEFAULT_CONFIG_OUT;

pub fn run_config(matches: &ArgMatches) -> Result<()> {
    let default_out = DEFAULT_CONFIG_OUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);

    SimulationConfig::example().to_file(Path::new(output))?;
    println!("Example config written to {}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use crate::config::cli::create_config_cli;

    #[test]
    fn test_run_config_writes_loadable_example() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("sim.toml");
        let matches = create_config_cli()
            .try_get_matches_from(["config", "--output", path.to_str().unwrap()])
            .unwrap();

        run_config(&matches).unwrap();

        let loaded = SimulationConfig::from_file(&path).unwrap();
        let example = SimulationConfig::example();
        assert_eq!(loaded.architecture, example.architecture);
        assert_eq!(loaded.errors, example.errors);
        assert_eq!(loaded.num_reads, example.num_reads);
        assert!(loaded.architecture().is_ok());
        assert!(loaded.to_params().is_ok());
    }
}
