use clap::{Command, arg};

pub const CONFIG_CMD: &str = "config";
pub const DEFAULT_CONFIG_OUT: &str = "sim.toml";

pub fn create_config_cli() -> Command {
    Command::new(CONFIG_CMD)
        .about("Write an example simulation config to start from.")
        .arg(arg!(--output <output>).help("Where to write the config (default: sim.toml)"))
}
