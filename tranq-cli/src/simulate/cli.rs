use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const SIMULATE_CMD: &str = "simulate";

pub fn create_simulate_cli() -> Command {
    Command::new(SIMULATE_CMD)
        .about("Simulate a batch of labeled training reads from a TOML config.")
        .arg(
            arg!(--config <config>)
                .help("Path to the simulation config (see `tranq config`)")
                .required(true),
        )
        .arg(arg!(--output <output>).help("Output path; `.gz` compresses. Overrides the config"))
        .arg(
            arg!(--reads <reads>)
                .help("Number of reads before augmentation. Overrides the config")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--threads <threads>)
                .help("Worker threads. Overrides the config")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--seed <seed>)
                .help("Random seed. Overrides the config")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show a progress bar")
                .action(ArgAction::SetTrue),
        )
}
