use clap::Parser;
use std::process;
use utcachex::cli::{Cli, run};
use utcachex::config::{Config, FileConfig};
use utcachex::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();
    let out = OutputFormatter::new(cli.verbose);

    let file = match FileConfig::load(cli.config.as_deref()) {
        Ok(file) => file,
        Err(e) => {
            out.critical(&e.to_string());
            process::exit(1);
        }
    };
    let config = Config::resolve(file, cli.overrides());

    if let Err(e) = run(&config, &out) {
        out.critical(&e.to_string());
        process::exit(1);
    }
}
