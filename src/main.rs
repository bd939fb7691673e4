use clap::Parser;

use flowcheck::cli::commands::{cmd_check, cmd_list, cmd_run};
use flowcheck::cli::config::{Cli, Commands, load_file_config, resolve_config};

fn main() {
    let cli = Cli::parse();
    let file = load_file_config(cli.config.as_deref());
    let config = resolve_config(&cli, &file);

    match &cli.command {
        Commands::Run { scenario } => match cmd_run(scenario, &config, cli.verbose) {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
        Commands::List => cmd_list(),
        Commands::Check => {
            if let Err(e) = cmd_check(&config) {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        }
    }
}
