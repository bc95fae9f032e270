use clap::Parser;
use tuido::cli::commands::Cli;
use tuido::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let env = match handlers::bootstrap(&cli) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        // No subcommand → launch TUI
        None => tuido::tui::run(&env.paths, &env.config),
        Some(command) => handlers::dispatch(command, &env, cli.json),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
