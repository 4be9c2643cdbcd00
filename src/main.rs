use clap::Parser;
use tasklists::cli::commands::Cli;
use tasklists::cli::handlers;
use tasklists::logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.quiet) {
        eprintln!("error: invalid log filter: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
