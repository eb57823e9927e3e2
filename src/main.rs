//! Menugate command-line entry point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use menugate::cli::{self, output, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let json_output = cli.json;

    // Execute command
    let result = match cli.command {
        Commands::Check(args) => cli::commands::check::execute(args, json_output).await,
        Commands::Menus(args) => cli::commands::menus::execute(args, json_output).await,
        Commands::Header(args) => cli::commands::header::execute(args, json_output).await,
        Commands::Csrf(args) => cli::commands::csrf::execute(args, json_output).await,
        Commands::Rules(args) => cli::commands::rules::execute(args, json_output).await,
    };

    if let Err(e) = result {
        if json_output {
            let error_json = serde_json::json!({
                "error": true,
                "message": e.to_string()
            });
            eprintln!("{}", error_json);
        } else {
            output::error(&e.to_string());
        }
        std::process::exit(e.exit_code());
    }
}
