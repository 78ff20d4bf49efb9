//! CLI entry point - the composition root.
//!
//! Settings come from flags, `PETASSIST_*` environment variables and
//! `.env`; command dispatch routes to handlers which delegate to
//! `AssistCore`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use petassist_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let config = CliConfig::from_args(&cli.backend)?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::Status { targets } => handlers::status::execute(&ctx, &targets).await,
        Commands::Classify { image, json } => handlers::classify::execute(&ctx, &image, json).await,
        Commands::Improve { text, context } => handlers::improve::execute(&ctx, text, context).await,
        Commands::Proofread { text } => handlers::proofread::execute(&ctx, text).await,
        Commands::Translate { text, to, from } => {
            handlers::translate::execute(&ctx, text, &to, from.as_deref()).await
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env before parsing so clap's env fallbacks see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}
