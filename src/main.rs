use anyhow::Result;
use deviq::cli::{self, Commands};
use deviq::commands::{self, GlobalOptions};

// Main orchestrator function
fn main() -> Result<()> {
    let cli = cli::parse_args();
    deviq::observability::init_tracing(cli.verbosity);

    let globals = GlobalOptions {
        config: cli.config,
        templates: cli.templates,
    };

    match cli.command {
        Commands::Score { args } => commands::score::score_assessment(&globals, &args),
        Commands::Finalize { args, force } => {
            commands::finalize::finalize_assessment(&globals, &args, force)
        }
        Commands::Recommend { args, max, types } => {
            commands::recommend::recommend(&globals, &args, max, types)
        }
        Commands::Init { force } => commands::init::init_config(force),
    }
}
