use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use relister_cli::commands::publish::SessionOptions;
use relister_cli::commands::source::SourceArgs;
use relister_cli::{CategoryArg, OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relister")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Keep marketplace listings fresh by removing and republishing them",
    long_about = "Relister deletes each listing's live copy, fills the create-listing form again \
                  from a listings file, publishes it and shares it into the listing's groups."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove and republish every listing in a batch
    Publish {
        /// Listing category of the batch
        #[arg(short, long, value_enum)]
        category: CategoryArg,

        #[command(flatten)]
        source: SourceArgs,

        /// Settings file (JSON)
        #[arg(long, value_name = "FILE", env = "RELISTER_CONFIG")]
        config: Option<PathBuf>,

        /// Path to the Chrome binary
        #[arg(long, value_name = "PATH", env = "RELISTER_CHROME_PATH")]
        chrome_path: Option<PathBuf>,

        /// Saved profile holding the signed-in session
        #[arg(long, value_name = "NAME", env = "RELISTER_PROFILE", conflicts_with = "temp")]
        profile: Option<String>,

        /// Use a throwaway profile (you will have to sign in)
        #[arg(long)]
        temp: bool,

        /// Run Chrome without a window
        #[arg(long)]
        headless: bool,

        /// Chrome remote debugging port
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Show the form each listing would get, without a browser
    Plan {
        /// Listing category of the batch
        #[arg(short, long, value_enum)]
        category: CategoryArg,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage saved Chrome profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  \
        bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  \
        bash:  relister completion --shell bash >> ~/.bashrc\n  \
        zsh:   relister completion --shell zsh > \"${fpath[1]}/_relister\"\n  \
        fish:  relister completion --shell fish > ~/.config/fish/completions/relister.fish")]
    Completion {
        /// Shell to generate the script for
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List all saved profiles
    List,

    /// Delete a saved profile
    Delete {
        /// Profile name
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Publish {
            category,
            source,
            config,
            chrome_path,
            profile,
            temp,
            headless,
            port,
        } => {
            let options = SessionOptions {
                config,
                chrome_path,
                profile,
                temp_profile: temp,
                headless,
                port,
            };
            commands::publish::execute(&source, category.into(), &options, cli.format)
        }
        Commands::Plan { category, source } => {
            commands::plan::execute(&source, category.into(), cli.format)
        }
        Commands::Profile { command } => match command {
            ProfileCommands::List => commands::profile::list(),
            ProfileCommands::Delete { name } => commands::profile::delete(&name),
        },
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "relister=debug,relister_cli=debug,relister_core=debug,relister_engine=debug,relister_browser=debug",
        )
    } else {
        EnvFilter::new(
            "relister=info,relister_cli=info,relister_core=info,relister_engine=info,relister_browser=info",
        )
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
