mod commands;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blog-kit")]
#[command(version, about = "Site configuration for a static blog", long_about = None)]
struct Cli {
    /// Path to site.toml (defaults to the built-in configuration)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site directory with a site.toml
    Init {
        /// Directory to initialize (created if missing)
        path: PathBuf,

        /// Site display name
        #[arg(long)]
        name: Option<String>,

        /// Canonical site URL
        #[arg(long)]
        url: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// Overwrite an existing site.toml
        #[arg(long)]
        force: bool,
    },

    /// Validate site configuration and static pages
    Validate,

    /// Print the resolved site configuration
    Show {
        #[arg(short, long, value_enum, default_value = "toml")]
        format: OutputFormat,
    },

    /// Hand the configuration to the site generator
    Build {
        /// External generator program; receives the config as JSON on stdin.
        /// Without it, site.json is written into target-path.
        #[arg(long, value_name = "PROGRAM")]
        exec: Option<String>,

        /// Arguments passed to the --exec program
        #[arg(last = true, requires = "exec")]
        args: Vec<String>,

        /// Run the generator even if validation reports errors
        #[arg(long)]
        skip_validation: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Toml,
    Json,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Init {
            path,
            name,
            url,
            author,
            force,
        } => commands::init::run(path, name, url, author, force),
        Command::Validate => commands::validate::run(cli.config.as_deref()),
        Command::Show { format } => commands::show::run(cli.config.as_deref(), format),
        Command::Build {
            exec,
            args,
            skip_validation,
        } => commands::build::run(cli.config.as_deref(), exec, args, skip_validation),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "blog-kit", &mut io::stdout());
            Ok(())
        }
    }
}
