use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use todostore::config::{Config, ConfigOverrides};
use todostore::shell::Shell;

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore - in-memory todo list with an interactive shell")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/todostore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session reading commands from stdin
    Shell,

    /// Run a command script, then print the task list
    Run {
        /// Script with one shell command per line
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&ConfigOverrides {
        config_path: cli.config.clone(),
        log_level: cli.log_level.clone(),
        no_color: cli.no_color,
    })?;

    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut shell = Shell::new(&config);
            if interactive {
                writeln!(out, "TodoStore shell - type `help` for commands")?;
            }
            shell.run(stdin.lock(), &mut out, interactive)?;
        }
        Commands::Run { script } => {
            let file = File::open(&script).with_context(|| format!("Failed to open script {}", script.display()))?;
            let mut shell = Shell::quiet(&config);
            shell.run(BufReader::new(file), &mut out, false)?;
            write!(out, "{}", shell.renderer().list(shell.store()))?;
        }
    }

    Ok(())
}
