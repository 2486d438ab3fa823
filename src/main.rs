use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use promptline::{CliArgs, CliDriver, Config, DriverResult, RenderMode, SystemEnvironment};

#[derive(Parser, Debug)]
#[command(name = "promptline")]
#[command(about = "Render a shell prompt from a block configuration")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(long, global = true, help = "Config file (default: $PROMPTLINE_CONFIG)")]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "plain", help = "Shell to render for")]
    shell: String,

    #[arg(long, global = true, help = "Emit zsh PS1/RPROMPT assignments")]
    eval: bool,

    #[arg(long, global = true, help = "Working directory to report")]
    pwd: Option<PathBuf>,

    #[arg(long, global = true, help = "Append JSON logs to this file (default: $PROMPTLINE_LOG)")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the primary prompt (default)
    Primary,
    /// Print per-segment timings
    Debug,
    /// Render the tooltip for the command typed so far
    Tooltip { text: String },
    /// Render the transient prompt
    Transient,
}

impl Command {
    fn mode(self) -> RenderMode {
        match self {
            Command::Primary => RenderMode::Primary,
            Command::Debug => RenderMode::Debug,
            Command::Tooltip { text } => RenderMode::Tooltip(text),
            Command::Transient => RenderMode::Transient,
        }
    }
}

fn run(args: Args) -> DriverResult<()> {
    let config = Config::discover(args.config.as_deref())?;
    let mut env = SystemEnvironment::new(args.shell, CliArgs { eval: args.eval });
    if let Some(pwd) = args.pwd {
        env = env.with_working_dir(pwd);
    }
    let logger = CliDriver::file_logger(args.log_file.as_deref())?;
    let driver = CliDriver::new(config, Box::new(env)).with_logger(logger);
    let mode = args.command.map(Command::mode).unwrap_or(RenderMode::Primary);
    driver.run(&mode, &mut io::stdout().lock())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("promptline: {err}");
            ExitCode::FAILURE
        }
    }
}
