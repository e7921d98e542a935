mod commands;

use chianti_core::domain::ChiantiError;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_chianti_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            diagnostic.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("chianti-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// Diagnostics go to stderr so stdout stays machine-readable. `RUST_LOG`
/// takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when `run` is called more than once.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "chianti-rs",
    about = "Atomic-data utilities: ion naming, Burgess-Tully scaling and spline descaling"
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Database and spectroscopic names for an atomic number and ion stage
    Name(commands::NameArgs),
    /// Decompose an ion name such as fe_13 or fe_13d
    Parse(commands::ParseArgs),
    /// Data-file location of an ion inside a database tree
    Path(commands::PathArgs),
    /// Geometric dilution factor at the given radii (stellar radii)
    Dilute(commands::DiluteArgs),
    /// Fontes scaled 1s ionization cross-section
    Qrp(commands::QrpArgs),
    /// Burgess-Tully scaling of a physical series
    Scale(commands::ScaleArgs),
    /// Burgess-Tully descaling of a scaled series
    Descale(commands::ScaleArgs),
    /// Descale a 5-point spline table onto an energy grid (eV)
    Splom(commands::SplomArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Name(args) => commands::run_name_command(args),
        CliCommand::Parse(args) => commands::run_parse_command(args),
        CliCommand::Path(args) => commands::run_path_command(args),
        CliCommand::Dilute(args) => commands::run_dilute_command(args),
        CliCommand::Qrp(args) => commands::run_qrp_command(args),
        CliCommand::Scale(args) => {
            debug!(kind = ?args.kind, samples = args.energy.len(), "scaling series");
            commands::run_scale_command(args)
        }
        CliCommand::Descale(args) => {
            debug!(kind = ?args.kind, samples = args.energy.len(), "descaling series");
            commands::run_descale_command(args)
        }
        CliCommand::Splom(args) => commands::run_splom_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(ChiantiError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_chianti_error(&self) -> ChiantiError {
        match self {
            Self::Usage(message) => {
                ChiantiError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => ChiantiError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}

fn compute_error(error: impl Into<ChiantiError>) -> CliError {
    CliError::Compute(error.into())
}
