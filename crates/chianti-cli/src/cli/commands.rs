use super::{CliError, compute_error};
use anyhow::Context;
use chianti_core::domain::ChiantiError;
use chianti_core::naming::{
    IonDescriptor, spectroscopic_to_name, zion_to_name, zion_to_spectroscopic,
};
use chianti_core::physics::{dilute_all, qrp};
use chianti_core::scaling::{BurgessTullyKind, descale, load_splom_table, scale, splom_descale};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(clap::Args)]
pub(super) struct NameArgs {
    /// Atomic number
    #[arg(value_name = "Z")]
    atomic_number: u32,

    /// Ion stage (1 = neutral)
    #[arg(value_name = "ION")]
    stage: u32,

    /// Dielectronic-recombination variant of the ion
    #[arg(long, short)]
    dielectronic: bool,
}

#[derive(clap::Args)]
pub(super) struct ParseArgs {
    /// Ion name (`fe_13`, `fe_13d`) or spectroscopic notation (`"Fe XIII"`, `"Fe XIII d"`)
    #[arg(value_name = "ION")]
    ion: String,
}

#[derive(clap::Args)]
pub(super) struct PathArgs {
    /// Ion name such as fe_13
    #[arg(value_name = "ION")]
    ion: String,

    /// Database root; the current directory when omitted
    #[arg(long)]
    root: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct DiluteArgs {
    /// Distances from the stellar center in stellar radii
    #[arg(value_name = "RADIUS", required = true, allow_negative_numbers = true)]
    radii: Vec<f64>,
}

#[derive(clap::Args)]
pub(super) struct QrpArgs {
    /// Atomic number of the ionized element
    #[arg(long = "z", value_name = "Z")]
    atomic_number: u32,

    /// Impact energies in units of the ionization threshold
    #[arg(value_name = "U", required = true, allow_negative_numbers = true)]
    reduced_energy: Vec<f64>,

    /// Replace masked (u <= 1) entries with this value instead of null
    #[arg(long, allow_negative_numbers = true)]
    fill: Option<f64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(super) enum KindArg {
    Excitation,
    Ionization,
}

impl From<KindArg> for BurgessTullyKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Excitation => Self::Excitation,
            KindArg::Ionization => Self::Ionization,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct ScaleArgs {
    /// Collision strengths (excitation) or cross-sections (ionization)
    #[arg(long, value_enum, default_value = "excitation")]
    pub(super) kind: KindArg,

    /// Burgess-Tully scale factor f, 0 < f < 1
    #[arg(long, short = 'f')]
    scale_factor: f64,

    /// Threshold energy, same units as the energies
    #[arg(long, short = 't')]
    threshold: f64,

    /// Comma-separated energies
    #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
    pub(super) energy: Vec<f64>,

    /// Comma-separated values aligned with the energies
    #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
    value: Vec<f64>,
}

#[derive(clap::Args)]
pub(super) struct SplomArgs {
    /// Spline table JSON document
    #[arg(long)]
    table: PathBuf,

    /// Energies in eV
    #[arg(value_name = "ENERGY", required = true, allow_negative_numbers = true)]
    energies: Vec<f64>,
}

#[derive(Serialize)]
struct NameReport {
    name: String,
    spectroscopic: Option<String>,
}

#[derive(Serialize)]
struct ParseReport {
    name: String,
    spectroscopic: Option<String>,
    #[serde(flatten)]
    ion: IonDescriptor,
}

#[derive(Serialize)]
struct PathReport {
    directory: PathBuf,
    filename: PathBuf,
}

#[derive(Serialize)]
struct SplomReport<'a> {
    energies: &'a [f64],
    omega: Vec<Vec<f64>>,
}

pub(super) fn run_name_command(args: NameArgs) -> Result<i32, CliError> {
    let name = zion_to_name(args.atomic_number, args.stage, args.dielectronic).ok_or_else(|| {
        CliError::Compute(ChiantiError::input_validation(
            "INPUT.ION_STAGE",
            format!(
                "no ion with Z={} and stage {}; stages run from 1 to Z+1 for Z in 1..=30",
                args.atomic_number, args.stage
            ),
        ))
    })?;
    let spectroscopic = zion_to_spectroscopic(args.atomic_number, args.stage, args.dielectronic);
    print_json(&NameReport {
        name,
        spectroscopic,
    })
}

pub(super) fn run_parse_command(args: ParseArgs) -> Result<i32, CliError> {
    let ion = parse_ion_argument(&args.ion)?;
    print_json(&ParseReport {
        name: ion.name(),
        spectroscopic: ion.spectroscopic(),
        ion,
    })
}

pub(super) fn run_path_command(args: PathArgs) -> Result<i32, CliError> {
    let ion = IonDescriptor::parse(&args.ion).map_err(compute_error)?;
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    print_json(&PathReport {
        directory: ion.directory(&root),
        filename: ion.filename(&root),
    })
}

pub(super) fn run_dilute_command(args: DiluteArgs) -> Result<i32, CliError> {
    print_json(&dilute_all(&args.radii))
}

pub(super) fn run_qrp_command(args: QrpArgs) -> Result<i32, CliError> {
    let series = qrp(args.atomic_number, &args.reduced_energy);
    debug!(
        z = args.atomic_number,
        samples = series.len(),
        masked = series.len() - series.valid_count(),
        "evaluated qrp"
    );
    match args.fill {
        Some(fill) => print_json(&series.filled(fill)),
        None => print_json(&series.as_slice()),
    }
}

pub(super) fn run_scale_command(args: ScaleArgs) -> Result<i32, CliError> {
    let scaled = scale(
        args.kind.into(),
        &args.energy,
        &args.value,
        args.scale_factor,
        args.threshold,
    )
    .map_err(compute_error)?;
    print_json(&scaled)
}

pub(super) fn run_descale_command(args: ScaleArgs) -> Result<i32, CliError> {
    let physical = descale(
        args.kind.into(),
        &args.energy,
        &args.value,
        args.scale_factor,
        args.threshold,
    )
    .map_err(compute_error)?;
    print_json(&physical)
}

pub(super) fn run_splom_command(args: SplomArgs) -> Result<i32, CliError> {
    let table = load_splom_table(&args.table).map_err(compute_error)?;
    let omega = splom_descale(&table, &args.energies).map_err(compute_error)?;
    print_json(&SplomReport {
        energies: &args.energies,
        omega: omega.to_rows(),
    })
}

/// Accepts database names and, when the argument contains whitespace,
/// spectroscopic notation with an optional trailing `d`.
fn parse_ion_argument(raw: &str) -> Result<IonDescriptor, CliError> {
    let mut parts = raw.split_whitespace();
    let (Some(element), Some(numeral)) = (parts.next(), parts.next()) else {
        return IonDescriptor::parse(raw).map_err(compute_error);
    };

    let dielectronic = match parts.next() {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("d") && parts.next().is_none() => true,
        Some(_) => {
            return Err(CliError::Usage(format!(
                "unrecognized spectroscopic notation '{raw}'; expected e.g. 'Fe XIII' or 'Fe XIII d'"
            )));
        }
    };

    let name = spectroscopic_to_name(element, numeral).map_err(compute_error)?;
    let ion = IonDescriptor::parse(&name).map_err(compute_error)?;
    IonDescriptor::new(ion.atomic_number, ion.stage, dielectronic).map_err(compute_error)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<i32, CliError> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(0)
}
