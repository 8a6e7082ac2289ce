use clap::{Args, Parser, Subcommand};
use qm_alloy::KineticsModel;
use qm_app::{
    AppResult, RunKind, RunOutput, SimulationRequest, load_request, run, save_request,
    validate_request,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "qm-cli")]
#[command(
    about = "quenchmap CLI - TTT/CCT diagrams and phase fractions for steels",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request file and print the derived configuration
    Validate {
        /// Path to the request YAML or JSON file
        request_path: PathBuf,
    },
    /// Report transformation temperatures and the Ae3 carbon sweep
    Temps(RunArgs),
    /// Build the isothermal (TTT) diagram
    Ttt(RunArgs),
    /// Compute the critical cooling rates
    Ccr(RunArgs),
    /// Build the continuous-cooling (CCT) diagram
    Cct(RunArgs),
    /// Integrate phase fractions at the configured cooling rate
    Cool(RunArgs),
    /// Rewrite a request in the format of the output extension
    Convert {
        /// Request to read
        input: PathBuf,
        /// Destination (.json for JSON, YAML otherwise)
        output: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Path to the request YAML or JSON file
    request_path: PathBuf,
    /// Kinetics model (Li98 or Kirkaldy83)
    #[arg(long)]
    model: Option<KineticsModel>,
    /// Cooling rate override [degC/s]
    #[arg(long)]
    rate: Option<f64>,
    /// Fan sub-computations out over a thread pool
    #[arg(long)]
    parallel: bool,
    /// Worker threads for --parallel
    #[arg(long)]
    threads: Option<usize>,
    /// Output JSON file path (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { request_path } => cmd_validate(&request_path),
        Commands::Temps(args) => cmd_run(&args, RunKind::Temperatures),
        Commands::Ttt(args) => cmd_run(&args, RunKind::Ttt),
        Commands::Ccr(args) => cmd_run(&args, RunKind::Ccr),
        Commands::Cct(args) => cmd_run(&args, RunKind::Cct),
        Commands::Cool(args) => cmd_run(&args, RunKind::Cool),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
    }
}

fn cmd_validate(request_path: &Path) -> AppResult<()> {
    println!("Validating request: {}", request_path.display());
    let request = load_request(request_path)?;
    let config = validate_request(&request)?;
    println!("✓ Request is valid");
    println!("  Model: {}", config.model);
    println!(
        "  Ae3: {:.1} degC  Ae1: {:.1} degC  Bs: {:.1} degC  Ms: {:.1} degC",
        config.ae3_temp, config.ae1_temp, config.bs_temp, config.ms_temp
    );
    println!(
        "  Xfe: {:.4}  grain size: {}",
        config.equilibrium_ferrite_fraction, config.grain_size
    );
    Ok(())
}

fn cmd_run(args: &RunArgs, kind: RunKind) -> AppResult<()> {
    let mut request = load_request(&args.request_path)?;
    apply_args(&mut request, args);

    let output = run(&request, kind)?;
    write_output(&output, args.output.as_deref())
}

fn apply_args(request: &mut SimulationRequest, args: &RunArgs) {
    if let Some(model) = args.model {
        request.model = model;
    }
    if let Some(rate) = args.rate {
        request.overrides.cooling_rate = Some(rate);
    }
    if args.parallel {
        request.execution.parallel = true;
    }
    if args.threads.is_some() {
        request.execution.threads = args.threads;
    }
}

fn write_output(output: &RunOutput, path: Option<&Path>) -> AppResult<()> {
    let json = serde_json::to_string_pretty(output)?;
    match path {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("✓ Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> AppResult<()> {
    let request = load_request(input)?;
    validate_request(&request)?;
    save_request(output, &request)?;
    println!("✓ Saved {} to {}", request.name, output.display());
    Ok(())
}
