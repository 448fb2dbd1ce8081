// Engine main entry point
use anyhow::{bail, Context};
use ratio_engine::config::EngineSettings;
use ratio_engine::error::EngineError;
use ratio_engine::services::StatementAnalyzer;
use ratio_engine::stages::StageKind;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: ratio-engine <statements.csv|statements.json> \
                     [--config <settings.json>] [--stage <name>]...";

// Unusable input files exit with 2, every other failure with 1.
const EXIT_INPUT_ERROR: u8 = 2;
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Default)]
struct CliArgs {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    stages: Vec<StageKind>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--stage" => {
                let name = args.next().context("--stage needs a stage name")?;
                parsed.stages.push(name.parse()?);
            }
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with("--") => bail!("unknown option {}\n{}", other, USAGE),
            other => {
                if parsed.input.is_some() {
                    bail!("only one input file is accepted\n{}", USAGE);
                }
                parsed.input = Some(PathBuf::from(other));
            }
        }
    }
    Ok(parsed)
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<EngineError>() {
        Some(engine_err) if engine_err.is_input_error() => EXIT_INPUT_ERROR,
        _ => EXIT_FAILURE,
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let input = args.input.context(USAGE)?;

    let settings = match &args.config {
        Some(path) => EngineSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::load_default()?,
    };

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting ratio engine...");

    let mut analyzer = StatementAnalyzer::new(settings);
    let table = analyzer.load_input(&input)?;
    let report = if args.stages.is_empty() {
        analyzer.analyze(&table)?
    } else {
        analyzer.analyze_stages(&table, &args.stages)?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
