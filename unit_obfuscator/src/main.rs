use clap::Parser;
use prometheus::Registry;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{debug, info};
use unit_obfuscator::config::{load_config, CliOverrides};
use unit_obfuscator::errors::AppError;
use unit_obfuscator::logger;
use unit_obfuscator::metrics::{self, Metrics};
use unit_obfuscator::obfuscator::{Obfuscator, StreamSummary};

#[derive(Parser)]
#[command(name = "unit-obfuscator", version, about = "Re-express measurements in obscure historical units")]
struct Cli {
    /// Measurements such as "5 meters"; stdin is read when none are given
    inputs: Vec<String>,

    /// Obfuscate a file line by line
    #[arg(short, long, conflicts_with = "inputs")]
    file: Option<String>,

    /// Config file (toml, json, yaml, ...)
    #[arg(short, long)]
    config: Option<String>,

    /// substring | exact-term
    #[arg(long)]
    matching: Option<String>,

    /// propagate | reject
    #[arg(long)]
    amounts: Option<String>,

    /// text | json
    #[arg(long)]
    output: Option<String>,

    #[arg(long)]
    log_json: bool,

    /// Print prometheus counters to stderr on exit
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logger::init_logging(cli.log_json);

    let overrides = CliOverrides {
        matching: cli.matching.clone(),
        amounts: cli.amounts.clone(),
        output: cli.output.clone(),
    };
    let cfg = load_config(cli.config.as_deref(), &overrides)?;
    debug!(?cfg, "loaded configuration");

    let registry = Registry::new();
    let metrics = Metrics::new(&registry)?;
    let obfuscator = Obfuscator::new(cfg.obfuscator_options());

    let summary = if !cli.inputs.is_empty() {
        let mut summary = StreamSummary::default();
        let mut stdout = tokio::io::stdout();
        for input in &cli.inputs {
            summary.lines += 1;
            let obfuscation = obfuscator.obfuscate(input)?;
            summary.obfuscated += 1;
            if obfuscation.is_degraded() {
                summary.degraded += 1;
            }
            let record = obfuscation.to_record(input, cfg.output)?;
            stdout.write_all(record.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.flush().await?;
        summary
    } else if let Some(path) = &cli.file {
        info!("Reading measurements from {}", path);
        let file = tokio::fs::File::open(path).await?;
        obfuscator
            .obfuscate_stream(BufReader::new(file), tokio::io::stdout(), cfg.output)
            .await?
    } else {
        obfuscator
            .obfuscate_stream(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), cfg.output)
            .await?
    };

    metrics.record(&summary);
    info!(
        lines = summary.lines,
        obfuscated = summary.obfuscated,
        degraded = summary.degraded,
        rejected = summary.rejected,
        "done"
    );

    if cli.metrics {
        eprint!("{}", metrics::render(&registry)?);
    }
    Ok(())
}
