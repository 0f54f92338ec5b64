use anyhow::{Context, Result};
use clap::Parser;
use semantic_log::{error_scope, CategoryTable, Logger, SinkConfig};
use std::thread::sleep;
use std::time::Duration;

/// Walks a small validation run through every builtin category.
#[derive(Parser)]
struct Args {
    /// Stream name of the logger
    #[arg(short, long, default_value = "demo")]
    name: String,
    /// Strip color markup
    #[arg(long)]
    no_color: bool,
    /// JSON file with extra categories
    #[arg(short, long)]
    categories: Option<String>,
    /// Pause between phases
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Threshold above which a record is accepted
    #[arg(long, default_value_t = 10)]
    threshold: i64,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = SinkConfig::from_env().context("Invalid SEMLOG_* environment")?;
    if args.no_color {
        config = config.without_markup();
    }

    let categories = match &args.categories {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read categories from {}", path))?;
            CategoryTable::from_json(&json).context("Failed to parse categories")?
        }
        None => CategoryTable::builtin(),
    };

    let logger = Logger::builder(&args.name)
        .sink_config(config)
        .categories(categories)
        .build();
    let pause = || sleep(Duration::from_millis(args.delay_ms));

    logger.config(format!("Mode: test | Threshold={}", args.threshold));
    logger.meta("Dataset: sample_data.csv | Records=3");
    logger.read("Loading dataset");
    pause();

    logger.stage("Validating data");
    let sample_data: [i64; 3] = [4, 12, 15];
    let mut accepted = Vec::new();

    for (i, value) in sample_data.iter().enumerate() {
        logger.step(format!("Record {}: {}", i + 1, value));
        logger.check(format!("Type={}", std::any::type_name::<i64>()));

        if *value > args.threshold {
            logger.substep("Above threshold");
            accepted.push(*value);
            logger.result(format!("{} accepted", value));
        } else {
            logger.substep("Below threshold");
            logger.warning(format!("{} ignored", value));
        }
        pause();
    }

    let ignored = sample_data.len() - accepted.len();
    let ratio = accepted.len() as f64 / sample_data.len() as f64;
    logger.metric(format!(
        "accepted={} ignored={} ratio={:.2}",
        accepted.len(),
        ignored,
        ratio
    ));
    logger.info("Validation done");
    pause();

    logger.stage("Computing summary");
    let total: i64 = accepted.iter().sum();
    let mean = total as f64 / accepted.len().max(1) as f64;
    logger.result(format!("Mean={:.2}", mean));
    logger.write("Saved results");

    // zero divisor forces the failure path
    if let Err(err) = divide(total, 0) {
        let _scope = error_scope(&err);
        logger.error(format!("Failure: {}", err));
        logger.debug("Division error test");
    }
    pause();

    for name in logger.categories().names() {
        if !semantic_log::BUILTIN_CATEGORIES
            .iter()
            .any(|(builtin, _)| *builtin == name)
        {
            logger.log_as(name, "Custom category active")?;
        }
    }

    logger.alert("Run completed with handled exception");
    Ok(())
}

fn divide(numerator: i64, denominator: i64) -> Result<i64> {
    numerator
        .checked_div(denominator)
        .context("division by zero")
}
