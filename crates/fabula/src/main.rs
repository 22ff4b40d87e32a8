use clap::Parser;
use fabula::{summarize, Cli, Commands, CorpusDriver, Gateway, JsonExporter};
use std::path::PathBuf;
use std::sync::atomic::Ordering;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            corpus,
            provider,
            model,
            sample,
            output,
            verbose,
        } => {
            init_tracing(verbose);
            analyze(corpus, &provider, &model, sample, output).await?;
        }

        Commands::Status { provider, model } => {
            init_tracing(false);
            status(&provider, &model).await?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

async fn analyze(
    corpus: PathBuf,
    provider: &str,
    model: &str,
    sample: Option<usize>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = fabula::resolve_config(provider, model)?;
    config.require_credentials()?;
    let gateway = Gateway::connect(&config).await;
    if !gateway.ready() {
        return Err(format!(
            "backend {provider}/{model} is not ready; check credentials or server availability"
        )
        .into());
    }

    let exporter = match output {
        Some(path) => JsonExporter::new(path),
        None => JsonExporter::for_corpus(&corpus, gateway.model()),
    };
    let artifact = exporter.path().to_path_buf();

    println!("📖 Analyzing corpus at {}...", corpus.display());

    let driver = CorpusDriver::new(&gateway).with_checkpoint(Box::new(exporter));

    // Ctrl+C stops the run between documents; the last persisted artifact
    // stays valid.
    let cancel = driver.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let results = driver.run(&corpus, sample).await?;
    let summary = summarize(&results, gateway.model());

    println!("✓ Analyzed {} books", summary.metadata.total_books);
    println!("  Scenes: {}", summary.metadata.total_scenes);
    println!("  Goals: {}", summary.metadata.total_goals);
    println!("  Conflicts: {}", summary.metadata.total_conflicts);
    println!("  Artifact: {}", artifact.display());

    Ok(())
}

async fn status(provider: &str, model: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = fabula::resolve_config(provider, model)?;
    let gateway = Gateway::connect(&config).await;
    let status = gateway.status();

    println!("Provider: {}", status.provider);
    println!("Model: {}", status.model);
    println!("Ready: {}", if status.ready { "yes" } else { "no" });

    Ok(())
}
