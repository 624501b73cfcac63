//! Command line entry points for spam-rs
//!
//! ```bash
//! # Build data/processed_data.csv from data/raw/{spam,ham}
//! spam-rs preprocess
//!
//! # Fit TF-IDF + logistic regression and save model/spam_model.json
//! spam-rs train
//!
//! # Classify email.txt
//! spam-rs predict --file email.txt
//!
//! # Start the web form
//! spam-rs serve
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::dataset::Preprocessor;
use spam_rs::inference::{self, SpamDetector, Verdict};
use spam_rs::text::TextCleaner;
use spam_rs::trainer::{Trainer, TrainerConfig};
use spam_rs::web::WebServer;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Email spam classifier", long_about = None)]
struct Cli {
    /// Configuration file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the raw spam/ham folders into the dataset file
    Preprocess,
    /// Train the classifier and save the model bundle
    Train,
    /// Classify a single email file
    Predict {
        /// Email file (defaults to paths.email_path)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Serve the interactive form
    Serve,
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("spam_rs={},tower_http=info", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    init_logging(&config.logging);
    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));

    let paths = &config.paths;

    match cli.command {
        Commands::Preprocess => {
            let preprocessor = Preprocessor::new(TextCleaner::new(config.cleaner));
            let report = preprocessor
                .run(&paths.spam_dir, &paths.ham_dir, &paths.dataset_path)
                .context("Preprocessing failed")?;

            for skipped in report.skipped() {
                if let spam_rs::dataset::FileStatus::Skipped(reason) = &skipped.status {
                    println!("  skipped {}: {}", skipped.path.display(), reason);
                }
            }
            for folder in &report.folder_errors {
                println!("  {} folder not processed: {}", folder.label, folder.error);
            }
            println!("✓ Processed data saved to {}", report.output_path.display());
            println!(
                "  Total emails processed: {} (Spam: {}, Ham: {})",
                report.total(),
                report.spam_count,
                report.ham_count
            );
        }
        Commands::Train => {
            let trainer = Trainer::new(TrainerConfig::from(&config));
            let outcome = trainer
                .train_from_file(&paths.dataset_path, &paths.model_path)
                .context("Training failed")?;

            if let Some(report) = &outcome.report {
                println!("{}", report);
            }
            println!("✓ Model saved to {}", paths.model_path.display());
        }
        Commands::Predict { file } => {
            let email_path = file.unwrap_or_else(|| paths.email_path.clone());

            let detector = SpamDetector::load(&paths.model_path)?;
            let email = inference::load_email(&email_path)?;
            let prediction = detector.classify(&email)?;

            match prediction.verdict {
                Verdict::Spam => println!("🚫 This email is SPAM."),
                Verdict::NotSpam => println!("✅ This email is NOT SPAM."),
                Verdict::EmptyInput => println!("⚠️ {}", Verdict::EmptyInput.message()),
            }
        }
        Commands::Serve => {
            let detector = SpamDetector::load(&paths.model_path)
                .context("Failed to load model bundle")?;
            WebServer::new(detector, config.server.listen_addr.clone())
                .run()
                .await?;
        }
    }

    Ok(())
}
