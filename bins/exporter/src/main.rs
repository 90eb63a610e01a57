//! Zeugnis report exporter
//!
//! Exports and compiles the reports of one class. The job is read from
//! configuration, there are no command line flags:
//!
//!   ZEUGNIS__JOB__CLASS_NAME=5a ZEUGNIS__JOB__POLICY=skip_compiled exporter
//!
//! A JSON summary of the batch is printed to stdout.

use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zeugnis_core::{ExportError, ExportOutcome, ExportRequest, ReportEngine};
use zeugnis_db::{RecordRepository, connect};
use zeugnis_shared::{AppConfig, AppError};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zeugnis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(outcome) => {
            match serde_json::to_string_pretty(&outcome) {
                Ok(summary) => println!("{summary}"),
                Err(err) => warn!(error = %err, "Failed to render summary"),
            }
            if outcome.is_complete() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            let app_error = classify(err);
            error!(code = app_error.error_code(), "{app_error}");
            ExitCode::from(u8::try_from(app_error.exit_code()).unwrap_or(1))
        }
    }
}

/// Maps a failed run onto the application error that decides the exit code.
fn classify(err: anyhow::Error) -> AppError {
    match err.downcast::<ExportError>() {
        Ok(export_error) => AppError::from(export_error),
        Err(other) => match other.downcast::<AppError>() {
            Ok(app_error) => app_error,
            Err(other) => AppError::Internal(format!("{other:#}")),
        },
    }
}

async fn run() -> anyhow::Result<ExportOutcome> {
    let config = AppConfig::load()
        .map_err(|e| AppError::Configuration(format!("Failed to load configuration: {e}")))?;
    let job = config.job.as_ref().ok_or_else(|| {
        AppError::Configuration(
            "No export job configured (set job.class_name and job.policy)".to_string(),
        )
    })?;
    let request = ExportRequest::from(job);

    let db = connect(&config.database.url, config.database.max_connections)
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect to database: {e}")))?;
    info!("Connected to database");

    let store = RecordRepository::new(db);
    let engine = ReportEngine::from_config(&config);
    let outcome = engine.generate(&store, &request).await?;

    info!(
        class = %request.class_name,
        exported = outcome.data_files.len(),
        compiled = outcome.compiled.len(),
        failed = outcome.failures.len(),
        skipped = outcome.skipped.len(),
        "Export finished"
    );
    Ok(outcome)
}
