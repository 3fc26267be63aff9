//! Server runner: config loading, adapter wiring and the serve loop

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::application::ports::{ConfigStore, JobSpawner, TaskStore, UploadStaging};
use crate::application::{TranscriptionService, TranscriptionWorker};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::http::{create_router, AppState};
use crate::infrastructure::{
    GeminiTranscriberFactory, InMemoryTaskStore, LocalUploadStaging, MarkdownRenderer,
    TokioJobSpawner, TomlConfigStore,
};

use super::signals::shutdown_signal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How long in-flight transcriptions may run after a shutdown signal
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Load and merge configuration: defaults < file < env/CLI.
///
/// An explicit `config_path` must exist; otherwise the file is optional.
pub async fn load_merged_config(
    config_path: Option<PathBuf>,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let store = match config_path {
        Some(path) => TomlConfigStore::with_path(path),
        None => TomlConfigStore::discover(),
    };
    let file_config = store.load().await?;

    let config = AppConfig::defaults().merge(file_config).merge(cli_config);
    config.validate()?;
    Ok(config)
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(config: AppConfig) -> ExitCode {
    match serve(config).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn serve(config: AppConfig) -> std::io::Result<()> {
    let spawner = Arc::new(TokioJobSpawner::new());
    let state = build_state(&config, Arc::clone(&spawner) as Arc<dyn JobSpawner>);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host_or_default(), config.port_or_default());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        model = %config.model_or_default(),
        upload_dir = %config.upload_dir_or_default().display(),
        retention = %config.retention_or_default(),
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let aborted = spawner.drain(SHUTDOWN_GRACE).await;
    if aborted > 0 {
        tracing::warn!(aborted, "Shut down with unfinished transcriptions");
    } else {
        tracing::info!("Shut down cleanly");
    }
    Ok(())
}

/// Wire adapters into the shared handler state
pub fn build_state(config: &AppConfig, spawner: Arc<dyn JobSpawner>) -> AppState {
    let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::with_retention(
        config.retention_or_default(),
    ));
    let staging: Arc<dyn UploadStaging> =
        Arc::new(LocalUploadStaging::new(config.upload_dir_or_default()));

    let mut transcribers = GeminiTranscriberFactory::new(
        config.api_key().map(str::to_string),
        config.model_or_default(),
    );
    if let Some(base_url) = &config.api_base_url {
        transcribers = transcribers.with_base_url(base_url.clone());
    }
    if !transcribers.has_api_key() {
        tracing::warn!("No API key configured; uploads are rejected until one is set");
    }

    let worker = TranscriptionWorker::new(
        Arc::clone(&store),
        Arc::clone(&staging),
        Arc::new(MarkdownRenderer::new()),
        config.poll_policy(),
    );
    let service = TranscriptionService::new(
        store,
        staging,
        spawner,
        Arc::new(transcribers),
        worker,
    );

    AppState::new(Arc::new(service), config.max_upload_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_config_file_is_merged_under_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        std::fs::write(&path, "port = 9000\nhost = \"0.0.0.0\"\n").unwrap();

        let cli = AppConfig {
            port: Some(7000),
            ..Default::default()
        };
        let config = load_merged_config(Some(path), cli).await.unwrap();

        assert_eq!(config.port_or_default(), 7000);
        assert_eq!(config.host_or_default(), "0.0.0.0");
        assert_eq!(config.model_or_default(), "gemini-flash-latest");
    }

    #[tokio::test]
    async fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        std::fs::write(&path, "poll_backoff = \"linear\"\n").unwrap();

        let err = load_merged_config(Some(path), AppConfig::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_merged_config(Some(dir.path().join("nope.toml")), AppConfig::empty()).await;
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
