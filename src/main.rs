// src/main.rs

use std::process::ExitCode;
use std::sync::Arc;

use pagespeed_report::api::{build_router, AppState};
use pagespeed_report::config::AppConfig;
use pagespeed_report::error::AppError;
use pagespeed_report::lifecycle;
use pagespeed_report::service::{ChromiumRenderer, PdfRenderer, ReportService};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            lifecycle::init_logging("info");
            tracing::error!("[BOOT] {}", e);
            return ExitCode::FAILURE;
        }
    };
    lifecycle::init_logging(&config.log_level);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("[BOOT] {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    let renderer = ChromiumRenderer::new(config.chromium_path.clone(), config.pdf_timeout);
    if renderer.is_available() {
        tracing::info!("[PDF] Using browser at {}", renderer.browser_path().display());
    } else {
        tracing::warn!(
            "[PDF] Browser {} not found; set CHROMIUM_PATH to enable PDF output",
            renderer.browser_path().display()
        );
    }
    let renderer: Arc<dyn PdfRenderer> = Arc::new(renderer);

    let addr = config.bind_addr();
    let env = config.app_env.clone();
    let state = AppState::new(config, ReportService::new(renderer));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", addr, e))?;

    tracing::info!("[BOOT] Listening on {} ({})", addr, env);
    axum::serve(listener, app)
        .with_graceful_shutdown(lifecycle::shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    tracing::info!("[BOOT] Server stopped");
    Ok(())
}
