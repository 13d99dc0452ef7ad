use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use mailcheck_core::{classify, client::HttpCheckService, config::Config, Error};
use mailcheck_service::ServiceState;

#[tokio::main]
async fn main() -> Result<(), Error> {
    mailcheck_core::logging::init("mailcheck")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return Err(e);
        }
    };
    tracing::info!(mode = ?cfg.run_mode, "starting");

    let shutdown = CancellationToken::new();

    let service_task = if cfg.run_mode.runs_service() {
        let classifier = classify::from_config(&cfg)?;
        let listener = mailcheck_service::bind(cfg.service_bind)
            .await
            .map_err(|e| Error::Config(format!("cannot bind {}: {e}", cfg.service_bind)))?;
        let state = ServiceState::new(&cfg.api_key, classifier);
        Some(tokio::spawn(mailcheck_service::serve(
            listener,
            state,
            shutdown.clone(),
        )))
    } else {
        None
    };

    if cfg.run_mode.runs_bot() {
        let service = Arc::new(HttpCheckService::new(
            &cfg.service_url,
            &cfg.api_key,
            cfg.service_timeout,
        )?);
        let polled = mailcheck_telegram::router::run_polling(cfg.clone(), service).await;
        shutdown.cancel();
        polled.map_err(|e| Error::External(format!("telegram bot failed: {e}")))?;
    } else {
        tokio::signal::ctrl_c().await?;
        tracing::info!("interrupt received, shutting down");
        shutdown.cancel();
    }

    if let Some(task) = service_task {
        task.await
            .map_err(|e| Error::External(format!("service task failed: {e}")))??;
    }

    Ok(())
}
