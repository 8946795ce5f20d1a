use std::{future::IntoFuture, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tokio::{net::TcpListener, time::timeout};

use crate::{
    config::AppConfig,
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    model::Models,
    web::{self, AppState},
};

pub struct SpamMonitorApp {
    config: AppConfig,
    state: Arc<AppState>,
    shutdown: Shutdown,
}

impl SpamMonitorApp {
    /// Loads the model artifacts. Any failure here is fatal for the process.
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, shutdown: Shutdown) -> Result<Self> {
        let models = Models::load(&paths.vectorizer_path, &paths.classifier_path)
            .context("모델 아티팩트를 불러오지 못했습니다")?;
        let state = Arc::new(AppState::new(models, config.storage, &config.timezone));
        Ok(Self {
            config,
            state,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let SpamMonitorApp {
            config,
            state,
            shutdown,
        } = self;

        let listener = TcpListener::bind(config.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", config.bind_addr))?;
        tracing::info!(
            target: "app",
            addr = %config.bind_addr,
            per_message_mb = config.storage.per_message_mb,
            threshold_mb = config.storage.alert_threshold_mb,
            "스팸 저장공간 모니터 시작"
        );

        let router = web::router(state, config.web.max_body_bytes);
        let mut server = Box::pin(
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown.subscribe().wait())
                .into_future(),
        );

        let mut shutdown_listener = shutdown.subscribe();
        let shutdown_timeout = Duration::from_secs(5);

        tokio::select! {
            res = &mut server => {
                res.context("HTTP server terminated unexpectedly")?;
                tracing::info!(target: "app", "HTTP 서버 정상 종료");
                return Ok(());
            }
            _ = shutdown_listener.notified() => {
                tracing::info!(target: "app", "종료 신호 감지 (CTRL+C / SIGTERM)");
            }
        }

        match timeout(shutdown_timeout, &mut server).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::error!(target: "app", ?err, "HTTP 서버 종료 중 오류");
            }
            Err(_) => {
                tracing::warn!(
                    target: "app",
                    "HTTP server did not drain within {:?}; forcing exit",
                    shutdown_timeout
                );
            }
        }

        tracing::info!(target: "app", "모니터 종료 완료");
        Ok(())
    }
}
