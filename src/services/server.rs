use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::create_router;
use crate::api::handlers::AppState;
use crate::config::settings::AppConfig;
use crate::ledger::MatchLedger;

pub struct ServerService {
    port: u16,
    config: AppConfig,
    ledger: MatchLedger,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig, ledger: MatchLedger) -> Self {
        Self { port, config, ledger }
    }

    pub async fn run(self) -> Result<()> {
        let state = Arc::new(AppState {
            ledger: self.ledger,
            config: self.config,
        });

        let app = create_router(state)
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
