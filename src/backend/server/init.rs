/**
 * Server Initialization
 *
 * This module wires configuration, store, services, router and reaper
 * together.
 *
 * # Initialization Process
 *
 * 1. Open the store named by the configuration
 * 2. Build the presence tracker and message board over it
 * 3. Create the router
 * 4. Prepare (but do not start) the reaper
 *
 * The caller starts the reaper with `Reaper::spawn` once it is ready to
 * serve, and stops it on shutdown.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::presence::clock::{Clock, SystemClock};
use crate::backend::presence::reaper::Reaper;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{ChatStore, StoreError};

/// A fully wired server that has not started yet
pub struct App {
    pub router: Router<()>,
    pub reaper: Reaper,
    pub state: AppState,
    pub store: Arc<dyn ChatStore>,
}

/// Create the application from configuration using the system clock
pub async fn create_app(config: &ServerConfig) -> Result<App, StoreError> {
    tracing::info!("Initializing chat room backend");

    let store = load_store(config).await?;
    Ok(build_app(config, store, Arc::new(SystemClock)))
}

/// Create the application over an existing store and clock
pub fn build_app(config: &ServerConfig, store: Arc<dyn ChatStore>, clock: Arc<dyn Clock>) -> App {
    let state = AppState::new(store.clone(), clock);
    let router = create_router(state.clone());
    let reaper = Reaper::new(
        state.presence.clone(),
        config.reap_interval,
        config.inactivity_threshold,
    );

    tracing::info!("Router configured");

    App {
        router,
        reaper,
        state,
        store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_create_app_uses_configured_reap_schedule() {
        let config = ServerConfig::builder()
            .reap_interval(Duration::from_secs(3))
            .inactivity_threshold(Duration::from_secs(2))
            .build()
            .unwrap();

        let app = create_app(&config).await.unwrap();
        assert_eq!(app.reaper.interval(), Duration::from_secs(3));
        assert_eq!(app.reaper.threshold(), Duration::from_secs(2));
        assert!(app.state.presence.list_participants().await.unwrap().is_empty());
    }
}
