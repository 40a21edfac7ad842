use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod pagination;
pub mod routes;
pub mod state;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use routes::{
    create_car_handler, delete_car_handler, list_cars_handler, popular_handler, rate_handler,
    root_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/cars/", post(create_car_handler).get(list_cars_handler))
        .route("/cars/{id}/", delete(delete_car_handler))
        .route("/rate/", post(rate_handler))
        .route("/popular/", get(popular_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve<C: ConfigProvider>(config: &C) -> Result<()> {
    info!("Initializing state...");
    let state = AppState::from_config(config).await?;

    let app = router(state);

    let address = config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
