use std::{sync::Arc, time::Duration};

use crate::{
    adapters::{SqliteStore, VpicClient},
    core::{CarRegistry, CarStore, ConfigProvider, RatingLedger, VehicleRegistry, VehicleValidator},
    utils::error::Result,
};

pub struct AppState {
    pub cars: CarRegistry,
    pub ratings: RatingLedger,
    pub page_size: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CarStore>,
        registry: Arc<dyn VehicleRegistry>,
        page_size: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            cars: CarRegistry::new(store.clone(), VehicleValidator::new(registry)),
            ratings: RatingLedger::new(store),
            page_size,
        })
    }

    pub async fn from_config<C: ConfigProvider>(config: &C) -> Result<Arc<Self>> {
        let store = SqliteStore::connect(config.database_url(), config.max_connections()).await?;
        let registry = VpicClient::new(
            config.registry_endpoint(),
            config.registry_timeout_seconds().map(Duration::from_secs),
        )?;

        Ok(Self::new(
            Arc::new(store),
            Arc::new(registry),
            config.page_size(),
        ))
    }
}
