use crate::domain::ports::VehicleRegistry;
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;

/// Confirms a make/model pair against the vehicle registry.
#[derive(Clone)]
pub struct VehicleValidator {
    registry: Arc<dyn VehicleRegistry>,
}

impl VehicleValidator {
    pub fn new(registry: Arc<dyn VehicleRegistry>) -> Self {
        Self { registry }
    }

    /// One registry lookup per call.
    pub async fn validate(&self, make: &str, model: &str) -> Result<()> {
        let lookup = self.registry.models_for_make(make).await?;

        if lookup.count == 0 {
            tracing::debug!("Rejected unknown make '{}'", make);
            return Err(ServiceError::non_field(format!(
                "Unknown make '{}': not found in the vehicle registry",
                make
            )));
        }

        let wanted = model.to_lowercase();
        if lookup
            .results
            .iter()
            .any(|entry| entry.model_name.to_lowercase() == wanted)
        {
            return Ok(());
        }

        tracing::debug!("Rejected unknown model '{}' for make '{}'", model, make);
        Err(ServiceError::non_field(format!(
            "Unknown model '{}': not listed for make '{}' in the vehicle registry",
            model, make
        )))
    }
}
