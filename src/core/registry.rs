use crate::core::validator::VehicleValidator;
use crate::domain::model::{NewCar, Page, PageRequest, RatedCar, MAX_NAME_LENGTH};
use crate::domain::ports::CarStore;
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;

/// Creates, lists and removes cars.
#[derive(Clone)]
pub struct CarRegistry {
    store: Arc<dyn CarStore>,
    validator: VehicleValidator,
}

impl CarRegistry {
    pub fn new(store: Arc<dyn CarStore>, validator: VehicleValidator) -> Self {
        Self { store, validator }
    }

    pub async fn create(&self, make: &str, model: &str) -> Result<RatedCar> {
        let make = normalize_name("make", make)?;
        let model = normalize_name("model", model)?;

        self.validator.validate(&make, &model).await?;

        let car = self.store.insert_car(&NewCar { make, model }).await?;
        tracing::info!("Created car {} ({} {})", car.id, car.make, car.model);
        Ok(car.into())
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<RatedCar>> {
        self.store.list_cars(page).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_car(id).await?;
        tracing::info!("Deleted car {}", id);
        Ok(())
    }
}

/// Trimmed, lowercased, non-empty and within the column width.
fn normalize_name(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::validation(field, "This field may not be blank."));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ServiceError::validation(
            field,
            format!(
                "Ensure this field has no more than {} characters.",
                MAX_NAME_LENGTH
            ),
        ));
    }
    Ok(value.to_lowercase())
}
