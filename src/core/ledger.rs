use crate::domain::model::{NewRating, PopularCar, Rating, MAX_RATING, MIN_RATING};
use crate::domain::ports::CarStore;
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;

pub const POPULAR_LIMIT: i64 = 10;

/// Records ratings and ranks cars by how often they were rated.
#[derive(Clone)]
pub struct RatingLedger {
    store: Arc<dyn CarStore>,
}

impl RatingLedger {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, car_id: i64, rating: i64) -> Result<Rating> {
        if rating < MIN_RATING {
            return Err(ServiceError::validation(
                "rating",
                format!("Ensure this value is greater than or equal to {}.", MIN_RATING),
            ));
        }
        if rating > MAX_RATING {
            return Err(ServiceError::validation(
                "rating",
                format!("Ensure this value is less than or equal to {}.", MAX_RATING),
            ));
        }

        let rating = self.store.insert_rating(&NewRating { car_id, rating }).await?;
        tracing::info!("Rated car {} with {}", rating.car_id, rating.rating);
        Ok(rating)
    }

    pub async fn popular(&self, limit: i64) -> Result<Vec<PopularCar>> {
        self.store.popular_cars(limit).await
    }
}
