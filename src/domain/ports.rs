use crate::domain::model::{
    Car, ModelLookup, NewCar, NewRating, Page, PageRequest, PopularCar, RatedCar, Rating,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn database_url(&self) -> &str;
    fn max_connections(&self) -> u32;
    fn registry_endpoint(&self) -> &str;
    fn registry_timeout_seconds(&self) -> Option<u64>;
    fn page_size(&self) -> usize;
}

/// Third-party vehicle registry queried when a car is submitted.
#[async_trait]
pub trait VehicleRegistry: Send + Sync {
    async fn models_for_make(&self, make: &str) -> Result<ModelLookup>;
}

/// Persistent store for cars and their ratings.
///
/// Implementations enforce uniqueness of `(make, model)` and remove a
/// car's ratings together with the car.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Fails with `UniqueConstraintError` when the pair already exists.
    async fn insert_car(&self, car: &NewCar) -> Result<Car>;

    /// Cars in creation order with their current average rating.
    async fn list_cars(&self, page: PageRequest) -> Result<Page<RatedCar>>;

    /// Fails with `NotFoundError` when no car has this id.
    async fn delete_car(&self, id: i64) -> Result<()>;

    /// Fails with `NotFoundError` when `car_id` does not reference a car.
    async fn insert_rating(&self, rating: &NewRating) -> Result<Rating>;

    /// Cars ordered by rating count, descending, at most `limit` of them.
    async fn popular_cars(&self, limit: i64) -> Result<Vec<PopularCar>>;
}
