use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Column width of `make` and `model`.
pub const MAX_NAME_LENGTH: usize = 30;

/// A car that passed validation and is about to be stored.
/// Fields are already trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub make: String,
    pub model: String,
}

/// Built from the insert result, never decoded from a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub make: String,
    pub model: String,
}

/// Car annotated with the mean of its ratings, `None` when unrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RatedCar {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub avg_rating: Option<f64>,
}

impl From<Car> for RatedCar {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            make: car.make,
            model: car.model,
            avg_rating: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PopularCar {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub rates_number: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRating {
    pub car_id: i64,
    pub rating: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub car_id: i64,
    pub rating: i64,
}

/// Body of `GetModelsForMake`. Only `Count` and `Model_Name` are relied on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLookup {
    #[serde(rename = "Count")]
    pub count: i64,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "SearchCriteria", default)]
    pub search_criteria: Option<String>,
    #[serde(rename = "Results", default)]
    pub results: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    #[serde(rename = "Make_ID", default)]
    pub make_id: Option<i64>,
    #[serde(rename = "Make_Name", default)]
    pub make_name: Option<String>,
    #[serde(rename = "Model_ID", default)]
    pub model_id: Option<i64>,
    #[serde(rename = "Model_Name")]
    pub model_name: String,
}

/// Offset/limit window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: i64,
    pub items: Vec<T>,
}
