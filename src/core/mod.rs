pub mod ledger;
pub mod registry;
pub mod validator;

pub use crate::domain::model::{Car, PopularCar, RatedCar, Rating};
pub use crate::domain::ports::{CarStore, ConfigProvider, VehicleRegistry};
pub use crate::utils::error::Result;
pub use ledger::RatingLedger;
pub use registry::CarRegistry;
pub use validator::VehicleValidator;
