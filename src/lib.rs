pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::{CliConfig, TomlConfig};
pub use core::{CarRegistry, RatingLedger, VehicleValidator};
pub use server::{router, serve, state::AppState};
pub use utils::error::{Result, ServiceError};
