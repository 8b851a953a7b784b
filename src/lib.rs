pub mod config;
pub mod enums;
pub mod error;
pub mod schema;
pub mod db;
pub mod services;
pub mod api;
pub mod form;
pub mod client;

pub use config::Config;
pub use enums::{InvestmentGoal, RiskAppetite, Timeframe};
pub use error::{AppError, FieldError, Result};
