pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use engine::{EarthScoreEngine, RecordInput};
pub use error::{AppError, AppResult};
