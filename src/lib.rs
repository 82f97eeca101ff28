pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;

pub use api::router;
pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;
