pub mod config;
pub mod errors;
pub mod routes;

pub use config::Config;
pub use routes::{build_router, AppState};
