pub mod config;
pub mod error;
pub mod mailer;
pub mod observability;
pub mod routes;
pub mod server;

pub use config::Config;
pub use routes::AppState;
