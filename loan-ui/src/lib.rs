pub mod app;
pub mod config;
pub mod landing;
pub mod letters;
pub mod logging;
pub mod session;

pub use app::{ChatReport, QuoteReport, run_chat, run_quote};
pub use config::AppConfig;
