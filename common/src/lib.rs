pub mod config;
pub mod format;
pub mod models;
pub mod truncate;
