pub mod config;
pub mod detection;
pub mod error;
pub mod handler;
pub mod i18n;
pub mod server;
pub mod translation;
pub mod ui;
