pub mod commands;
pub mod config;
pub mod countdown;
pub mod error;
pub mod form;
pub mod logging;
pub mod notify;
pub mod platform;
pub mod screen;
pub mod state;
pub mod store;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
