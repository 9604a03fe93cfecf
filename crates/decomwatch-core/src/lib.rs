pub mod config;
pub mod logging;

pub mod admin;
pub mod alias;
pub mod human;
pub mod progress;
pub mod report;
pub mod snapshot;
pub mod source;
