//! Terminal job board: search a job source, browse ranked listings, and apply
//! through an automation webhook with a generated confirmation message.

pub mod ai;
pub mod app;
pub mod apply;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
pub mod services;
pub mod theme;
pub mod tui;
