//! Batted-ball spray-chart service: serves cleaned event data as JSON and
//! renders filtered hit locations over a baseball-field diagram.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod projection;
pub mod render;
pub mod types;
