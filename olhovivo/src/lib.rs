//! Client for the SPTrans Olho Vivo real-time bus API.
//!
//! Answers questions like "where are the buses on this line right now?"
//! and "when does the next bus reach this stop?" for São Paulo.

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;

pub use client::OlhoVivo;
pub use config::{ConfigError, OlhoVivoConfig};
pub use error::Error;
