pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod fault;
pub mod fs;
pub mod models;
pub mod remote;

pub use error::{FaultError, FetchError, WalkError};
