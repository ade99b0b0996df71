pub mod bump;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod release;
pub mod tag;
pub mod ui;

pub use error::{Result, SemtagError};
