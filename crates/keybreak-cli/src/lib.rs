//! Keybreak CLI building blocks

pub mod cli;
pub mod error;
pub mod sink;
