//! Library exports for taskauth, shared between the binary and tests.

pub mod config;
pub mod forms;
pub mod gateway;
pub mod guard;
pub mod models;
pub mod shell;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
