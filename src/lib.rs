//! Results board library
//!
//! Exposes the fetcher, board model and refresh loop for the binary and for
//! integration tests.

pub mod app;
pub mod board;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod data;
pub mod logging;
pub mod refresh;
pub mod ui;
