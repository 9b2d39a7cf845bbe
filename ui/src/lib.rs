#![warn(clippy::all, rust_2018_idioms)]
//! egui front end of the Warden admin console.

pub mod app;
pub mod seed;
pub mod state;
pub mod storage;
pub mod utils;
pub mod widgets;

pub use app::WardenApp;
