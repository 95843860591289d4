//! Physics lab application
//!
//! Ties the simulation crates together: the [`catalog`] of simulations,
//! process-wide [`session`] services, the formula reference and the egui
//! views that wrap the canvas.

pub mod catalog;
pub mod equations_ui;
pub mod gui;
pub mod painter;
pub mod session;
pub mod views;

pub use catalog::{Category, SimulationKind};
pub use session::SessionServices;
