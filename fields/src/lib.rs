//! Electrostatics simulations
//!
//! - **Electric field**: field lines of two point charges traced by
//!   following the field direction

pub mod electric_field;
pub mod equations;
