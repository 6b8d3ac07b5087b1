//! # floorsketch Core
//!
//! Core types shared by the floorsketch crates: surface-space points,
//! RGB colors and the error taxonomy used by the sketch engine.

pub mod color;
pub mod error;
pub mod point;

pub use color::Color;
pub use error::{Error, Result, SketchError};
pub use point::Point;
