//! Room availability: the interval model and the queries over it

pub mod engine;
pub mod interval;

pub use engine::{conflicts_with, AvailabilityEngine};
pub use interval::StayInterval;
