#![cfg_attr(not(feature = "std"), no_std)]

//! Steering model for a 2D school of fish.
//!
//! Each tick every fish scans the school for visible neighbours, steers away
//! from the nearest one (and optionally toward the group), flees an activated
//! stimulus and moves, all inside a rectangular arena. Rendering and input are
//! left to the host, which drives [`School::tick`] and reads back
//! [`Fish::position`] and [`Fish::heading`].

pub mod config;
pub mod fish;
mod math;
pub mod random;
pub mod school;
pub mod stimulus;
pub mod vector;

pub use config::{Arena, BoundaryPolicy, ConfigError, FishConfig, SchoolConfig};
pub use fish::{Fish, FishId, Perception};
#[cfg(feature = "std")]
pub use school::School;
pub use school::{centroid, tick, FixedSchool};
pub use stimulus::Stimulus;
pub use vector::Vector2;
