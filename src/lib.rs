//! Sub-stepped Verlet simulation of circular bodies inside a circular
//! arena, with a uniform grid as collision broad phase.

pub mod config;
pub mod core;
pub mod error;
pub mod random;
pub mod render;
pub mod spatial;
pub mod types;
pub mod ui;

pub use crate::{
    config::SimConfig,
    core::World,
    error::SimError,
    random::UniformSource,
    types::{Body, Vec2, WorldStats},
};
