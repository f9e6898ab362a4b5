use thiserror::Error;

/// Configuration violations detected before a world is built.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("cell size {cell_size} must exceed the largest body radius {max_radius}")]
    CellTooSmall { cell_size: f32, max_radius: f32 },
    #[error("grid dimensions {width}x{height} must be non-zero")]
    EmptyGrid { width: usize, height: usize },
    #[error("radius range {min}..{max} must be positive and non-empty")]
    InvalidRadiusRange { min: f32, max: f32 },
    #[error("simulation size {width}x{height} must be positive and finite")]
    InvalidSimulationSize { width: f32, height: f32 },
    #[error("boundary radius {boundary_radius} cannot hold a body of radius {max_radius}")]
    BoundaryTooSmall { boundary_radius: f32, max_radius: f32 },
    #[error("sub-step count must be at least one")]
    ZeroSubsteps,
}
