use crate::{error::SimError, types::Vec2};

pub const SIM_HZ: f32 = 60.0;
pub const RENDER_HZ: f32 = 30.0;
pub const DT: f32 = 1.0 / SIM_HZ;
pub const MAX_FRAME_TIME: f32 = 0.25;

pub const SUBSTEPS: u32 = 4;

pub const SIM_WIDTH: f32 = 240.0;
pub const SIM_HEIGHT: f32 = 240.0;

pub const GRID_WIDTH: usize = 30;
pub const GRID_HEIGHT: usize = 30;

pub const BODY_COUNT: usize = 300;
pub const RADIUS_MIN: f32 = 2.0;
pub const RADIUS_MAX: f32 = 4.0;

pub const GRAVITY_X: f32 = 0.0;
pub const GRAVITY_Y: f32 = 100.0;

pub const SCENE_RADIUS_RATIO: f32 = 0.4;

pub const SEED: u64 = 805_396_235;

/// Run-time parameters of one simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub simulation_size: Vec2,
    pub grid_width: usize,
    pub grid_height: usize,
    pub body_count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    pub gravity: Vec2,
    /// Fraction of the smaller simulation side used as boundary radius.
    pub scene_radius_ratio: f32,
    pub substeps: u32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation_size: Vec2::new(SIM_WIDTH, SIM_HEIGHT),
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            body_count: BODY_COUNT,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,
            gravity: Vec2::new(GRAVITY_X, GRAVITY_Y),
            scene_radius_ratio: SCENE_RADIUS_RATIO,
            substeps: SUBSTEPS,
            seed: SEED,
        }
    }
}

impl SimConfig {
    pub fn scene_center(&self) -> Vec2 {
        self.simulation_size * 0.5
    }

    pub fn scene_radius(&self) -> f32 {
        self.simulation_size.x.min(self.simulation_size.y) * self.scene_radius_ratio
    }

    /// Side length of the smaller cell axis.
    pub fn cell_size(&self) -> f32 {
        let w = self.simulation_size.x / self.grid_width as f32;
        let h = self.simulation_size.y / self.grid_height as f32;
        w.min(h)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let size = self.simulation_size;
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(SimError::InvalidSimulationSize {
                width: size.x,
                height: size.y,
            });
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(SimError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !(self.radius_min > 0.0 && self.radius_min < self.radius_max) {
            return Err(SimError::InvalidRadiusRange {
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if self.substeps == 0 {
            return Err(SimError::ZeroSubsteps);
        }
        self.check_radius(self.radius_max)
    }

    /// Checks one radius against the grid and the boundary.
    pub fn check_radius(&self, radius: f32) -> Result<(), SimError> {
        let cell_size = self.cell_size();
        if cell_size <= radius {
            return Err(SimError::CellTooSmall {
                cell_size,
                max_radius: radius,
            });
        }
        let boundary_radius = self.scene_radius();
        if boundary_radius <= radius {
            return Err(SimError::BoundaryTooSmall {
                boundary_radius,
                max_radius: radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod defaults {
        use super::*;

        #[test]
        fn default_config_is_valid() {
            assert_eq!(SimConfig::default().validate(), Ok(()));
        }

        #[test]
        fn scene_is_centered_in_bounds() {
            let config = SimConfig::default();
            assert_eq!(config.scene_center(), Vec2::new(120.0, 120.0));
            assert_eq!(config.scene_radius(), 96.0);
        }

        #[test]
        fn cell_size_uses_smaller_axis() {
            let config = SimConfig {
                simulation_size: Vec2::new(200.0, 100.0),
                grid_width: 10,
                grid_height: 10,
                ..SimConfig::default()
            };
            assert_eq!(config.cell_size(), 10.0);
        }
    }

    mod validate {
        use super::*;

        #[test]
        fn rejects_cell_not_larger_than_radius() {
            let config = SimConfig {
                grid_width: 60,
                grid_height: 60,
                radius_max: 4.0,
                ..SimConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(SimError::CellTooSmall {
                    cell_size: 4.0,
                    max_radius: 4.0
                })
            );
        }

        #[test]
        fn rejects_empty_grid() {
            let config = SimConfig {
                grid_width: 0,
                ..SimConfig::default()
            };
            assert!(matches!(config.validate(), Err(SimError::EmptyGrid { .. })));
        }

        #[test]
        fn rejects_inverted_radius_range() {
            let config = SimConfig {
                radius_min: 5.0,
                radius_max: 3.0,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SimError::InvalidRadiusRange { .. })
            ));
        }

        #[test]
        fn rejects_non_finite_size() {
            let config = SimConfig {
                simulation_size: Vec2::new(f32::INFINITY, 10.0),
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SimError::InvalidSimulationSize { .. })
            ));
        }

        #[test]
        fn rejects_zero_substeps() {
            let config = SimConfig {
                substeps: 0,
                ..SimConfig::default()
            };
            assert_eq!(config.validate(), Err(SimError::ZeroSubsteps));
        }

        #[test]
        fn rejects_boundary_smaller_than_body() {
            let config = SimConfig {
                simulation_size: Vec2::new(10.0, 10.0),
                grid_width: 1,
                grid_height: 1,
                radius_min: 1.0,
                radius_max: 5.0,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SimError::BoundaryTooSmall { .. })
            ));
        }
    }
}
