pub mod collision;
pub mod constraint;
pub mod integrator;

use log::{debug, warn};

use crate::{
    config::SimConfig,
    error::SimError,
    random::UniformSource,
    spatial::UniformGrid,
    types::{Body, BodySnapshot, Vec2, WorldStats},
};

use self::{
    collision::PassStats,
    constraint::contain_in_circle,
    integrator::{accumulate, integrate},
};

/// Body store plus the grid that indexes it.
pub struct World {
    bodies: Vec<Body>,
    grid: UniformGrid,
    config: SimConfig,
    neighbors: Vec<usize>,
    ticks: u64,
    last_pass: PassStats,
    last_sub_dt: f32,
}

impl World {
    /// Scatter `config.body_count` bodies at rest over the simulation area.
    pub fn init(config: SimConfig, rng: &mut impl UniformSource) -> Result<Self, SimError> {
        config.validate()?;
        let size = config.simulation_size;
        let bodies = (0..config.body_count)
            .map(|_| {
                let position = Vec2::new(rng.uniform_f32(0.0, size.x), rng.uniform_f32(0.0, size.y));
                let radius = rng.uniform_f32(config.radius_min, config.radius_max);
                Body::new(position, radius)
            })
            .collect();
        Ok(Self::place(config, bodies))
    }

    /// Build a world from explicit bodies. Each one is contained once;
    /// its previous position follows so the encoded velocity survives.
    pub fn from_bodies(config: SimConfig, bodies: Vec<Body>) -> Result<Self, SimError> {
        config.validate()?;
        for body in &bodies {
            config.check_radius(body.radius)?;
        }
        Ok(Self::place(config, bodies))
    }

    fn place(config: SimConfig, mut bodies: Vec<Body>) -> Self {
        let center = config.scene_center();
        let boundary_radius = config.scene_radius();
        let mut grid = UniformGrid::new(config.grid_width, config.grid_height);
        let mut max_radius = 0.0_f32;
        for (idx, body) in bodies.iter_mut().enumerate() {
            let displacement = body.displacement();
            contain_in_circle(body, center, boundary_radius);
            body.position_previous = body.position - displacement;
            let (x, y) = grid.cell_of(body.position, config.simulation_size);
            grid.insert(x, y, idx);
            max_radius = max_radius.max(body.radius);
        }

        let cell_size = config.cell_size();
        debug!(
            "world: {} bodies, grid {}x{}, cell {:.2}, seed {}",
            bodies.len(),
            config.grid_width,
            config.grid_height,
            cell_size,
            config.seed
        );
        if cell_size < 2.0 * max_radius {
            warn!(
                "cell size {:.2} is below the largest diameter {:.2}; some contacts may be missed",
                cell_size,
                2.0 * max_radius
            );
        }

        Self {
            bodies,
            grid,
            config,
            neighbors: Vec::new(),
            ticks: 0,
            last_pass: PassStats::default(),
            last_sub_dt: 0.0,
        }
    }

    /// Advance one frame of `dt` seconds in `config.substeps` equal steps.
    pub fn tick(&mut self, dt: f32) {
        let sub_dt = dt / self.config.substeps as f32;
        let mut pass = PassStats::default();
        for _ in 0..self.config.substeps {
            pass += self.substep(sub_dt);
        }
        self.ticks += 1;
        self.last_pass = pass;
        self.last_sub_dt = sub_dt;
        if pass.degenerate > 0 {
            warn!(
                "tick {}: {} coincident pairs split along +x",
                self.ticks, pass.degenerate
            );
        }
    }

    fn substep(&mut self, dt: f32) -> PassStats {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            accumulate(body, gravity);
        }
        let pass = collision::resolve_gridded(&mut self.bodies, &self.grid, &mut self.neighbors);
        for body in &mut self.bodies {
            integrate(body, dt);
        }
        self.rebucket();
        pass
    }

    fn rebucket(&mut self) {
        let center = self.config.scene_center();
        let boundary_radius = self.config.scene_radius();
        let size = self.config.simulation_size;
        self.grid.clear();
        for (idx, body) in self.bodies.iter_mut().enumerate() {
            contain_in_circle(body, center, boundary_radius);
            let (x, y) = self.grid.cell_of(body.position, size);
            self.grid.insert(x, y, idx);
        }
    }

    pub fn body_positions(&self) -> impl Iterator<Item = (Vec2, f32)> {
        self.bodies.iter().map(|b| (b.position, b.radius))
    }

    pub fn snapshot(&self, out: &mut Vec<BodySnapshot>) {
        out.clear();
        let inv_dt = if self.last_sub_dt > 0.0 {
            1.0 / self.last_sub_dt
        } else {
            0.0
        };
        out.extend(self.bodies.iter().map(|b| BodySnapshot {
            pos: b.position,
            radius: b.radius,
            speed: b.displacement().length() * inv_dt,
        }));
    }

    pub fn stats(&self) -> WorldStats {
        let n = self.bodies.len();
        let steps = n * self.config.substeps as usize;
        WorldStats {
            body_count: n,
            ticks: self.ticks,
            collision_candidates_avg: if steps > 0 {
                self.last_pass.candidates as f32 / steps as f32
            } else {
                0.0
            },
            contacts: self.last_pass.contacts,
            degenerate_pairs: self.last_pass.degenerate,
            grid_population: self.grid.population(),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
