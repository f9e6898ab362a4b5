use std::ops::AddAssign;

use crate::{
    spatial::UniformGrid,
    types::{Body, Vec2},
};

/// Outcome of testing one pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Apart,
    Resolved,
    /// Centres coincided; the pair was split along `+x`.
    Degenerate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub candidates: usize,
    pub contacts: usize,
    pub degenerate: usize,
}

impl PassStats {
    fn record(&mut self, contact: Contact) {
        self.candidates += 1;
        match contact {
            Contact::Apart => {}
            Contact::Resolved => self.contacts += 1,
            Contact::Degenerate => {
                self.contacts += 1;
                self.degenerate += 1;
            }
        }
    }
}

impl AddAssign for PassStats {
    fn add_assign(&mut self, rhs: PassStats) {
        self.candidates += rhs.candidates;
        self.contacts += rhs.contacts;
        self.degenerate += rhs.degenerate;
    }
}

/// Push an overlapping pair apart, half the overlap each, along the line
/// between their centres.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> Contact {
    let axis = a.position - b.position;
    let distance = axis.length();
    let min_distance = a.radius + b.radius;
    if distance >= min_distance {
        return Contact::Apart;
    }
    if distance > 0.0 {
        let normal = axis / distance;
        let push = normal * (0.5 * (min_distance - distance));
        a.position += push;
        b.position -= push;
        Contact::Resolved
    } else {
        let push = Vec2::new(0.5 * min_distance, 0.0);
        a.position += push;
        b.position -= push;
        Contact::Degenerate
    }
}

/// Resolve every body against the 3x3 cell block it was bucketed into.
pub fn resolve_gridded(
    bodies: &mut [Body],
    grid: &UniformGrid,
    scratch: &mut Vec<usize>,
) -> PassStats {
    let mut stats = PassStats::default();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let bucket = grid.cell(x as i32, y as i32);
            if bucket.is_empty() {
                continue;
            }
            grid.neighborhood(x, y, scratch);
            for &i in bucket {
                for &j in scratch.iter() {
                    if i == j {
                        continue;
                    }
                    let (a, b) = pair_mut(bodies, i, j);
                    stats.record(resolve_pair(a, b));
                }
            }
        }
    }
    stats
}

/// Quadratic reference pass: body `i` against `i+1 .. i-1`, wrapping.
/// Only meant for cross-checking the gridded pass on small populations.
pub fn resolve_exhaustive(bodies: &mut [Body]) -> PassStats {
    let mut stats = PassStats::default();
    let n = bodies.len();
    for i in 0..n {
        for k in 1..n {
            let j = (i + k) % n;
            let (a, b) = pair_mut(bodies, i, j);
            stats.record(resolve_pair(a, b));
        }
    }
    stats
}

pub fn overlap(a: &Body, b: &Body) -> f32 {
    let distance = (a.position - b.position).length();
    (a.radius + b.radius - distance).max(0.0)
}

/// Summed overlap over all distinct pairs.
pub fn total_overlap(bodies: &[Body]) -> f32 {
    let mut total = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            total += overlap(a, b);
        }
    }
    total
}

pub fn max_penetration(bodies: &[Body]) -> f32 {
    let mut worst = 0.0_f32;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            worst = worst.max(overlap(a, b));
        }
    }
    worst
}

/// All overlapping pairs `(i, j)` with `i < j`, sorted.
pub fn overlapping_pairs_exhaustive(bodies: &[Body]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        for j in i + 1..bodies.len() {
            if overlap(&bodies[i], &bodies[j]) > 0.0 {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Overlapping pairs reachable through the grid's 3x3 blocks, in the same
/// form as [`overlapping_pairs_exhaustive`].
pub fn overlapping_pairs_gridded(bodies: &[Body], grid: &UniformGrid) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut scratch = Vec::new();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let bucket = grid.cell(x as i32, y as i32);
            if bucket.is_empty() {
                continue;
            }
            grid.neighborhood(x, y, &mut scratch);
            for &i in bucket {
                for &j in &scratch {
                    if i < j && overlap(&bodies[i], &bodies[j]) > 0.0 {
                        pairs.push((i, j));
                    }
                }
            }
        }
    }
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
