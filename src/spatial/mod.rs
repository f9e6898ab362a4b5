use crate::types::Vec2;

/// Fixed-size grid of body-index buckets, padded by one empty cell on
/// every side so that 3x3 lookups never leave the storage.
#[derive(Debug)]
pub struct UniformGrid {
    width: usize,
    height: usize,
    cells: Vec<Vec<usize>>,
}

impl UniformGrid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let len = (width + 2) * (height + 2);
        Self {
            width,
            height,
            cells: vec![Vec::new(); len],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Empties every bucket, keeping allocations for the next fill.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Bucket at logical `(x, y)`. `-1` and the dimension itself address
    /// the border ring, which is always empty.
    pub fn cell(&self, x: i32, y: i32) -> &[usize] {
        &self.cells[self.index(x, y)]
    }

    /// Appends a body to an interior cell. Coordinates come from
    /// [`UniformGrid::cell_of`]; nothing is clamped here.
    pub fn insert(&mut self, x: usize, y: usize, body: usize) {
        debug_assert!(
            x < self.width && y < self.height,
            "insert() outside grid interior"
        );
        let idx = self.index(x as i32, y as i32);
        self.cells[idx].push(body);
    }

    /// Interior cell containing `pos` in a simulation area of `size`.
    pub fn cell_of(&self, pos: Vec2, size: Vec2) -> (usize, usize) {
        let cx = (pos.x / size.x * self.width as f32).floor();
        let cy = (pos.y / size.y * self.height as f32).floor();
        (
            Self::clamp_axis(cx, self.width),
            Self::clamp_axis(cy, self.height),
        )
    }

    /// Collects the bodies of the 3x3 block centred on interior `(x, y)`.
    pub fn neighborhood(&self, x: usize, y: usize, out: &mut Vec<usize>) {
        out.clear();
        let (x, y) = (x as i32, y as i32);
        for dx in -1..=1 {
            for dy in -1..=1 {
                out.extend_from_slice(self.cell(x + dx, y + dy));
            }
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    fn index(&self, x: i32, y: i32) -> usize {
        let px = (x + 1) as usize;
        let py = (y + 1) as usize;
        debug_assert!(px < self.width + 2 && py < self.height + 2);
        px * (self.height + 2) + py
    }

    fn clamp_axis(value: f32, dimension: usize) -> usize {
        // NaN casts to 0, which is a valid interior cell.
        (value.max(0.0) as usize).min(dimension - 1)
    }
}
