use crate::types::{BodySnapshot, Vec2};

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

const SCENE_FILL: char = '.';
const SCENE_DEPTH: f32 = 0.0;
const BODY_DEPTH: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorId {
    White,
    Cyan,
    Blue,
    Yellow,
    Red,
}

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Centre on the scene and zoom so the whole boundary is visible.
    pub fn fit(scene: Scene, viewport: Viewport) -> Self {
        let diameter = 2.0 * scene.radius;
        let zoom_y = viewport.height as f32 / diameter;
        let zoom_x = viewport.width as f32 / (diameter * CELL_ASPECT);
        let zoom = zoom_x.min(zoom_y) * 0.95;
        Self {
            pos: scene.center,
            zoom: if zoom > 0.0 { zoom } else { 1.0 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scene {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub ch: char,
    pub depth: f32,
    pub color: ColorId,
}

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(
                len,
                RenderCell {
                    ch: ' ',
                    depth: f32::NEG_INFINITY,
                    color: ColorId::White,
                },
            );
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.ch = ' ';
            cell.depth = f32::NEG_INFINITY;
            cell.color = ColorId::White;
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn set(&mut self, x: i32, y: i32, ch: char, depth: f32, color: ColorId) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if depth >= cell.depth {
            cell.depth = depth;
            cell.ch = ch;
            cell.color = color;
        }
    }
}

/// Rasterise the boundary disc and the bodies into `frame`.
pub fn draw(
    snapshot: &[BodySnapshot],
    scene: Scene,
    camera: &Camera,
    viewport: Viewport,
    frame: &mut FrameBuffer,
) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }

    let projection = Projection::new(camera, viewport);
    fill_disc(frame, &projection, scene.center, scene.radius, |_| {
        (SCENE_FILL, SCENE_DEPTH, ColorId::Blue)
    });

    for body in snapshot {
        let color = body_color(body.speed);
        // Larger bodies win where discs share a terminal cell.
        let depth = BODY_DEPTH + body.radius;
        fill_disc(frame, &projection, body.pos, body.radius, |centre| {
            (if centre { 'O' } else { 'o' }, depth, color)
        });
    }
}

struct Projection {
    origin: Vec2,
    scale_x: f32,
    scale_y: f32,
    half_w: f32,
    half_h: f32,
}

impl Projection {
    fn new(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            origin: camera.pos,
            scale_x: camera.zoom * CELL_ASPECT,
            scale_y: camera.zoom,
            half_w: viewport.width as f32 / 2.0,
            half_h: viewport.height as f32 / 2.0,
        }
    }

    fn to_screen(&self, pos: Vec2) -> (f32, f32) {
        (
            (pos.x - self.origin.x) * self.scale_x + self.half_w,
            (pos.y - self.origin.y) * self.scale_y + self.half_h,
        )
    }
}

fn fill_disc(
    frame: &mut FrameBuffer,
    projection: &Projection,
    center: Vec2,
    radius: f32,
    style: impl Fn(bool) -> (char, f32, ColorId),
) {
    let (sx, sy) = projection.to_screen(center);
    let rx = radius * projection.scale_x;
    let ry = radius * projection.scale_y;
    let cx = sx.floor() as i32;
    let cy = sy.floor() as i32;

    let x0 = (sx - rx).floor().max(-1.0) as i32;
    let x1 = (sx + rx).ceil().min(frame.width() as f32) as i32;
    let y0 = (sy - ry).floor().max(-1.0) as i32;
    let y1 = (sy + ry).ceil().min(frame.height() as f32) as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x as f32 + 0.5 - sx) / projection.scale_x;
            let dy = (y as f32 + 0.5 - sy) / projection.scale_y;
            let centre = x == cx && y == cy;
            if centre || dx * dx + dy * dy <= radius * radius {
                let (ch, depth, color) = style(centre);
                frame.set(x, y, ch, depth, color);
            }
        }
    }
}

fn body_color(speed: f32) -> ColorId {
    if speed > 120.0 {
        ColorId::Red
    } else if speed > 60.0 {
        ColorId::Yellow
    } else if speed > 20.0 {
        ColorId::Cyan
    } else {
        ColorId::White
    }
}
