use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    config::{self, SimConfig},
    core::{World, collision},
    error::SimError,
    random,
    render::{self, Camera, ColorId, Scene, Viewport},
    types::{BodySnapshot, WorldStats},
};

type Backend = CrosstermBackend<io::Stdout>;

pub fn run(config: SimConfig) -> Result<(), Box<dyn Error>> {
    let world = World::init(config, &mut random::seeded(config.seed))?;
    info!("viewer start: {} bodies, seed {}", config.body_count, config.seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, world, config);
    shutdown_terminal(&mut terminal)?;
    info!("viewer stopped");
    result
}

/// Tick without a terminal and return the final statistics.
pub fn run_headless(config: SimConfig, ticks: u64) -> Result<WorldStats, SimError> {
    let mut world = World::init(config, &mut random::seeded(config.seed))?;
    info!(
        "headless run: {} bodies, {} ticks of {:.4}s",
        config.body_count,
        ticks,
        config::DT
    );
    let report_every = config::SIM_HZ as u64;
    for tick in 1..=ticks {
        world.tick(config::DT);
        if tick % report_every == 0 || tick == ticks {
            let stats = world.stats();
            info!(
                "t={:.2}s contacts={} cand/body={:.2} max_penetration={:.4} population={}",
                tick as f32 * config::DT,
                stats.contacts,
                stats.collision_candidates_avg,
                collision::max_penetration(world.bodies()),
                stats.grid_population
            );
        }
    }
    Ok(world.stats())
}

fn event_loop(
    terminal: &mut Terminal<Backend>,
    mut world: World,
    mut config: SimConfig,
) -> Result<(), Box<dyn Error>> {
    let mut snapshot: Vec<BodySnapshot> = Vec::with_capacity(config.body_count);
    let mut ui_state = UiState::new();

    let mut accumulator = 0.0_f32;
    let mut last_tick = std::time::Instant::now();
    let mut last_render = std::time::Instant::now();
    let render_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);
    let mut sim_counter = 0_u32;
    let mut render_counter = 0_u32;
    let mut last_fps_sample = std::time::Instant::now();
    let mut sim_fps = 0.0_f32;
    let mut render_fps = 0.0_f32;

    loop {
        let now = std::time::Instant::now();
        let dt = (now - last_tick).as_secs_f32();
        last_tick = now;
        accumulator = (accumulator + dt).min(config::MAX_FRAME_TIME);

        while accumulator >= config::DT {
            if !ui_state.paused {
                world.tick(config::DT);
                sim_counter += 1;
            }
            accumulator -= config::DT;
        }

        while event::poll(Duration::from_millis(0))? {
            if let CrosstermEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => {
                        ui_state.paused = !ui_state.paused;
                    }
                    KeyCode::Char('r') => {
                        config.seed = config.seed.wrapping_add(1);
                        world = World::init(config, &mut random::seeded(config.seed))?;
                        info!("reseeded with {}", config.seed);
                    }
                    _ => {}
                }
            }
        }

        if last_render.elapsed() >= render_interval {
            world.snapshot(&mut snapshot);
            let stats = world.stats();
            if last_fps_sample.elapsed() >= Duration::from_secs(1) {
                let secs = last_fps_sample.elapsed().as_secs_f32();
                sim_fps = sim_counter as f32 / secs;
                render_fps = render_counter as f32 / secs;
                sim_counter = 0;
                render_counter = 0;
                last_fps_sample = std::time::Instant::now();
            }
            let scene = Scene {
                center: config.scene_center(),
                radius: config.scene_radius(),
            };
            terminal.draw(|frame| {
                let size = frame.size();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(3),
                        Constraint::Length(3),
                    ])
                    .split(size);

                let header = Paragraph::new(format!(
                    "bodies: {} | contacts: {} | cand/body: {:.1} | seed: {} | sim fps: {:.1} | render fps: {:.1}{}",
                    stats.body_count,
                    stats.contacts,
                    stats.collision_candidates_avg,
                    config.seed,
                    sim_fps,
                    render_fps,
                    if ui_state.paused { " | PAUSED" } else { "" }
                ))
                .block(Block::default().borders(Borders::ALL).title("ballsim"));
                frame.render_widget(header, chunks[0]);

                // Inside the borders.
                let viewport = Viewport {
                    width: chunks[1].width.saturating_sub(2),
                    height: chunks[1].height.saturating_sub(2),
                };
                ui_state.ensure_viewport(viewport);
                let camera = Camera::fit(scene, viewport);
                render::draw(&snapshot, scene, &camera, viewport, &mut ui_state.framebuf);

                let framebuf = &ui_state.framebuf;
                let lines: Vec<Line> = (0..framebuf.height())
                    .map(|y| {
                        let spans: Vec<Span> = (0..framebuf.width())
                            .map(|x| {
                                let cell = framebuf.get(x, y);
                                Span::styled(
                                    cell.ch.to_string(),
                                    Style::default().fg(color_for(cell.color)),
                                )
                            })
                            .collect();
                        Line::from(spans)
                    })
                    .collect();

                let view = Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title("Arena"));
                frame.render_widget(view, chunks[1]);

                let footer = Paragraph::new("space: pause | r: reseed | q: quit")
                    .block(Block::default().borders(Borders::ALL).title("Controls"));
                frame.render_widget(footer, chunks[2]);
            })?;

            last_render = std::time::Instant::now();
            render_counter += 1;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn shutdown_terminal(terminal: &mut Terminal<Backend>) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

struct UiState {
    framebuf: render::FrameBuffer,
    paused: bool,
}

impl UiState {
    fn new() -> Self {
        Self {
            framebuf: render::FrameBuffer::new(0, 0),
            paused: false,
        }
    }

    fn ensure_viewport(&mut self, viewport: Viewport) {
        if self.framebuf.width() != viewport.width || self.framebuf.height() != viewport.height {
            self.framebuf.resize(viewport.width, viewport.height);
        }
    }
}

fn color_for(color: ColorId) -> Color {
    match color {
        ColorId::White => Color::White,
        ColorId::Cyan => Color::Cyan,
        ColorId::Blue => Color::Blue,
        ColorId::Yellow => Color::Yellow,
        ColorId::Red => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod run_headless_fn {
        use super::*;

        #[test]
        fn runs_requested_ticks() {
            let config = SimConfig {
                body_count: 50,
                ..SimConfig::default()
            };
            let stats = run_headless(config, 30).expect("valid config");
            assert_eq!(stats.ticks, 30);
            assert_eq!(stats.body_count, 50);
            assert_eq!(stats.grid_population, 50);
        }

        #[test]
        fn reports_configuration_errors() {
            let config = SimConfig {
                substeps: 0,
                ..SimConfig::default()
            };
            assert_eq!(run_headless(config, 1), Err(SimError::ZeroSubsteps));
        }
    }

    mod ui_state {
        use super::*;

        #[test]
        fn ensure_viewport_resizes_framebuffer() {
            let mut state = UiState::new();
            state.ensure_viewport(Viewport { width: 12, height: 7 });
            assert_eq!(state.framebuf.width(), 12);
            assert_eq!(state.framebuf.height(), 7);
        }
    }

    #[test]
    fn every_color_maps_to_terminal_color() {
        assert_eq!(color_for(ColorId::Blue), Color::Blue);
        assert_eq!(color_for(ColorId::Red), Color::Red);
        assert_eq!(color_for(ColorId::White), Color::White);
    }
}
