use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ggez::conf::{WindowMode, WindowSetup};
use ggez::event::{self, EventHandler, MouseButton};
use ggez::glam::Vec2 as GVec2;
use ggez::graphics::{self, Color, DrawMode, DrawParam, Mesh, Text};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, ContextBuilder, GameResult};
use impulse2d::math::{clamp, random_range};
use impulse2d::{Scene, SceneConfig, SystemClock, Vec2};
use tracing::{debug, info, Level};

/// Screen pixels per world unit.
const SCALE: f64 = 10.0;
const MIN_SPAWN_RADIUS: f64 = 1.0;
const MAX_SPAWN_RADIUS: f64 = 10.0;
const RADIUS_STEP: f64 = 0.5;
const CIRCLE_SEGMENTS: usize = 16;

#[derive(Parser, Debug)]
#[command(about = "Interactive viewer for the impulse2d circle scene")]
struct Args {
    /// YAML scene configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Radius of circles spawned with the mouse
    #[arg(short = 'r', long, default_value_t = 3.0)]
    spawn_radius: f64,

    /// Log every spawn and cull
    #[arg(short, long)]
    verbose: bool,
}

struct MainState {
    scene: Scene,
    clock: SystemClock,
    spawn_radius: f64,
}

impl MainState {
    fn new(config: SceneConfig, spawn_radius: f64) -> Self {
        MainState {
            scene: Scene::new(config),
            clock: SystemClock::new(),
            spawn_radius: clamp(MIN_SPAWN_RADIUS, MAX_SPAWN_RADIUS, spawn_radius),
        }
    }

    fn spawn(&mut self, position: Vec2) {
        // Rejections are logged by the scene
        if self.scene.spawn_circle(self.spawn_radius, position).is_ok() {
            debug!("Spawned circle r={} at {:?}", self.spawn_radius, position);
        }
    }

    fn spawn_random(&mut self) {
        let max = self.scene.config().bounds_max;
        let min = self.scene.config().bounds_min;
        let x = random_range(min.x + self.spawn_radius, max.x - self.spawn_radius);
        self.spawn(Vec2::new(x, min.y));
    }

    fn resize_spawn_radius(&mut self, delta: f64) {
        self.spawn_radius = clamp(MIN_SPAWN_RADIUS, MAX_SPAWN_RADIUS, self.spawn_radius + delta);
        info!("Spawn radius: {}", self.spawn_radius);
    }
}

fn to_screen(v: Vec2) -> GVec2 {
    GVec2::new((v.x * SCALE) as f32, (v.y * SCALE) as f32)
}

fn circle_outline(center: Vec2, radius: f64) -> Vec<GVec2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            to_screen(center + Vec2::new(theta.cos(), theta.sin()) * radius)
        })
        .collect()
}

impl EventHandler for MainState {
    fn update(&mut self, _ctx: &mut Context) -> GameResult {
        self.scene.step(&self.clock);
        let culled = self.scene.cull();
        if culled > 0 {
            debug!("Culled {} circles", culled);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Color::BLACK);

        for circle in self.scene.circles() {
            let outline = circle_outline(circle.position, circle.radius);
            let circle_mesh = Mesh::new_polygon(ctx, DrawMode::stroke(1.0), &outline, Color::WHITE)?;
            canvas.draw(&circle_mesh, DrawParam::new());
        }

        for segment in self.scene.segments() {
            let line_mesh = Mesh::new_line(
                ctx,
                &[to_screen(segment.a), to_screen(segment.b)],
                1.0,
                Color::WHITE,
            )?;
            canvas.draw(&line_mesh, DrawParam::new());
        }

        let status = format!(
            "circles: {}  radius: {:.1}{}",
            self.scene.circle_count(),
            self.spawn_radius,
            if self.scene.frame_stepping() { "  [frame stepping]" } else { "" }
        );
        canvas.draw(
            &Text::new(status),
            DrawParam::new().dest(GVec2::new(8.0, 8.0)).color(Color::WHITE),
        );

        canvas.finish(ctx)?;
        Ok(())
    }

    fn mouse_button_down_event(&mut self, _ctx: &mut Context, button: MouseButton, x: f32, y: f32) -> GameResult {
        if button == MouseButton::Left {
            self.spawn(Vec2::new(f64::from(x) / SCALE, f64::from(y) / SCALE));
        }
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        match input.keycode {
            Some(KeyCode::Q) | Some(KeyCode::Escape) => ctx.request_quit(),
            Some(KeyCode::F) => {
                self.scene.toggle_frame_stepping();
                info!("Frame stepping: {}", self.scene.frame_stepping());
            }
            Some(KeyCode::Space) => self.scene.request_single_step(),
            Some(KeyCode::D) => self.scene.clear_circles(),
            Some(KeyCode::R) => self.spawn_random(),
            Some(KeyCode::Equals) | Some(KeyCode::Plus) | Some(KeyCode::NumpadAdd) => {
                self.resize_spawn_radius(RADIUS_STEP)
            }
            Some(KeyCode::Minus) | Some(KeyCode::NumpadSubtract) => self.resize_spawn_radius(-RADIUS_STEP),
            _ => {}
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = match &args.config {
        Some(path) => {
            info!("Loading scene configuration from {}", path.display());
            SceneConfig::load(path)?
        }
        None => SceneConfig::default(),
    };

    let extent = config.bounds_max;
    let (ctx, event_loop) = ContextBuilder::new("impulse2d", "impulse2d")
        .window_setup(WindowSetup::default().title("impulse2d"))
        .window_mode(WindowMode::default().dimensions((extent.x * SCALE) as f32, (extent.y * SCALE) as f32))
        .build()?;

    let state = MainState::new(config, args.spawn_radius);
    event::run(ctx, event_loop, state)
}
