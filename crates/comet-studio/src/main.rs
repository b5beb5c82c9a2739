//! Comet studio: a window showing one oscillating object with a ribbon trail.
//!
//! Keys: Space toggles the trail, Up/Down change the orbit speed, R restarts,
//! Escape quits.

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use comet_engine::coords::Vec3;
use comet_engine::core::{App, AppControl, FrameCtx};
use comet_engine::device::GpuInit;
use comet_engine::input::Key;
use comet_engine::logging::{init_logging, LoggingConfig};
use comet_engine::motion::{Motion, Oscillator};
use comet_engine::paint::Color;
use comet_engine::render::{Camera, RibbonRenderer};
use comet_engine::trail::{Trail, TrailConfig};
use comet_engine::window::{Runtime, RuntimeConfig};

const SPEED_STEP: f32 = 1.25;

#[derive(Parser, Debug)]
#[command(name = "comet-studio")]
#[command(about = "Render a Catmull-Rom ribbon trail behind an orbiting point")]
struct Args {
    /// Seconds a trail point stays visible
    #[arg(long, default_value_t = 0.13)]
    life_time: f32,

    /// Ribbon width in world units
    #[arg(long, default_value_t = 0.5)]
    width: f32,

    /// Minimum movement before a new control point is recorded
    #[arg(long, default_value_t = 0.1)]
    min_distance: f32,

    /// Orbit speed in radians per second
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Orbit radius
    #[arg(long, default_value_t = 1.0)]
    radius: f32,

    /// Trail color as #rrggbb or #rrggbbaa
    #[arg(long, default_value = "#ffffff", value_parser = parse_color)]
    color: Color,

    /// Fade the ribbon toward its oldest end
    #[arg(long)]
    fade_tail: bool,

    /// Present without waiting for vsync
    #[arg(long)]
    no_vsync: bool,

    /// Log filter, e.g. "debug" or "comet_engine=trace"
    #[arg(long)]
    log: Option<String>,
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_hex(s).ok_or_else(|| format!("invalid color '{s}', expected #rrggbb or #rrggbbaa"))
}

struct StudioApp {
    oscillator: Oscillator,
    trail: Trail,
    camera: Camera,
    renderer: RibbonRenderer,
    clear: Color,
}

impl StudioApp {
    fn new(args: &Args) -> Result<Self> {
        let config = TrailConfig::default()
            .with_life_time(args.life_time)
            .with_width(args.width)
            .with_min_control_distance(args.min_distance)
            .with_color(args.color)
            .with_fade_tail(args.fade_tail);

        let oscillator = Oscillator::new(Vec3::ZERO)
            .with_speed(args.speed)
            .with_radius(args.radius);

        let mut trail = Trail::new(config).context("invalid trail configuration")?;
        trail.on_start(oscillator.position());

        Ok(Self {
            oscillator,
            trail,
            camera: Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO),
            renderer: RibbonRenderer::new(),
            clear: Color::from_srgb_u8(12, 14, 22, 255),
        })
    }

    fn handle_keys(&mut self, ctx: &FrameCtx<'_, '_>) -> AppControl {
        let keys = ctx.input_frame;

        if keys.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if keys.pressed(Key::Space) {
            if self.trail.is_enabled() {
                self.trail.on_disable(&mut self.renderer);
            } else {
                self.trail.on_enable(self.oscillator.position());
            }
        }

        if keys.pressed(Key::ArrowUp) {
            self.set_speed(self.oscillator.speed() * SPEED_STEP);
        }
        if keys.pressed(Key::ArrowDown) {
            self.set_speed(self.oscillator.speed() / SPEED_STEP);
        }

        if keys.pressed(Key::R) {
            self.oscillator.reset();
            let enabled = self.trail.is_enabled();
            self.trail.on_disable(&mut self.renderer);
            if enabled {
                self.trail.on_enable(self.oscillator.position());
            }
        }

        AppControl::Continue
    }

    fn set_speed(&mut self, speed: f32) {
        self.oscillator.set_speed(speed);
        log::info!("orbit speed {speed:.2} rad/s");
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.handle_keys(ctx) == AppControl::Exit {
            return AppControl::Exit;
        }

        let position = self.oscillator.tick(ctx.time.dt);
        self.trail
            .update(position, ctx.time.elapsed, &self.camera, &mut self.renderer);

        let (renderer, camera) = (&mut self.renderer, &self.camera);
        ctx.render(self.clear, |rctx, target| {
            renderer.render(rctx, target, camera);
        })
    }

    fn on_exit(&mut self) {
        let buffer = self.trail.buffer();
        log::info!(
            "trail finished with {} control points admitted, {} live points",
            buffer.admitted_count(),
            buffer.display_len()
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    log::info!(
        "life_time={}s width={} min_distance={} speed={}",
        args.life_time,
        args.width,
        args.min_distance,
        args.speed
    );

    let app = StudioApp::new(&args)?;

    Runtime::run(
        RuntimeConfig {
            title: "Comet Studio".to_string(),
            initial_size: LogicalSize::new(960.0, 720.0),
        },
        GpuInit::default().with_vsync(!args.no_vsync),
        app,
    )
}
