mod cli;
mod curve;
mod framepace;
mod gpu;
mod group;
mod particle;
mod render;
mod scene;

use std::sync::Arc;

use clap::Parser;
use framepace::FrameClock;
use gpu::GpuContext;
use log::{info, warn};
use particle::RenderPoint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use render::PointRenderer;
use scene::Scene;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let scene = Scene::build(&mut rng);
    info!(
        "scene built: {} groups, {} points, seed {seed}",
        scene.group_count(),
        scene.point_count()
    );

    // Setup Winit
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app_state = AppState {
        tokio_rt: tokio::runtime::Runtime::new()?,
        scene,
        rng,
        staging: Vec::new(),

        clock: FrameClock::new(),
        tick: 0,
        framerate: args.framerate,

        gfx: None,
    };

    event_loop.run_app(&mut app_state)?;
    Ok(())
}

struct GfxState {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: PointRenderer,
}

struct AppState {
    tokio_rt: tokio::runtime::Runtime,
    scene: Scene,
    rng: StdRng,
    staging: Vec<RenderPoint>,

    clock: FrameClock,
    tick: u32,
    framerate: Option<u32>,

    gfx: Option<GfxState>,
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Heart")
            .with_inner_size(LogicalSize::new(600.0, 600.0));
        let window = Arc::new(event_loop.create_window(attributes).unwrap());

        let gpu = self
            .tokio_rt
            .block_on(GpuContext::new(window.clone()))
            .unwrap();
        let surface_capabilities = gpu.surface_capabilities();
        let surface_format = surface_capabilities.formats[0];

        let renderer = PointRenderer::new(&gpu.device, surface_format, self.scene.point_count());
        renderer.update_view(&gpu.queue, render::VIEW_CENTER, render::VIEW_EXTENT);

        // The first measured frame starts here, not at process start.
        self.clock.restart();

        self.gfx = Some(GfxState {
            window,
            gpu,
            renderer,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(gfx) = &mut self.gfx else { return };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gfx.gpu.config.width = new_size.width.max(1);
                gfx.gpu.config.height = new_size.height.max(1);
                gfx.gpu.reconfigure_surface();
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        let Some(gfx) = &mut self.gfx else { return };

        let elapsed = self.clock.restart();
        self.scene
            .update(elapsed.as_secs_f32(), self.tick, &mut self.rng);
        self.tick = self.tick.wrapping_add(1);

        self.scene.collect_points(&mut self.staging);
        gfx.renderer.write_points(&gfx.gpu.queue, &self.staging);

        let frame = match gfx.gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.gpu.reconfigure_surface();
                return;
            }
            Err(error) => {
                warn!("skipping frame: {error}");
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gfx
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        {
            let _rpass = gfx
                .renderer
                .begin_pass(&mut encoder, &view, self.staging.len() as u32);
        }

        gfx.gpu.queue.submit(Some(encoder.finish()));
        gfx.window.pre_present_notify();
        frame.present();

        self.clock.pace(self.framerate);
    }
}
