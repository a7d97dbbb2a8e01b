//! Light upload demo application
//!
//! Loads a light setup from a TOML or RON file, uploads it into a host-side
//! constant buffer laid out like the shader's light block, orbits the sun for
//! a few frames and prints the editor controls every light exposes.
//!
//! Usage: `light_demo [config.ron|config.toml]`

use rust_lighting::prelude::*;
use rust_lighting::render::constant_buffer::BufferError;
use rust_lighting::render::lighting::LIGHT_DATA_GLSL;

/// Offset of the light count. The array follows at the next 16-byte boundary.
const COUNT_OFFSET: usize = 0;
const ARRAY_OFFSET: usize = 16;

const FRAMES: u32 = 4;
const ORBIT_RADIUS: f32 = 10.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Constant buffer error: {0}")]
    Buffer(#[from] BufferError),
}

/// Logger filtered at `level`, with `RUST_LOG` directives taking precedence
fn logger_builder(level: &str) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level).parse_default_env();
    builder
}

fn default_config_path() -> String {
    format!("{}/lights.ron", env!("CARGO_MANIFEST_DIR"))
}

struct LightDemo {
    scene: LightScene,
    buffer: HostConstantBuffer,
}

impl LightDemo {
    fn new(config: &LightingConfig) -> Result<Self, DemoError> {
        let scene = LightScene::from_config(config);
        let buffer = HostConstantBuffer::new(ARRAY_OFFSET + scene.array_size_bytes())
            .with_variable(LIGHTS_COUNT_VAR, COUNT_OFFSET)?
            .with_variable(LIGHTS_ARRAY_VAR, ARRAY_OFFSET)?;

        log::info!(
            "Scene has {} lights, constant buffer is {} bytes",
            scene.light_count(),
            buffer.size()
        );
        Ok(Self { scene, buffer })
    }

    fn run(&mut self, debug_mode: bool) {
        self.scene.prepare_gpu_data();

        for frame in 0..FRAMES {
            self.update(frame);
            self.upload(frame);
        }

        if debug_mode {
            log::info!("Shader declaration:{}", LIGHT_DATA_GLSL);
            self.log_ui();
        }

        self.scene.unload_gpu_data();
    }

    fn update(&self, frame: u32) {
        #[allow(clippy::cast_precision_loss)]
        let angle = frame as f32 / FRAMES as f32 * std::f32::consts::TAU;
        let eye = Vec3::new(angle.cos(), 1.0, angle.sin()) * ORBIT_RADIUS;

        for light in self.scene.lights() {
            let mut light = light.borrow_mut();
            if light.light_type() == LightType::Directional {
                light.move_to(eye, Vec3::zeros(), Vec3::y());
                log::debug!(
                    "Frame {}: {} light '{}' direction {:?}",
                    frame,
                    light.light_type().name(),
                    light.name(),
                    light.direction()
                );
            }
        }
    }

    fn upload(&mut self, frame: u32) {
        self.scene
            .set_into_constant_buffer(&mut self.buffer, LIGHTS_ARRAY_VAR, LIGHTS_COUNT_VAR);
        if self.buffer.is_dirty() {
            log::info!("Frame {}: uploaded {} bytes of light data", frame, self.scene.array_size_bytes());
            self.buffer.clear_dirty();
        }
    }

    fn log_ui(&self) {
        let mut ui = UiRecorder::new();
        self.scene.render_ui(&mut ui);
        log::info!("Editor controls:\n{}", ui.render_text());
    }
}

fn run() -> Result<(), DemoError> {
    let path = std::env::args().nth(1).unwrap_or_else(default_config_path);
    let config = LightingConfig::load(&path)?;

    logger_builder(&config.engine.log_level).init();
    log::info!("Starting light demo with {}", path);

    let mut demo = LightDemo::new(&config)?;
    demo.run(config.engine.debug_mode);

    log::info!("Light demo finished");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Logging may not be initialized yet when the config fails to load
        eprintln!("light_demo: {e}");
        std::process::exit(1);
    }
}
