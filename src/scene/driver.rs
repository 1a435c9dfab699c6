use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::SceneConfig;

use super::stars::{StarLayer, far_layer, near_layer};

const MODEL_SPIN_RAD_PER_S: f64 = 0.5;
const STAR_DRIFT_RAD_PER_S: f64 = 0.01;
const STAR_TILT_FREQ: f64 = 0.03;
const STAR_TILT_AMPLITUDE: f64 = 0.01;
const LIGHT_SWAY_AMPLITUDE: f64 = 0.7;
const LIGHT_ANGLE: f64 = PI / 2.5;
const LIGHT_DISTANCE: f64 = 20.0;

pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_POSITION: [f32; 3] = [0.0, 25.0, 50.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ModelState {
    Loading { loaded: u64, total: u64 },
    Loaded,
    /// The model failed to load; a plain cube stands in for it.
    Placeholder { reason: String },
}

impl ModelState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Load progress in percent, when the total size is known.
    pub fn progress_percent(&self) -> Option<f64> {
        match self {
            Self::Loading { loaded, total } if *total > 0 => {
                Some((*loaded as f64 / *total as f64 * 100.0).min(100.0))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub position: [f32; 3],
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    pub elapsed_s: f64,
    pub camera: Camera,
    pub model_rotation_y: f64,
    pub stars_rotation: [f64; 2],
    pub lights: [[f32; 3]; 3],
    pub placeholder: bool,
}

pub trait SceneRenderer: Send {
    fn set_viewport(&mut self, width: f64, height: f64);

    fn render(&mut self, frame: &SceneFrame, near: &StarLayer, far: &StarLayer);
}

/// Keeps the last frame instead of drawing it.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub viewport: (f64, f64),
    pub last: Option<SceneFrame>,
}

impl SceneRenderer for HeadlessRenderer {
    fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    fn render(&mut self, frame: &SceneFrame, _near: &StarLayer, _far: &StarLayer) {
        self.frames += 1;
        self.last = Some(frame.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneStatus {
    pub model_path: String,
    pub model: ModelState,
    pub aspect: f32,
    pub frames: u64,
    pub near_stars: usize,
    pub far_stars: usize,
}

pub struct SceneDriver {
    renderer: Box<dyn SceneRenderer>,
    near: StarLayer,
    far: StarLayer,
    model_path: String,
    model: ModelState,
    camera: Camera,
    elapsed_s: f64,
    model_rotation_y: f64,
    stars_rotation: [f64; 2],
    base_lights: [[f64; 3]; 3],
    lights: [[f32; 3]; 3],
    frames: u64,
    last_frame: Option<SceneFrame>,
}

impl std::fmt::Debug for SceneDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDriver")
            .field("model", &self.model)
            .field("elapsed_s", &self.elapsed_s)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl SceneDriver {
    pub fn new(config: &SceneConfig, width: f64, height: f64, renderer: Box<dyn SceneRenderer>) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let near = near_layer(&mut rng, config.near_stars);
        let far = far_layer(&mut rng, config.far_stars);
        let base_lights = base_light_positions();
        let mut driver = Self {
            renderer,
            near,
            far,
            model_path: config.model_path.clone(),
            model: ModelState::Loading {
                loaded: 0,
                total: 0,
            },
            camera: Camera {
                fov_deg: CAMERA_FOV_DEG,
                aspect: 1.0,
                position: CAMERA_POSITION,
            },
            elapsed_s: 0.0,
            model_rotation_y: 0.0,
            stars_rotation: [0.0, 0.0],
            base_lights,
            lights: base_lights.map(|p| p.map(|c| c as f32)),
            frames: 0,
            last_frame: None,
        };
        driver.resize(width, height);
        tracing::info!(model = %driver.model_path, "loading scene model");
        driver
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn model(&self) -> &ModelState {
        &self.model
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn last_frame(&self) -> Option<&SceneFrame> {
        self.last_frame.as_ref()
    }

    pub fn near_layer(&self) -> &StarLayer {
        &self.near
    }

    pub fn far_layer(&self) -> &StarLayer {
        &self.far
    }

    pub fn asset_progress(&mut self, loaded: u64, total: u64) {
        if let ModelState::Loading { .. } = self.model {
            self.model = ModelState::Loading { loaded, total };
            tracing::debug!(loaded, total, "scene model progress");
        }
    }

    pub fn asset_loaded(&mut self) {
        if self.model.is_loading() {
            tracing::info!(model = %self.model_path, "scene model loaded");
            self.model = ModelState::Loaded;
        }
    }

    pub fn asset_failed(&mut self, reason: impl Into<String>) {
        if self.model.is_loading() {
            let reason = reason.into();
            tracing::warn!(model = %self.model_path, %reason, "scene model failed, using placeholder");
            self.model = ModelState::Placeholder { reason };
        }
    }

    /// Degenerate sizes keep the previous aspect.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.camera.aspect = (width / height) as f32;
            self.renderer.set_viewport(width, height);
        }
    }

    /// Advances the animation by `dt_s` and renders. Nothing moves or renders
    /// while the model is still loading.
    pub fn tick(&mut self, dt_s: f64) -> Option<&SceneFrame> {
        if self.model.is_loading() {
            return None;
        }
        let dt_s = dt_s.max(0.0);
        self.elapsed_s += dt_s;
        let elapsed = self.elapsed_s;

        self.model_rotation_y += dt_s * MODEL_SPIN_RAD_PER_S;
        self.stars_rotation[1] += dt_s * STAR_DRIFT_RAD_PER_S;
        self.stars_rotation[0] = (elapsed * STAR_TILT_FREQ).sin() * STAR_TILT_AMPLITUDE;

        for (idx, (light, base)) in self.lights.iter_mut().zip(self.base_lights).enumerate() {
            let speed = 0.2 + idx as f64 * 0.1;
            let sway = (elapsed * speed + idx as f64).sin() * LIGHT_SWAY_AMPLITUDE;
            *light = base.map(|c| c as f32);
            light[idx] = (base[idx] + sway) as f32;
        }

        let frame = SceneFrame {
            elapsed_s: elapsed,
            camera: self.camera,
            model_rotation_y: self.model_rotation_y,
            stars_rotation: self.stars_rotation,
            lights: self.lights,
            placeholder: matches!(self.model, ModelState::Placeholder { .. }),
        };
        self.renderer.render(&frame, &self.near, &self.far);
        self.frames += 1;
        self.last_frame = Some(frame);
        self.last_frame.as_ref()
    }

    pub fn status(&self) -> SceneStatus {
        SceneStatus {
            model_path: self.model_path.clone(),
            model: self.model.clone(),
            aspect: self.camera.aspect,
            frames: self.frames,
            near_stars: self.near.stars.len(),
            far_stars: self.far.stars.len(),
        }
    }
}

/// Key light above the model, a rim light behind it, and a dim fill.
fn base_light_positions() -> [[f64; 3]; 3] {
    let (a, d) = (LIGHT_ANGLE, LIGHT_DISTANCE);
    [
        [a.sin() * d * 0.2, a.cos() * d * 1.5, 0.0],
        [-a.sin() * d * 0.3, a.cos() * d * 1.3, d * 0.2],
        [-d * 0.4, d * 1.2, -d * 0.2],
    ]
}
