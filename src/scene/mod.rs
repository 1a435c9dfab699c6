//! Hero background scene: a two-layer star field around a slowly spinning
//! model, animated on the host's frame clock.

mod driver;
mod stars;

pub use driver::{
    CAMERA_FOV_DEG, CAMERA_POSITION, Camera, HeadlessRenderer, ModelState, SceneDriver, SceneFrame,
    SceneRenderer, SceneStatus,
};
pub use stars::{FAR_RADIUS, NEAR_RADIUS, Star, StarLayer, far_layer, hsl_to_rgb, near_layer};
