use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub scroll: ScrollConfig,
    pub nav: NavConfig,
    pub carousel: CarouselConfig,
    pub overlay: OverlayConfig,
    pub store: StoreConfig,
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollConfig {
    pub top_threshold_px: f64,
    pub delta_threshold_px: f64,
    pub hide_after_px: f64,
    pub back_to_top_after_px: f64,
    pub initial_check_delay_ms: u64,
    pub lazy_image_visibility: f64,
    pub rotator_visibility: f64,
    pub counter_visibility: f64,
    pub rotator_interval_ms: u64,
    pub rotator_fade_ms: u64,
    pub counter_duration_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            top_threshold_px: 10.0,
            delta_threshold_px: 10.0,
            hide_after_px: 150.0,
            back_to_top_after_px: 20.0,
            initial_check_delay_ms: 100,
            lazy_image_visibility: 0.15,
            rotator_visibility: 0.2,
            counter_visibility: 0.3,
            rotator_interval_ms: 5000,
            rotator_fade_ms: 500,
            counter_duration_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavConfig {
    pub breakpoint_px: f64,
    pub highlight_ms: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            highlight_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    pub max_visible: usize,
    pub swipe_threshold_px: f64,
    pub resize_debounce_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            swipe_threshold_px: 100.0,
            resize_debounce_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OverlayConfig {
    pub toast_ms: u64,
    pub cta_feedback_ms: u64,
    pub calendar_loading_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            toast_ms: 3000,
            cta_feedback_ms: 300,
            calendar_loading_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    Memory,
    RealtimeDb,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "memory" => Some(Self::Memory),
            "realtime-db" => Some(Self::RealtimeDb),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: String,
    pub collection: String,
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: "https://marsias-32f6a-default-rtdb.firebaseio.com".to_string(),
            collection: "messages".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: u64,
    pub near_stars: usize,
    pub far_stars: usize,
    pub model_path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5a7e_5eed,
            near_stars: 1500,
            far_stars: 3000,
            model_path: "images/satyr.glb".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::config(format!("failed to parse {}: {source}", path.display()))
        })?;
        Ok(parsed.sanitized())
    }

    pub(crate) fn sanitized(mut self) -> Self {
        let scroll_defaults = ScrollConfig::default();
        let scroll = &mut self.scroll;
        scroll.top_threshold_px = finite_or(scroll.top_threshold_px, 0.0, scroll_defaults.top_threshold_px);
        scroll.delta_threshold_px =
            finite_or(scroll.delta_threshold_px, 0.0, scroll_defaults.delta_threshold_px);
        scroll.hide_after_px = finite_or(scroll.hide_after_px, 0.0, scroll_defaults.hide_after_px);
        scroll.back_to_top_after_px =
            finite_or(scroll.back_to_top_after_px, 0.0, scroll_defaults.back_to_top_after_px);
        scroll.lazy_image_visibility = fraction_or(
            scroll.lazy_image_visibility,
            scroll_defaults.lazy_image_visibility,
        );
        scroll.rotator_visibility =
            fraction_or(scroll.rotator_visibility, scroll_defaults.rotator_visibility);
        scroll.counter_visibility =
            fraction_or(scroll.counter_visibility, scroll_defaults.counter_visibility);
        scroll.rotator_interval_ms = scroll.rotator_interval_ms.max(1);
        scroll.counter_duration_ms = scroll.counter_duration_ms.max(1);

        if !self.nav.breakpoint_px.is_finite() || self.nav.breakpoint_px <= 0.0 {
            self.nav.breakpoint_px = NavConfig::default().breakpoint_px;
        }

        self.carousel.max_visible = self.carousel.max_visible.max(1);
        self.carousel.swipe_threshold_px = finite_or(
            self.carousel.swipe_threshold_px,
            1.0,
            CarouselConfig::default().swipe_threshold_px,
        );

        self.overlay.toast_ms = self.overlay.toast_ms.max(1);
        self.store.timeout_ms = self.store.timeout_ms.max(1);
        if self.store.collection.trim().is_empty() {
            self.store.collection = StoreConfig::default().collection;
        }
        self
    }
}

fn finite_or(value: f64, min: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= min {
        value
    } else {
        fallback
    }
}

fn fraction_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        value
    } else {
        fallback
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("MSITE_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("msite").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("msite")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("msite").join("config.toml"));
    }
    None
}
