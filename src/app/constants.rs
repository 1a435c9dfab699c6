use std::time::Duration;

/// Pixel size assumed for one terminal cell when mapping the terminal to a viewport.
pub(crate) const DEFAULT_CELL_SIZE_PX: (f64, f64) = (10.0, 20.0);
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(33);
pub(crate) const LINE_SCROLL_PX: f64 = 40.0;
pub(crate) const PAGE_SCROLL_SHARE: f64 = 0.8;
/// Start and end of a simulated finger swipe.
pub(crate) const SWIPE_PX: (f64, f64) = (300.0, 80.0);
