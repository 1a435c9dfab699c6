mod controller;
mod state;

pub use controller::Carousel;
pub use state::{CarouselState, visible_count};
