mod state;
mod visibility;

pub use state::{ScrollState, ScrollThresholds, ScrollTracker, next_state};
pub use visibility::{CounterAnimation, HeroRotator, LazyImages, counter_value};

pub const ROTATOR_IMAGES: [&str; 3] = [
    "images/team-1.jpg",
    "images/team-2.jpg",
    "images/team-3.jpg",
];
