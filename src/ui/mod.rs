mod chrome;
mod layout;
mod overlay;
mod page;

pub use chrome::{draw_header, draw_status};
pub use layout::{UiLayout, split_layout};
pub use overlay::draw_overlays;
pub use page::{OutlineLine, draw_page, outline};
