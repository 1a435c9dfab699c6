mod anchor;
mod drawer;

pub use anchor::{AnchorScroller, scroll_to_element};
pub use drawer::{NavClick, NavDrawer};
