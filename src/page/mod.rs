pub mod blueprint;
pub mod ids;
mod memory;
mod node;
mod scroll_lock;
mod traits;

pub use memory::{ElementSnapshot, MemoryPage, PageSnapshot, ROOT_ID};
pub use node::{ElementId, NodeSpec, Rect, Viewport, visible_fraction};
pub use scroll_lock::{LockHolder, SCROLL_LOCK_CLASS, ScrollLock};
pub use traits::PageSurface;
