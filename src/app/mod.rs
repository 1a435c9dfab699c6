//! Interactive terminal host: draws the page with ratatui and feeds it
//! keyboard input, model loading progress and store results.

mod constants;
mod event_bus;
mod event_loop;
mod focus;
mod keymap;
mod loader;
mod playground;
pub(crate) mod terminal_session;

#[cfg(test)]
mod tests;

pub use playground::Playground;
