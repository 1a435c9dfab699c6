
use std::sync::Arc;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Playground;
use crate::config::Config;
use crate::page::Viewport;
use crate::store::MemoryStore;

fn playground() -> (Playground, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
    let playground = Playground::with_viewport(
        &Config::default(),
        store.clone(),
        today,
        Viewport::new(1280.0, 800.0),
    );
    (playground, store)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
