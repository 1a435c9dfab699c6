use serde::{Deserialize, Serialize};

use crate::page::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    Escape,
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    Tab,
}

/// Input delivered to the site by a host, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageEvent {
    Scroll {
        y: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Key {
        key: Key,
    },
    Click {
        target: ElementId,
    },
    TouchStart {
        x: f64,
    },
    TouchEnd {
        x: f64,
    },
    /// Pointer enter/leave or focus in/out.
    Hover {
        target: ElementId,
        entered: bool,
    },
    /// Keyboard focus moved to `target` outside any trapped modal.
    Focus {
        target: ElementId,
    },
    Input {
        target: ElementId,
        value: String,
    },
    Submit {
        form: ElementId,
    },
    ClipboardResult {
        ok: bool,
    },
    AssetProgress {
        loaded: u64,
        total: u64,
    },
    AssetLoaded,
    AssetFailed {
        reason: String,
    },
}

/// Whether the browser's default action for the event should still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    #[default]
    Default,
    Prevented,
}

impl Dispatch {
    pub fn is_prevented(self) -> bool {
        matches!(self, Self::Prevented)
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, PageEvent};
    use crate::page::ElementId;

    #[test]
    fn page_events_use_tagged_kebab_case_json() {
        let events: Vec<PageEvent> = serde_json::from_str(
            r#"[
                {"type": "scroll", "y": 240},
                {"type": "key", "key": "arrow-right"},
                {"type": "click", "target": "menu-toggle"},
                {"type": "asset-loaded"}
            ]"#,
        )
        .expect("script should parse");
        assert_eq!(
            events,
            vec![
                PageEvent::Scroll { y: 240.0 },
                PageEvent::Key {
                    key: Key::ArrowRight
                },
                PageEvent::Click {
                    target: ElementId::new("menu-toggle")
                },
                PageEvent::AssetLoaded,
            ]
        );
    }
}
