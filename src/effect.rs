use serde::Serialize;

/// Side effects the page cannot perform itself; the host carries them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Effect {
    OpenUrl {
        url: String,
        new_tab: bool,
    },
    /// Save `url` as `file_name`; hosts that cannot download open `fallback_url` instead.
    Download {
        url: String,
        file_name: String,
        fallback_url: String,
    },
    /// The host must answer with [`crate::event::PageEvent::ClipboardResult`].
    CopyToClipboard {
        text: String,
    },
    Navigate {
        href: String,
    },
}
