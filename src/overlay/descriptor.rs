use crate::page::{ElementId, NodeSpec, ids};

use super::kind::OverlayKind;

/// What an overlay button asks the site to do after the overlay closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    OpenLink { url: String },
    CopyLink { url: String },
    Acknowledge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRole {
    Primary,
    Secondary,
}

impl ActionRole {
    fn slug(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Info,
    Success,
    Error,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "tone-info",
            Self::Success => "tone-success",
            Self::Error => "tone-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayButton {
    pub role: ActionRole,
    pub label: String,
    pub action: OverlayAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayDescriptor {
    pub kind: OverlayKind,
    pub title: Option<String>,
    pub body: String,
    pub buttons: Vec<OverlayButton>,
    pub tone: Tone,
}

/// Built overlay subtree plus the ids the manager wires dismiss triggers to.
pub(crate) struct BuiltOverlay {
    pub node: NodeSpec,
    pub close: ElementId,
    pub buttons: Vec<(ElementId, OverlayAction)>,
}

pub const LINK_SHARE_TITLE: &str = "Join the Signal group";
pub const LINK_SHARE_MESSAGE: &str = "You are being redirected to Signal. If Signal is not installed, copy the link and use it once the app is set up.";

impl OverlayDescriptor {
    pub fn new(kind: OverlayKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            body: body.into(),
            buttons: Vec::new(),
            tone: Tone::Info,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn button(mut self, role: ActionRole, label: impl Into<String>, action: OverlayAction) -> Self {
        self.buttons.push(OverlayButton {
            role,
            label: label.into(),
            action,
        });
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn blog_detail(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(OverlayKind::BlogDetail, body).title(title)
    }

    pub fn link_share(url: &str) -> Self {
        Self::new(OverlayKind::LinkShare, LINK_SHARE_MESSAGE)
            .title(LINK_SHARE_TITLE)
            .button(
                ActionRole::Primary,
                "Go to Signal",
                OverlayAction::OpenLink {
                    url: url.to_string(),
                },
            )
            .button(
                ActionRole::Secondary,
                "Copy link",
                OverlayAction::CopyLink {
                    url: url.to_string(),
                },
            )
    }

    /// Blocking error notice; stays until the user acknowledges it.
    pub fn alert(message: impl Into<String>) -> Self {
        Self::new(OverlayKind::Alert, message)
            .title("Something went wrong")
            .tone(Tone::Error)
            .button(ActionRole::Primary, "OK", OverlayAction::Acknowledge)
    }

    pub fn toast(message: impl Into<String>, tone: Tone) -> Self {
        Self::new(OverlayKind::Toast, message).tone(tone)
    }

    pub fn calendar(loading_text: impl Into<String>) -> Self {
        Self::new(OverlayKind::Calendar, loading_text).title("Event calendar")
    }

    pub(crate) fn build(self) -> BuiltOverlay {
        let kind = self.kind;
        let close = kind.part_id("close");
        let mut content = NodeSpec::new("div", kind.part_id("content").as_str())
            .class("overlay-content")
            .child(
                NodeSpec::new("button", close.as_str())
                    .class("overlay-close")
                    .attr(ids::ARIA_LABEL, "Close")
                    .text("×"),
            );
        if let Some(title) = self.title {
            content = content.child(NodeSpec::new("h3", kind.part_id("title").as_str()).text(title));
        }
        content = content.child(
            NodeSpec::new("div", kind.part_id("body").as_str())
                .class("overlay-body")
                .text(self.body),
        );

        let mut buttons = Vec::with_capacity(self.buttons.len());
        if !self.buttons.is_empty() {
            let mut row = NodeSpec::new("div", kind.part_id("actions").as_str()).class("overlay-actions");
            for button in self.buttons {
                let id = kind.part_id(button.role.slug());
                row = row.child(
                    NodeSpec::new("button", id.as_str())
                        .class(format!("btn-{}", button.role.slug()))
                        .text(button.label),
                );
                buttons.push((id, button.action));
            }
            content = content.child(row);
        }

        let mut root = NodeSpec::new("div", kind.root_id().as_str())
            .class("overlay")
            .class(format!("overlay-{}", kind.slug()))
            .class(self.tone.class())
            .child(content);
        if kind.is_modal() {
            root = root.attr("role", "dialog").attr("aria-modal", "true");
        } else {
            root = root.attr("role", "status");
        }

        BuiltOverlay {
            node: root,
            close,
            buttons,
        }
    }
}
