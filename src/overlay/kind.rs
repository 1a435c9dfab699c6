use serde::Serialize;

use crate::page::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayKind {
    Calendar,
    BlogDetail,
    LinkShare,
    Alert,
    Toast,
}

impl OverlayKind {
    pub const ALL: [Self; 5] = [
        Self::Calendar,
        Self::BlogDetail,
        Self::LinkShare,
        Self::Alert,
        Self::Toast,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::BlogDetail => "blog-detail",
            Self::LinkShare => "link-share",
            Self::Alert => "alert",
            Self::Toast => "toast",
        }
    }

    /// Modal overlays hold the scroll lock and take focus; the toast does neither.
    pub fn is_modal(self) -> bool {
        !matches!(self, Self::Toast)
    }

    pub fn root_id(self) -> ElementId {
        ElementId::new(format!("overlay-{}", self.slug()))
    }

    pub fn part_id(self, part: &str) -> ElementId {
        ElementId::new(format!("overlay-{}-{part}", self.slug()))
    }
}
