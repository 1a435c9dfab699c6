use std::collections::HashMap;

use crate::context::PageCx;
use crate::page::{ElementId, PageSurface, ids};
use crate::timer::{TimerId, TimerTask};

pub const BROCHURE_URL: &str = "/assets/documents/marsias.brochure.pdf";
pub const BROCHURE_FILE_NAME: &str = "marsias.brochure.pdf";
pub const SIGNAL_PROFILE_GROUP_URL: &str = "https://signal.group/#ProfileSharingGroupURL";
pub const SIGNAL_MAIN_GROUP_URL: &str = "https://signal.group/#MainCommunityGroupURL";
pub const APPLICATION_FORM_URL: &str = "https://forms.gle/qo3M9Cvm58ZFv3Y78";

const CLICKED_CLASS: &str = "clicked";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalGroup {
    Profile,
    Main,
}

impl SignalGroup {
    pub fn url(self) -> &'static str {
        match self {
            Self::Profile => SIGNAL_PROFILE_GROUP_URL,
            Self::Main => SIGNAL_MAIN_GROUP_URL,
        }
    }
}

/// What a call-to-action button does, resolved from its `aria-label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaAction {
    DownloadBrochure,
    JoinSignal(SignalGroup),
    OpenApplicationForm,
    ShowCalendar,
    ScrollToProjects,
}

impl CtaAction {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Download the member brochure" => Some(Self::DownloadBrochure),
            "Fill in the profile sharing form" => Some(Self::JoinSignal(SignalGroup::Profile)),
            "Join the Signal group" => Some(Self::JoinSignal(SignalGroup::Main)),
            "Fill in the school application form" => Some(Self::OpenApplicationForm),
            "View the event calendar" => Some(Self::ShowCalendar),
            "Browse the project pool" => Some(Self::ScrollToProjects),
            _ => None,
        }
    }
}

/// Click feedback for CTA buttons: a short-lived `clicked` class.
#[derive(Debug)]
pub struct CtaButtons {
    feedback_ms: u64,
    feedback: HashMap<ElementId, TimerId>,
}

impl CtaButtons {
    pub fn new(feedback_ms: u64) -> Self {
        Self {
            feedback_ms,
            feedback: HashMap::new(),
        }
    }

    /// Resolves a click anywhere inside a CTA button. Unknown labels are ignored
    /// and get no feedback.
    pub fn resolve(&self, page: &dyn PageSurface, target: &ElementId) -> Option<(ElementId, CtaAction)> {
        let button = page.closest_with_class(target, ids::CTA_CLASS)?;
        let label = page.attr(&button, ids::ARIA_LABEL)?;
        let action = CtaAction::from_label(&label)?;
        Some((button, action))
    }

    pub fn press(&mut self, cx: &mut PageCx<'_>, button: &ElementId) {
        cx.page.add_class(button, CLICKED_CLASS);
        if let Some(previous) = self.feedback.remove(button) {
            cx.timers.cancel(previous);
        }
        let timer = cx.timers.schedule(
            self.feedback_ms,
            TimerTask::ClearCtaFeedback {
                button: button.clone(),
            },
        );
        self.feedback.insert(button.clone(), timer);
    }

    pub fn release(&mut self, cx: &mut PageCx<'_>, button: &ElementId) {
        self.feedback.remove(button);
        cx.page.remove_class(button, CLICKED_CLASS);
    }
}
