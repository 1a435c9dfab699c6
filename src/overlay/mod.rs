pub mod calendar;
mod descriptor;
mod kind;
mod manager;
mod toast;

pub use calendar::{
    CalendarController, CalendarEvent, CalendarEventKind, EVENT_CLASS, EventSource, NoEvents,
    StaticEvents,
};
pub use descriptor::{
    ActionRole, LINK_SHARE_MESSAGE, LINK_SHARE_TITLE, OverlayAction, OverlayButton,
    OverlayDescriptor, Tone,
};
pub use kind::OverlayKind;
pub use manager::{OverlayClick, OverlayManager};
pub use toast::ToastController;
