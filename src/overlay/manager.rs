use crate::context::PageCx;
use crate::page::{ElementId, LockHolder};

use super::descriptor::{OverlayAction, OverlayDescriptor};
use super::kind::OverlayKind;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OverlayInstance {
    kind: OverlayKind,
    root: ElementId,
    close: ElementId,
    buttons: Vec<(ElementId, OverlayAction)>,
    previous_focus: Option<ElementId>,
}

impl OverlayInstance {
    fn controls(&self) -> impl Iterator<Item = &ElementId> {
        std::iter::once(&self.close).chain(self.buttons.iter().map(|(id, _)| id))
    }
}

/// Result of routing a click through the open overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayClick {
    /// The click landed outside every overlay.
    Outside,
    /// Inside an overlay's content but not on a dismiss trigger.
    Inside(OverlayKind),
    Closed(OverlayKind),
    Action {
        kind: OverlayKind,
        action: OverlayAction,
    },
}

/// Open/close lifecycle shared by every overlay variant.
///
/// Instances are kept in opening order; the last one is topmost. Dismiss
/// triggers live on the instance, so dropping it deregisters them all.
#[derive(Debug, Default)]
pub struct OverlayManager {
    open: Vec<OverlayInstance>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `descriptor`, replacing any open overlay of the same kind.
    /// Returns the overlay root, or `None` when the page refused the insert.
    pub fn open(&mut self, cx: &mut PageCx<'_>, descriptor: OverlayDescriptor) -> Option<ElementId> {
        let kind = descriptor.kind;
        self.close(cx, kind);

        let built = descriptor.build();
        let root = built.node.id.clone();
        let previous_focus = cx.page.focused();
        let parent = ElementId::new(crate::page::ROOT_ID);
        if !cx.page.insert(&parent, built.node) {
            tracing::warn!(overlay = kind.slug(), "overlay root could not be inserted");
            return None;
        }

        if kind.is_modal() {
            cx.lock.acquire(cx.page, LockHolder::Overlay(kind));
            cx.page.focus(&built.close);
        }
        tracing::info!(overlay = kind.slug(), "overlay opened");
        self.open.push(OverlayInstance {
            kind,
            root: root.clone(),
            close: built.close,
            buttons: built.buttons,
            previous_focus,
        });
        Some(root)
    }

    /// Closes the overlay of `kind`. Returns false when none was open.
    pub fn close(&mut self, cx: &mut PageCx<'_>, kind: OverlayKind) -> bool {
        let Some(pos) = self.open.iter().position(|instance| instance.kind == kind) else {
            return false;
        };
        let instance = self.open.remove(pos);
        cx.page.remove(&instance.root);
        if kind.is_modal() {
            cx.lock.release(cx.page, LockHolder::Overlay(kind));
            if let Some(previous) = instance.previous_focus
                && cx.page.exists(&previous)
            {
                cx.page.focus(&previous);
            }
        }
        tracing::info!(overlay = kind.slug(), "overlay closed");
        true
    }

    /// Escape closes the topmost modal overlay.
    pub fn handle_escape(&mut self, cx: &mut PageCx<'_>) -> Option<OverlayKind> {
        let kind = self.topmost_modal()?;
        self.close(cx, kind);
        Some(kind)
    }

    pub fn handle_click(&mut self, cx: &mut PageCx<'_>, target: &ElementId) -> OverlayClick {
        let hit = self
            .open
            .iter()
            .rev()
            .find(|instance| cx.page.is_within(target, &instance.root))
            .cloned();
        let Some(instance) = hit else {
            return OverlayClick::Outside;
        };

        if target == &instance.root || target == &instance.close {
            self.close(cx, instance.kind);
            return OverlayClick::Closed(instance.kind);
        }
        if let Some((_, action)) = instance.buttons.iter().find(|(id, _)| id == target) {
            self.close(cx, instance.kind);
            return OverlayClick::Action {
                kind: instance.kind,
                action: action.clone(),
            };
        }
        OverlayClick::Inside(instance.kind)
    }

    /// Keeps Tab focus cycling through the topmost modal's controls.
    /// Returns false when no modal is open.
    pub fn trap_tab(&self, cx: &mut PageCx<'_>) -> bool {
        let Some(instance) = self
            .open
            .iter()
            .rev()
            .find(|instance| instance.kind.is_modal())
        else {
            return false;
        };
        let controls: Vec<&ElementId> = instance
            .controls()
            .filter(|id| cx.page.exists(id))
            .collect();
        if controls.is_empty() {
            return true;
        }
        let focused = cx.page.focused();
        let next = focused
            .as_ref()
            .and_then(|current| controls.iter().position(|id| *id == current))
            .map_or(0, |pos| (pos + 1) % controls.len());
        cx.page.focus(controls[next]);
        true
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.open.iter().any(|instance| instance.kind == kind)
    }

    pub fn open_kinds(&self) -> Vec<OverlayKind> {
        self.open.iter().map(|instance| instance.kind).collect()
    }

    pub fn topmost_modal(&self) -> Option<OverlayKind> {
        self.open
            .iter()
            .rev()
            .map(|instance| instance.kind)
            .find(|kind| kind.is_modal())
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayClick, OverlayManager};
    use crate::context::PageCx;
    use crate::overlay::{OverlayAction, OverlayDescriptor, OverlayKind};
    use crate::page::{
        ElementId, LockHolder, MemoryPage, NodeSpec, PageSurface, SCROLL_LOCK_CLASS, ScrollLock,
        Viewport,
    };
    use crate::timer::TimerQueue;

    struct Fixture {
        page: MemoryPage,
        lock: ScrollLock,
        timers: TimerQueue,
        overlays: OverlayManager,
    }

    impl Fixture {
        fn new() -> Self {
            let mut page = MemoryPage::new(Viewport::new(1024.0, 768.0));
            let root = page.root().clone();
            page.insert(&root, NodeSpec::new("button", "opener"));
            page.focus(&ElementId::new("opener"));
            Self {
                lock: ScrollLock::new(root),
                page,
                timers: TimerQueue::new(),
                overlays: OverlayManager::new(),
            }
        }

        fn cx(&mut self) -> (PageCx<'_>, &mut OverlayManager) {
            (
                PageCx::new(&mut self.page, &mut self.lock, &mut self.timers),
                &mut self.overlays,
            )
        }
    }

    #[test]
    fn same_kind_open_leaves_one_instance_and_one_hold() {
        let mut fx = Fixture::new();
        {
            let (mut cx, overlays) = fx.cx();
            overlays.open(&mut cx, OverlayDescriptor::blog_detail("A", "first"));
            overlays.open(&mut cx, OverlayDescriptor::blog_detail("B", "second"));
        }
        assert_eq!(fx.overlays.len(), 1);
        assert_eq!(fx.lock.hold_count(), 1);
        assert!(fx.lock.holds(LockHolder::Overlay(OverlayKind::BlogDetail)));
        let body = OverlayKind::BlogDetail.part_id("body");
        assert_eq!(fx.page.text(&body).as_deref(), Some("second"));
    }

    #[test]
    fn open_focuses_close_control_and_close_restores_focus() {
        let mut fx = Fixture::new();
        let (mut cx, overlays) = fx.cx();
        overlays.open(&mut cx, OverlayDescriptor::blog_detail("A", "body"));
        assert_eq!(cx.page.focused(), Some(OverlayKind::BlogDetail.part_id("close")));

        assert!(overlays.close(&mut cx, OverlayKind::BlogDetail));
        assert!(!overlays.close(&mut cx, OverlayKind::BlogDetail));
        assert_eq!(cx.page.focused(), Some(ElementId::new("opener")));
        assert!(!cx.page.exists(&OverlayKind::BlogDetail.root_id()));
        let root = ElementId::new(crate::page::ROOT_ID);
        assert!(!cx.page.has_class(&root, SCROLL_LOCK_CLASS));
    }

    #[test]
    fn focus_restore_is_silent_when_opener_is_gone() {
        let mut fx = Fixture::new();
        let (mut cx, overlays) = fx.cx();
        overlays.open(&mut cx, OverlayDescriptor::alert("boom"));
        cx.page.remove(&ElementId::new("opener"));
        assert!(overlays.close(&mut cx, OverlayKind::Alert));
        assert_eq!(cx.page.focused(), None);
    }

    #[test]
    fn clicks_dismiss_on_scrim_and_close_but_not_on_content() {
        let mut fx = Fixture::new();
        let (mut cx, overlays) = fx.cx();
        overlays.open(&mut cx, OverlayDescriptor::blog_detail("A", "body"));

        let body = OverlayKind::BlogDetail.part_id("body");
        assert_eq!(
            overlays.handle_click(&mut cx, &body),
            OverlayClick::Inside(OverlayKind::BlogDetail)
        );
        assert_eq!(
            overlays.handle_click(&mut cx, &ElementId::new("opener")),
            OverlayClick::Outside
        );
        assert_eq!(
            overlays.handle_click(&mut cx, &OverlayKind::BlogDetail.root_id()),
            OverlayClick::Closed(OverlayKind::BlogDetail)
        );
        assert!(overlays.is_empty());
    }

    #[test]
    fn action_button_closes_once_and_reports_action() {
        let mut fx = Fixture::new();
        let (mut cx, overlays) = fx.cx();
        overlays.open(&mut cx, OverlayDescriptor::link_share("https://signal.group/#x"));
        let secondary = OverlayKind::LinkShare.part_id("secondary");

        assert_eq!(
            overlays.handle_click(&mut cx, &secondary),
            OverlayClick::Action {
                kind: OverlayKind::LinkShare,
                action: OverlayAction::CopyLink {
                    url: "https://signal.group/#x".to_string()
                },
            }
        );
        assert_eq!(overlays.handle_click(&mut cx, &secondary), OverlayClick::Outside);
        assert_eq!(cx.lock.hold_count(), 0);
    }

    #[test]
    fn escape_closes_topmost_modal_only() {
        let mut fx = Fixture::new();
        let (mut cx, overlays) = fx.cx();
        overlays.open(&mut cx, OverlayDescriptor::calendar("Loading"));
        overlays.open(&mut cx, OverlayDescriptor::alert("boom"));
        overlays.open(
            &mut cx,
            OverlayDescriptor::toast("hi", crate::overlay::Tone::Info),
        );

        assert_eq!(overlays.handle_escape(&mut cx), Some(OverlayKind::Alert));
        assert_eq!(
            overlays.open_kinds(),
            vec![OverlayKind::Calendar, OverlayKind::Toast]
        );
        assert_eq!(cx.lock.hold_count(), 1);
    }

    #[test]
    fn toast_neither_locks_nor_steals_focus() {
        let mut fx = Fixture::new();
        let (mut cx, overlays) = fx.cx();
        overlays.open(
            &mut cx,
            OverlayDescriptor::toast("saved", crate::overlay::Tone::Success),
        );
        assert_eq!(cx.lock.hold_count(), 0);
        assert_eq!(cx.page.focused(), Some(ElementId::new("opener")));
        assert_eq!(overlays.handle_escape(&mut cx), None);
    }

    #[test]
    fn tab_cycles_through_modal_controls() {
        let mut fx = Fixture::new();
        let (mut cx, overlays) = fx.cx();
        overlays.open(&mut cx, OverlayDescriptor::link_share("https://signal.group/#x"));
        assert!(overlays.trap_tab(&mut cx));
        assert_eq!(cx.page.focused(), Some(OverlayKind::LinkShare.part_id("primary")));
        assert!(overlays.trap_tab(&mut cx));
        assert!(overlays.trap_tab(&mut cx));
        assert_eq!(cx.page.focused(), Some(OverlayKind::LinkShare.part_id("close")));
    }
}
