use std::collections::BTreeSet;

use crate::overlay::OverlayKind;

use super::node::ElementId;
use super::traits::PageSurface;

pub const SCROLL_LOCK_CLASS: &str = "scroll-locked";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LockHolder {
    Drawer,
    Overlay(OverlayKind),
}

/// Background-scroll suppression shared by the drawer and modal overlays.
///
/// Each holder owns at most one hold; the document flag is set while any
/// hold exists and cleared only when the last holder releases.
#[derive(Debug)]
pub struct ScrollLock {
    root: ElementId,
    holders: BTreeSet<LockHolder>,
}

impl ScrollLock {
    pub fn new(root: ElementId) -> Self {
        Self {
            root,
            holders: BTreeSet::new(),
        }
    }

    /// Returns false when `holder` already held the lock.
    pub fn acquire(&mut self, page: &mut dyn PageSurface, holder: LockHolder) -> bool {
        let inserted = self.holders.insert(holder);
        if inserted && self.holders.len() == 1 {
            page.add_class(&self.root, SCROLL_LOCK_CLASS);
        }
        inserted
    }

    /// Returns false when `holder` held nothing.
    pub fn release(&mut self, page: &mut dyn PageSurface, holder: LockHolder) -> bool {
        let removed = self.holders.remove(&holder);
        if removed && self.holders.is_empty() {
            page.remove_class(&self.root, SCROLL_LOCK_CLASS);
        }
        removed
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn holds(&self, holder: LockHolder) -> bool {
        self.holders.contains(&holder)
    }

    pub fn hold_count(&self) -> usize {
        self.holders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{LockHolder, SCROLL_LOCK_CLASS, ScrollLock};
    use crate::overlay::OverlayKind;
    use crate::page::{MemoryPage, PageSurface, Viewport};

    #[test]
    fn overlay_release_keeps_drawer_hold() {
        let mut page = MemoryPage::new(Viewport::new(375.0, 700.0));
        let root = page.root().clone();
        let mut lock = ScrollLock::new(root.clone());

        assert!(lock.acquire(&mut page, LockHolder::Drawer));
        assert!(lock.acquire(&mut page, LockHolder::Overlay(OverlayKind::Calendar)));
        assert!(lock.release(&mut page, LockHolder::Overlay(OverlayKind::Calendar)));
        assert!(page.has_class(&root, SCROLL_LOCK_CLASS));

        assert!(lock.release(&mut page, LockHolder::Drawer));
        assert!(!page.has_class(&root, SCROLL_LOCK_CLASS));
    }

    #[test]
    fn repeated_acquire_is_a_single_hold() {
        let mut page = MemoryPage::new(Viewport::new(375.0, 700.0));
        let root = page.root().clone();
        let mut lock = ScrollLock::new(root.clone());

        assert!(lock.acquire(&mut page, LockHolder::Drawer));
        assert!(!lock.acquire(&mut page, LockHolder::Drawer));
        assert_eq!(lock.hold_count(), 1);
        assert!(lock.release(&mut page, LockHolder::Drawer));
        assert!(!lock.release(&mut page, LockHolder::Drawer));
        assert!(!page.has_class(&root, SCROLL_LOCK_CLASS));
    }
}
