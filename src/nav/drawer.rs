use crate::config::NavConfig;
use crate::context::PageCx;
use crate::page::{ElementId, LockHolder, PageSurface, ids};

use super::anchor::AnchorScroller;

const MENU_OPEN_CLASS: &str = "menu-open";

/// What a click on the navigation turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavClick {
    /// Not a navigation target.
    Ignored,
    /// Handled here; the default action is suppressed.
    Handled,
    /// A plain link: let the browser navigate.
    Navigate { href: String },
}

/// Mobile navigation drawer with its scrim and dropdown submenus.
#[derive(Debug)]
pub struct NavDrawer {
    toggle: ElementId,
    nav: ElementId,
    scrim: ElementId,
    root: ElementId,
    dropdown_parents: Vec<ElementId>,
    breakpoint: f64,
    anchors: AnchorScroller,
    open: bool,
}

impl NavDrawer {
    /// Returns `None` when the toggle, the nav panel or the scrim is missing.
    pub fn attach(page: &dyn PageSurface, root: ElementId, config: &NavConfig) -> Option<Self> {
        let toggle = ElementId::new(ids::MENU_TOGGLE);
        let nav = ElementId::new(ids::MAIN_NAV);
        let scrim = ElementId::new(ids::MENU_SCRIM);
        if !(page.exists(&toggle) && page.exists(&nav) && page.exists(&scrim)) {
            tracing::debug!("navigation drawer markup missing, drawer disabled");
            return None;
        }
        let dropdown_parents = page
            .query_class(ids::DROPDOWN_PARENT_CLASS)
            .into_iter()
            .filter(|id| page.is_within(id, &nav))
            .collect();
        Some(Self {
            toggle,
            nav,
            scrim,
            root,
            dropdown_parents,
            breakpoint: config.breakpoint_px,
            anchors: AnchorScroller::new(config.highlight_ms),
            open: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn anchors_mut(&mut self) -> &mut AnchorScroller {
        &mut self.anchors
    }

    pub fn toggle(&mut self, cx: &mut PageCx<'_>, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        for id in [&self.toggle, &self.nav, &self.scrim] {
            cx.page.toggle_class(id, ids::ACTIVE_CLASS, open);
        }
        cx.page.toggle_class(&self.root, MENU_OPEN_CLASS, open);
        cx.page
            .set_attr(&self.toggle, ids::ARIA_EXPANDED, if open { "true" } else { "false" });
        if open {
            cx.lock.acquire(cx.page, LockHolder::Drawer);
            if let Some(first) = self.links(&*cx.page).into_iter().next() {
                cx.page.focus(&first);
            }
        } else {
            cx.lock.release(cx.page, LockHolder::Drawer);
        }
        tracing::info!(open, "navigation drawer toggled");
    }

    /// Wide viewports never show the drawer or expanded mobile submenus.
    pub fn handle_resize(&mut self, cx: &mut PageCx<'_>) {
        if cx.page.viewport().width <= self.breakpoint {
            return;
        }
        self.toggle(cx, false);
        self.collapse_submenus(cx, None);
    }

    pub fn handle_escape(&mut self, cx: &mut PageCx<'_>) -> bool {
        if !self.open {
            return false;
        }
        self.toggle(cx, false);
        true
    }

    pub fn handle_click(&mut self, cx: &mut PageCx<'_>, target: &ElementId) -> NavClick {
        if cx.page.is_within(target, &self.toggle) {
            self.toggle(cx, !self.open);
            return NavClick::Handled;
        }
        if target == &self.scrim {
            self.toggle(cx, false);
            return NavClick::Handled;
        }

        let Some(link) = cx.page.closest_with_class(target, ids::NAV_LINK_CLASS) else {
            return NavClick::Ignored;
        };
        if !cx.page.is_within(&link, &self.nav) {
            return NavClick::Ignored;
        }
        let href = cx.page.attr(&link, "href").unwrap_or_default();

        let parent = cx.page.parent(&link);
        if let Some(parent) = parent
            && cx.page.viewport().width <= self.breakpoint
            && self.dropdown_parents.contains(&parent)
        {
            self.toggle_submenu(cx, &parent, &link);
            return NavClick::Handled;
        }

        if href.starts_with('#') {
            self.toggle(cx, false);
            self.anchors.scroll_to_hash(cx, &href);
            return NavClick::Handled;
        }
        NavClick::Navigate { href }
    }

    /// Enter or Space on a focused nav link inside a dropdown item.
    pub fn handle_activate_key(&mut self, cx: &mut PageCx<'_>) -> NavClick {
        let Some(focused) = cx.page.focused() else {
            return NavClick::Ignored;
        };
        let in_dropdown = self
            .dropdown_parents
            .iter()
            .any(|parent| cx.page.is_within(&focused, parent));
        if !in_dropdown || !cx.page.has_class(&focused, ids::NAV_LINK_CLASS) {
            return NavClick::Ignored;
        }
        self.handle_click(cx, &focused)
    }

    fn toggle_submenu(&self, cx: &mut PageCx<'_>, parent: &ElementId, link: &ElementId) {
        let expand = !cx.page.has_class(parent, ids::ACTIVE_CLASS);
        self.collapse_submenus(cx, Some(parent));
        cx.page.toggle_class(parent, ids::ACTIVE_CLASS, expand);
        cx.page
            .set_attr(link, ids::ARIA_EXPANDED, if expand { "true" } else { "false" });
    }

    fn collapse_submenus(&self, cx: &mut PageCx<'_>, except: Option<&ElementId>) {
        for parent in &self.dropdown_parents {
            if Some(parent) == except {
                continue;
            }
            cx.page.remove_class(parent, ids::ACTIVE_CLASS);
            for child in cx.page.children(parent) {
                if cx.page.has_class(&child, ids::NAV_LINK_CLASS) {
                    cx.page.set_attr(&child, ids::ARIA_EXPANDED, "false");
                }
            }
        }
    }

    fn links(&self, page: &dyn PageSurface) -> Vec<ElementId> {
        page.query_class(ids::NAV_LINK_CLASS)
            .into_iter()
            .filter(|id| page.is_within(id, &self.nav))
            .collect()
    }
}
