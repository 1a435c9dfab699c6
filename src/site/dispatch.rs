use crate::context::PageCx;
use crate::cta::{APPLICATION_FORM_URL, BROCHURE_FILE_NAME, BROCHURE_URL, CtaAction};
use crate::effect::Effect;
use crate::event::{Dispatch, Key, PageEvent};
use crate::nav::{NavClick, scroll_to_element};
use crate::overlay::{OverlayAction, OverlayClick, OverlayDescriptor, OverlayKind, Tone};
use crate::page::{ElementId, PageSurface, Viewport, blueprint, ids};

use super::Site;

pub const COPY_OK_MESSAGE: &str = "Link copied!";
pub const COPY_FAILED_MESSAGE: &str = "Could not copy the link.";

const HOVER_CLASS: &str = "hover";

impl Site {
    /// Routes one host event. Returns whether the browser default was suppressed.
    pub fn handle(&mut self, event: PageEvent) -> Dispatch {
        let dispatch = match event {
            PageEvent::Scroll { y } => self.on_scroll(y),
            PageEvent::Resize { width, height } => self.on_resize(width, height),
            PageEvent::Key { key } => self.on_key(key),
            PageEvent::Click { target } => self.on_click(&target),
            PageEvent::TouchStart { x } => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.touch_start(x);
                }
                Dispatch::Default
            }
            PageEvent::TouchEnd { x } => {
                if let Some(carousel) = &mut self.carousel {
                    let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                    carousel.touch_end(&mut cx, x);
                }
                Dispatch::Default
            }
            PageEvent::Hover { target, entered } => {
                if let Some(card) = self.page.closest_with_class(&target, ids::FEATURE_CLASS) {
                    self.page.toggle_class(&card, HOVER_CLASS, entered);
                }
                Dispatch::Default
            }
            PageEvent::Focus { target } => {
                self.page.focus(&target);
                Dispatch::Default
            }
            PageEvent::Input { target, value } => {
                self.page.set_value(&target, &value);
                Dispatch::Default
            }
            PageEvent::Submit { form } => self.on_submit(&form),
            PageEvent::ClipboardResult { ok } => {
                let (message, tone) = if ok {
                    (COPY_OK_MESSAGE, Tone::Success)
                } else {
                    (COPY_FAILED_MESSAGE, Tone::Error)
                };
                let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                self.toast.show(&mut cx, &mut self.overlays, message, tone);
                Dispatch::Default
            }
            PageEvent::AssetProgress { loaded, total } => {
                self.scene.asset_progress(loaded, total);
                Dispatch::Default
            }
            PageEvent::AssetLoaded => {
                self.scene.asset_loaded();
                Dispatch::Default
            }
            PageEvent::AssetFailed { reason } => {
                self.scene.asset_failed(reason);
                Dispatch::Default
            }
        };
        self.sync_scroll();
        dispatch
    }

    fn on_scroll(&mut self, y: f64) -> Dispatch {
        // The locked document does not move.
        if self.lock.is_locked() {
            return Dispatch::Prevented;
        }
        self.page.scroll_to(y, false);
        self.run_scroll_observers();
        Dispatch::Default
    }

    fn on_resize(&mut self, width: f64, height: f64) -> Dispatch {
        blueprint::resize(&mut self.page, Viewport::new(width, height));
        let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
        if let Some(drawer) = &mut self.drawer {
            drawer.handle_resize(&mut cx);
        }
        if let Some(carousel) = &mut self.carousel {
            carousel.handle_resize(&mut cx);
        }
        self.scene.resize(width, height);
        Dispatch::Default
    }

    fn on_key(&mut self, key: Key) -> Dispatch {
        match key {
            Key::Escape => {
                let closed = {
                    let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                    self.overlays.handle_escape(&mut cx)
                };
                match closed {
                    Some(kind) => self.overlay_closed(kind),
                    None => {
                        if let Some(drawer) = &mut self.drawer {
                            let mut cx =
                                PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                            drawer.handle_escape(&mut cx);
                        }
                    }
                }
                Dispatch::Default
            }
            Key::Tab => {
                let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                if self.overlays.trap_tab(&mut cx) {
                    Dispatch::Prevented
                } else {
                    Dispatch::Default
                }
            }
            Key::ArrowLeft | Key::ArrowRight => {
                if let Some(carousel) = &mut self.carousel {
                    let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                    carousel.handle_key(&mut cx, key);
                }
                Dispatch::Default
            }
            Key::Enter | Key::Space => {
                let Some(drawer) = &mut self.drawer else {
                    return Dispatch::Default;
                };
                let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                let click = drawer.handle_activate_key(&mut cx);
                self.nav_outcome(click)
            }
        }
    }

    fn on_click(&mut self, target: &ElementId) -> Dispatch {
        let routed = {
            let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
            self.overlays.handle_click(&mut cx, target)
        };
        match routed {
            OverlayClick::Action { kind, action } => {
                self.overlay_closed(kind);
                self.overlay_action(action);
                return Dispatch::Prevented;
            }
            OverlayClick::Closed(kind) => {
                self.overlay_closed(kind);
                return Dispatch::Prevented;
            }
            OverlayClick::Inside(OverlayKind::Calendar) => {
                let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
                return if self.calendar.handle_click(&mut cx, target) {
                    Dispatch::Prevented
                } else {
                    Dispatch::Default
                };
            }
            OverlayClick::Inside(_) => return Dispatch::Default,
            // A modal covers the page, so nothing behind it can be hit.
            OverlayClick::Outside if self.overlays.topmost_modal().is_some() => {
                return Dispatch::Default;
            }
            OverlayClick::Outside => {}
        }

        if let Some(drawer) = &mut self.drawer {
            let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
            let click = drawer.handle_click(&mut cx, target);
            if click != NavClick::Ignored {
                return self.nav_outcome(click);
            }
        }

        if let Some(carousel) = &mut self.carousel {
            let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
            if carousel.handle_click(&mut cx, target) {
                return Dispatch::Prevented;
            }
        }

        if let Some((button, action)) = self.cta.resolve(&self.page, target) {
            let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
            self.cta.press(&mut cx, &button);
            tracing::info!(?action, "call to action");
            self.cta_action(action);
            return Dispatch::Prevented;
        }

        if let Some(card) = self.page.closest_with_class(target, ids::BLOG_CARD_CLASS) {
            let title = self.page.attr(&card, "data-title").unwrap_or_default();
            let body = self.page.attr(&card, "data-body").unwrap_or_default();
            let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
            self.overlays
                .open(&mut cx, OverlayDescriptor::blog_detail(title, body));
            return Dispatch::Prevented;
        }

        self.scroll_shortcut(target)
    }

    /// Back-to-top, logo and scroll-indicator clicks.
    fn scroll_shortcut(&mut self, target: &ElementId) -> Dispatch {
        let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
        let hit = |id: &str, cx: &PageCx<'_>| cx.page.is_within(target, &ElementId::new(id));
        if hit(ids::BACK_TO_TOP, &cx) {
            cx.page.scroll_to(0.0, true);
        } else if hit(ids::LOGO, &cx) {
            scroll_to_element(&mut cx, &ElementId::new(ids::HERO_SECTION));
        } else if hit(ids::SCROLL_INDICATOR, &cx) {
            scroll_to_element(&mut cx, &ElementId::new(ids::ABOUT_SECTION));
        } else {
            return Dispatch::Default;
        }
        Dispatch::Prevented
    }

    fn nav_outcome(&mut self, click: NavClick) -> Dispatch {
        match click {
            NavClick::Ignored => Dispatch::Default,
            NavClick::Handled => Dispatch::Prevented,
            NavClick::Navigate { href } => {
                self.effects.push(Effect::Navigate { href });
                Dispatch::Prevented
            }
        }
    }

    fn overlay_action(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::OpenLink { url } => {
                self.effects.push(Effect::OpenUrl { url, new_tab: true });
            }
            OverlayAction::CopyLink { url } => {
                self.effects.push(Effect::CopyToClipboard { text: url });
            }
            OverlayAction::Acknowledge => {}
        }
    }

    fn cta_action(&mut self, action: CtaAction) {
        let mut cx = PageCx::new(&mut self.page, &mut self.lock, &mut self.timers);
        match action {
            CtaAction::DownloadBrochure => self.effects.push(Effect::Download {
                url: BROCHURE_URL.to_string(),
                file_name: BROCHURE_FILE_NAME.to_string(),
                fallback_url: BROCHURE_URL.to_string(),
            }),
            CtaAction::JoinSignal(group) => {
                self.overlays
                    .open(&mut cx, OverlayDescriptor::link_share(group.url()));
            }
            CtaAction::OpenApplicationForm => self.effects.push(Effect::OpenUrl {
                url: APPLICATION_FORM_URL.to_string(),
                new_tab: true,
            }),
            CtaAction::ShowCalendar => self.calendar.open(&mut cx, &mut self.overlays),
            CtaAction::ScrollToProjects => {
                scroll_to_element(&mut cx, &ElementId::new(ids::PROJECTS_SECTION));
            }
        }
    }

    fn on_submit(&mut self, form: &ElementId) -> Dispatch {
        let Some(adapter) = &self.form else {
            return Dispatch::Default;
        };
        let Some(submission) = adapter.begin(&self.page, form) else {
            return Dispatch::Default;
        };
        tracing::debug!(collection = %submission.collection, "contact form submitted");
        self.submissions.push_back(submission);
        Dispatch::Prevented
    }
}
