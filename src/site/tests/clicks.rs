use chrono::NaiveDate;

use super::{click, has_class, site_with, wide_site};
use crate::cta::{APPLICATION_FORM_URL, BROCHURE_URL, SIGNAL_MAIN_GROUP_URL};
use crate::effect::Effect;
use crate::event::{Dispatch, Key, PageEvent};
use crate::overlay::{CalendarEvent, CalendarEventKind, OverlayKind, StaticEvents};
use crate::page::{ElementId, LockHolder, PageSurface, Viewport, ids};

fn part(kind: OverlayKind, name: &str) -> String {
    kind.part_id(name).as_str().to_string()
}

#[test]
fn signal_dialog_primary_action_opens_link_and_releases_lock() {
    let mut site = wide_site();
    assert_eq!(click(&mut site, "cta-2"), Dispatch::Prevented);
    assert!(site.overlays().is_open(OverlayKind::LinkShare));
    assert!(site.is_scroll_locked());
    assert!(has_class(&site, "cta-2", "clicked"));

    click(&mut site, &part(OverlayKind::LinkShare, "primary"));
    assert!(!site.overlays().is_open(OverlayKind::LinkShare));
    assert!(!site.is_scroll_locked());
    assert_eq!(
        site.take_effects(),
        vec![Effect::OpenUrl {
            url: SIGNAL_MAIN_GROUP_URL.to_string(),
            new_tab: true,
        }]
    );

    site.advance(300);
    assert!(!has_class(&site, "cta-2", "clicked"));
}

#[test]
fn copy_link_reports_clipboard_outcome_in_a_toast() {
    let mut site = wide_site();
    click(&mut site, "cta-2");
    click(&mut site, &part(OverlayKind::LinkShare, "secondary"));
    assert_eq!(
        site.take_effects(),
        vec![Effect::CopyToClipboard {
            text: SIGNAL_MAIN_GROUP_URL.to_string(),
        }]
    );

    site.handle(PageEvent::ClipboardResult { ok: true });
    let body = OverlayKind::Toast.part_id("body");
    assert_eq!(site.page().text(&body).as_deref(), Some("Link copied!"));
    assert!(!site.is_scroll_locked());

    site.handle(PageEvent::ClipboardResult { ok: false });
    assert_eq!(
        site.page().text(&body).as_deref(),
        Some("Could not copy the link.")
    );
    assert_eq!(site.overlays().len(), 1);

    site.advance(3_000);
    assert!(site.overlays().is_empty());
}

#[test]
fn download_and_form_ctas_emit_effects() {
    let mut site = wide_site();
    click(&mut site, "cta-0");
    click(&mut site, "cta-3");
    assert_eq!(
        site.take_effects(),
        vec![
            Effect::Download {
                url: BROCHURE_URL.to_string(),
                file_name: "marsias.brochure.pdf".to_string(),
                fallback_url: BROCHURE_URL.to_string(),
            },
            Effect::OpenUrl {
                url: APPLICATION_FORM_URL.to_string(),
                new_tab: true,
            },
        ]
    );
    assert!(site.take_effects().is_empty());
}

#[test]
fn projects_cta_scrolls_to_the_project_pool() {
    let mut site = wide_site();
    click(&mut site, "cta-5");
    assert_eq!(site.page().scroll_y(), 2300.0);
}

#[test]
fn calendar_loads_then_navigates_and_filters() {
    let event_day = NaiveDate::from_ymd_opt(2025, 3, 20).expect("valid date");
    let mut site = wide_site().with_event_source(Box::new(StaticEvents(vec![CalendarEvent {
        date: event_day,
        time: "18:00".to_string(),
        title: "Members meeting".to_string(),
        kind: CalendarEventKind::Meeting,
    }])));

    click(&mut site, "cta-4");
    assert!(site.overlays().is_open(OverlayKind::Calendar));
    assert_eq!(
        site.page()
            .text(&OverlayKind::Calendar.part_id("body"))
            .as_deref(),
        Some("Loading calendar...")
    );

    site.advance(500);
    let month = OverlayKind::Calendar.part_id("month");
    assert_eq!(site.page().text(&month).as_deref(), Some("March 2025"));
    assert!(has_class(&site, "calendar-day-14", "today"));
    assert!(has_class(&site, "calendar-day-20", "has-events"));

    click(&mut site, &part(OverlayKind::Calendar, "filter-meeting"));
    assert!(has_class(&site, "calendar-event-20-0", ids::HIDDEN_CLASS));

    click(&mut site, &part(OverlayKind::Calendar, "next-month"));
    assert_eq!(site.page().text(&month).as_deref(), Some("April 2025"));
    assert!(!site.page().exists(&ElementId::new("calendar-event-20-0")));

    site.handle(PageEvent::Key { key: Key::Escape });
    assert!(!site.overlays().is_open(OverlayKind::Calendar));
    assert!(site.calendar_month().is_none());
    assert!(!site.is_scroll_locked());
}

#[test]
fn calendar_closed_while_loading_never_renders() {
    let mut site = wide_site();
    click(&mut site, "cta-4");
    click(&mut site, &part(OverlayKind::Calendar, "close"));
    site.advance(1_000);
    assert!(site.calendar_month().is_none());
    assert!(!site.page().exists(&OverlayKind::Calendar.part_id("month")));
}

#[test]
fn blog_card_opens_detail_and_scrim_click_closes_it() {
    let mut site = wide_site();
    click(&mut site, "blog-card-1-title");
    assert!(site.overlays().is_open(OverlayKind::BlogDetail));
    assert_eq!(
        site.page()
            .text(&OverlayKind::BlogDetail.part_id("title"))
            .as_deref(),
        Some("Why we publish in the open")
    );

    // Clicks on content do not dismiss.
    click(&mut site, &part(OverlayKind::BlogDetail, "body"));
    assert!(site.overlays().is_open(OverlayKind::BlogDetail));

    click(&mut site, OverlayKind::BlogDetail.root_id().as_str());
    assert!(!site.overlays().is_open(OverlayKind::BlogDetail));
    assert!(!site.is_scroll_locked());
}

#[test]
fn background_clicks_are_dropped_under_a_modal() {
    let mut site = wide_site();
    click(&mut site, "blog-card-0");
    assert_eq!(click(&mut site, "cta-3"), Dispatch::Default);
    assert!(site.take_effects().is_empty());
    assert!(!has_class(&site, "cta-3", "clicked"));
}

#[test]
fn tab_cycles_inside_the_topmost_modal() {
    let mut site = wide_site();
    assert_eq!(
        site.handle(PageEvent::Key { key: Key::Tab }),
        Dispatch::Default
    );

    click(&mut site, "cta-2");
    let close = OverlayKind::LinkShare.part_id("close");
    assert_eq!(site.page().focused(), Some(close.clone()));
    assert_eq!(
        site.handle(PageEvent::Key { key: Key::Tab }),
        Dispatch::Prevented
    );
    assert_eq!(
        site.page().focused(),
        Some(OverlayKind::LinkShare.part_id("primary"))
    );
    site.handle(PageEvent::Key { key: Key::Tab });
    site.handle(PageEvent::Key { key: Key::Tab });
    assert_eq!(site.page().focused(), Some(close));
}

#[test]
fn escape_closes_overlay_before_drawer_and_lock_outlives_first_close() {
    let mut site = site_with(Viewport::new(375.0, 700.0));
    click(&mut site, ids::MENU_TOGGLE);
    assert!(site.drawer_open());

    // The profile form button sits inside the open page; the drawer ignores it.
    click(&mut site, "cta-1");
    assert!(site.overlays().is_open(OverlayKind::LinkShare));
    assert_eq!(site.scroll_lock().hold_count(), 2);

    site.handle(PageEvent::Key { key: Key::Escape });
    assert!(!site.overlays().is_open(OverlayKind::LinkShare));
    assert!(site.drawer_open());
    assert!(site.scroll_lock().holds(LockHolder::Drawer));
    assert!(site.is_scroll_locked());

    site.handle(PageEvent::Key { key: Key::Escape });
    assert!(!site.drawer_open());
    assert!(!site.is_scroll_locked());
}

#[test]
fn narrow_dropdown_toggles_and_anchor_links_highlight() {
    let mut site = site_with(Viewport::new(375.0, 700.0));
    click(&mut site, ids::MENU_TOGGLE);

    assert_eq!(click(&mut site, "nav-link-2"), Dispatch::Prevented);
    assert!(has_class(&site, "nav-item-2", ids::ACTIVE_CLASS));
    click(&mut site, "nav-link-3");
    assert!(has_class(&site, "nav-item-3", ids::ACTIVE_CLASS));
    assert!(!has_class(&site, "nav-item-2", ids::ACTIVE_CLASS));

    click(&mut site, "nav-link-3-0");
    assert!(!site.drawer_open());
    assert!(has_class(&site, ids::BLOG_SECTION, ids::HIGHLIGHT_CLASS));
    assert_eq!(site.page().scroll_y(), 2900.0);

    site.advance(1_499);
    assert!(has_class(&site, ids::BLOG_SECTION, ids::HIGHLIGHT_CLASS));
    site.advance(1_500);
    assert!(!has_class(&site, ids::BLOG_SECTION, ids::HIGHLIGHT_CLASS));
}

#[test]
fn wide_dropdown_parent_navigates_and_resize_closes_drawer() {
    let mut site = site_with(Viewport::new(375.0, 700.0));
    click(&mut site, ids::MENU_TOGGLE);
    click(&mut site, "nav-link-2");

    site.handle(PageEvent::Resize {
        width: 1280.0,
        height: 800.0,
    });
    assert!(!site.drawer_open());
    assert!(!site.is_scroll_locked());
    assert!(!has_class(&site, "nav-item-2", ids::ACTIVE_CLASS));

    click(&mut site, "nav-link-3");
    assert_eq!(
        site.take_effects(),
        vec![Effect::Navigate {
            href: "/resources".to_string(),
        }]
    );
}

#[test]
fn enter_on_focused_dropdown_link_acts_as_click() {
    let mut site = site_with(Viewport::new(375.0, 700.0));
    click(&mut site, ids::MENU_TOGGLE);
    assert_eq!(site.page().focused(), Some(ElementId::new("nav-link-0")));

    // Outside a dropdown, Enter keeps its default behavior.
    assert_eq!(
        site.handle(PageEvent::Key { key: Key::Enter }),
        Dispatch::Default
    );

    site.handle(PageEvent::Focus {
        target: ElementId::new("nav-link-2"),
    });
    assert_eq!(
        site.handle(PageEvent::Key { key: Key::Space }),
        Dispatch::Prevented
    );
    assert!(has_class(&site, "nav-item-2", ids::ACTIVE_CLASS));

    site.handle(PageEvent::Focus {
        target: ElementId::new("nav-link-2-0"),
    });
    assert_eq!(
        site.handle(PageEvent::Key { key: Key::Enter }),
        Dispatch::Prevented
    );
    assert!(!site.drawer_open());
    assert_eq!(site.page().scroll_y(), 2300.0);
}

#[test]
fn carousel_moves_with_keys_dots_swipes_and_resets_on_resize() {
    let mut site = wide_site();
    let state = site.carousel_state().expect("carousel attached");
    assert_eq!((state.visible(), state.total()), (3, 6));

    site.handle(PageEvent::Key {
        key: Key::ArrowRight,
    });
    assert_eq!(site.carousel_state().map(|s| s.current()), Some(3));
    assert!(has_class(&site, ids::CAROUSEL_NEXT, "disabled"));
    assert!(has_class(&site, "carousel-dot-1", ids::ACTIVE_CLASS));

    click(&mut site, "carousel-dot-0");
    assert_eq!(site.carousel_state().map(|s| s.current()), Some(0));

    site.handle(PageEvent::TouchStart { x: 300.0 });
    site.handle(PageEvent::TouchEnd { x: 150.0 });
    assert_eq!(site.carousel_state().map(|s| s.current()), Some(3));
    site.handle(PageEvent::TouchStart { x: 100.0 });
    site.handle(PageEvent::TouchEnd { x: 150.0 });
    assert_eq!(site.carousel_state().map(|s| s.current()), Some(3));

    site.handle(PageEvent::Resize {
        width: 375.0,
        height: 700.0,
    });
    assert_eq!(site.carousel_state().map(|s| s.visible()), Some(3));
    site.advance(300);
    let state = site.carousel_state().expect("carousel attached");
    assert_eq!((state.visible(), state.current()), (1, 0));
    assert!(site.page().exists(&ElementId::new("carousel-dot-5")));
}

#[test]
fn hover_toggles_feature_highlight() {
    let mut site = wide_site();
    site.handle(PageEvent::Hover {
        target: ElementId::new("feature-1-img"),
        entered: true,
    });
    assert!(has_class(&site, "feature-1", "hover"));
    site.handle(PageEvent::Hover {
        target: ElementId::new("feature-1"),
        entered: false,
    });
    assert!(!has_class(&site, "feature-1", "hover"));
}
