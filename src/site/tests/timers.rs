use super::{click, has_class, site_with, wide_site};
use crate::event::PageEvent;
use crate::overlay::OverlayKind;
use crate::page::{PageSurface, Viewport, ids};
use crate::scene::ModelState;

#[test]
fn newer_toast_supersedes_and_older_timer_never_fires() {
    let mut site = wide_site();
    site.handle(PageEvent::ClipboardResult { ok: true });
    site.advance(2_000);
    site.handle(PageEvent::ClipboardResult { ok: false });
    assert_eq!(site.overlays().len(), 1);

    site.advance(3_000);
    assert!(site.overlays().is_open(OverlayKind::Toast));
    assert_eq!(
        site.page()
            .text(&OverlayKind::Toast.part_id("body"))
            .as_deref(),
        Some("Could not copy the link.")
    );

    click(&mut site, OverlayKind::Toast.part_id("close").as_str());
    assert!(site.overlays().is_empty());
    site.advance(10_000);
    assert!(site.overlays().is_empty());
}

#[test]
fn repeated_resizes_rebuild_the_carousel_once_after_the_quiet_period() {
    let mut site = wide_site();
    site.handle(PageEvent::Resize {
        width: 600.0,
        height: 800.0,
    });
    site.advance(200);
    site.handle(PageEvent::Resize {
        width: 375.0,
        height: 700.0,
    });
    site.advance(400);
    assert_eq!(site.carousel_state().map(|s| s.visible()), Some(3));
    site.advance(500);
    assert_eq!(site.carousel_state().map(|s| s.visible()), Some(1));
}

#[test]
fn rehighlighting_restarts_the_highlight_window() {
    let mut site = site_with(Viewport::new(1280.0, 800.0));
    click(&mut site, "nav-link-4");
    site.advance(1_000);
    click(&mut site, "nav-link-4");
    site.advance(1_600);
    assert!(has_class(&site, ids::CONTACT_SECTION, ids::HIGHLIGHT_CLASS));
    site.advance(2_500);
    assert!(!has_class(&site, ids::CONTACT_SECTION, ids::HIGHLIGHT_CLASS));
}

#[test]
fn scene_waits_for_the_model_then_animates_each_advance() {
    let mut site = wide_site();
    site.handle(PageEvent::AssetProgress {
        loaded: 10,
        total: 40,
    });
    site.advance(16);
    assert_eq!(site.scene().status().frames, 0);
    assert_eq!(site.scene().model().progress_percent(), Some(25.0));

    site.handle(PageEvent::AssetLoaded);
    site.advance(32);
    site.advance(48);
    assert_eq!(site.scene().status().frames, 2);
    assert_eq!(site.scene().model(), &ModelState::Loaded);

    site.handle(PageEvent::Resize {
        width: 1000.0,
        height: 500.0,
    });
    assert_eq!(site.scene().camera().aspect, 2.0);
}

#[test]
fn failed_model_falls_back_to_placeholder() {
    let mut site = wide_site();
    site.handle(PageEvent::AssetFailed {
        reason: "404 Not Found".to_string(),
    });
    site.advance(16);
    assert!(matches!(
        site.scene().model(),
        ModelState::Placeholder { .. }
    ));
    assert_eq!(site.scene().status().frames, 1);
}

#[test]
fn toast_shown_after_an_idle_stretch_lasts_its_full_duration() {
    let mut site = wide_site();
    site.advance(10_000);
    assert_eq!(site.now_ms(), 10_000);

    site.handle(PageEvent::ClipboardResult { ok: true });
    site.advance(12_999);
    assert!(site.overlays().is_open(OverlayKind::Toast));
    site.advance(13_000);
    assert!(!site.overlays().is_open(OverlayKind::Toast));
}

#[test]
fn loaded_model_spins_with_elapsed_time_when_nothing_is_scheduled() {
    let mut site = wide_site();
    site.handle(PageEvent::AssetLoaded);
    site.advance(1_000);
    site.advance(3_000);
    let frame = site.scene().last_frame().expect("frame after load");
    assert!((frame.elapsed_s - 3.0).abs() < 1e-9);
    assert!((frame.model_rotation_y - 1.5).abs() < 1e-9);
}
