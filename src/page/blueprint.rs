//! Markup and layout of the marketing page used by the in-memory hosts.

use super::ids;
use super::memory::MemoryPage;
use super::node::{ElementId, NodeSpec, Rect, Viewport};
use super::traits::PageSurface;

pub const SLIDE_COUNT: usize = 6;
pub const HEADER_HEIGHT: f64 = 80.0;

const CONTAINER_GUTTER: f64 = 40.0;
const CONTAINER_MAX: f64 = 1000.0;
const WIDE_SLIDE_WIDTH: f64 = 300.0;
const WIDE_LAYOUT_MIN: f64 = 768.0;

const SECTIONS: [(&str, &str, f64); 7] = [
    (ids::HERO_SECTION, "Welcome", 700.0),
    (ids::ABOUT_SECTION, "Who we are", 600.0),
    (ids::FEATURES_SECTION, "What we do", 500.0),
    (ids::GALLERY_SECTION, "Gallery", 500.0),
    (ids::PROJECTS_SECTION, "Project pool", 600.0),
    (ids::BLOG_SECTION, "Journal", 500.0),
    (ids::CONTACT_SECTION, "Contact", 700.0),
];

pub const CTA_LABELS: [&str; 6] = [
    "Download the member brochure",
    "Fill in the profile sharing form",
    "Join the Signal group",
    "Fill in the school application form",
    "View the event calendar",
    "Browse the project pool",
];

/// Builds the full page and lays it out for `viewport`.
pub fn build(viewport: Viewport) -> MemoryPage {
    let mut page = MemoryPage::new(viewport);
    let root = page.root().clone();

    page.insert(&root, header());
    page.insert(
        &root,
        NodeSpec::new("div", ids::MENU_SCRIM).class("menu-overlay"),
    );
    for (id, title, _) in SECTIONS {
        page.insert(&root, section(id, title));
    }
    page.insert(
        &root,
        NodeSpec::new("button", ids::BACK_TO_TOP)
            .class(ids::HIDDEN_CLASS)
            .attr(ids::ARIA_LABEL, "Back to top"),
    );

    layout(&mut page, viewport);
    page
}

/// Applies a new viewport and recomputes element boxes, as a browser reflow would.
pub fn resize(page: &mut MemoryPage, viewport: Viewport) {
    page.set_viewport(viewport);
    layout(page, viewport);
}

pub fn slide_width_for(viewport: Viewport) -> f64 {
    if viewport.width > WIDE_LAYOUT_MIN {
        WIDE_SLIDE_WIDTH
    } else {
        container_width_for(viewport)
    }
}

pub fn container_width_for(viewport: Viewport) -> f64 {
    (viewport.width - CONTAINER_GUTTER).clamp(1.0, CONTAINER_MAX)
}

fn header() -> NodeSpec {
    let items = [
        ("Home", "#home", None),
        ("About", "#about", None),
        (
            "Projects",
            "/projects",
            Some([("Project pool", "#projects-section"), ("Gallery", "#gallery")]),
        ),
        (
            "Resources",
            "/resources",
            Some([("Journal", "#blog"), ("Documents", "/documents")]),
        ),
        ("Contact", "#contact", None),
    ];

    let mut list = NodeSpec::new("ul", "main-nav-list");
    for (idx, (label, href, submenu)) in items.into_iter().enumerate() {
        let link = NodeSpec::new("a", format!("nav-link-{idx}"))
            .class(ids::NAV_LINK_CLASS)
            .attr("href", href)
            .text(label);
        let mut item = NodeSpec::new("li", format!("nav-item-{idx}"));
        match submenu {
            Some(entries) => {
                item = item
                    .class(ids::DROPDOWN_PARENT_CLASS)
                    .child(link.attr(ids::ARIA_EXPANDED, "false"));
                let mut dropdown = NodeSpec::new("ul", format!("dropdown-{idx}")).class("dropdown");
                for (sub_idx, (sub_label, sub_href)) in entries.into_iter().enumerate() {
                    dropdown = dropdown.child(
                        NodeSpec::new("li", format!("dropdown-{idx}-item-{sub_idx}")).child(
                            NodeSpec::new("a", format!("nav-link-{idx}-{sub_idx}"))
                                .class(ids::NAV_LINK_CLASS)
                                .attr("href", sub_href)
                                .text(sub_label),
                        ),
                    );
                }
                item = item.child(dropdown);
            }
            None => item = item.child(link),
        }
        list = list.child(item);
    }

    NodeSpec::new("header", ids::HEADER)
        .child(
            NodeSpec::new("a", ids::LOGO)
                .attr("href", "#home")
                .text("Marsias"),
        )
        .child(
            NodeSpec::new("button", ids::MENU_TOGGLE)
                .class("menu-toggle")
                .attr(ids::ARIA_EXPANDED, "false")
                .attr(ids::ARIA_LABEL, "Menu"),
        )
        .child(NodeSpec::new("nav", ids::MAIN_NAV).class("main-nav").child(list))
}

fn section(id: &str, title: &str) -> NodeSpec {
    let base = NodeSpec::new("section", id)
        .class("section")
        .child(NodeSpec::new("h2", format!("{id}-title")).text(title));
    match id {
        ids::HERO_SECTION => base
            .child(
                NodeSpec::new("div", ids::SCROLL_INDICATOR).class("scroll-indicator-container"),
            )
            .children(CTA_LABELS[..3].iter().enumerate().map(|(idx, label)| cta(idx, label))),
        ids::ABOUT_SECTION => base
            .child(
                NodeSpec::new("img", ids::TEAM_IMAGE)
                    .attr("src", crate::scroll::ROTATOR_IMAGES[0]),
            )
            .children(
                [("members", 120), ("projects", 36), ("events", 48)]
                    .into_iter()
                    .map(|(name, target)| {
                        NodeSpec::new("span", format!("counter-{name}"))
                            .class(ids::COUNTER_CLASS)
                            .attr(ids::DATA_TARGET, target.to_string())
                            .text("0")
                    }),
            ),
        ids::FEATURES_SECTION => base.children((0..3).map(|idx| {
            NodeSpec::new("div", format!("feature-{idx}"))
                .class(ids::FEATURE_CLASS)
                .attr(ids::ARIA_LABEL, format!("Feature {}", idx + 1))
                .child(
                    NodeSpec::new("img", format!("feature-{idx}-img"))
                        .class("lazy")
                        .attr(ids::DATA_SRC, format!("images/feature-{idx}.webp")),
                )
        })),
        ids::GALLERY_SECTION => base.child(carousel()),
        ids::PROJECTS_SECTION => base
            .children(CTA_LABELS[3..].iter().enumerate().map(|(idx, label)| cta(idx + 3, label))),
        ids::BLOG_SECTION => base.children(
            [
                (
                    "Notes from the spring workshop",
                    "Twelve members met for three days to sketch the next season of projects.",
                ),
                (
                    "Why we publish in the open",
                    "Everything we make is shared under open licenses so others can build on it.",
                ),
            ]
            .into_iter()
            .enumerate()
            .map(|(idx, (title, body))| {
                NodeSpec::new("article", format!("blog-card-{idx}"))
                    .class(ids::BLOG_CARD_CLASS)
                    .attr("data-title", title)
                    .attr("data-body", body)
                    .child(NodeSpec::new("h3", format!("blog-card-{idx}-title")).text(title))
            }),
        ),
        ids::CONTACT_SECTION => base.child(contact_form()),
        _ => base,
    }
}

fn cta(idx: usize, label: &str) -> NodeSpec {
    NodeSpec::new("button", format!("cta-{idx}"))
        .class(ids::CTA_CLASS)
        .attr(ids::ARIA_LABEL, label)
        .text(label)
}

fn carousel() -> NodeSpec {
    NodeSpec::new("div", ids::CAROUSEL)
        .class("carousel")
        .child(NodeSpec::new("button", ids::CAROUSEL_PREV).attr(ids::ARIA_LABEL, "Previous"))
        .child(
            NodeSpec::new("div", ids::CAROUSEL_TRACK).children((0..SLIDE_COUNT).map(|idx| {
                NodeSpec::new("div", format!("slide-{idx}"))
                    .class(ids::SLIDE_CLASS)
                    .text(format!("Slide {}", idx + 1))
            })),
        )
        .child(NodeSpec::new("button", ids::CAROUSEL_NEXT).attr(ids::ARIA_LABEL, "Next"))
        .child(NodeSpec::new("div", ids::CAROUSEL_DOTS))
}

fn contact_form() -> NodeSpec {
    NodeSpec::new("form", ids::CONTACT_FORM)
        .child(NodeSpec::new("input", ids::FIELD_NAME).attr("placeholder", "Full name"))
        .child(NodeSpec::new("input", ids::FIELD_EMAIL).attr("placeholder", "E-mail"))
        .child(NodeSpec::new("input", ids::FIELD_PHONE).attr("placeholder", "Phone"))
        .child(NodeSpec::new("textarea", ids::FIELD_MESSAGE).attr("placeholder", "Message"))
        .child(NodeSpec::new("button", "contact-submit").text("Send"))
}

fn layout(page: &mut MemoryPage, viewport: Viewport) {
    let width = viewport.width;
    page.set_rect(&ElementId::new(ids::HEADER), Rect::new(0.0, 0.0, width, HEADER_HEIGHT));

    let mut top = 0.0;
    for (id, _, height) in SECTIONS {
        page.set_rect(&ElementId::new(id), Rect::new(top, 0.0, width, height));
        match id {
            ids::ABOUT_SECTION => layout_about(page, top, width),
            ids::FEATURES_SECTION => layout_features(page, top, width),
            ids::GALLERY_SECTION => layout_carousel(page, top, viewport),
            _ => {}
        }
        top += height;
    }
    page.set_document_height(top);
}

fn layout_about(page: &mut MemoryPage, top: f64, width: f64) {
    page.set_rect(
        &ElementId::new(ids::TEAM_IMAGE),
        Rect::new(top + 80.0, 20.0, width - 40.0, 320.0),
    );
    for counter in page.query_class(ids::COUNTER_CLASS) {
        page.set_rect(&counter, Rect::new(top + 420.0, 20.0, 120.0, 60.0));
    }
}

fn layout_features(page: &mut MemoryPage, top: f64, width: f64) {
    let features = page.query_class(ids::FEATURE_CLASS);
    for (idx, feature) in features.iter().enumerate() {
        let rect = Rect::new(top + 80.0 + idx as f64 * 130.0, 20.0, width - 40.0, 120.0);
        page.set_rect(feature, rect);
        for child in page.children(feature) {
            page.set_rect(&child, rect);
        }
    }
}

fn layout_carousel(page: &mut MemoryPage, top: f64, viewport: Viewport) {
    let container_width = container_width_for(viewport);
    let slide_width = slide_width_for(viewport);
    page.set_rect(
        &ElementId::new(ids::CAROUSEL),
        Rect::new(top + 80.0, 20.0, container_width, 340.0),
    );
    for (idx, slide) in page.query_class(ids::SLIDE_CLASS).into_iter().enumerate() {
        page.set_rect(
            &slide,
            Rect::new(top + 80.0, 20.0 + idx as f64 * slide_width, slide_width, 300.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{SLIDE_COUNT, build, resize, slide_width_for};
    use crate::page::{ElementId, PageSurface, Viewport, ids};

    #[test]
    fn build_lays_out_all_sections_and_slides() {
        let page = build(Viewport::new(1280.0, 800.0));
        assert_eq!(page.query_class(ids::SLIDE_CLASS).len(), SLIDE_COUNT);
        assert_eq!(page.query_class(ids::CTA_CLASS).len(), 6);
        let about = page
            .rect(&ElementId::new(ids::ABOUT_SECTION))
            .expect("about has a box");
        assert_eq!(about.top, 700.0);
        assert_eq!(page.document_height(), 4100.0);
    }

    #[test]
    fn resize_switches_to_full_width_slides_on_narrow_screens() {
        let mut page = build(Viewport::new(1280.0, 800.0));
        resize(&mut page, Viewport::new(375.0, 700.0));
        let slide = page
            .rect(&ElementId::new("slide-0"))
            .expect("slide has a box");
        assert_eq!(slide.width, slide_width_for(Viewport::new(375.0, 700.0)));
        assert_eq!(slide.width, 335.0);
    }
}
