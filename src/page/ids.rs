//! Element ids and class names of the marketing page markup.

pub const HEADER: &str = "site-header";
pub const LOGO: &str = "logo";
pub const MENU_TOGGLE: &str = "menu-toggle";
pub const MAIN_NAV: &str = "main-nav";
pub const MENU_SCRIM: &str = "menu-overlay";
pub const SCROLL_INDICATOR: &str = "scroll-indicator";
pub const BACK_TO_TOP: &str = "scroll-btn";

pub const HERO_SECTION: &str = "home";
pub const ABOUT_SECTION: &str = "about";
pub const FEATURES_SECTION: &str = "features";
pub const GALLERY_SECTION: &str = "gallery";
pub const PROJECTS_SECTION: &str = "projects-section";
pub const BLOG_SECTION: &str = "blog";
pub const CONTACT_SECTION: &str = "contact";

pub const TEAM_IMAGE: &str = "team-image";

pub const CAROUSEL: &str = "carousel";
pub const CAROUSEL_TRACK: &str = "carousel-track";
pub const CAROUSEL_DOTS: &str = "carousel-dots";
pub const CAROUSEL_PREV: &str = "carousel-prev";
pub const CAROUSEL_NEXT: &str = "carousel-next";

pub const CONTACT_FORM: &str = "contact-form";
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_MESSAGE: &str = "message";

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const DROPDOWN_PARENT_CLASS: &str = "has-dropdown";
pub const SLIDE_CLASS: &str = "carousel-slide";
pub const DOT_CLASS: &str = "carousel-dot";
pub const COUNTER_CLASS: &str = "counter";
pub const FEATURE_CLASS: &str = "feature";
pub const CTA_CLASS: &str = "cta-button";
pub const BLOG_CARD_CLASS: &str = "blog-card";

pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";
pub const HIGHLIGHT_CLASS: &str = "highlight";

pub const DATA_SRC: &str = "data-src";
pub const DATA_TARGET: &str = "data-target";
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_LABEL: &str = "aria-label";
