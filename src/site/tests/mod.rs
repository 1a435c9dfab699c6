mod clicks;
mod timers;

use chrono::NaiveDate;

use super::Site;
use crate::config::Config;
use crate::event::PageEvent;
use crate::page::{ElementId, PageSurface, Viewport, blueprint};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

fn wide_site() -> Site {
    site_with(Viewport::new(1280.0, 800.0))
}

fn site_with(viewport: Viewport) -> Site {
    Site::attach(blueprint::build(viewport), &Config::default(), today())
}

fn click(site: &mut Site, id: &str) -> crate::event::Dispatch {
    site.handle(PageEvent::Click {
        target: ElementId::new(id),
    })
}

fn has_class(site: &Site, id: &str, class: &str) -> bool {
    site.page().has_class(&ElementId::new(id), class)
}
