//! Headless host: plays a JSON script of page events against a fresh page and
//! reports the final state.
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "today": "2025-03-14",
//!   "steps": [
//!     { "type": "click", "target": "cta-4" },
//!     { "advance_ms": 500 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::effect::Effect;
use crate::error::{AppError, AppResult};
use crate::event::PageEvent;
use crate::page::{ElementId, PageSnapshot, PageSurface, Viewport, blueprint};
use crate::site::{Site, SiteStatus};
use crate::store::{MemoryStore, StoredRecord};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReplayStep {
    /// Moves the virtual clock forward.
    Advance { advance_ms: u64 },
    Event(PageEvent),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// When set, every store write fails with this reason.
    #[serde(default)]
    pub store_failure: Option<String>,
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub status: SiteStatus,
    pub effects: Vec<Effect>,
    pub stored: Vec<StoredRecord>,
    pub page: PageSnapshot,
}

pub fn load_script(path: &Path) -> AppResult<ReplayScript> {
    let raw = fs::read_to_string(path).map_err(|source| {
        AppError::io_with_context(source, format!("failed to read script: {}", path.display()))
    })?;
    parse_script(&raw)
}

pub fn parse_script(raw: &str) -> AppResult<ReplayScript> {
    serde_json::from_str(raw)
        .map_err(|err| AppError::invalid_argument(format!("invalid replay script: {err}")))
}

/// Runs `script`; `viewport` overrides the script's own size.
pub async fn run(
    script: ReplayScript,
    config: &Config,
    viewport: Option<Viewport>,
) -> AppResult<ReplayReport> {
    let viewport = viewport
        .or(script.viewport)
        .unwrap_or(Viewport::new(1280.0, 800.0));
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "viewport must be positive, got {}x{}",
            viewport.width, viewport.height
        )));
    }
    let today = script
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let store = MemoryStore::new();
    if let Some(reason) = &script.store_failure {
        store.fail_with(reason.clone());
    }

    let mut site = Site::attach(blueprint::build(viewport), config, today);
    let mut effects = Vec::new();
    for (idx, step) in script.steps.into_iter().enumerate() {
        let step_no = idx + 1;
        match step {
            ReplayStep::Advance { advance_ms } => site.advance_by(advance_ms),
            ReplayStep::Event(event) => {
                if let Some(target) = event_target(&event)
                    && !site.page().exists(target)
                {
                    return Err(AppError::replay(
                        step_no,
                        format!("no element with id `{target}`"),
                    ));
                }
                let dispatch = site.handle(event);
                tracing::debug!(step = step_no, ?dispatch, "replayed event");
            }
        }
        site.submit_pending(&store).await;
        effects.extend(site.take_effects());
    }

    Ok(ReplayReport {
        status: site.status(),
        effects,
        stored: store.records(),
        page: site.snapshot(),
    })
}

fn event_target(event: &PageEvent) -> Option<&ElementId> {
    match event {
        PageEvent::Click { target }
        | PageEvent::Hover { target, .. }
        | PageEvent::Focus { target }
        | PageEvent::Input { target, .. } => Some(target),
        PageEvent::Submit { form } => Some(form),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ReplayStep, parse_script, run};
    use crate::config::Config;
    use crate::effect::Effect;
    use crate::error::AppError;
    use crate::event::PageEvent;
    use crate::overlay::OverlayKind;
    use crate::page::Viewport;

    #[test]
    fn script_mixes_events_and_clock_steps() {
        let script = parse_script(
            r#"{
                "today": "2025-03-14",
                "steps": [
                    { "type": "scroll", "y": 240 },
                    { "advance_ms": 100 },
                    { "type": "asset-loaded" }
                ]
            }"#,
        )
        .expect("script should parse");
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[1], ReplayStep::Advance { advance_ms: 100 });
        assert_eq!(
            script.steps[2],
            ReplayStep::Event(PageEvent::AssetLoaded)
        );
    }

    #[test]
    fn malformed_script_is_an_invalid_argument() {
        let err = parse_script("{\"steps\": 3}").expect_err("steps must be a list");
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn replay_reports_effects_records_and_overlays() {
        let script = parse_script(
            r#"{
                "today": "2025-03-14",
                "steps": [
                    { "type": "input", "target": "name", "value": "Ada" },
                    { "type": "input", "target": "email", "value": "ada@example.org" },
                    { "type": "submit", "form": "contact-form" },
                    { "type": "click", "target": "cta-3" },
                    { "type": "click", "target": "cta-4" },
                    { "advance_ms": 500 }
                ]
            }"#,
        )
        .expect("script should parse");

        let report = run(script, &Config::default(), None)
            .await
            .expect("replay should finish");
        assert_eq!(report.stored.len(), 1);
        assert_eq!(report.stored[0].record.full_name, "Ada");
        assert!(matches!(report.effects.as_slice(), [Effect::OpenUrl { .. }]));
        assert!(report.status.overlays.contains(&OverlayKind::Calendar));
        assert!(report.status.overlays.contains(&OverlayKind::Toast));
        assert_eq!(report.status.now_ms, 500);
        let month = OverlayKind::Calendar.part_id("month");
        assert_eq!(
            report.page.elements[&month].text.as_deref(),
            Some("March 2025")
        );
    }

    #[tokio::test]
    async fn unknown_target_names_the_failing_step() {
        let script = parse_script(
            r#"{ "steps": [ { "advance_ms": 10 }, { "type": "click", "target": "nope" } ] }"#,
        )
        .expect("script should parse");
        let err = run(script, &Config::default(), Some(Viewport::new(800.0, 600.0)))
            .await
            .expect_err("missing element should fail");
        assert!(matches!(err, AppError::Replay { step: 2, .. }));
        assert!(err.to_string().contains("nope"));
    }
}
