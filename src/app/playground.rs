use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::Size;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::config::Config;
use crate::effect::Effect;
use crate::error::AppResult;
use crate::event::{Dispatch, Key, PageEvent};
use crate::form::{Submission, SubmitOutcome};
use crate::overlay::OverlayKind;
use crate::page::{ElementId, PageSurface, Viewport, blueprint};
use crate::site::Site;
use crate::store::RecordStore;
use crate::ui;

use super::constants::{DEFAULT_CELL_SIZE_PX, LINE_SCROLL_PX, PAGE_SCROLL_SHARE, SWIPE_PX};
use super::focus;
use super::keymap::{Intent, map_key};

const HINT: &str = "Tab focus | Enter activate | arrows scroll | < > swipe | q quit";

#[derive(Debug)]
struct FieldEditor {
    target: ElementId,
    input: Input,
}

/// Terminal host for the page: turns key presses into page events, carries
/// out effects, and draws the document.
pub struct Playground {
    site: Site,
    store: Arc<dyn RecordStore>,
    model_path: PathBuf,
    editor: Option<FieldEditor>,
    message: String,
    quit_requested: bool,
}

impl Playground {
    pub fn new(config: &Config, store: Arc<dyn RecordStore>, today: NaiveDate) -> Self {
        Self::with_viewport(config, store, today, Viewport::new(1280.0, 800.0))
    }

    pub fn with_viewport(
        config: &Config,
        store: Arc<dyn RecordStore>,
        today: NaiveDate,
        viewport: Viewport,
    ) -> Self {
        Self {
            site: Site::attach(blueprint::build(viewport), config, today),
            store,
            model_path: PathBuf::from(&config.scene.model_path),
            editor: None,
            message: HINT.to_string(),
            quit_requested: false,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub(crate) fn store(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.store)
    }

    pub(crate) fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn editing(&self) -> Option<&ElementId> {
        self.editor.as_ref().map(|editor| &editor.target)
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let layout = ui::split_layout(frame.area());
        ui::draw_header(frame, layout.header, &self.site);
        ui::draw_page(frame, layout.page, &self.site);
        ui::draw_overlays(frame, layout.page, &self.site);
        ui::draw_status(frame, layout.status, &self.site, &self.message, self.editing());
    }

    /// Maps terminal cells to CSS pixels and resizes the page.
    pub(crate) fn resize_to(&mut self, size: Size) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        let (cell_w, cell_h) = DEFAULT_CELL_SIZE_PX;
        self.dispatch(PageEvent::Resize {
            width: f64::from(size.width) * cell_w,
            height: f64::from(size.height) * cell_h,
        });
    }

    pub(crate) fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key(key);
            }
            Event::Resize(cols, rows) => self.resize_to(Size::new(cols, rows)),
            _ => {}
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if let Some(intent) = map_key(key, self.editor.is_some()) {
            self.apply(intent);
        }
    }

    pub(crate) fn advance_to(&mut self, now_ms: u64) {
        self.site.advance(now_ms);
        self.after_site_change();
    }

    pub(crate) fn dispatch(&mut self, event: PageEvent) -> Dispatch {
        let dispatch = self.site.handle(event);
        self.after_site_change();
        dispatch
    }

    pub(crate) fn take_submissions(&mut self) -> Vec<Submission> {
        self.site.take_submissions()
    }

    pub(crate) fn on_delivered(&mut self, result: AppResult<String>) {
        match self.site.finish_submission(result) {
            Some(SubmitOutcome::Sent) => self.message = "message sent".to_string(),
            Some(SubmitOutcome::Failed) => self.message = "message was not sent".to_string(),
            None => {}
        }
        self.after_site_change();
    }

    fn apply(&mut self, intent: Intent) {
        let modal = self.site.overlays().topmost_modal();
        match intent {
            Intent::Quit => self.quit_requested = true,
            // The page is locked under a dialog, so arrows walk its controls.
            Intent::ScrollLines(lines) if modal.is_some() => self.move_focus(lines > 0),
            Intent::ScrollLines(lines) => self.scroll_by(f64::from(lines) * LINE_SCROLL_PX),
            Intent::ScrollPages(pages) => {
                let step = self.site.viewport().height * PAGE_SCROLL_SHARE;
                self.scroll_by(f64::from(pages) * step);
            }
            Intent::ScrollTop => {
                self.dispatch(PageEvent::Scroll { y: 0.0 });
            }
            Intent::ScrollBottom => {
                let y = self.site.page().max_scroll();
                self.dispatch(PageEvent::Scroll { y });
            }
            Intent::FocusNext if modal.is_some() => {
                self.dispatch(PageEvent::Key { key: Key::Tab });
            }
            Intent::FocusNext => self.move_focus(true),
            Intent::FocusPrev => self.move_focus(false),
            Intent::Activate => self.activate(),
            Intent::Press => self.press(),
            Intent::Page(key) => {
                self.dispatch(PageEvent::Key { key });
            }
            Intent::Swipe { forward } => {
                let (from, to) = if forward {
                    SWIPE_PX
                } else {
                    (SWIPE_PX.1, SWIPE_PX.0)
                };
                self.dispatch(PageEvent::TouchStart { x: from });
                self.dispatch(PageEvent::TouchEnd { x: to });
            }
            Intent::Edit(key) => self.edit(key),
        }
    }

    fn scroll_by(&mut self, delta: f64) {
        let y = (self.site.page().scroll_y() + delta).max(0.0);
        if self.dispatch(PageEvent::Scroll { y }).is_prevented() {
            self.message = "scrolling is locked".to_string();
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let scope = self
            .site
            .overlays()
            .topmost_modal()
            .map_or_else(|| self.site.page().root().clone(), OverlayKind::root_id);
        let order = focus::focusable(self.site.page(), &scope);
        let current = self.site.page().focused();
        let Some(next) = focus::cycle(&order, current.as_ref(), forward) else {
            return;
        };
        if let Some(previous) = current {
            self.dispatch(PageEvent::Hover {
                target: previous,
                entered: false,
            });
        }
        self.dispatch(PageEvent::Focus {
            target: next.clone(),
        });
        self.dispatch(PageEvent::Hover {
            target: next,
            entered: true,
        });
    }

    /// Enter submits from inside a form; elsewhere the page sees the key
    /// first and a click follows unless it was handled.
    fn activate(&mut self) {
        let focused = self.site.page().focused();
        if let Some(id) = &focused {
            let page = self.site.page();
            let submits = focus::is_text_field(page, id) || page.tag(id).as_deref() == Some("button");
            if submits && let Some(form) = focus::enclosing_form(page, id) {
                self.dispatch(PageEvent::Submit { form });
                return;
            }
        }
        if self
            .dispatch(PageEvent::Key { key: Key::Enter })
            .is_prevented()
        {
            return;
        }
        if let Some(target) = focused {
            self.dispatch(PageEvent::Click { target });
        }
    }

    fn press(&mut self) {
        if self
            .dispatch(PageEvent::Key { key: Key::Space })
            .is_prevented()
        {
            return;
        }
        let Some(target) = self.site.page().focused() else {
            return;
        };
        if self.site.page().tag(&target).as_deref() == Some("button") {
            self.dispatch(PageEvent::Click { target });
        }
    }

    fn edit(&mut self, key: KeyEvent) {
        let Some(editor) = &mut self.editor else {
            return;
        };
        let changed = editor
            .input
            .handle_event(&Event::Key(key))
            .is_some_and(|changed| changed.value);
        if !changed {
            return;
        }
        let event = PageEvent::Input {
            target: editor.target.clone(),
            value: editor.input.value().to_string(),
        };
        self.dispatch(event);
    }

    fn after_site_change(&mut self) {
        self.carry_out_effects();
        self.sync_editor();
    }

    fn carry_out_effects(&mut self) {
        for effect in self.site.take_effects() {
            tracing::info!(?effect, "page effect");
            self.message = match effect {
                Effect::OpenUrl { url, new_tab: true } => format!("open in new tab: {url}"),
                Effect::OpenUrl { url, .. } => format!("open: {url}"),
                Effect::Download { url, file_name, .. } => {
                    format!("download {file_name} from {url}")
                }
                Effect::Navigate { href } => format!("navigate to {href}"),
                Effect::CopyToClipboard { text } => {
                    // No system clipboard in the terminal; the copy counts as done.
                    self.site.handle(PageEvent::ClipboardResult { ok: true });
                    format!("copied {text}")
                }
            };
        }
    }

    /// Keeps the line editor bound to the focused text field and in step
    /// with page-side changes such as a cleared form.
    fn sync_editor(&mut self) {
        let page = self.site.page();
        let Some(target) = page
            .focused()
            .filter(|id| focus::is_text_field(page, id))
        else {
            self.editor = None;
            return;
        };
        let value = page.value(&target).unwrap_or_default();
        match &mut self.editor {
            Some(editor) if editor.target == target => {
                if editor.input.value() != value {
                    editor.input = Input::new(value);
                }
            }
            _ => {
                self.editor = Some(FieldEditor {
                    target,
                    input: Input::new(value),
                });
            }
        }
    }
}

impl std::fmt::Debug for Playground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playground")
            .field("site", &self.site)
            .field("store", &self.store.describe())
            .field("editor", &self.editor)
            .finish_non_exhaustive()
    }
}
