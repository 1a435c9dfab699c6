//! Contact form submission: collect fields, hand the record to the store,
//! then report the outcome on the page.

use crate::context::PageCx;
use crate::error::AppResult;
use crate::overlay::{OverlayDescriptor, OverlayManager, ToastController, Tone};
use crate::page::{ElementId, PageSurface, ids};
use crate::store::{FormRecord, RecordStore};

pub const SUCCESS_MESSAGE: &str = "Your message was sent successfully!";

/// A record collected from the form, waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub collection: String,
    pub record: FormRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

#[derive(Debug)]
pub struct FormAdapter {
    form: ElementId,
    name: ElementId,
    email: ElementId,
    phone: ElementId,
    message: ElementId,
    collection: String,
}

impl FormAdapter {
    /// Returns `None` unless the form and all four fields are present.
    pub fn attach(page: &dyn PageSurface, collection: impl Into<String>) -> Option<Self> {
        let adapter = Self {
            form: ElementId::new(ids::CONTACT_FORM),
            name: ElementId::new(ids::FIELD_NAME),
            email: ElementId::new(ids::FIELD_EMAIL),
            phone: ElementId::new(ids::FIELD_PHONE),
            message: ElementId::new(ids::FIELD_MESSAGE),
            collection: collection.into(),
        };
        let present = std::iter::once(&adapter.form)
            .chain(adapter.fields())
            .all(|id| page.exists(id));
        present.then_some(adapter)
    }

    pub fn form(&self) -> &ElementId {
        &self.form
    }

    /// Reads the fields for a submit of `form`. Empty values are forwarded as-is.
    pub fn begin(&self, page: &dyn PageSurface, form: &ElementId) -> Option<Submission> {
        if form != &self.form {
            return None;
        }
        let read = |id: &ElementId| page.value(id).unwrap_or_default();
        Some(Submission {
            collection: self.collection.clone(),
            record: FormRecord::new(
                read(&self.name),
                read(&self.email),
                read(&self.phone),
                read(&self.message),
            ),
        })
    }

    /// Shows the outcome of a write started by [`FormAdapter::begin`].
    pub fn finish(
        &self,
        cx: &mut PageCx<'_>,
        overlays: &mut OverlayManager,
        toast: &mut ToastController,
        result: AppResult<String>,
    ) -> SubmitOutcome {
        match result {
            Ok(key) => {
                tracing::info!(%key, "contact message stored");
                for field in self.fields() {
                    cx.page.set_value(field, "");
                }
                toast.show(cx, overlays, SUCCESS_MESSAGE, Tone::Success);
                SubmitOutcome::Sent
            }
            Err(err) => {
                let reason = err.reason();
                tracing::warn!(%reason, "contact message was not stored");
                overlays.open(
                    cx,
                    OverlayDescriptor::alert(format!(
                        "An error occurred while sending your message: {reason}"
                    )),
                );
                SubmitOutcome::Failed
            }
        }
    }

    fn fields(&self) -> [&ElementId; 4] {
        [&self.name, &self.email, &self.phone, &self.message]
    }
}

/// Performs the single write attempt for `submission`.
pub async fn deliver(store: &dyn RecordStore, submission: &Submission) -> AppResult<String> {
    store
        .append(&submission.collection, &submission.record)
        .await
}
