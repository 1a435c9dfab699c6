use std::path::PathBuf;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::error::AppResult;
use crate::event::PageEvent;

use super::loader::spawn_model_loader;

/// Everything the playground loop wakes up for besides its frame tick.
#[derive(Debug)]
pub(crate) enum LoopEvent {
    Input(Event),
    InputError(String),
    Asset(PageEvent),
    /// A store write finished.
    Delivered(AppResult<String>),
}

pub(crate) struct EventBusRuntime {
    tasks: Vec<JoinHandle<()>>,
}

impl EventBusRuntime {
    pub(crate) fn spawn(
        model_path: PathBuf,
    ) -> (
        UnboundedSender<LoopEvent>,
        UnboundedReceiver<LoopEvent>,
        Self,
    ) {
        let (tx, rx) = unbounded_channel();
        let tasks = vec![
            spawn_input_task(tx.clone()),
            spawn_model_loader(model_path, tx.clone()),
        ];
        (tx, rx, Self { tasks })
    }

    pub(crate) fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(task);
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

fn spawn_input_task(tx: UnboundedSender<LoopEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => LoopEvent::Input(event),
                Err(err) => LoopEvent::InputError(err.to_string()),
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
    })
}
