use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::error::AppResult;
use crate::form::{self, Submission};
use crate::store::RecordStore;

use super::constants::FRAME_INTERVAL;
use super::event_bus::{EventBusRuntime, LoopEvent};
use super::playground::Playground;
use super::terminal_session::{TerminalSession, TerminalSurface};

enum WaitEvent {
    Event(LoopEvent),
    Frame,
    Closed,
}

impl Playground {
    /// Takes over the terminal until the user quits.
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        let (loop_event_tx, mut loop_event_rx, mut bus) =
            EventBusRuntime::spawn(self.model_path().to_path_buf());
        self.resize_to(session.size()?);

        let started_at = Instant::now();
        let mut frame_tick = time::interval(FRAME_INTERVAL);
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(model = %self.model_path().display(), "playground started");

        loop {
            session.draw(|frame| self.render(frame))?;

            match wait_next_event(&mut loop_event_rx, &mut frame_tick).await {
                WaitEvent::Event(LoopEvent::Input(event)) => self.handle_terminal_event(event),
                WaitEvent::Event(LoopEvent::InputError(message)) => {
                    tracing::warn!(%message, "terminal input failed");
                }
                WaitEvent::Event(LoopEvent::Asset(event)) => {
                    self.dispatch(event);
                }
                WaitEvent::Event(LoopEvent::Delivered(result)) => self.on_delivered(result),
                WaitEvent::Frame => {
                    let elapsed = started_at.elapsed().as_millis();
                    self.advance_to(u64::try_from(elapsed).unwrap_or(u64::MAX));
                }
                WaitEvent::Closed => break,
            }

            if self.quit_requested() {
                break;
            }
            for submission in self.take_submissions() {
                bus.track(spawn_delivery(
                    self.store(),
                    submission,
                    loop_event_tx.clone(),
                ));
            }
        }

        bus.shutdown();
        session.restore()?;
        tracing::info!("playground stopped");
        Ok(())
    }
}

/// One write attempt off the loop; the result comes back as a loop event.
fn spawn_delivery(
    store: Arc<dyn RecordStore>,
    submission: Submission,
    tx: UnboundedSender<LoopEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = form::deliver(store.as_ref(), &submission).await;
        let _ = tx.send(LoopEvent::Delivered(result));
    })
}

async fn wait_next_event(
    loop_event_rx: &mut UnboundedReceiver<LoopEvent>,
    frame_tick: &mut time::Interval,
) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_loop = loop_event_rx.recv() => {
            match maybe_loop {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        _ = frame_tick.tick() => WaitEvent::Frame,
    }
}
