//! Background execution of the pipeline.
//!
//! The pipeline runs on its own thread; transcript lines and progress values are
//! marshalled back to the caller's thread over a channel, so a front-end never has
//! to touch its state from the worker.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use super::{
    run_pipeline,
    ExecutionResult,
    LogSink,
    PipelineRequest,
    ProcResult,
    ProgressSink,
    StepRunner,
};

/// Messages sent from the worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Log(String),
    Progress(u8),
    /// Always the last event of a run.
    Finished(ExecutionResult),
}

/// Sink forwarding everything into the worker channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<PipelineEvent>,
}
impl ChannelSink {
    pub fn new(sender: Sender<PipelineEvent>) -> Self {
        ChannelSink{sender}
    }
}
impl LogSink for ChannelSink {
    fn log(&mut self, line: &str) {
        // A dropped receiver means nobody is listening any more; keep running regardless.
        let _ = self.sender.send(PipelineEvent::Log(line.to_string()));
    }
}
impl ProgressSink for ChannelSink {
    fn progress(&mut self, value: u8) {
        let _ = self.sender.send(PipelineEvent::Progress(value));
    }
}

/// Handle to a running pipeline.
pub struct PipelineHandle {
    receiver: Receiver<PipelineEvent>,
    thread: Option<JoinHandle<()>>,
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Start the pipeline on a dedicated thread.
pub fn spawn<R>(request: PipelineRequest, runner: R) -> ProcResult<PipelineHandle>
where R: StepRunner + Send + 'static
{
    let (sender, receiver) = mpsc::channel();
    let thread = thread::Builder::new()
        .name("jdfoam-pipeline".to_string())
        .spawn(move || {
            let mut log = ChannelSink::new(sender.clone());
            let mut progress = log.clone();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                run_pipeline(&request, &runner, &mut log, &mut progress)
            }));
            let result = match outcome {
                Ok(result) => result,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::error!("pipeline worker panicked: {}", message);
                    let _ = sender.send(PipelineEvent::Log(format!("!!! Pipeline worker failed: {}", message)));
                    ExecutionResult::failed()
                },
            };
            let _ = sender.send(PipelineEvent::Finished(result));
        })?;

    Ok(PipelineHandle{receiver, thread: Some(thread)})
}

impl PipelineHandle {
    /// Block until the next event. `None` once the worker is gone.
    pub fn next_event(&self) -> Option<PipelineEvent> {
        self.receiver.recv().ok()
    }

    /// Poll for an event without blocking, for front-ends with their own loop.
    pub fn try_next_event(&self) -> Option<PipelineEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all events through `on_event` on the calling thread and return the result.
    pub fn wait_with<F>(mut self, mut on_event: F) -> ExecutionResult
    where F: FnMut(&PipelineEvent)
    {
        let mut result = None;
        while let Some(event) = self.next_event() {
            on_event(&event);
            if let PipelineEvent::Finished(finished) = event {
                result = Some(finished);
                break;
            }
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        result.unwrap_or_else(ExecutionResult::failed)
    }

    /// Wait for the run to finish, discarding intermediate events.
    pub fn wait(self) -> ExecutionResult {
        self.wait_with(|_| {})
    }
}
