//! Output channel between streaming commands and the UI loop

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;

/// One event produced by a streaming command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A line of stdout, without its terminator
    Line(String),
    /// The command exited successfully
    Done,
    /// The command could not finish
    Failed(String),
}

/// A stream event tagged with the generation of the task that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMessage {
    /// Generation of the writing task
    pub generation: u64,
    /// What happened
    pub event: StreamEvent,
}

/// Write end handed to a streaming command
///
/// The sink never decides whether output is shown; the receiving side drops
/// messages from superseded generations. [`OutputSink::is_stale`] only lets a
/// worker stop early.
#[derive(Debug, Clone)]
pub struct OutputSink {
    generation: u64,
    current: Arc<AtomicU64>,
    tx: Sender<StreamMessage>,
}

impl OutputSink {
    /// Create a sink for `generation`, watching `current` for supersession
    #[must_use]
    pub const fn new(generation: u64, current: Arc<AtomicU64>, tx: Sender<StreamMessage>) -> Self {
        Self {
            generation,
            current,
            tx,
        }
    }

    /// Generation this sink writes for
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a newer task has started
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }

    /// Send one line. Returns false if the receiver is gone.
    pub fn line(&self, line: impl Into<String>) -> bool {
        self.send(StreamEvent::Line(line.into()))
    }

    /// Signal successful completion
    pub fn finish(&self) -> bool {
        self.send(StreamEvent::Done)
    }

    /// Signal failure
    pub fn fail(&self, message: impl Into<String>) -> bool {
        self.send(StreamEvent::Failed(message.into()))
    }

    fn send(&self, event: StreamEvent) -> bool {
        self.tx
            .send(StreamMessage {
                generation: self.generation,
                event,
            })
            .is_ok()
    }
}
