//! Background detail rendering with generation-based supersession
//!
//! Each started task gets the next generation number. Output travels back to
//! the UI loop over a channel and is applied in [`DetailScheduler::poll`]
//! only if it carries the current generation; anything older is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, error};

use crate::git::{CommandSpec, GitBackend, OutputSink, StreamEvent, StreamMessage};

/// Handle of a started detail task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailTask {
    generation: u64,
}

impl DetailTask {
    /// Generation number of this task
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Lifecycle of a detail task
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskState {
    /// Nothing streaming
    #[default]
    Idle,
    /// Output is still arriving
    Running,
    /// The command exited successfully
    Completed,
    /// A newer task replaced this one
    Cancelled,
    /// The command could not be started or exited with an error
    Failed(String),
}

/// Content of the detail pane
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    /// Pane title
    pub title: String,
    /// Rendered lines, possibly containing ANSI colour codes
    pub lines: Vec<String>,
}

/// Runs at most one detail task at a time and owns the detail view
#[derive(Debug)]
pub struct DetailScheduler {
    current: Arc<AtomicU64>,
    state: TaskState,
    view: DetailView,
    tx: Sender<StreamMessage>,
    rx: Receiver<StreamMessage>,
}

impl Default for DetailScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailScheduler {
    /// A scheduler with an empty view and no task
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            current: Arc::new(AtomicU64::new(0)),
            state: TaskState::Idle,
            view: DetailView::default(),
            tx,
            rx,
        }
    }

    /// The detail view as currently rendered
    #[must_use]
    pub const fn view(&self) -> &DetailView {
        &self.view
    }

    /// Set the pane title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.view.title = title.into();
    }

    /// State of the active task
    #[must_use]
    pub const fn state(&self) -> &TaskState {
        &self.state
    }

    /// The active task, if one was ever started
    #[must_use]
    pub fn current_task(&self) -> Option<DetailTask> {
        match self.generation() {
            0 => None,
            generation => Some(DetailTask { generation }),
        }
    }

    /// State of `task`; superseded tasks report [`TaskState::Cancelled`]
    #[must_use]
    pub fn state_of(&self, task: DetailTask) -> TaskState {
        if task.generation == self.generation() {
            self.state.clone()
        } else {
            TaskState::Cancelled
        }
    }

    /// Replace the view with fixed text, cancelling any running task
    pub fn show_static(&mut self, text: &str) {
        self.supersede();
        self.state = TaskState::Idle;
        self.view.lines = text.lines().map(String::from).collect();
    }

    /// Start streaming `spec` into the view, cancelling any running task
    ///
    /// A command that cannot be started is logged and marks the task failed.
    pub fn start(&mut self, git: &dyn GitBackend, spec: &CommandSpec) -> DetailTask {
        let generation = self.supersede();
        self.state = TaskState::Running;
        self.view.lines.clear();

        let sink = OutputSink::new(generation, Arc::clone(&self.current), self.tx.clone());
        if let Err(err) = git.stream(spec, sink) {
            error!(command = %spec, error = %err, "Failed to start detail render");
            self.state = TaskState::Failed(err.to_string());
        }

        DetailTask { generation }
    }

    /// Apply queued output from the active task. Returns whether the view
    /// changed.
    pub fn poll(&mut self) -> bool {
        let generation = self.generation();
        let mut changed = false;

        while let Ok(message) = self.rx.try_recv() {
            if message.generation != generation {
                continue;
            }

            match message.event {
                StreamEvent::Line(line) => {
                    self.view.lines.push(line);
                    changed = true;
                }
                StreamEvent::Done => {
                    self.state = TaskState::Completed;
                }
                StreamEvent::Failed(reason) => {
                    error!(generation, reason = %reason, "Detail render failed");
                    self.state = TaskState::Failed(reason);
                }
            }
        }

        changed
    }

    fn generation(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    fn supersede(&mut self) -> u64 {
        let previous = self.generation();
        if self.state == TaskState::Running {
            debug!(generation = previous, "Cancelling detail task");
        }
        let next = previous + 1;
        self.current.store(next, Ordering::Release);
        next
    }
}
