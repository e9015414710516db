//! Run events and the listeners that observe them.
//!
//! For each executed test the runner fires `test_started`, zero or more
//! `test_failure`, then `test_finished`. Ignored tests only fire
//! `test_ignored`. The whole run is bracketed by `run_started`, which receives
//! the complete description tree, and `run_finished`.

use crate::description::Description;
use crate::runtime::result::{FailureReport, RunResult};

/// Receives run events. Every method defaults to doing nothing.
pub trait RunListener {
    fn run_started(&mut self, _description: &Description) {}
    fn test_started(&mut self, _description: &Description) {}
    fn test_failure(&mut self, _report: &FailureReport) {}
    fn test_finished(&mut self, _description: &Description) {}
    fn test_ignored(&mut self, _description: &Description) {}
    fn run_finished(&mut self, _result: &RunResult) {}
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    RunStarted(Description),
    TestStarted(Description),
    TestFailure(FailureReport),
    TestFinished(Description),
    TestIgnored(Description),
    RunFinished(RunResult),
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Vec<RunEvent>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<RunEvent> {
        self.events
    }

    /// Display names of the tests that started, in order.
    pub fn started_names(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RunEvent::TestStarted(d) => Some(d.display_name()),
                _ => None,
            })
            .collect()
    }
}

impl RunListener for RecordingListener {
    fn run_started(&mut self, description: &Description) {
        self.events.push(RunEvent::RunStarted(description.clone()));
    }

    fn test_started(&mut self, description: &Description) {
        self.events.push(RunEvent::TestStarted(description.clone()));
    }

    fn test_failure(&mut self, report: &FailureReport) {
        self.events.push(RunEvent::TestFailure(report.clone()));
    }

    fn test_finished(&mut self, description: &Description) {
        self.events.push(RunEvent::TestFinished(description.clone()));
    }

    fn test_ignored(&mut self, description: &Description) {
        self.events.push(RunEvent::TestIgnored(description.clone()));
    }

    fn run_finished(&mut self, result: &RunResult) {
        self.events.push(RunEvent::RunFinished(result.clone()));
    }
}

/// Fans events out to every registered listener, in registration order.
#[derive(Default)]
pub struct RunNotifier<'a> {
    listeners: Vec<&'a mut dyn RunListener>,
}

impl<'a> RunNotifier<'a> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: &'a mut dyn RunListener) {
        self.listeners.push(listener);
    }

    pub fn with_listener(mut self, listener: &'a mut dyn RunListener) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn fire_run_started(&mut self, description: &Description) {
        self.listeners.iter_mut().for_each(|l| l.run_started(description));
    }

    pub fn fire_test_started(&mut self, description: &Description) {
        self.listeners.iter_mut().for_each(|l| l.test_started(description));
    }

    pub fn fire_test_failure(&mut self, report: &FailureReport) {
        self.listeners.iter_mut().for_each(|l| l.test_failure(report));
    }

    pub fn fire_test_finished(&mut self, description: &Description) {
        self.listeners.iter_mut().for_each(|l| l.test_finished(description));
    }

    pub fn fire_test_ignored(&mut self, description: &Description) {
        self.listeners.iter_mut().for_each(|l| l.test_ignored(description));
    }

    pub fn fire_run_finished(&mut self, result: &RunResult) {
        self.listeners.iter_mut().for_each(|l| l.run_finished(result));
    }
}
