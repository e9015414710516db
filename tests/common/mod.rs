//! Shared helpers for running test classes and inspecting what they reported.
#![allow(dead_code)]

use varga::prelude::*;

/// Runs `class` with default settings and no colors.
pub fn run<F: Fixture>(class: TestClass<F>) -> (RunResult, Vec<RunEvent>) {
    run_with(class, RunnerConfig::default().with_colors(false))
}

pub fn run_with<F: Fixture>(class: TestClass<F>, config: RunnerConfig) -> (RunResult, Vec<RunEvent>) {
    let session = RunSession::with_config(class, config);
    run_session(&session)
}

pub fn run_session<F: Fixture>(session: &RunSession<F>) -> (RunResult, Vec<RunEvent>) {
    let mut recorder = RecordingListener::new();
    let result = session.run(&mut RunNotifier::new().with_listener(&mut recorder));
    (result, recorder.into_events())
}

/// One line per event, compact enough to compare whole runs at a glance.
///
/// `run_started` and `run_finished` are left out.
pub fn trace(events: &[RunEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            RunEvent::TestStarted(d) => Some(format!("started {}", d.display_name())),
            RunEvent::TestFailure(r) => Some(format!("failure {}: {}", r.test_name(), r.failure)),
            RunEvent::TestFinished(d) => Some(format!("finished {}", d.display_name())),
            RunEvent::TestIgnored(d) => Some(format!("ignored {}", d.display_name())),
            RunEvent::RunStarted(_) | RunEvent::RunFinished(_) => None,
        })
        .collect()
}

/// The description tree announced when the run started.
pub fn announced_tree(events: &[RunEvent]) -> &varga::Description {
    match events.first() {
        Some(RunEvent::RunStarted(tree)) => tree,
        other => panic!("first event should be RunStarted, got {:?}", other),
    }
}

/// Lines for a passing test.
pub fn passed(name: &str) -> Vec<String> {
    vec![format!("started {}", name), format!("finished {}", name)]
}

/// Lines for a test failing once with `message`.
pub fn failed(name: &str, message: &str) -> Vec<String> {
    vec![
        format!("started {}", name),
        format!("failure {}: {}", name, message),
        format!("finished {}", name),
    ]
}
