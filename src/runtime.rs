//! Host runtime: test classes, fixtures, configuration and the run loop.
//!
//! A [`RunSession`] owns a [`TestClass`], expands it once, and runs the
//! resulting units while reporting to any number of [`RunListener`]s.

pub mod class;
pub mod config;
pub mod console;
pub mod listener;
pub mod result;
pub mod runner;
pub mod session;

pub use class::{Fixture, TestClass};
pub use config::{InstancePolicy, RunnerConfig};
pub use console::ConsoleListener;
pub use listener::{RecordingListener, RunEvent, RunListener, RunNotifier};
pub use result::{FailureReport, RunResult};
pub use runner::Runner;
pub use session::RunSession;
