//! Run sessions: the owner of a class's expansion.
//!
//! The expansion is computed lazily on first access and never changes
//! afterwards, so describing a class and then running it invokes each
//! parameterized declaration only once.

use once_cell::unsync::OnceCell;

use crate::description::Description;
use crate::engine::{Expansion, ExpansionEngine};
use crate::errors::InitializationError;
use crate::runtime::class::{Fixture, TestClass};
use crate::runtime::config::RunnerConfig;
use crate::runtime::listener::RunNotifier;
use crate::runtime::result::RunResult;
use crate::runtime::runner::Runner;
use crate::validation;

pub struct RunSession<F> {
    class: TestClass<F>,
    config: RunnerConfig,
    expansion: OnceCell<Expansion<F>>,
}

impl<F: Fixture> RunSession<F> {
    pub fn new(class: TestClass<F>) -> Self {
        Self::with_config(class, RunnerConfig::default())
    }

    pub fn with_config(class: TestClass<F>, config: RunnerConfig) -> Self {
        Self {
            class,
            config,
            expansion: OnceCell::new(),
        }
    }

    pub fn class(&self) -> &TestClass<F> {
        &self.class
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// The memoized expansion, computed on first call.
    pub fn expansion(&self) -> &Expansion<F> {
        self.expansion.get_or_init(|| {
            ExpansionEngine::new(self.config.instance_policy).expand(&self.class)
        })
    }

    /// The full description tree of the class.
    pub fn description(&self) -> &Description {
        self.expansion().description()
    }

    /// All validation violations of the class as one diagnostic.
    pub fn validate(&self) -> Result<(), InitializationError> {
        validation::into_result(self.class.name(), self.expansion().violations())
    }

    /// Runs every unit, reporting to `notifier`.
    pub fn run(&self, notifier: &mut RunNotifier<'_>) -> RunResult {
        Runner::new(&self.config).run(self.class.name(), self.expansion(), notifier)
    }
}
