//! Drives an expansion and reports each unit to the listeners.
//!
//! Bound units run through the fixture lifecycle: `set_up`, the body only when
//! `set_up` succeeded, then `tear_down` regardless. Every failure along the way
//! is reported against the unit, and a panic anywhere in the lifecycle is
//! caught and reported like a returned failure.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace};

use crate::adapter;
use crate::description::Description;
use crate::engine::{ExecutableUnit, Expansion, INITIALIZATION_ERROR};
use crate::errors::VargaError;
use crate::failure::Failure;
use crate::runtime::class::Fixture;
use crate::runtime::config::RunnerConfig;
use crate::runtime::listener::RunNotifier;
use crate::runtime::result::{FailureReport, RunResult};

pub struct Runner<'c> {
    config: &'c RunnerConfig,
}

impl<'c> Runner<'c> {
    pub fn new(config: &'c RunnerConfig) -> Self {
        Self { config }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(class = class_name, units = expansion.unit_count()))]
    pub fn run<F: Fixture>(
        &self,
        class_name: &str,
        expansion: &Expansion<F>,
        notifier: &mut RunNotifier<'_>,
    ) -> RunResult {
        if !expansion.is_valid() {
            return report_violations(class_name, expansion.violations(), notifier);
        }

        let tree = match self.config.filter {
            Some(_) => self.filtered_tree(class_name, expansion),
            None => expansion.description().clone(),
        };
        notifier.fire_run_started(&tree);

        let mut result = RunResult::default();
        for unit in expansion.units() {
            if !self.selects_unit(unit) {
                trace!(unit = unit.identity(), "filtered out");
                continue;
            }
            let description = unit.description();
            if !unit.is_enabled() {
                notifier.fire_test_ignored(description);
                result.ignore_count += 1;
                continue;
            }

            notifier.fire_test_started(description);
            result.run_count += 1;
            for failure in execute(unit) {
                debug!(unit = unit.identity(), %failure, "unit failed");
                let report = FailureReport::new(description.clone(), failure);
                notifier.fire_test_failure(&report);
                result.failures.push(report);
            }
            notifier.fire_test_finished(description);
        }

        notifier.fire_run_finished(&result);
        result
    }

    /// A unit is selected by its own name or by the name of its declaration.
    fn selects_unit<F>(&self, unit: &ExecutableUnit<F>) -> bool {
        self.config.selects(unit.identity()) || self.config.selects(unit.declaration())
    }

    /// The description tree restricted to selected units.
    ///
    /// A group whose declaration name matches is kept whole, so a failed data
    /// generation stays visible under a filter naming its declaration.
    fn filtered_tree<F>(&self, class_name: &str, expansion: &Expansion<F>) -> Description {
        let mut suite = Description::suite(class_name);
        for declaration in expansion.declarations() {
            let node = declaration.node();
            if self.config.selects(declaration.name()) {
                suite.add_child(node.clone());
            } else if !node.is_test() {
                let pruned = node.retain_tests(&|d| self.config.selects(d.display_name()));
                if !pruned.children().is_empty() {
                    suite.add_child(pruned);
                }
            }
        }
        suite
    }
}

/// Reports each violation as a failed `initializationError` test. No unit runs.
///
/// The announced tree holds one `initializationError` leaf per violation.
fn report_violations(
    class_name: &str,
    violations: &[VargaError],
    notifier: &mut RunNotifier<'_>,
) -> RunResult {
    let sentinel = Description::test(class_name, INITIALIZATION_ERROR);
    let tree = violations
        .iter()
        .fold(Description::suite(class_name), |suite, _| suite.with_child(sentinel.clone()));
    notifier.fire_run_started(&tree);

    let mut result = RunResult::default();
    for violation in violations {
        notifier.fire_test_started(&sentinel);
        result.run_count += 1;
        let report = FailureReport::new(sentinel.clone(), Failure::from(violation.clone()));
        notifier.fire_test_failure(&report);
        result.failures.push(report);
        notifier.fire_test_finished(&sentinel);
    }

    notifier.fire_run_finished(&result);
    result
}

/// Runs one enabled unit and returns every failure it produced, in order.
fn execute<F: Fixture>(unit: &ExecutableUnit<F>) -> Vec<Failure> {
    if !unit.needs_fixture() {
        return adapter::run_unit(unit, None).err().into_iter().collect();
    }

    if let Some(shared) = unit.shared_instance() {
        return lifecycle(unit, &mut shared.borrow_mut());
    }

    match guard(F::create) {
        Ok(mut fixture) => lifecycle(unit, &mut fixture),
        Err(failure) => vec![failure],
    }
}

fn lifecycle<F: Fixture>(unit: &ExecutableUnit<F>, fixture: &mut F) -> Vec<Failure> {
    let mut failures = Vec::new();

    match guard(|| fixture.set_up()) {
        Ok(()) => {
            if let Err(failure) = guard(|| adapter::run_unit(unit, Some(&mut *fixture))) {
                failures.push(failure);
            }
        }
        Err(failure) => failures.push(failure),
    }

    if let Err(failure) = guard(|| fixture.tear_down()) {
        failures.push(failure);
    }
    failures
}

fn guard<T>(op: impl FnOnce() -> Result<T, Failure>) -> Result<T, Failure> {
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|payload| Err(Failure::from_panic(payload)))
}
