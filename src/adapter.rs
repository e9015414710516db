//! Execution adapter: what the runner calls when it decides to run a unit.
//!
//! The adapter only invokes the unit's bound action. A returned failure is
//! handed back exactly as produced and a panic keeps unwinding, so the runner's
//! reporting sees the original failure type and message.

use crate::engine::{ExecutableUnit, UnitAction};
use crate::errors::VargaError;
use crate::failure::Failure;

/// Runs `unit`.
///
/// `fixture` must be `Some` whenever [`ExecutableUnit::needs_fixture`] is true.
pub fn run_unit<F>(unit: &ExecutableUnit<F>, fixture: Option<&mut F>) -> Result<(), Failure> {
    match unit.action() {
        UnitAction::Reraise(failure) => Err(failure.clone()),
        UnitAction::Disabled => Ok(()),
        UnitAction::Plain(action) => action(require(unit, fixture)?),
        UnitAction::Row(spec) => spec.run(require(unit, fixture)?),
    }
}

fn require<'a, F>(unit: &ExecutableUnit<F>, fixture: Option<&'a mut F>) -> Result<&'a mut F, Failure> {
    fixture.ok_or_else(|| {
        Failure::from(VargaError::MissingFixture {
            unit: unit.identity().to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum;
    use crate::declaration::Declaration;
    use crate::engine::{ExpansionEngine, INITIALIZATION_ERROR};
    use crate::runtime::TestClass;
    use crate::spec::{specs, TestSpecSet};

    #[derive(Debug, thiserror::Error)]
    #[error("no rows today")]
    struct NoRows;

    fn class() -> TestClass<()> {
        TestClass::new("Adapted")
            .test(Declaration::new("plain", |_: &mut ()| {}))
            .test(Declaration::new("skipped", |_: &mut ()| {}).ignore())
            .test(Declaration::new("broken", |_: &mut ()| -> Result<TestSpecSet<()>, NoRows> {
                Err(NoRows)
            }))
            .test(Declaration::new("rows", |_: &mut ()| {
                specs(|_: &mut (), n: i32| assert!(n > 0, "{} is not positive", n), [datum!(1)])
            }))
    }

    #[test]
    fn reraise_hands_back_the_captured_failure() {
        let expansion = ExpansionEngine::default().expand(&class());
        let unit = &expansion.declaration("broken").unwrap().units()[0];
        assert_eq!(unit.identity(), INITIALIZATION_ERROR);

        let failure = run_unit(unit, None).unwrap_err();
        assert!(failure.downcast_ref::<NoRows>().is_some());
    }

    #[test]
    fn disabled_units_do_nothing() {
        let expansion = ExpansionEngine::default().expand(&class());
        let unit = &expansion.declaration("skipped").unwrap().units()[0];
        assert!(!unit.is_enabled());
        assert!(run_unit(unit, None).is_ok());
    }

    #[test]
    fn bound_units_run_against_the_fixture() {
        let expansion = ExpansionEngine::default().expand(&class());
        for name in ["plain", "rows"] {
            let unit = &expansion.declaration(name).unwrap().units()[0];
            assert!(run_unit(unit, Some(&mut ())).is_ok());
        }
    }

    #[test]
    fn bound_units_without_a_fixture_fail() {
        let expansion = ExpansionEngine::default().expand(&class());
        let unit = &expansion.declaration("rows").unwrap().units()[0];

        let failure = run_unit(unit, None).unwrap_err();
        assert_eq!(
            failure.downcast_ref::<VargaError>(),
            Some(&VargaError::MissingFixture {
                unit: "rows: 1".to_string()
            })
        );
    }
}
