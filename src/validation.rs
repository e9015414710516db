//! Structural validation of declarations.
//!
//! Every declaration is checked, including ignored ones and parameterized ones
//! whose data was never generated, because a unit's structure is entirely that
//! of its declaration. Violations are collected, never raised, so that all of a
//! class's problems are reported together.

use crate::declaration::{Receiver, Visibility};
use crate::errors::{InitializationError, VargaError};
use crate::runtime::TestClass;

/// Checks the class and each of its declarations, in registration order.
pub fn validate<F>(class: &TestClass<F>) -> Vec<VargaError> {
    let mut errors = Vec::new();
    if class.visibility() != Visibility::Public {
        errors.push(VargaError::ClassNotPublic {
            class: class.name().to_string(),
        });
    }
    for declaration in class.declarations() {
        if declaration.receiver() == Receiver::Associated {
            errors.push(VargaError::StaticMethod {
                method: declaration.name().to_string(),
            });
        }
        if declaration.visibility() != Visibility::Public {
            errors.push(VargaError::MethodNotPublic {
                method: declaration.name().to_string(),
            });
        }
    }
    errors
}

/// Bundles violations into one diagnostic, or `Ok` when there are none.
pub fn into_result(class: &str, violations: &[VargaError]) -> Result<(), InitializationError> {
    if violations.is_empty() {
        return Ok(());
    }
    Err(InitializationError {
        class: class.to_string(),
        violations: violations.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum;
    use crate::declaration::Declaration;
    use crate::spec::{specs, TestSpecSet};

    fn rows() -> TestSpecSet<()> {
        specs(|_: &mut (), _: i32| {}, [datum!(1)])
    }

    #[test]
    fn well_formed_class_has_no_violations() {
        let class = TestClass::<()>::new("Fine")
            .test(Declaration::new("plain", |_: &mut ()| {}))
            .test(Declaration::new("rows", |_: &mut ()| rows()));
        assert!(validate(&class).is_empty());
        assert!(into_result("Fine", &[]).is_ok());
    }

    #[test]
    fn violations_accumulate_across_declarations() {
        let class = TestClass::<()>::new("Broken")
            .restricted()
            .test(Declaration::associated("static_rows", rows).ignore())
            .test(Declaration::new("hidden", |_: &mut ()| {}).restricted());
        let messages: Vec<_> = validate(&class).iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "Class Broken should be public",
                "Method static_rows() should not be static",
                "Method hidden() should be public",
            ]
        );
    }

    #[test]
    fn bundled_diagnostic_lists_every_violation() {
        let violations = vec![VargaError::MethodNotPublic { method: "a".into() }];
        let err = into_result("C", &violations).unwrap_err();
        assert_eq!(err.violations, violations);
        assert_eq!(err.to_string(), "Test class C failed validation with 1 error(s)");
    }
}
