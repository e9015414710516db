//! Varga error handling.
//!
//! Every usage or configuration problem the engine can detect is a [`VargaError`].
//! These are never thrown past a run: naming problems become the failure of a
//! declaration's sentinel unit, validation problems are collected into an
//! [`InitializationError`], and configuration problems surface from the loader.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// All engine-level error kinds.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[diagnostic(url(docsrs))]
pub enum VargaError {
    // ========================================================================
    // NAMING - label template problems, detected at expansion time
    // ========================================================================
    #[error("Label template \"{template}\" refers to {{{index}}} but the datum has {arity} value(s)")]
    #[diagnostic(
        code(varga::naming::out_of_range),
        help("placeholders are 0-based: a datum of {arity} value(s) accepts {{0}} through {{{last}}}")
    )]
    PlaceholderOutOfRange {
        #[source_code]
        template: String,
        #[label("no value at this position")]
        span: SourceSpan,
        index: usize,
        arity: usize,
        last: usize,
    },

    #[error("Malformed label template \"{template}\": {reason}")]
    #[diagnostic(
        code(varga::naming::malformed),
        help("use {{0}}, {{1}}, ... for values and {{{{ or }}}} for literal braces")
    )]
    MalformedTemplate {
        #[source_code]
        template: String,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    // ========================================================================
    // VALIDATION - structural declaration rules
    // ========================================================================
    #[error("Class {class} should be public")]
    #[diagnostic(code(varga::validation::class_visibility))]
    ClassNotPublic { class: String },

    #[error("Method {method}() should be public")]
    #[diagnostic(code(varga::validation::method_visibility))]
    MethodNotPublic { method: String },

    #[error("Method {method}() should not be static")]
    #[diagnostic(
        code(varga::validation::static_method),
        help("declare the test with `Declaration::new` so it receives the fixture")
    )]
    StaticMethod { method: String },

    // ========================================================================
    // EXECUTION
    // ========================================================================
    #[error("Unit {unit} needs a fixture instance but none was provided")]
    #[diagnostic(code(varga::execution::missing_fixture))]
    MissingFixture { unit: String },

    // ========================================================================
    // CONFIGURATION
    // ========================================================================
    #[error("Invalid runner configuration: {message}")]
    #[diagnostic(code(varga::config::invalid))]
    Config { message: String },
}

impl VargaError {
    pub(crate) fn out_of_range(template: &str, start: usize, len: usize, index: usize, arity: usize) -> Self {
        VargaError::PlaceholderOutOfRange {
            template: template.to_string(),
            span: (start, len).into(),
            index,
            arity,
            last: arity.saturating_sub(1),
        }
    }

    pub(crate) fn malformed(template: &str, start: usize, len: usize, reason: impl Into<String>) -> Self {
        VargaError::MalformedTemplate {
            template: template.to_string(),
            span: (start, len.max(1)).into(),
            reason: reason.into(),
        }
    }

    /// Returns true for the structural violations collected by the validation pass.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VargaError::ClassNotPublic { .. }
                | VargaError::MethodNotPublic { .. }
                | VargaError::StaticMethod { .. }
        )
    }
}

/// Every validation violation of one test class, reported together.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Test class {class} failed validation with {} error(s)", .violations.len())]
#[diagnostic(code(varga::validation::initialization))]
pub struct InitializationError {
    pub class: String,
    #[related]
    pub violations: Vec<VargaError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_errors_point_at_the_placeholder() {
        let err = VargaError::out_of_range("{0} and {3}", 8, 3, 3, 2);
        assert_eq!(err.code().unwrap().to_string(), "varga::naming::out_of_range");
        let label = err.labels().unwrap().next().unwrap();
        assert_eq!((label.offset(), label.len()), (8, 3));
        assert!(err.help().unwrap().to_string().contains("{0} through {1}"));
    }

    #[test]
    fn initialization_error_relates_every_violation() {
        let err = InitializationError {
            class: "Hidden".into(),
            violations: vec![
                VargaError::ClassNotPublic { class: "Hidden".into() },
                VargaError::StaticMethod { method: "testStatic".into() },
            ],
        };
        assert_eq!(err.related().unwrap().count(), 2);
        assert!(err.violations.iter().all(VargaError::is_validation));
        assert!(!VargaError::Config { message: "x".into() }.is_validation());
    }
}
