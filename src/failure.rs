//! The failure value carried from a test body to the reporting layer.
//!
//! `Failure` plays the role of a thrown exception: it is whatever a test body,
//! a fixture hook, or a data-generation call produced when it did not succeed.
//! It intentionally does not implement [`std::error::Error`], which lets any
//! error type convert into it through `?` without clashing with the reflexive
//! `From` impl.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A test outcome that is not success.
#[derive(Clone)]
pub enum Failure {
    /// The code under test panicked. Assertion macros land here.
    Panicked { message: String },
    /// The code under test returned an error value.
    Raised {
        type_name: &'static str,
        error: Arc<dyn Error + Send + Sync + 'static>,
    },
}

impl Failure {
    /// Creates a panic-style failure with the given message.
    pub fn panicked(message: impl Into<String>) -> Self {
        Failure::Panicked {
            message: message.into(),
        }
    }

    /// Wraps an error value, remembering its concrete type.
    pub fn raised<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Failure::Raised {
            type_name: std::any::type_name::<E>(),
            error: Arc::new(error),
        }
    }

    /// Converts a payload caught by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Failure::Panicked { message }
    }

    /// The failure message, without type information.
    pub fn message(&self) -> String {
        match self {
            Failure::Panicked { message } => message.clone(),
            Failure::Raised { error, .. } => error.to_string(),
        }
    }

    /// The originating type: `"panic"` for panics, otherwise the error's type path.
    pub fn type_name(&self) -> &'static str {
        match self {
            Failure::Panicked { .. } => "panic",
            Failure::Raised { type_name, .. } => type_name,
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, Failure::Panicked { .. })
    }

    /// Borrows the underlying error as `E` if that is what was raised.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            Failure::Raised { error, .. } => error.downcast_ref::<E>(),
            Failure::Panicked { .. } => None,
        }
    }
}

impl<E> From<E> for Failure
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Failure::raised(error)
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Failure::Panicked { message: a }, Failure::Panicked { message: b }) => a == b,
            (
                Failure::Raised {
                    type_name: ta,
                    error: ea,
                },
                Failure::Raised {
                    type_name: tb,
                    error: eb,
                },
            ) => ta == tb && ea.to_string() == eb.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Panicked { message } => write!(f, "{}", message),
            Failure::Raised { error, .. } => write!(f, "{}", error),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Panicked { message } => f.debug_struct("Panicked").field("message", message).finish(),
            Failure::Raised { type_name, error } => f
                .debug_struct("Raised")
                .field("type_name", type_name)
                .field("message", &error.to_string())
                .finish(),
        }
    }
}

// ============================================================================
// OUTCOME CONVERSION - what a test body may return
// ============================================================================

/// Return types accepted from test bodies and row callbacks.
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<(), Failure>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), Failure> {
        Ok(())
    }
}

impl<E: Into<Failure>> IntoOutcome for Result<(), E> {
    fn into_outcome(self) -> Result<(), Failure> {
        self.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct Boom(&'static str);

    #[test]
    fn raised_failure_keeps_type_and_message() {
        let failure = Failure::from(Boom("random1"));
        assert!(failure.type_name().ends_with("Boom"));
        assert_eq!(failure.message(), "random1");
        assert!(failure.downcast_ref::<Boom>().is_some());
    }

    #[test]
    fn equality_distinguishes_panics_from_errors() {
        assert_eq!(Failure::panicked("fail1"), Failure::panicked("fail1"));
        assert_ne!(Failure::panicked("random1"), Failure::from(Boom("random1")));
        assert_ne!(Failure::from(Boom("random1")), Failure::from(Boom("random2")));
    }

    #[test]
    fn panic_payloads_become_messages() {
        let caught = std::panic::catch_unwind(|| panic!("fail{}", 2)).unwrap_err();
        assert_eq!(Failure::from_panic(caught), Failure::panicked("fail2"));
        let caught = std::panic::catch_unwind(|| std::panic::panic_any(7_u8)).unwrap_err();
        assert_eq!(Failure::from_panic(caught).message(), "Box<dyn Any>");
    }

    #[test]
    fn question_mark_converts_errors() {
        fn body() -> Result<(), Failure> {
            let inner: Result<(), Boom> = Err(Boom("via ?"));
            inner?;
            Ok(())
        }
        assert_eq!(body().into_outcome().unwrap_err().message(), "via ?");
    }
}
