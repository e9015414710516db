//! Varga: data-driven test expansion.
//!
//! A test class declares plain tests and parameterized tests. A parameterized
//! declaration is invoked once, before anything runs, and returns a
//! [`TestSpecSet`]: one callback bound to a list of [`Datum`] rows. Each row
//! becomes an independently reported test named `"<declaration>: <label>"`,
//! grouped under its declaration in the [`Description`] tree.
//!
//! ```
//! use varga::prelude::*;
//!
//! struct Strings;
//!
//! impl Fixture for Strings {
//!     fn create() -> Result<Self, Failure> {
//!         Ok(Strings)
//!     }
//! }
//!
//! let class = TestClass::<Strings>::new("Strings").test(
//!     Declaration::new("testLength", |_: &mut Strings| {
//!         specs(
//!             |_: &mut Strings, s: &'static str, len: usize| assert_eq!(s.len(), len),
//!             [datum!("a", 1), datum!("bb", 2)],
//!         )
//!     })
//!     .describe_as("length of '{0}'"),
//! );
//!
//! let session = RunSession::with_config(class, RunnerConfig::default().with_colors(false));
//! let mut recorder = RecordingListener::new();
//! let result = session.run(&mut RunNotifier::new().with_listener(&mut recorder));
//!
//! assert!(result.was_successful());
//! assert_eq!(
//!     recorder.started_names(),
//!     ["testLength: length of 'a'", "testLength: length of 'bb'"]
//! );
//! ```

pub mod adapter;
pub mod datum;
pub mod declaration;
pub mod description;
pub mod engine;
pub mod errors;
pub mod failure;
pub mod naming;
pub mod runtime;
pub mod spec;
pub mod validation;

pub use crate::datum::{AnyDatum, Datum, Row};
pub use crate::declaration::{Declaration, DeclarationKind, TestBody, TestReturn};
pub use crate::description::{Description, DescriptionKind};
pub use crate::engine::{ExecutableUnit, Expansion, ExpansionEngine, INITIALIZATION_ERROR};
pub use crate::errors::{InitializationError, VargaError};
pub use crate::failure::{Failure, IntoOutcome};
pub use crate::naming::LabelTemplate;
pub use crate::runtime::{
    ConsoleListener, Fixture, InstancePolicy, RecordingListener, RunEvent, RunListener,
    RunNotifier, RunResult, RunSession, RunnerConfig, TestClass,
};
pub use crate::spec::{specs, TestSpec, TestSpecSet};

/// Everything needed to declare and run a test class.
pub mod prelude {
    pub use crate::datum;
    pub use crate::datum::Datum;
    pub use crate::declaration::Declaration;
    pub use crate::failure::Failure;
    pub use crate::runtime::{
        ConsoleListener, Fixture, InstancePolicy, RecordingListener, RunEvent, RunListener,
        RunNotifier, RunResult, RunSession, RunnerConfig, TestClass,
    };
    pub use crate::spec::{specs, TestSpecSet};
}
