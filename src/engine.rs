//! The expansion engine.
//!
//! Expansion turns the declarations of one [`TestClass`] into the executable
//! units the runner drives, and builds the description tree reported before
//! any unit starts:
//!
//! 1. plain declarations become one unit each;
//! 2. ignored parameterized declarations become one disabled placeholder and
//!    are never invoked;
//! 3. enabled parameterized declarations are invoked exactly once, and each
//!    returned row becomes one unit named `"<declaration>: <label>"`;
//! 4. a declaration whose data generation fails becomes a single
//!    `initializationError` unit that re-raises the captured failure.

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::debug;

use crate::declaration::{Declaration, DeclarationKind, Generator, TestBody};
use crate::description::Description;
use crate::errors::VargaError;
use crate::failure::Failure;
use crate::naming::{self, LabelTemplate};
use crate::runtime::{Fixture, InstancePolicy, TestClass};
use crate::spec::{Action, TestSpec, TestSpecSet};
use crate::validation;

/// Identity of the synthetic unit reporting a failed data generation.
pub const INITIALIZATION_ERROR: &str = "initializationError";

// ============================================================================
// EXECUTABLE UNITS
// ============================================================================

/// What running a unit does.
pub enum UnitAction<F> {
    /// The body of a plain declaration.
    Plain(Action<F>),
    /// One row of a parameterized declaration.
    Row(TestSpec<F>),
    /// Re-raise a failure captured during expansion.
    Reraise(Failure),
    /// Never run; reported as ignored.
    Disabled,
}

/// One host-visible test produced by expansion.
pub struct ExecutableUnit<F> {
    identity: String,
    declaration: String,
    description: Description,
    action: UnitAction<F>,
    shared: Option<Rc<RefCell<F>>>,
}

impl<F> ExecutableUnit<F> {
    fn new(class_name: &str, declaration: &str, identity: String, action: UnitAction<F>) -> Self {
        Self {
            description: Description::test(class_name, identity.as_str()),
            identity,
            declaration: declaration.to_string(),
            action,
            shared: None,
        }
    }

    fn sentinel(class_name: &str, declaration: &str, failure: Failure) -> Self {
        Self::new(
            class_name,
            declaration,
            INITIALIZATION_ERROR.to_string(),
            UnitAction::Reraise(failure),
        )
    }

    /// Display name of the unit, unique within its declaration.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Name of the declaration this unit was expanded from.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn action(&self) -> &UnitAction<F> {
        &self.action
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.action, UnitAction::Disabled)
    }

    /// Whether the runner must provide a fixture instance to run this unit.
    pub fn needs_fixture(&self) -> bool {
        matches!(self.action, UnitAction::Plain(_) | UnitAction::Row(_))
    }

    /// The instance that generated this row, when rows share it.
    pub fn shared_instance(&self) -> Option<&Rc<RefCell<F>>> {
        self.shared.as_ref()
    }
}

impl<F> fmt::Debug for ExecutableUnit<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match &self.action {
            UnitAction::Plain(_) => "plain",
            UnitAction::Row(_) => "row",
            UnitAction::Reraise(_) => "reraise",
            UnitAction::Disabled => "disabled",
        };
        f.debug_struct("ExecutableUnit")
            .field("identity", &self.identity)
            .field("declaration", &self.declaration)
            .field("action", &action)
            .field("shared", &self.shared.is_some())
            .finish()
    }
}

// ============================================================================
// EXPANSION RESULT
// ============================================================================

/// The units of one declaration together with its node in the description tree.
pub struct ExpandedDeclaration<F> {
    name: String,
    kind: DeclarationKind,
    node: Description,
    units: Vec<ExecutableUnit<F>>,
}

impl<F> ExpandedDeclaration<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Group node for enabled parameterized declarations, the test node otherwise.
    pub fn node(&self) -> &Description {
        &self.node
    }

    pub fn units(&self) -> &[ExecutableUnit<F>] {
        &self.units
    }
}

/// Everything computed for a test class before the run starts.
pub struct Expansion<F> {
    description: Description,
    declarations: Vec<ExpandedDeclaration<F>>,
    violations: Vec<VargaError>,
}

impl<F> Expansion<F> {
    /// The suite description, complete before any unit executes.
    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn declarations(&self) -> &[ExpandedDeclaration<F>] {
        &self.declarations
    }

    pub fn declaration(&self, name: &str) -> Option<&ExpandedDeclaration<F>> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// All units in run order.
    pub fn units(&self) -> impl Iterator<Item = &ExecutableUnit<F>> {
        self.declarations.iter().flat_map(|d| d.units.iter())
    }

    pub fn unit_count(&self) -> usize {
        self.declarations.iter().map(|d| d.units.len()).sum()
    }

    /// Validation violations collected across all declarations.
    pub fn violations(&self) -> &[VargaError] {
        &self.violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Expands test classes according to an [`InstancePolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpansionEngine {
    policy: InstancePolicy,
}

impl ExpansionEngine {
    pub fn new(policy: InstancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InstancePolicy {
        self.policy
    }

    #[tracing::instrument(level = "debug", skip_all, fields(class = class.name(), declarations = class.declarations().len()))]
    pub fn expand<F: Fixture>(&self, class: &TestClass<F>) -> Expansion<F> {
        let mut description = Description::suite(class.name());
        let mut declarations = Vec::with_capacity(class.declarations().len());

        for declaration in class.declarations() {
            let expanded = self.expand_declaration(class.name(), declaration);
            description.add_child(expanded.node.clone());
            declarations.push(expanded);
        }

        let violations = validation::validate(class);
        if !violations.is_empty() {
            debug!(count = violations.len(), "declaration validation failed");
        }

        Expansion {
            description,
            declarations,
            violations,
        }
    }

    fn expand_declaration<F: Fixture>(
        &self,
        class_name: &str,
        declaration: &Declaration<F>,
    ) -> ExpandedDeclaration<F> {
        let name = declaration.name().to_string();
        match declaration.body() {
            TestBody::Plain(action) => {
                let action = if declaration.is_ignored() {
                    UnitAction::Disabled
                } else {
                    UnitAction::Plain(Rc::clone(action))
                };
                let unit = ExecutableUnit::new(class_name, &name, name.clone(), action);
                ExpandedDeclaration {
                    kind: DeclarationKind::Plain,
                    node: unit.description.clone(),
                    units: vec![unit],
                    name,
                }
            }
            TestBody::Parameterized(_) if declaration.is_ignored() => {
                debug!(declaration = %name, "parameterized declaration ignored; not invoking");
                let unit = ExecutableUnit::new(class_name, &name, name.clone(), UnitAction::Disabled);
                ExpandedDeclaration {
                    kind: DeclarationKind::Parameterized,
                    node: unit.description.clone(),
                    units: vec![unit],
                    name,
                }
            }
            TestBody::Parameterized(generator) => {
                let units = match self.expand_rows(class_name, declaration, generator) {
                    Ok(units) => units,
                    Err(failure) => {
                        debug!(declaration = %name, %failure, "data generation failed");
                        vec![ExecutableUnit::sentinel(class_name, &name, failure)]
                    }
                };
                let mut node = Description::group(class_name, name.as_str());
                for unit in &units {
                    node.add_child(unit.description.clone());
                }
                ExpandedDeclaration {
                    kind: DeclarationKind::Parameterized,
                    node,
                    units,
                    name,
                }
            }
        }
    }

    fn expand_rows<F: Fixture>(
        &self,
        class_name: &str,
        declaration: &Declaration<F>,
        generator: &Generator<F>,
    ) -> Result<Vec<ExecutableUnit<F>>, Failure> {
        let (fixture, set) = generate(generator)?;
        debug!(declaration = declaration.name(), rows = set.len(), "rows generated");

        let template = declaration.template().map(LabelTemplate::parse).transpose()?;
        let shared = match self.policy {
            InstancePolicy::SharedAcrossRows => Some(Rc::new(RefCell::new(fixture))),
            InstancePolicy::FreshPerRow => None,
        };

        set.into_iter()
            .enumerate()
            .map(|(index, spec)| -> Result<ExecutableUnit<F>, Failure> {
                let label = naming::resolve(template.as_ref(), spec.datum(), index + 1)?;
                let identity = naming::display_name(declaration.name(), &label);
                let mut unit = ExecutableUnit::new(class_name, declaration.name(), identity, UnitAction::Row(spec));
                unit.shared = shared.clone();
                Ok(unit)
            })
            .collect()
    }
}

/// Builds the generating instance and invokes the declaration once.
///
/// Panics are caught here and become [`Failure::Panicked`]; returned errors pass
/// through as they are.
fn generate<F: Fixture>(generator: &Generator<F>) -> Result<(F, TestSpecSet<F>), Failure> {
    panic::catch_unwind(AssertUnwindSafe(|| -> Result<(F, TestSpecSet<F>), Failure> {
        let mut fixture = F::create()?;
        let set = generator(&mut fixture)?;
        Ok((fixture, set))
    }))
    .unwrap_or_else(|payload| Err(Failure::from_panic(payload)))
}
