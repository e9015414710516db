//! Test classes: the unit of discovery handed to the engine.

use crate::declaration::{Declaration, Visibility};
use crate::failure::Failure;

/// The per-test instance a declaration runs against.
///
/// The runner calls [`Fixture::create`] to build an instance, then `set_up`,
/// the test body, and `tear_down`. `tear_down` runs even when `set_up` or the
/// body fails.
pub trait Fixture: Sized + 'static {
    fn create() -> Result<Self, Failure>;

    fn set_up(&mut self) -> Result<(), Failure> {
        Ok(())
    }

    fn tear_down(&mut self) -> Result<(), Failure> {
        Ok(())
    }
}

impl Fixture for () {
    fn create() -> Result<Self, Failure> {
        Ok(())
    }
}

/// An ordered set of declarations sharing one fixture type.
pub struct TestClass<F> {
    name: String,
    visibility: Visibility,
    declarations: Vec<Declaration<F>>,
}

impl<F: Fixture> TestClass<F> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            declarations: Vec::new(),
        }
    }

    /// A class named after the last path segment of the fixture type.
    pub fn for_fixture() -> Self {
        let full = std::any::type_name::<F>();
        let short = full.rsplit("::").next().unwrap_or(full);
        Self::new(short)
    }

    /// Adds a declaration; registration order is run order.
    pub fn test(mut self, declaration: Declaration<F>) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn add(&mut self, declaration: Declaration<F>) {
        self.declarations.push(declaration);
    }

    pub fn restricted(mut self) -> Self {
        self.visibility = Visibility::Restricted;
        self
    }
}

impl<F> TestClass<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn declarations(&self) -> &[Declaration<F>] {
        &self.declarations
    }
}

impl<F> std::fmt::Debug for TestClass<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClass")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("declarations", &self.declarations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Calculator;

    impl Fixture for Calculator {
        fn create() -> Result<Self, Failure> {
            Ok(Calculator)
        }
    }

    #[test]
    fn for_fixture_uses_the_short_type_name() {
        let class = TestClass::<Calculator>::for_fixture();
        assert_eq!(class.name(), "Calculator");
        assert_eq!(class.visibility(), Visibility::Public);
    }

    #[test]
    fn add_and_test_keep_registration_order() {
        let mut class = TestClass::<Calculator>::new("Calc")
            .test(Declaration::new("first", |_: &mut Calculator| {}));
        class.add(Declaration::new("second", |_: &mut Calculator| {}));

        let names: Vec<_> = class.declarations().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(class.restricted().visibility(), Visibility::Restricted);
    }
}
