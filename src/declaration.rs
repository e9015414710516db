//! Declared test methods and the metadata the engine reads from them.
//!
//! A declaration is classified exactly once, when it is built, from the return
//! type of its body. Bodies returning `()` or `Result<(), E>` are plain tests;
//! bodies returning a [`TestSpecSet`] (directly or inside a `Result`) are
//! parameterized. Everything downstream matches on [`TestBody`].

use std::fmt;
use std::rc::Rc;

use crate::failure::{Failure, IntoOutcome};
use crate::spec::{Action, TestSpecSet};

/// Produces the rows of a parameterized declaration.
pub type Generator<F> = Rc<dyn Fn(&mut F) -> Result<TestSpecSet<F>, Failure>>;

/// The closed set of declaration shapes.
pub enum TestBody<F> {
    /// Runs once as an ordinary test.
    Plain(Action<F>),
    /// Invoked once at expansion time to obtain its rows.
    Parameterized(Generator<F>),
}

impl<F> TestBody<F> {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            TestBody::Plain(_) => DeclarationKind::Plain,
            TestBody::Parameterized(_) => DeclarationKind::Parameterized,
        }
    }
}

impl<F> Clone for TestBody<F> {
    fn clone(&self) -> Self {
        match self {
            TestBody::Plain(action) => TestBody::Plain(Rc::clone(action)),
            TestBody::Parameterized(generator) => TestBody::Parameterized(Rc::clone(generator)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Plain,
    Parameterized,
}

/// Return types a declaration body may have.
pub trait TestReturn<F>: Sized + 'static {
    fn into_body<B>(body: B) -> TestBody<F>
    where
        B: Fn(&mut F) -> Self + 'static;
}

impl<F: 'static> TestReturn<F> for () {
    fn into_body<B>(body: B) -> TestBody<F>
    where
        B: Fn(&mut F) -> Self + 'static,
    {
        TestBody::Plain(Rc::new(move |fixture: &mut F| body(fixture).into_outcome()))
    }
}

impl<F: 'static, E: Into<Failure> + 'static> TestReturn<F> for Result<(), E> {
    fn into_body<B>(body: B) -> TestBody<F>
    where
        B: Fn(&mut F) -> Self + 'static,
    {
        TestBody::Plain(Rc::new(move |fixture: &mut F| body(fixture).into_outcome()))
    }
}

impl<F: 'static> TestReturn<F> for TestSpecSet<F> {
    fn into_body<B>(body: B) -> TestBody<F>
    where
        B: Fn(&mut F) -> Self + 'static,
    {
        TestBody::Parameterized(Rc::new(move |fixture: &mut F| Ok(body(fixture))))
    }
}

impl<F: 'static, E: Into<Failure> + 'static> TestReturn<F> for Result<TestSpecSet<F>, E> {
    fn into_body<B>(body: B) -> TestBody<F>
    where
        B: Fn(&mut F) -> Self + 'static,
    {
        TestBody::Parameterized(Rc::new(move |fixture: &mut F| body(fixture).map_err(Into::into)))
    }
}

/// Whether a declaration receives the fixture instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Receiver {
    /// Takes `&mut F`; the normal shape for tests.
    #[default]
    Instance,
    /// Takes no fixture, the analogue of a static method.
    Associated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

/// One declared test method of a [`TestClass`](crate::runtime::TestClass).
pub struct Declaration<F> {
    name: String,
    body: TestBody<F>,
    receiver: Receiver,
    visibility: Visibility,
    ignored: bool,
    describe_as: Option<String>,
}

impl<F: 'static> Declaration<F> {
    /// Declares a test whose body receives the fixture.
    ///
    /// A closure whose body only panics (`|_| panic!()`, `|_| todo!()`) has
    /// return type `!`, which is not a [`TestReturn`]. Annotate it as
    /// `|_: &mut F| -> () { todo!() }` or pass a named `fn`.
    pub fn new<B, R>(name: impl Into<String>, body: B) -> Self
    where
        B: Fn(&mut F) -> R + 'static,
        R: TestReturn<F>,
    {
        Self::from_body(name.into(), R::into_body(body), Receiver::Instance)
    }

    /// Declares a test whose body does not take the fixture.
    ///
    /// Such declarations are reported by the validation pass.
    pub fn associated<B, R>(name: impl Into<String>, body: B) -> Self
    where
        B: Fn() -> R + 'static,
        R: TestReturn<F>,
    {
        Self::from_body(
            name.into(),
            R::into_body(move |_: &mut F| body()),
            Receiver::Associated,
        )
    }

    fn from_body(name: String, body: TestBody<F>, receiver: Receiver) -> Self {
        Self {
            name,
            body,
            receiver,
            visibility: Visibility::Public,
            ignored: false,
            describe_as: None,
        }
    }
}

impl<F> Declaration<F> {
    /// Marks the declaration as disabled. Its body is never invoked.
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Sets the label template used to name each row, e.g. `"for value {0}"`.
    pub fn describe_as(mut self, template: impl Into<String>) -> Self {
        self.describe_as = Some(template.into());
        self
    }

    pub fn restricted(mut self) -> Self {
        self.visibility = Visibility::Restricted;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &TestBody<F> {
        &self.body
    }

    pub fn kind(&self) -> DeclarationKind {
        self.body.kind()
    }

    pub fn is_parameterized(&self) -> bool {
        self.kind() == DeclarationKind::Parameterized
    }

    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn template(&self) -> Option<&str> {
        self.describe_as.as_deref()
    }
}

impl<F> fmt::Debug for Declaration<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("receiver", &self.receiver)
            .field("visibility", &self.visibility)
            .field("ignored", &self.ignored)
            .field("describe_as", &self.describe_as)
            .finish()
    }
}
