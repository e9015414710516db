//! Test specs: rows bound to the callback that checks them.
//!
//! A parameterized declaration returns a [`TestSpecSet`], built from one callback
//! and any number of same-arity [`Datum`] rows:
//!
//! ```
//! use varga::{datum, spec::specs};
//!
//! struct Strings;
//!
//! let set = specs(
//!     |_: &mut Strings, s: &'static str, len: usize| assert_eq!(s.len(), len),
//!     [datum!("", 0), datum!("a", 1), datum!("hello", 5)],
//! );
//! assert_eq!(set.len(), 3);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::datum::{AnyDatum, Datum, Row};
use crate::failure::{Failure, IntoOutcome};

/// A bound, deferred test action run against a fixture instance.
pub type Action<F> = Rc<dyn Fn(&mut F) -> Result<(), Failure>>;

/// A callback accepting the fixture followed by the values of a row of type `T`.
///
/// Implemented for every `Fn(&mut F, A, B, ...) -> R` of 1 to 10 values where `R`
/// is `()` or `Result<(), E>`.
pub trait RowFn<F, T>: 'static {
    fn invoke(&self, fixture: &mut F, row: T) -> Result<(), Failure>;
}

macro_rules! impl_row_fn {
    ($($T:ident $idx:tt),+) => {
        impl<F, Func, R, $($T),+> RowFn<F, ($($T,)+)> for Func
        where
            Func: Fn(&mut F, $($T),+) -> R + 'static,
            R: IntoOutcome,
        {
            fn invoke(&self, fixture: &mut F, row: ($($T,)+)) -> Result<(), Failure> {
                (self)(fixture, $(row.$idx),+).into_outcome()
            }
        }
    };
}

impl_row_fn!(A 0);
impl_row_fn!(A 0, B 1);
impl_row_fn!(A 0, B 1, C 2);
impl_row_fn!(A 0, B 1, C 2, D 3);
impl_row_fn!(A 0, B 1, C 2, D 3, E 4);
impl_row_fn!(A 0, B 1, C 2, D 3, E 4, G 5);
impl_row_fn!(A 0, B 1, C 2, D 3, E 4, G 5, H 6);
impl_row_fn!(A 0, B 1, C 2, D 3, E 4, G 5, H 6, I 7);
impl_row_fn!(A 0, B 1, C 2, D 3, E 4, G 5, H 6, I 7, J 8);
impl_row_fn!(A 0, B 1, C 2, D 3, E 4, G 5, H 6, I 7, J 8, K 9);

/// One runnable row: a datum and the action closed over it.
pub struct TestSpec<F> {
    datum: Rc<dyn AnyDatum>,
    action: Action<F>,
}

impl<F> TestSpec<F> {
    pub fn datum(&self) -> &dyn AnyDatum {
        self.datum.as_ref()
    }

    pub fn action(&self) -> &Action<F> {
        &self.action
    }

    /// Runs the bound action. Failures are returned as produced.
    pub fn run(&self, fixture: &mut F) -> Result<(), Failure> {
        (self.action)(fixture)
    }
}

impl<F> Clone for TestSpec<F> {
    fn clone(&self) -> Self {
        Self {
            datum: Rc::clone(&self.datum),
            action: Rc::clone(&self.action),
        }
    }
}

impl<F> fmt::Debug for TestSpec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSpec").field("datum", &self.datum).finish_non_exhaustive()
    }
}

/// The ordered rows produced by one invocation of a parameterized declaration.
pub struct TestSpecSet<F> {
    specs: Vec<TestSpec<F>>,
}

impl<F: 'static> TestSpecSet<F> {
    /// Binds `callback` to each datum, preserving order.
    pub fn new<T, C, I>(callback: C, data: I) -> Self
    where
        T: Row,
        C: RowFn<F, T>,
        I: IntoIterator<Item = Datum<T>>,
    {
        let callback = Rc::new(callback);
        let specs = data
            .into_iter()
            .map(|datum| {
                let datum = Rc::new(datum);
                let callback = Rc::clone(&callback);
                let bound = Rc::clone(&datum);
                let action: Action<F> =
                    Rc::new(move |fixture: &mut F| callback.invoke(fixture, bound.values().clone()));
                TestSpec {
                    datum: datum as Rc<dyn AnyDatum>,
                    action,
                }
            })
            .collect();
        Self { specs }
    }
}

impl<F> TestSpecSet<F> {
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestSpec<F>> {
        self.specs.iter()
    }
}

impl<F> IntoIterator for TestSpecSet<F> {
    type Item = TestSpec<F>;
    type IntoIter = std::vec::IntoIter<TestSpec<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.into_iter()
    }
}

impl<F> fmt::Debug for TestSpecSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.specs.iter()).finish()
    }
}

/// Builds a [`TestSpecSet`] from one callback and its rows.
pub fn specs<F, T, C, I>(callback: C, data: I) -> TestSpecSet<F>
where
    F: 'static,
    T: Row,
    C: RowFn<F, T>,
    I: IntoIterator<Item = Datum<T>>,
{
    TestSpecSet::new(callback, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum;

    #[derive(Default)]
    struct Tally {
        seen: Vec<i32>,
    }

    #[test]
    fn actions_run_against_the_given_fixture() {
        let set = specs(|t: &mut Tally, i: i32| t.seen.push(i), [datum!(1), datum!(2)]);
        let mut tally = Tally::default();
        for spec in set.iter() {
            spec.run(&mut tally).unwrap();
        }
        // Rows are rerunnable.
        set.iter().next().unwrap().run(&mut tally).unwrap();
        assert_eq!(tally.seen, vec![1, 2, 1]);
    }

    #[test]
    fn fallible_callbacks_report_their_error() {
        let set = specs(
            |_: &mut Tally, a: i32, b: i32| -> Result<(), std::fmt::Error> {
                if a == b {
                    Ok(())
                } else {
                    Err(std::fmt::Error)
                }
            },
            [datum!(1, 1), datum!(1, 2)],
        );
        let mut tally = Tally::default();
        let outcomes: Vec<_> = set.iter().map(|s| s.run(&mut tally).is_ok()).collect();
        assert_eq!(outcomes, vec![true, false]);
    }

    #[test]
    fn zero_rows_is_legal() {
        let set: TestSpecSet<Tally> = specs(|_: &mut Tally, _: i32| {}, Vec::<Datum<(i32,)>>::new());
        assert!(set.is_empty());
    }
}
