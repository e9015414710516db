//! Data rows for parameterized tests.
//!
//! A [`Datum`] is one immutable, fixed-arity row of input values. The arity is
//! carried by the tuple type, so only rows of 1 to 10 values can be built.

use std::fmt;

/// A tuple usable as the values of a [`Datum`].
///
/// Implemented for tuples of 1 to 10 elements whose values can be cloned into
/// each call of a row callback and rendered into a test label.
pub trait Row: Clone + 'static {
    /// Number of values in the row.
    const ARITY: usize;

    /// Renders each value with `Display`, in order.
    fn labels(&self) -> Vec<String>;
}

macro_rules! impl_row {
    ($arity:expr; $($T:ident $idx:tt),+) => {
        impl<$($T),+> Row for ($($T,)+)
        where
            $($T: fmt::Display + Clone + 'static),+
        {
            const ARITY: usize = $arity;

            fn labels(&self) -> Vec<String> {
                vec![$(self.$idx.to_string()),+]
            }
        }
    };
}

impl_row!(1; A 0);
impl_row!(2; A 0, B 1);
impl_row!(3; A 0, B 1, C 2);
impl_row!(4; A 0, B 1, C 2, D 3);
impl_row!(5; A 0, B 1, C 2, D 3, E 4);
impl_row!(6; A 0, B 1, C 2, D 3, E 4, G 5);
impl_row!(7; A 0, B 1, C 2, D 3, E 4, G 5, H 6);
impl_row!(8; A 0, B 1, C 2, D 3, E 4, G 5, H 6, I 7);
impl_row!(9; A 0, B 1, C 2, D 3, E 4, G 5, H 6, I 7, J 8);
impl_row!(10; A 0, B 1, C 2, D 3, E 4, G 5, H 6, I 7, J 8, K 9);

/// One row of parameterized input.
#[derive(Clone, PartialEq)]
pub struct Datum<T> {
    values: T,
}

impl<T: Row> Datum<T> {
    pub fn new(values: T) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    pub fn into_values(self) -> T {
        self.values
    }
}

impl<T: Row> fmt::Debug for Datum<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Datum").field(&self.values.labels()).finish()
    }
}

/// Type-erased view of a datum, as seen by naming and reporting.
pub trait AnyDatum {
    fn arity(&self) -> usize;
    fn labels(&self) -> Vec<String>;
}

impl<T: Row> AnyDatum for Datum<T> {
    fn arity(&self) -> usize {
        T::ARITY
    }

    fn labels(&self) -> Vec<String> {
        self.values.labels()
    }
}

impl fmt::Debug for dyn AnyDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Datum").field(&self.labels()).finish()
    }
}

/// Builds a [`Datum`] from 1 to 10 values.
///
/// ```
/// use varga::datum;
/// use varga::datum::AnyDatum;
///
/// let row = datum!("hello", 5);
/// assert_eq!(row.arity(), 2);
/// ```
#[macro_export]
macro_rules! datum {
    ($($value:expr),+ $(,)?) => {
        $crate::datum::Datum::new(($($value,)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_follows_the_tuple() {
        assert_eq!(datum!(1).arity(), 1);
        assert_eq!(datum!("a", 1, 2.5).arity(), 3);
        assert_eq!(datum!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10).arity(), 10);
    }

    #[test]
    fn labels_render_in_order() {
        let row = datum!("hello", 5, 'x');
        assert_eq!(row.labels(), vec!["hello", "5", "x"]);
        assert_eq!(row.values().1, 5);
    }

    #[test]
    fn debug_shows_rendered_values() {
        assert_eq!(format!("{:?}", datum!("a", 1)), "Datum([\"a\", \"1\"])");
    }
}
