//! Three-way comparison as an injectable capability. A container settles on
//! its comparison rule when it is built: either the comparator it was handed
//! or the value's own `Ord`/`PartialEq`. After that the rule is the only
//! thing it consults, equality included.

use std::{cmp::Ordering, sync::Arc};

/// A shared three-way comparison function.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Wraps a closure into a [`Comparator`].
pub fn comparator<T, F>(f: F) -> Comparator<T>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The ordering a container sorts and searches with.
pub(crate) enum Order<T> {
    Natural(fn(&T, &T) -> Ordering),
    Custom(Comparator<T>),
}

impl<T: Ord> Order<T> {
    pub(crate) fn natural() -> Self {
        Order::Natural(<T as Ord>::cmp)
    }
}

impl<T> Order<T> {
    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        match self {
            Order::Natural(cmp) => cmp(a, b),
            Order::Custom(cmp) => cmp(a, b),
        }
    }

    pub(crate) fn equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl<T> Clone for Order<T> {
    fn clone(&self) -> Self {
        match self {
            Order::Natural(cmp) => Order::Natural(*cmp),
            Order::Custom(cmp) => Order::Custom(Arc::clone(cmp)),
        }
    }
}

/// The equality a container matches values with.
pub(crate) enum Equality<T> {
    Natural(fn(&T, &T) -> bool),
    Custom(Comparator<T>),
}

impl<T: PartialEq> Equality<T> {
    pub(crate) fn natural() -> Self {
        Equality::Natural(<T as PartialEq>::eq)
    }
}

impl<T> Equality<T> {
    pub(crate) fn equal(&self, a: &T, b: &T) -> bool {
        match self {
            Equality::Natural(eq) => eq(a, b),
            Equality::Custom(cmp) => cmp(a, b) == Ordering::Equal,
        }
    }
}
