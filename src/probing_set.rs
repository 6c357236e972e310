use core::borrow::Borrow;
use core::fmt::Debug;

use crate::error::Result;
use crate::key::Key;
use crate::probing_table::ProbingTable;

/// A hash set backed by a [`ProbingTable`] with unit values.
///
/// Growth, tombstones and absent-value rejection behave exactly as they do
/// for the table.
#[derive(Clone)]
pub struct ProbingSet<T> {
    table: ProbingTable<T, ()>,
}

impl<T: Key> PartialEq for ProbingSet<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v).unwrap_or(false))
    }
}

impl<T: Key> Eq for ProbingSet<T> {}

impl<T: Debug> Debug for ProbingSet<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> ProbingSet<T> {
    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all values, keeping the capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterates over the values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.table.keys()
    }
}

impl<T: Key> ProbingSet<T> {
    /// Creates an empty set with the default number of slots.
    ///
    /// ```rust
    /// use probing_table::ProbingSet;
    ///
    /// let mut set = ProbingSet::new();
    /// assert_eq!(set.insert("a"), Ok(true));
    /// assert_eq!(set.insert("a"), Ok(false));
    /// assert_eq!(set.contains("a"), Ok(true));
    /// ```
    pub fn new() -> Self {
        Self {
            table: ProbingTable::new(),
        }
    }

    /// Creates an empty set with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            table: ProbingTable::with_capacity(capacity)?,
        })
    }

    /// Adds `value`, returning `Ok(false)` if it was already present.
    pub fn insert(&mut self, value: T) -> Result<bool> {
        self.table.insert(value, ())
    }

    /// Returns `true` if `value` is in the set.
    pub fn contains<Q>(&self, value: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.table.contains(value)
    }

    /// Removes `value`, returning `Ok(false)` if it was not present.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.table.delete(value)
    }
}

impl<T: Key> Default for ProbingSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
