use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::Hash;
use core::mem;

use crate::error::ABSENT_KEY;
use crate::error::Result;
use crate::error::ZERO_CAPACITY;
use crate::key::Key;
use crate::key::hash_code;

/// Number of slots a table starts with when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 10;

/// One unit of backing storage.
///
/// A tombstone keeps the entry it replaced: it is logically absent, but it
/// still counts towards the occupied total and keeps probe chains running
/// through it.
#[derive(Clone)]
pub(crate) enum Slot<K, V> {
    Empty,
    Occupied { key: K, value: V },
    Tombstone { key: K, value: V },
}

impl<K, V> Slot<K, V> {
    #[cfg(any(test, feature = "stats"))]
    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline(always)]
    fn live(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

#[inline(always)]
fn ensure_present<Q: Key + ?Sized>(key: &Q) -> Result<()> {
    if key.is_absent() {
        return Err(ABSENT_KEY);
    }
    Ok(())
}

/// An open-addressing hash table using linear probing.
///
/// Every operation starts at the key's home slot (`hash_code(key) mod
/// capacity`) and walks forward one slot at a time, wrapping at the end.
/// Deleted entries become tombstones rather than being removed, so they keep
/// counting towards [`occupied_count`](Self::occupied_count) until an insert
/// reuses them or the table is rebuilt. Once the occupied count exceeds half
/// the capacity, the table doubles and reinserts only its live entries. The
/// table never shrinks.
///
/// The table is single-threaded. Callers sharing one between threads must
/// serialize access themselves, e.g. with a mutex around the whole table.
///
/// ## Example
///
/// ```rust
/// use probing_table::ProbingTable;
///
/// let mut table = ProbingTable::new();
/// assert_eq!(table.insert(4, "12"), Ok(true));
/// assert_eq!(table.insert(4, "twelve"), Ok(false));
/// assert_eq!(table.find(&4), Ok(Some(&"12")));
///
/// assert_eq!(table.delete(&4), Ok(true));
/// assert_eq!(table.contains(&4), Ok(false));
/// // The tombstone still counts as occupied.
/// assert_eq!(table.occupied_count(), 1);
/// ```
#[derive(Clone)]
pub struct ProbingTable<K, V> {
    slots: Vec<Slot<K, V>>,
    occupied: usize,
    live: usize,
}

impl<K, V> ProbingTable<K, V> {
    /// Returns the number of slots in the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots that are not empty, counting tombstones.
    ///
    /// This is the figure that drives growth.
    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the table holds no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of tombstones currently in the table.
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.occupied - self.live
    }

    /// Empties every slot, keeping the current capacity.
    ///
    /// ```rust
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// for k in 0..8 {
    ///     table.insert(k, k).unwrap();
    /// }
    /// let capacity = table.capacity();
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.occupied_count(), 0);
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.occupied = 0;
        self.live = 0;
    }

    /// Iterates over live entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Iterates over live keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over live values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Describes every slot, in index order.
    ///
    /// Meant for debugging; each description renders as `"{i}: empty"`,
    /// `"{i}: {key}, {value}"` or `"{i}: {key}, {value} (deleted)"`.
    ///
    /// ```rust
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::with_capacity(4).unwrap();
    /// table.insert(1, "a").unwrap();
    /// table.insert(3, "b").unwrap();
    /// table.delete(&3).unwrap();
    ///
    /// let lines: Vec<String> = table.describe().iter().map(|d| d.to_string()).collect();
    /// assert_eq!(lines, ["0: empty", "1: 1, a", "2: empty", "3: 3, b (deleted)"]);
    /// ```
    pub fn describe(&self) -> Vec<SlotDescription<'_, K, V>> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotDescription {
                index,
                state: match slot {
                    Slot::Empty => SlotState::Empty,
                    Slot::Occupied { key, value } => SlotState::Live { key, value },
                    Slot::Tombstone { key, value } => SlotState::Deleted { key, value },
                },
            })
            .collect()
    }

    #[cfg(any(test, feature = "stats"))]
    #[inline(always)]
    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[inline(always)]
    fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }
}

impl<K: Key, V> ProbingTable<K, V> {
    /// Creates a table with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self {
            slots: empty_slots(DEFAULT_CAPACITY),
            occupied: 0,
            live: 0,
        }
    }

    /// Creates a table with exactly `capacity` slots.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// if `capacity` is zero.
    ///
    /// ```rust
    /// use probing_table::ProbingTable;
    ///
    /// let table: ProbingTable<u32, ()> = ProbingTable::with_capacity(3).unwrap();
    /// assert_eq!(table.capacity(), 3);
    /// assert!(ProbingTable::<u32, ()>::with_capacity(0).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ZERO_CAPACITY);
        }
        log::debug!("creating probing table with {capacity} slots");
        Ok(Self {
            slots: empty_slots(capacity),
            occupied: 0,
            live: 0,
        })
    }

    /// Home slot of `key`: its hash code modulo the capacity, never negative.
    #[inline(always)]
    pub(crate) fn slot_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        hash_code(key).rem_euclid(self.slots.len() as i64) as usize
    }

    /// Inserts `key` with `value`.
    ///
    /// Probing from the home slot, the entry goes into the first empty slot
    /// or tombstone found. Returns `Ok(false)` without touching the table if
    /// an equal live key is met first.
    ///
    /// A reused tombstone is taken as soon as it is seen, without looking
    /// further along the chain for an equal key. An equal key stored past a
    /// tombstone is therefore not detected and ends up stored twice.
    ///
    /// ```rust
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// assert_eq!(table.insert("k", 1), Ok(true));
    /// assert_eq!(table.insert("k", 2), Ok(false));
    ///
    /// let mut optional = ProbingTable::new();
    /// assert!(optional.insert(None::<u8>, 3).is_err());
    /// assert!(optional.is_empty());
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<bool> {
        ensure_present(&key)?;
        Ok(self.insert_present(key, value))
    }

    fn insert_present(&mut self, key: K, value: V) -> bool {
        let start = self.slot_index(&key);
        let mut index = start;

        loop {
            match &self.slots[index] {
                Slot::Empty => {
                    self.slots[index] = Slot::Occupied { key, value };
                    self.occupied += 1;
                    break;
                }
                Slot::Tombstone { .. } => {
                    log::trace!("reusing tombstone at slot {index}");
                    self.slots[index] = Slot::Occupied { key, value };
                    break;
                }
                Slot::Occupied { key: existing, .. } if *existing == key => return false,
                Slot::Occupied { .. } => {}
            }

            index = self.next_index(index);
            if index == start {
                return false;
            }
        }

        self.live += 1;
        if self.occupied > self.slots.len() / 2 {
            self.rehash();
        }
        true
    }

    /// Doubles the capacity and reinserts live entries, dropping tombstones.
    fn rehash(&mut self) {
        let old_capacity = self.slots.len();
        let capacity = old_capacity.checked_mul(2).expect("capacity overflow");
        log::trace!(
            "rehashing {} live entries from {old_capacity} to {capacity} slots",
            self.live
        );

        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        self.occupied = 0;
        self.live = 0;
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.insert_present(key, value);
            }
        }
    }

    /// Index of the live slot holding `key`.
    ///
    /// Walks forward from the home slot through tombstones and non-matching
    /// entries; the first empty slot ends the chain.
    fn locate<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        let mut index = self.slot_index(key);
        for _ in 0..self.slots.len() {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied { key: k, .. } if k.borrow() == key => return Some(index),
                _ => {}
            }
            index = self.next_index(index);
        }
        None
    }

    /// Returns the value stored for `key`, if any.
    ///
    /// ```rust
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert(String::from("Henry"), 5).unwrap();
    /// assert_eq!(table.find("Henry"), Ok(Some(&5)));
    /// assert_eq!(table.find("Thomas"), Ok(None));
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Result<Option<&V>>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        ensure_present(key)?;
        Ok(self.locate(key).and_then(|index| match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }))
    }

    /// Returns a mutable reference to the value stored for `key`, if any.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        ensure_present(key)?;
        Ok(match self.locate(key) {
            Some(index) => match &mut self.slots[index] {
                Slot::Occupied { value, .. } => Some(value),
                _ => None,
            },
            None => None,
        })
    }

    /// Returns `true` if `key` has a live entry.
    pub fn contains<Q>(&self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        Ok(self.find(key)?.is_some())
    }

    /// Marks the entry for `key` as deleted.
    ///
    /// The slot becomes a tombstone: the entry stays in place, the occupied
    /// count is unchanged and the table never shrinks. Returns `Ok(false)` if
    /// `key` has no live entry.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        ensure_present(key)?;
        let Some(index) = self.locate(key) else {
            return Ok(false);
        };

        let slot = &mut self.slots[index];
        *slot = match mem::replace(slot, Slot::Empty) {
            Slot::Occupied { key, value } => Slot::Tombstone { key, value },
            other => other,
        };
        self.live -= 1;
        Ok(true)
    }

    /// Returns the home slot of `key` (where probing starts) if `key` is
    /// present, `None` otherwise.
    ///
    /// This is not where the entry is stored; see
    /// [`get_location`](Self::get_location).
    pub fn get_hash<Q>(&self, key: &Q) -> Result<Option<usize>>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        Ok(self.contains(key)?.then(|| self.slot_index(key)))
    }

    /// Returns the slot index where `key` is stored, or `None`.
    ///
    /// ```rust
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert(4, "a").unwrap();
    /// table.insert(14, "b").unwrap();
    /// assert_eq!(table.get_hash(&14), Ok(Some(4)));
    /// assert_eq!(table.get_location(&14), Ok(Some(5)));
    /// assert_eq!(table.get_location(&24), Ok(None));
    /// ```
    pub fn get_location<Q>(&self, key: &Q) -> Result<Option<usize>>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        ensure_present(key)?;
        Ok(self.locate(key))
    }
}

impl<K: Key, V> Default for ProbingTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for ProbingTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// One line per slot: the index alone for an empty slot, `index\tkey, value`
/// for a live entry and `index\tkey, value\tdeleted` for a tombstone.
impl<K: Display, V: Display> Display for ProbingTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{i}")?,
                Slot::Occupied { key, value } => writeln!(f, "{i}\t{key}, {value}")?,
                Slot::Tombstone { key, value } => writeln!(f, "{i}\t{key}, {value}\tdeleted")?,
            }
        }
        Ok(())
    }
}

/// What a slot holds, as reported by [`ProbingTable::describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState<'a, K, V> {
    /// Nothing was ever stored here since the last rebuild.
    Empty,
    /// A live entry.
    Live {
        /// Stored key.
        key: &'a K,
        /// Stored value.
        value: &'a V,
    },
    /// A tombstone, still holding the entry it replaced.
    Deleted {
        /// Key of the deleted entry.
        key: &'a K,
        /// Value of the deleted entry.
        value: &'a V,
    },
}

/// A slot index together with its [`SlotState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDescription<'a, K, V> {
    /// Position in the backing storage.
    pub index: usize,
    /// Contents of the slot.
    pub state: SlotState<'a, K, V>,
}

impl<K: Display, V: Display> Display for SlotDescription<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            SlotState::Empty => write!(f, "{}: empty", self.index),
            SlotState::Live { key, value } => write!(f, "{}: {key}, {value}", self.index),
            SlotState::Deleted { key, value } => {
                write!(f, "{}: {key}, {value} (deleted)", self.index)
            }
        }
    }
}

/// An iterator over the live entries of a [`ProbingTable`], in slot order.
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(Slot::live)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<'a, K, V> IntoIterator for &'a ProbingTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
