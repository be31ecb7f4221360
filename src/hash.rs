use std::{
    borrow::Borrow,
    collections::{
        hash_map::{self, RandomState},
        BTreeSet, HashMap,
    },
    fmt,
    hash::{BuildHasher, Hash, Hasher},
};

use log::debug;
use nohash_hasher::BuildNoHashHasher;

use crate::{
    error::{HybridSetError, Result},
    Dual, Multiplicity,
};

/// A multiset whose multiplicities may be negative
///
/// Values in this set must implement the [`Dual`] trait. Values are
/// identified by their key only: inserting two values with the same key
/// adds to the same multiplicity, and the value inserted first is kept as
/// the representative of that key.
///
/// No stored multiplicity is ever zero. An entry whose multiplicity drops
/// to zero is removed.
///
/// Multiplicity arithmetic is checked. The `try_*` methods report
/// [`HybridSetError::Overflow`] and leave the set untouched; every other
/// arithmetic method and operator panics on overflow.
#[derive(Clone)]
pub struct HybridSet<T: Dual, S = RandomState> {
    entries: HashMap<T::Key, Weighted<T>, S>,
}

/// A [`HybridSet`] of integers that uses the integer itself as its hash
pub type IntHybridSet<T> = HybridSet<T, BuildNoHashHasher<T>>;

#[derive(Clone)]
struct Weighted<T> {
    value: T,
    multiplicity: Multiplicity,
}

pub(crate) fn overflow() -> HybridSetError {
    debug!("multiplicity arithmetic overflowed");
    HybridSetError::Overflow
}

#[track_caller]
pub(crate) fn or_panic<R>(result: Result<R>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl<T: Dual, S: Default> Default for HybridSet<T, S> {
    fn default() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }
}

impl<T: Dual> HybridSet<T> {
    /// Create a new set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Create a set from a multiset of positive occurrences and a multiset
    /// of negative occurrences
    ///
    /// Every occurrence in `positive` counts +1 and every occurrence in
    /// `negative` counts -1 towards its element.
    pub fn from_multisets<A, B>(positive: A, negative: B) -> Self
    where
        A: IntoIterator<Item = T>,
        B: IntoIterator<Item = T>,
    {
        let mut set = Self::default();
        set.extend(positive);
        for value in negative {
            set.remove(value);
        }
        set
    }
    /// Create a set from values paired with their multiplicities
    ///
    /// Zero multiplicities are dropped and values sharing a key are summed.
    pub fn from_mapping<I>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (T, Multiplicity)>,
    {
        mapping.into_iter().collect()
    }
}

impl<T: Dual, S> HybridSet<T, S> {
    /// Create a new set that uses the given hash builder
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            entries: HashMap::with_hasher(hash_builder),
        }
    }
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }
    pub fn hasher(&self) -> &S {
        self.entries.hasher()
    }
    /// Get the number of distinct elements in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Check if the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Remove all items from the set
    pub fn clear(&mut self) {
        self.entries.clear()
    }
    /// Get an iterator over the keys
    pub fn keys(&self) -> Keys<T> {
        Keys(self.entries.keys())
    }
    /// Get an iterator over the representatives and their multiplicities
    pub fn iter(&self) -> Iter<T> {
        Iter(self.entries.values())
    }
    /// Check if any element has a negative multiplicity
    #[must_use]
    pub fn is_proper(&self) -> bool {
        self.entries.values().any(|entry| entry.multiplicity < 0)
    }
    /// Check if every element occurs exactly once, positively or negatively
    #[must_use]
    pub fn is_new_set(&self) -> bool {
        self.entries
            .values()
            .all(|entry| entry.multiplicity.unsigned_abs() == 1)
    }
    /// The new-set predicate as it was first written
    ///
    /// No nonzero multiplicity satisfies both halves of the conjunction, so
    /// this only holds for the empty set. Prefer [`HybridSet::is_new_set`].
    #[allow(clippy::nonminimal_bool)]
    #[must_use]
    pub fn is_new_set_literal(&self) -> bool {
        self.entries.values().all(|entry| {
            let m = entry.multiplicity;
            (m > 0 || m == 1) && (m < 0 || m == -1)
        })
    }
    /// Get the keys of every element in the set
    #[must_use]
    pub fn distinct_elements(&self) -> BTreeSet<T::Key> {
        self.entries.keys().cloned().collect()
    }
    /// Get the keys of the elements with positive and with negative
    /// multiplicity
    #[must_use]
    pub fn supporting_sets(&self) -> (BTreeSet<T::Key>, BTreeSet<T::Key>) {
        let mut positive = BTreeSet::new();
        let mut negative = BTreeSet::new();
        for (key, entry) in &self.entries {
            if entry.multiplicity > 0 {
                positive.insert(key.clone());
            } else {
                negative.insert(key.clone());
            }
        }
        (positive, negative)
    }
    /// Sum the multiplicities, letting positive and negative cancel
    pub fn try_cardinality(&self) -> Result<Multiplicity> {
        // Partial sums may leave the i64 range even when the total does not.
        let total: i128 = self
            .entries
            .values()
            .map(|entry| i128::from(entry.multiplicity))
            .sum();
        Multiplicity::try_from(total).map_err(|_| overflow())
    }
    #[must_use]
    #[track_caller]
    pub fn cardinality(&self) -> Multiplicity {
        or_panic(self.try_cardinality())
    }
    /// Sum the absolute values of the multiplicities
    pub fn try_weight(&self) -> Result<Multiplicity> {
        self.entries.values().try_fold(0, |total: Multiplicity, entry| {
            entry
                .multiplicity
                .checked_abs()
                .and_then(|m| total.checked_add(m))
                .ok_or_else(overflow)
        })
    }
    #[must_use]
    #[track_caller]
    pub fn weight(&self) -> Multiplicity {
        or_panic(self.try_weight())
    }
    fn sorted(&self) -> Vec<(&T::Key, &Weighted<T>)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<T, S> HybridSet<T, S>
where
    T: Dual,
    S: BuildHasher,
{
    /// Add `multiplicity` occurrences of a value
    ///
    /// Adding zero does nothing. The entry is removed if its multiplicity
    /// reaches zero.
    pub fn try_insert_n(&mut self, value: T, multiplicity: Multiplicity) -> Result<()> {
        if multiplicity == 0 {
            return Ok(());
        }
        match self.entries.entry(value.key().clone()) {
            hash_map::Entry::Vacant(slot) => {
                slot.insert(Weighted {
                    value,
                    multiplicity,
                });
            }
            hash_map::Entry::Occupied(mut slot) => {
                let total = slot
                    .get()
                    .multiplicity
                    .checked_add(multiplicity)
                    .ok_or_else(overflow)?;
                if total == 0 {
                    slot.remove();
                } else {
                    slot.get_mut().multiplicity = total;
                }
            }
        }
        Ok(())
    }
    #[track_caller]
    pub fn insert_n(&mut self, value: T, multiplicity: Multiplicity) {
        or_panic(self.try_insert_n(value, multiplicity))
    }
    /// Add one occurrence of a value
    #[track_caller]
    pub fn insert(&mut self, value: T) {
        self.insert_n(value, 1)
    }
    /// Take away `multiplicity` occurrences of a value
    ///
    /// Removing a value that is not in the set gives it a negative
    /// multiplicity.
    pub fn try_remove_n(&mut self, value: T, multiplicity: Multiplicity) -> Result<()> {
        let negated = multiplicity.checked_neg().ok_or_else(overflow)?;
        self.try_insert_n(value, negated)
    }
    #[track_caller]
    pub fn remove_n(&mut self, value: T, multiplicity: Multiplicity) {
        or_panic(self.try_remove_n(value, multiplicity))
    }
    /// Take away one occurrence of a value
    #[track_caller]
    pub fn remove(&mut self, value: T) {
        self.remove_n(value, 1)
    }
    /// Get the multiplicity of the value with the given key, or zero
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> Multiplicity
    where
        Q: Hash + Eq + ?Sized,
        T::Key: Borrow<Q>,
    {
        self.entries.get(key).map_or(0, |entry| entry.multiplicity)
    }
    /// Check if the set contains a value with the given key
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Eq + ?Sized,
        T::Key: Borrow<Q>,
    {
        self.entries.contains_key(key)
    }
    /// Get the representative of the given key
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        Q: Hash + Eq + ?Sized,
        T::Key: Borrow<Q>,
    {
        self.entries.get(key).map(|entry| &entry.value)
    }
}

impl<T, S> HybridSet<T, S>
where
    T: Dual + Clone,
    S: Clone,
{
    /// Get the elements with positive multiplicity
    #[must_use]
    pub fn positive_part(&self) -> Self {
        self.restricted(|m| m > 0)
    }
    /// Get the elements with negative multiplicity
    #[must_use]
    pub fn negative_part(&self) -> Self {
        self.restricted(|m| m < 0)
    }
    fn restricted(&self, keep: impl Fn(Multiplicity) -> bool) -> Self {
        let mut part = self.clone();
        part.entries.retain(|_, entry| keep(entry.multiplicity));
        part
    }
}

impl<T: Dual, S: BuildHasher> PartialEq for HybridSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, entry)| other.count(key) == entry.multiplicity)
    }
}

impl<T: Dual, S: BuildHasher> Eq for HybridSet<T, S> {}

impl<T: Dual, S> Hash for HybridSet<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (key, entry) in self.sorted() {
            key.hash(state);
            entry.multiplicity.hash(state);
        }
        self.len().hash(state);
    }
}

impl<T: Dual + fmt::Debug, S> fmt::Debug for HybridSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(
                self.sorted()
                    .into_iter()
                    .map(|(_, entry)| (&entry.value, entry.multiplicity)),
            )
            .finish()
    }
}

/// Renders as `{a: 2, b: -1}`, ordered by key
impl<T: Dual + fmt::Display, S> fmt::Display for HybridSet<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (i, (_, entry)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{}: {}", entry.value, entry.multiplicity)?;
        }
        write!(formatter, "}}")
    }
}

impl<T: Dual, S: BuildHasher> Extend<T> for HybridSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Dual, S: BuildHasher> Extend<(T, Multiplicity)> for HybridSet<T, S> {
    fn extend<I: IntoIterator<Item = (T, Multiplicity)>>(&mut self, iter: I) {
        for (value, multiplicity) in iter {
            self.insert_n(value, multiplicity);
        }
    }
}

impl<T: Dual, S: BuildHasher + Default> FromIterator<T> for HybridSet<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: Dual, S: BuildHasher + Default> FromIterator<(T, Multiplicity)> for HybridSet<T, S> {
    fn from_iter<I: IntoIterator<Item = (T, Multiplicity)>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

/// Iterator returned by [`HybridSet::keys`]
#[must_use]
pub struct Keys<'a, T: Dual>(hash_map::Keys<'a, T::Key, Weighted<T>>);
/// Iterator returned by [`HybridSet::iter`]
#[must_use]
pub struct Iter<'a, T: Dual>(hash_map::Values<'a, T::Key, Weighted<T>>);
/// Iterator returned by [`HybridSet::into_iter`]
#[must_use]
pub struct IntoIter<T: Dual>(hash_map::IntoValues<T::Key, Weighted<T>>);

impl<'a, T: Dual> Iterator for Keys<'a, T> {
    type Item = &'a T::Key;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, T: Dual> Iterator for Iter<'a, T> {
    type Item = (&'a T, Multiplicity);
    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|entry| (&entry.value, entry.multiplicity))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T: Dual> Iterator for IntoIter<T> {
    type Item = (T, Multiplicity);
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|entry| (entry.value, entry.multiplicity))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T: Dual, S> IntoIterator for HybridSet<T, S> {
    type Item = (T, Multiplicity);
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.entries.into_values())
    }
}

impl<'a, T: Dual, S> IntoIterator for &'a HybridSet<T, S> {
    type Item = (&'a T, Multiplicity);
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
