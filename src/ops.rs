use std::{
    hash::BuildHasher,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use log::trace;

use crate::{
    error::Result,
    hash::{or_panic, overflow},
    Dual, HybridSet, Multiplicity,
};

impl<T, S> HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    /// Add the multiplicities of two sets element by element
    pub fn try_sum(&self, other: &Self) -> Result<Self> {
        let mut total = self.clone();
        for (value, multiplicity) in other {
            total.try_insert_n(value.clone(), multiplicity)?;
        }
        Ok(total)
    }
    #[must_use]
    #[track_caller]
    pub fn sum(&self, other: &Self) -> Self {
        or_panic(self.try_sum(other))
    }
    /// Multiply every multiplicity by `factor`
    ///
    /// Scaling by zero gives the empty set.
    pub fn try_scale(&self, factor: Multiplicity) -> Result<Self> {
        if factor == 0 {
            trace!("scaling by zero discards {} entries", self.len());
            return Ok(Self::with_hasher(self.hasher().clone()));
        }
        let mut scaled = Self::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (value, multiplicity) in self {
            let product = multiplicity.checked_mul(factor).ok_or_else(overflow)?;
            scaled.try_insert_n(value.clone(), product)?;
        }
        Ok(scaled)
    }
    #[must_use]
    #[track_caller]
    pub fn scale(&self, factor: Multiplicity) -> Self {
        or_panic(self.try_scale(factor))
    }
    /// Subtract the multiplicities of `other` element by element
    pub fn try_difference(&self, other: &Self) -> Result<Self> {
        self.try_sum(&other.try_negation()?)
    }
    #[must_use]
    #[track_caller]
    pub fn difference(&self, other: &Self) -> Self {
        or_panic(self.try_difference(other))
    }
    /// Flip the sign of every multiplicity
    pub fn try_negation(&self) -> Result<Self> {
        self.try_scale(-1)
    }
    #[must_use]
    #[track_caller]
    pub fn negation(&self) -> Self {
        or_panic(self.try_negation())
    }
}

impl<T, S> Add<&HybridSet<T, S>> for &HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn add(self, rhs: &HybridSet<T, S>) -> Self::Output {
        self.sum(rhs)
    }
}

impl<T, S> Add for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn add(self, rhs: HybridSet<T, S>) -> Self::Output {
        self.sum(&rhs)
    }
}

impl<T, S> AddAssign<&HybridSet<T, S>> for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    #[track_caller]
    fn add_assign(&mut self, rhs: &HybridSet<T, S>) {
        *self = self.sum(rhs);
    }
}

impl<T, S> AddAssign for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    #[track_caller]
    fn add_assign(&mut self, rhs: HybridSet<T, S>) {
        *self += &rhs;
    }
}

impl<T, S> Sub<&HybridSet<T, S>> for &HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn sub(self, rhs: &HybridSet<T, S>) -> Self::Output {
        self.difference(rhs)
    }
}

impl<T, S> Sub for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn sub(self, rhs: HybridSet<T, S>) -> Self::Output {
        self.difference(&rhs)
    }
}

impl<T, S> SubAssign<&HybridSet<T, S>> for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    #[track_caller]
    fn sub_assign(&mut self, rhs: &HybridSet<T, S>) {
        *self = self.difference(rhs);
    }
}

impl<T, S> SubAssign for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    #[track_caller]
    fn sub_assign(&mut self, rhs: HybridSet<T, S>) {
        *self -= &rhs;
    }
}

impl<T, S> Mul<Multiplicity> for &HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn mul(self, rhs: Multiplicity) -> Self::Output {
        self.scale(rhs)
    }
}

impl<T, S> Mul<Multiplicity> for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn mul(self, rhs: Multiplicity) -> Self::Output {
        self.scale(rhs)
    }
}

impl<T, S> MulAssign<Multiplicity> for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    #[track_caller]
    fn mul_assign(&mut self, rhs: Multiplicity) {
        *self = self.scale(rhs);
    }
}

impl<T, S> Neg for &HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn neg(self) -> Self::Output {
        self.negation()
    }
}

impl<T, S> Neg for HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    type Output = HybridSet<T, S>;
    #[track_caller]
    fn neg(self) -> Self::Output {
        self.negation()
    }
}
