//! Exact combinatorial primitives over [`BigUint`], each backed by a memo table.

use std::hash::Hash;
use std::sync::LazyLock;

use im::OrdSet;
use num_bigint::BigUint;

use crate::cache::MemoCache;

/// Memoized factorials and binomial coefficients.
#[derive(Default)]
pub struct Combinatorics {
    factorials: MemoCache<usize, BigUint>,
    binomials: MemoCache<(usize, usize), BigUint>,
}

impl Combinatorics {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n!`, with `0! = 1! = 1`.
    pub fn factorial(&self, n: usize) -> BigUint {
        if n <= 1 {
            return BigUint::from(1u32);
        }
        self.factorials
            .get_or_insert_with(n, || self.factorial(n - 1) * BigUint::from(n))
    }

    /// `n! / ((n - k)! k!)`, or 0 when `k > n`.
    pub fn binomial(&self, n: usize, k: usize) -> BigUint {
        if k > n {
            return BigUint::ZERO;
        }
        self.binomials.get_or_insert_with((n, k), || {
            self.factorial(n) / (self.factorial(n - k) * self.factorial(k))
        })
    }

    pub fn factorial_cache(&self) -> &MemoCache<usize, BigUint> {
        &self.factorials
    }

    pub fn binomial_cache(&self) -> &MemoCache<(usize, usize), BigUint> {
        &self.binomials
    }
}

static SHARED: LazyLock<Combinatorics> = LazyLock::new(Combinatorics::new);

/// `n!` through the process-wide memo tables.
pub fn factorial(n: usize) -> BigUint {
    SHARED.factorial(n)
}

/// `C(n, k)` through the process-wide memo tables.
pub fn binomial(n: usize, k: usize) -> BigUint {
    SHARED.binomial(n, k)
}

/// Memoized power sets of sets of `T`.
pub struct Subsets<T: Ord + Clone> {
    cache: MemoCache<OrdSet<T>, OrdSet<OrdSet<T>>>,
}

impl<T: Ord + Clone> Default for Subsets<T> {
    fn default() -> Self {
        Self {
            cache: MemoCache::new(),
        }
    }
}

impl<T: Ord + Clone + Hash> Subsets<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The power set of `set`, the empty set and `set` itself included.
    ///
    /// Built by folding over the elements: each step keeps every subset found
    /// so far and adds a copy of it extended with the new element.
    pub fn subsets(&self, set: &OrdSet<T>) -> OrdSet<OrdSet<T>> {
        self.cache.get_or_insert_with(set.clone(), || {
            set.iter()
                .fold(OrdSet::unit(OrdSet::new()), |acc, element| {
                    let extended: OrdSet<OrdSet<T>> = acc
                        .iter()
                        .map(|subset| subset.update(element.clone()))
                        .collect();
                    acc.union(extended)
                })
        })
    }

    pub fn cache(&self) -> &MemoCache<OrdSet<T>, OrdSet<OrdSet<T>>> {
        &self.cache
    }
}

/// The power set of `set`, without a persistent memo table.
pub fn subsets<T: Ord + Clone + Hash>(set: &OrdSet<T>) -> OrdSet<OrdSet<T>> {
    Subsets::new().subsets(set)
}
