//! Probabilistic acquaintance links between pairs of users.
//!
//! Links are unordered: `(a, b)` and `(b, a)` name the same entry. The table
//! is independent of [`crate::ConnectionGraph`]; a user can appear in either
//! store, both, or neither.

use std::{collections::BTreeMap, fmt, num::NonZeroUsize};

use tracing::{trace, warn};

use crate::{
    error::{KindredError, Result},
    random::UniformSource,
};

/// A likelihood of connection, guaranteed to lie in `[0, 1]`.
///
/// # Examples
/// ```
/// use kindred_core::Probability;
///
/// assert_eq!(Probability::new(0.7)?.get(), 0.7);
/// assert!(Probability::new(1.5).is_err());
/// assert!(Probability::new(f64::NAN).is_err());
/// # Ok::<(), kindred_core::KindredError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    /// The probability of a pair with no recorded link.
    pub const ZERO: Self = Self(0.0);

    /// Validates `value` as a probability.
    ///
    /// # Errors
    /// Returns [`KindredError::InvalidProbability`] when `value` is NaN or
    /// outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(KindredError::InvalidProbability { value })
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Probability {
    type Error = KindredError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Outcome of repeated independent connectivity trials for one pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectivityEstimate {
    trials: NonZeroUsize,
    successes: usize,
    probability: Probability,
}

impl ConnectivityEstimate {
    /// Returns how many trials were drawn.
    #[must_use]
    pub const fn trials(&self) -> NonZeroUsize {
        self.trials
    }

    /// Returns how many trials reported a connection.
    #[must_use]
    pub const fn successes(&self) -> usize {
        self.successes
    }

    /// Returns the stored probability the trials were drawn against.
    #[must_use]
    pub const fn probability(&self) -> Probability {
        self.probability
    }

    /// Returns the observed fraction of successful trials.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        self.successes as f64 / self.trials.get() as f64
    }
}

/// Symmetric table of probabilistic links keyed by unordered user pairs.
///
/// Entries are stored once under `(lower, higher)`; later writes for the same
/// pair replace earlier ones.
///
/// # Examples
/// ```
/// use kindred_core::{ProbabilisticLinkTable, ScriptedSource};
///
/// let mut links = ProbabilisticLinkTable::new();
/// links.set_probability("x", "y", 0.7)?;
/// assert_eq!(links.get_probability(&"y", &"x"), 0.7);
/// assert_eq!(links.get_probability(&"x", &"z"), 0.0);
///
/// let mut source = ScriptedSource::new([0.5, 0.9])?;
/// assert!(links.sample_connected(&"x", &"y", &mut source));
/// assert!(!links.sample_connected(&"x", &"y", &mut source));
/// # Ok::<(), kindred_core::KindredError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilisticLinkTable<V> {
    probabilities: BTreeMap<V, BTreeMap<V, Probability>>,
}

impl<V> Default for ProbabilisticLinkTable<V> {
    fn default() -> Self {
        Self {
            probabilities: BTreeMap::new(),
        }
    }
}

impl<V> ProbabilisticLinkTable<V> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            probabilities: BTreeMap::new(),
        }
    }

    /// Returns the number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.values().map(BTreeMap::len).sum()
    }

    /// Returns whether no pair has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Iterates stored pairs as `(lower, higher, probability)` in ascending
    /// order.
    pub fn links(&self) -> impl Iterator<Item = (&V, &V, Probability)> {
        self.probabilities.iter().flat_map(|(lower, row)| {
            row.iter()
                .map(move |(higher, probability)| (lower, higher, *probability))
        })
    }
}

impl<V: Ord + fmt::Debug> ProbabilisticLinkTable<V> {
    /// Records `probability` for the unordered pair `(left, right)`,
    /// replacing any earlier value.
    ///
    /// # Errors
    /// Returns [`KindredError::InvalidProbability`] when `probability` is NaN or
    /// outside `[0, 1]`, and [`KindredError::InvalidEdge`] when
    /// `left == right`. The table is unchanged on error.
    pub fn set_probability(&mut self, left: V, right: V, probability: f64) -> Result<()> {
        let validated = Probability::new(probability).inspect_err(|_| {
            warn!(left = ?left, right = ?right, probability, "rejected probability");
        })?;
        if left == right {
            return Err(KindredError::self_loop(&left));
        }
        trace!(left = ?left, right = ?right, probability, "recording link");
        let (lower, higher) = ordered(left, right);
        self.probabilities
            .entry(lower)
            .or_default()
            .insert(higher, validated);
        Ok(())
    }

    /// Returns the stored probability for the pair, or `0.0` when the pair has
    /// no entry.
    #[must_use]
    pub fn get_probability(&self, left: &V, right: &V) -> f64 {
        self.probability(left, right).get()
    }

    /// Returns the stored [`Probability`] for the pair, or
    /// [`Probability::ZERO`].
    #[must_use]
    pub fn probability(&self, left: &V, right: &V) -> Probability {
        let (lower, higher) = ordered(left, right);
        self.probabilities
            .get(lower)
            .and_then(|row| row.get(higher))
            .copied()
            .unwrap_or(Probability::ZERO)
    }

    /// Runs one Bernoulli trial for the pair: draws `r` from `source` and
    /// reports whether `r` is below the stored probability.
    ///
    /// Every call draws exactly once and is independent of earlier calls.
    pub fn sample_connected<S: UniformSource + ?Sized>(
        &self,
        left: &V,
        right: &V,
        source: &mut S,
    ) -> bool {
        let draw = source.next_unit();
        draw < self.get_probability(left, right)
    }

    /// Runs `trials` independent [`Self::sample_connected`] draws and reports
    /// the tally.
    ///
    /// # Errors
    /// Returns [`KindredError::InvalidTrialCount`] when `trials` is zero.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::{ProbabilisticLinkTable, RngSource};
    ///
    /// let mut links = ProbabilisticLinkTable::new();
    /// links.set_probability(1, 2, 1.0)?;
    /// let estimate = links.estimate_connectivity(&2, &1, 50, &mut RngSource::seeded(3))?;
    /// assert_eq!(estimate.successes(), 50);
    /// # Ok::<(), kindred_core::KindredError>(())
    /// ```
    pub fn estimate_connectivity<S: UniformSource + ?Sized>(
        &self,
        left: &V,
        right: &V,
        trials: usize,
        source: &mut S,
    ) -> Result<ConnectivityEstimate> {
        let rounds = NonZeroUsize::new(trials).ok_or(KindredError::InvalidTrialCount)?;
        let probability = self.probability(left, right);
        let successes = (0..rounds.get())
            .filter(|_| source.next_unit() < probability.get())
            .count();
        Ok(ConnectivityEstimate {
            trials: rounds,
            successes,
            probability,
        })
    }
}

fn ordered<T: Ord>(left: T, right: T) -> (T, T) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}
