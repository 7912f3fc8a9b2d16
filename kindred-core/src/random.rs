//! Uniform random sources injected into probabilistic link sampling.
//!
//! The link table never owns randomness; callers pass a [`UniformSource`] so
//! sampling can be driven by a seeded generator in tests and reproducible
//! runs, or by a scripted sequence when exact draws matter.

use rand::{Rng, SeedableRng, distributions::Standard, rngs::SmallRng};

use crate::error::{KindredError, Result};

/// Supplier of independent draws from the half-open interval `[0, 1)`.
pub trait UniformSource {
    /// Returns the next draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapts any [`rand::Rng`] into a [`UniformSource`].
///
/// # Examples
/// ```
/// use kindred_core::{RngSource, UniformSource};
///
/// let mut first = RngSource::seeded(7);
/// let mut second = RngSource::seeded(7);
/// let draw = first.next_unit();
/// assert!((0.0..1.0).contains(&draw));
/// assert_eq!(draw.to_bits(), second.next_unit().to_bits());
/// ```
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<SmallRng> {
    /// Builds a small, fast generator from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.sample(Standard)
    }
}

/// Replays a fixed, non-empty cycle of draws.
///
/// # Examples
/// ```
/// use kindred_core::{ScriptedSource, UniformSource};
///
/// let mut source = ScriptedSource::new([0.25, 0.75])?;
/// assert_eq!(source.next_unit(), 0.25);
/// assert_eq!(source.next_unit(), 0.75);
/// assert_eq!(source.next_unit(), 0.25);
/// # Ok::<(), kindred_core::KindredError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a source that cycles through `draws` in order.
    ///
    /// # Errors
    /// Returns [`KindredError::EmptyScript`] when no draws are supplied and
    /// [`KindredError::InvalidDraw`] when a draw lies outside `[0, 1)`.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Result<Self> {
        let draws: Vec<f64> = draws.into_iter().collect();
        if draws.is_empty() {
            return Err(KindredError::EmptyScript);
        }
        if let Some(&value) = draws.iter().find(|value| !(0.0..1.0).contains(*value)) {
            return Err(KindredError::InvalidDraw { value });
        }
        Ok(Self { draws, cursor: 0 })
    }
}

impl UniformSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws.get(self.cursor).copied().unwrap_or_default();
        let next = self.cursor.saturating_add(1);
        self.cursor = if next >= self.draws.len() { 0 } else { next };
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::KindredErrorCode;

    #[rstest]
    fn seeded_sources_stay_in_unit_interval() {
        let mut source = RngSource::seeded(42);
        for _ in 0..1_000 {
            let draw = source.next_unit();
            assert!((0.0..1.0).contains(&draw), "draw {draw} escaped [0, 1)");
        }
    }

    #[rstest]
    fn equal_seeds_replay_the_same_sequence() {
        let mut left = RngSource::seeded(9);
        let mut right = RngSource::seeded(9);
        let left_draws: Vec<u64> = (0..16).map(|_| left.next_unit().to_bits()).collect();
        let right_draws: Vec<u64> = (0..16).map(|_| right.next_unit().to_bits()).collect();
        assert_eq!(left_draws, right_draws);
    }

    #[rstest]
    #[case::empty(Vec::new(), KindredErrorCode::EmptyScript)]
    #[case::one(vec![0.5, 1.0], KindredErrorCode::InvalidDraw)]
    #[case::negative(vec![-0.1], KindredErrorCode::InvalidDraw)]
    #[case::nan(vec![f64::NAN], KindredErrorCode::InvalidDraw)]
    fn scripted_source_rejects_bad_scripts(
        #[case] draws: Vec<f64>,
        #[case] expected: KindredErrorCode,
    ) {
        let err = ScriptedSource::new(draws).expect_err("script must be rejected");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    fn scripted_source_cycles() {
        let mut source = ScriptedSource::new([0.1, 0.2, 0.3]).expect("valid script");
        let draws: Vec<f64> = (0..7).map(|_| source.next_unit()).collect();
        assert_eq!(draws, vec![0.1, 0.2, 0.3, 0.1, 0.2, 0.3, 0.1]);
    }

    #[rstest]
    fn mutable_references_forward_draws() {
        fn draw_twice(mut source: impl UniformSource) -> [f64; 2] {
            [source.next_unit(), source.next_unit()]
        }

        let mut source = ScriptedSource::new([0.4, 0.6, 0.8]).expect("valid script");
        assert_eq!(draw_twice(&mut source), [0.4, 0.6]);
        assert_eq!(source.next_unit(), 0.8);
    }
}
