//! Poisson distribution fitted to count observations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::{check_observations, Distribution};
use crate::error::{Error, Result};
use crate::{special, stats};

/// Poisson distribution with rate μ.
///
/// # Mathematical Definition
/// - PMF: P(x) = e^(−μ)·μˣ / x! for x ∈ {0, 1, 2, …}
/// - Mean = Variance = μ
/// - Sum of independent Poisson variables: Poisson(μ₁+μ₂)
///
/// The stored standard deviation is always √μ.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PoissonRepr"))]
pub struct Poisson {
    mean: f64,
    stdev: f64,
    data: Vec<f64>,
}

/// Deserialized form; the standard deviation is recomputed from the rate.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PoissonRepr {
    mean: f64,
    #[serde(default)]
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<PoissonRepr> for Poisson {
    type Error = Error;

    fn try_from(repr: PoissonRepr) -> Result<Self> {
        let mut p = Poisson::new(repr.mean)?;
        p.data = repr.data;
        Ok(p)
    }
}

impl Poisson {
    /// Creates a Poisson distribution with rate `mean`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`] unless `mean` is finite and
    /// non-negative.
    pub fn new(mean: f64) -> Result<Self> {
        if !mean.is_finite() || mean < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "Poisson requires a finite rate μ ≥ 0, got μ={mean}"
            )));
        }
        Ok(Self::with_rate(mean))
    }

    fn with_rate(mean: f64) -> Self {
        Self {
            mean,
            stdev: mean.sqrt(),
            data: Vec::new(),
        }
    }

    /// Arithmetic mean of the loaded observations.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if no observations are loaded and
    /// [`Error::Domain`] if one of them is not finite.
    pub fn calculate_mean(&self) -> Result<f64> {
        check_observations(&self.data)?;
        stats::mean(&self.data)
            .ok_or_else(|| Error::DivisionByZero("mean of an empty data set".into()))
    }

    /// √μ of the stored rate. The variance of a Poisson process equals its
    /// mean, so there is no sample/population distinction.
    pub fn calculate_stdev(&self) -> f64 {
        self.mean.sqrt()
    }

    /// Sets the rate to the mean of the loaded observations and the
    /// standard deviation to its square root.
    ///
    /// Returns the new `(mean, stdev)`. Nothing is changed on error.
    ///
    /// # Errors
    /// - [`Error::DivisionByZero`] if no observations are loaded.
    /// - [`Error::Domain`] if an observation is negative or not finite.
    pub fn replace_stats_with_data(&mut self) -> Result<(f64, f64)> {
        if let Some(bad) = self.data.iter().find(|&&x| x < 0.0) {
            return Err(Error::Domain(format!(
                "Poisson observations must be non-negative, got {bad}"
            )));
        }
        let mean = self.calculate_mean()?;
        self.mean = mean;
        self.stdev = self.calculate_stdev();
        log::debug!(
            "poisson fitted to {} observations: mean={}, stdev={}",
            self.data.len(),
            self.mean,
            self.stdev
        );
        Ok((self.mean, self.stdev))
    }

    /// Probability of exactly `x` events.
    ///
    /// Computed as `exp(x·ln μ − μ − ln x!)`, which stays finite for large `x`
    /// where `μˣ` and `x!` would overflow separately.
    pub fn pdf(&self, x: u64) -> f64 {
        if self.mean == 0.0 {
            return if x == 0 { 1.0 } else { 0.0 };
        }
        (x as f64 * self.mean.ln() - self.mean - special::ln_factorial(x)).exp()
    }

    /// Points for overlaying the mass function on a histogram of the data.
    ///
    /// Produces `n_spaces` x values starting at `min(data)` with step
    /// `(max − min) / n_spaces`, paired with the mass at `⌊x⌋` (zero below
    /// the support).
    ///
    /// # Errors
    /// - [`Error::DivisionByZero`] if no observations are loaded.
    /// - [`Error::Domain`] if `n_spaces` is zero or an observation is not
    ///   finite.
    pub fn pdf_curve(&self, n_spaces: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        if n_spaces == 0 {
            return Err(Error::Domain("n_spaces must be at least 1".into()));
        }
        check_observations(&self.data)?;
        let empty = || Error::DivisionByZero("no observations to span".into());
        let lo = stats::min(&self.data).ok_or_else(empty)?;
        let hi = stats::max(&self.data).ok_or_else(empty)?;
        let interval = (hi - lo) / n_spaces as f64;

        let xs: Vec<f64> = (0..n_spaces).map(|i| lo + interval * i as f64).collect();
        let ys = xs
            .iter()
            .map(|&x| {
                if x < 0.0 {
                    0.0
                } else {
                    self.pdf(x.floor() as u64)
                }
            })
            .collect();
        Ok((xs, ys))
    }

    /// Distribution of the sum of two independent Poisson variables.
    ///
    /// The result carries no observations.
    pub fn combine(&self, other: &Poisson) -> Poisson {
        Self::with_rate(self.mean + other.mean)
    }
}

impl Distribution for Poisson {
    fn mean(&self) -> f64 {
        self.mean
    }

    fn stdev(&self) -> f64 {
        self.stdev
    }

    fn data(&self) -> &[f64] {
        &self.data
    }

    fn set_data(&mut self, data: Vec<f64>) {
        self.data = data;
    }
}

impl fmt::Display for Poisson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mean {}, standard deviation {}", self.mean, self.stdev)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn pmf_sums_to_one(mean in 0.0_f64..50.0) {
            let p = Poisson::new(mean).unwrap();
            let upper = (mean * 3.0) as u64 + 60;
            let total: f64 = (0..=upper).map(|x| p.pdf(x)).sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "Σ pmf = {total}");
        }

        #[test]
        fn combine_commutative(a in 0.0_f64..1e4, b in 0.0_f64..1e4) {
            let pa = Poisson::new(a).unwrap();
            let pb = Poisson::new(b).unwrap();
            prop_assert_eq!(pa.combine(&pb).mean(), pb.combine(&pa).mean());
            let c = pa.combine(&pb);
            prop_assert_eq!(c.stdev(), c.mean().sqrt());
        }

        #[test]
        fn combine_associative(rates in proptest::collection::vec(0.0_f64..1e4, 3)) {
            let a = Poisson::new(rates[0]).unwrap();
            let b = Poisson::new(rates[1]).unwrap();
            let c = Poisson::new(rates[2]).unwrap();
            let left = a.combine(&b).combine(&c);
            let right = a.combine(&b.combine(&c));
            prop_assert!((left.mean() - right.mean()).abs() < 1e-9);
            prop_assert!((left.stdev() - right.stdev()).abs() < 1e-9);
        }

        #[test]
        fn pdf_is_probability(mean in 0.0_f64..1e3, x in 0_u64..5000) {
            let v = Poisson::new(mean).unwrap().pdf(x);
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }
}
