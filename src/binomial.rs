//! Binomial distribution fitted to 0/1 trial outcomes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::special;

/// Binomial distribution B(n, p).
///
/// # Mathematical Definition
/// - PMF: P(k) = C(n,k)·pᵏ·(1−p)ⁿ⁻ᵏ for k ∈ {0, …, n}
/// - Mean: n·p
/// - Variance: n·p·(1−p)
///
/// Observations are trial outcomes and must be exactly `0` or `1`.
/// The stored mean and standard deviation always follow `n` and `p`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BinomialRepr"))]
pub struct Binomial {
    p: f64,
    n: u64,
    mean: f64,
    stdev: f64,
    data: Vec<f64>,
}

/// Deserialized form; mean and standard deviation are recomputed from
/// `p` and `n`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct BinomialRepr {
    p: f64,
    n: u64,
    #[serde(default)]
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<BinomialRepr> for Binomial {
    type Error = Error;

    fn try_from(repr: BinomialRepr) -> Result<Self> {
        let mut b = Binomial::new(repr.p, repr.n)?;
        b.data = repr.data;
        Ok(b)
    }
}

impl Binomial {
    /// Creates `B(n, p)`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`] if `p` is not finite or lies
    /// outside `[0, 1]`.
    pub fn new(p: f64, n: u64) -> Result<Self> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidParameters(format!(
                "Binomial requires p in [0, 1], got p={p}"
            )));
        }
        Ok(Self::from_parts(p, n))
    }

    fn from_parts(p: f64, n: u64) -> Self {
        let mut b = Self {
            p,
            n,
            mean: 0.0,
            stdev: 0.0,
            data: Vec::new(),
        };
        b.mean = b.calculate_mean();
        b.stdev = b.calculate_stdev();
        b
    }

    /// Success probability of a single trial.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Number of trials.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// n·p
    pub fn calculate_mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    /// √(n·p·(1−p))
    pub fn calculate_stdev(&self) -> f64 {
        (self.n as f64 * self.p * (1.0 - self.p)).sqrt()
    }

    /// Re-estimates `p` and `n` from the loaded trial outcomes:
    /// `n` is the number of observations and `p` the fraction equal to 1.
    ///
    /// Returns the new `(p, n)`. Nothing is changed on error.
    ///
    /// # Errors
    /// - [`Error::DivisionByZero`] if no observations are loaded.
    /// - [`Error::Domain`] if an observation is neither 0 nor 1.
    pub fn replace_stats_with_data(&mut self) -> Result<(f64, u64)> {
        if self.data.is_empty() {
            return Err(Error::DivisionByZero(
                "cannot estimate p from an empty data set".into(),
            ));
        }
        if let Some((idx, bad)) = self
            .data
            .iter()
            .enumerate()
            .find(|&(_, &x)| x != 0.0 && x != 1.0)
        {
            return Err(Error::Domain(format!(
                "binomial observations must be 0 or 1, got {bad} at index {idx}"
            )));
        }

        let (_, ones) = self.outcome_counts();
        self.n = self.data.len() as u64;
        self.p = ones as f64 / self.n as f64;
        self.mean = self.calculate_mean();
        self.stdev = self.calculate_stdev();
        log::debug!(
            "binomial fitted to {} trials: p={}, mean={}, stdev={}",
            self.n,
            self.p,
            self.mean,
            self.stdev
        );
        Ok((self.p, self.n))
    }

    /// Number of `0` and `1` outcomes among the loaded observations.
    ///
    /// Other values are counted in neither bucket.
    pub fn outcome_counts(&self) -> (usize, usize) {
        self.data.iter().fold((0, 0), |(zeros, ones), &x| {
            if x == 0.0 {
                (zeros + 1, ones)
            } else if x == 1.0 {
                (zeros, ones + 1)
            } else {
                (zeros, ones)
            }
        })
    }

    /// Probability of exactly `k` successes in `n` trials.
    ///
    /// Evaluated in log space so large `n` does not overflow.
    ///
    /// # Errors
    /// [`Error::Domain`] if `k > n`.
    pub fn pdf(&self, k: u64) -> Result<f64> {
        if k > self.n {
            return Err(Error::Domain(format!(
                "k must be in [0, {}], got k={k}",
                self.n
            )));
        }

        // p = 0 and p = 1 put all mass on a single outcome.
        if self.p == 0.0 {
            return Ok(if k == 0 { 1.0 } else { 0.0 });
        }
        if self.p == 1.0 {
            return Ok(if k == self.n { 1.0 } else { 0.0 });
        }

        let kf = k as f64;
        let nf = self.n as f64;
        let ln_pmf =
            special::ln_choose(self.n, k) + kf * self.p.ln() + (nf - kf) * (-self.p).ln_1p();
        Ok(ln_pmf.exp())
    }

    /// Distribution of the sum of two independent binomial variables.
    ///
    /// The result carries no observations.
    ///
    /// # Errors
    /// - [`Error::Precondition`] unless both have exactly the same `p`.
    /// - [`Error::InvalidParameters`] if the total trial count overflows.
    pub fn combine(&self, other: &Binomial) -> Result<Binomial> {
        if self.p != other.p {
            return Err(Error::Precondition("p values are not equal".into()));
        }
        let n = self.n.checked_add(other.n).ok_or_else(|| {
            Error::InvalidParameters(format!(
                "combined trial count overflows: {} + {}",
                self.n, other.n
            ))
        })?;
        Ok(Self::from_parts(self.p, n))
    }
}

impl Distribution for Binomial {
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

impl fmt::Display for Binomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean {}, standard deviation {}, p {}, n {}",
            self.mean, self.stdev, self.p, self.n
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_moments() {
        let b = Binomial::new(0.4, 25).unwrap();
        assert!((b.mean() - 10.0).abs() < 1e-12);
        assert!((b.stdev() - 6.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(b.calculate_mean(), b.mean());
        assert_eq!(b.calculate_stdev(), b.stdev());
    }

    #[test]
    fn test_new_invalid() {
        assert!(Binomial::new(-0.1, 5).is_err());
        assert!(Binomial::new(1.5, 5).is_err());
        assert!(Binomial::new(f64::NAN, 5).is_err());
        assert!(Binomial::new(0.0, 0).is_ok());
        assert!(Binomial::new(1.0, 3).is_ok());
    }

    #[test]
    fn test_replace_stats_with_data() {
        let mut b = Binomial::new(0.5, 20).unwrap();
        b.set_data(vec![0.0, 1.0, 1.0, 0.0, 1.0]);
        let (p, n) = b.replace_stats_with_data().unwrap();
        assert!((p - 0.6).abs() < 1e-15);
        assert_eq!(n, 5);
        assert_eq!(b.n(), 5);
        assert!((b.mean() - 3.0).abs() < 1e-12);
        assert!((b.stdev() - 1.2_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_replace_stats_empty() {
        let mut b = Binomial::new(0.5, 20).unwrap();
        assert!(matches!(
            b.replace_stats_with_data(),
            Err(Error::DivisionByZero(_))
        ));
        assert_eq!(b.n(), 20);
    }

    #[test]
    fn test_replace_stats_rejects_non_binary() {
        let mut b = Binomial::new(0.5, 20).unwrap();
        b.set_data(vec![0.0, 1.0, 2.0]);
        assert!(matches!(b.replace_stats_with_data(), Err(Error::Domain(_))));
        assert_eq!(b.p(), 0.5);
        assert_eq!(b.n(), 20);
    }

    #[test]
    fn test_outcome_counts() {
        let mut b = Binomial::new(0.5, 0).unwrap();
        b.set_data(vec![1.0, 0.0, 1.0, 1.0, 0.5]);
        assert_eq!(b.outcome_counts(), (1, 3));
    }

    #[test]
    fn test_pdf_known_values() {
        let b = Binomial::new(0.4, 20).unwrap();
        assert!((b.pdf(5).unwrap() - 0.0746470195).abs() < 1e-9);
        assert!((b.pdf(3).unwrap() - 0.0123496907).abs() < 1e-9);

        let fair = Binomial::new(0.5, 4).unwrap();
        assert!((fair.pdf(2).unwrap() - 0.375).abs() < 1e-14);
        assert!((fair.pdf(0).unwrap() - 0.0625).abs() < 1e-14);
    }

    #[test]
    fn test_pdf_edges() {
        let never = Binomial::new(0.0, 5).unwrap();
        assert_eq!(never.pdf(0).unwrap(), 1.0);
        assert_eq!(never.pdf(1).unwrap(), 0.0);

        let always = Binomial::new(1.0, 5).unwrap();
        assert_eq!(always.pdf(5).unwrap(), 1.0);
        assert_eq!(always.pdf(4).unwrap(), 0.0);

        let empty = Binomial::new(0.3, 0).unwrap();
        assert!((empty.pdf(0).unwrap() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_pdf_out_of_range() {
        let b = Binomial::new(0.5, 3).unwrap();
        assert!(matches!(b.pdf(4), Err(Error::Domain(_))));
    }

    #[test]
    fn test_pdf_large_n_finite() {
        let b = Binomial::new(0.5, 10_000).unwrap();
        let at_mean = b.pdf(5_000).unwrap();
        assert!(at_mean.is_finite() && at_mean > 0.0);
        // Normal approximation: 1/√(2π·npq)
        let approx = 1.0 / (2.0 * std::f64::consts::PI * 2_500.0).sqrt();
        assert!((at_mean - approx).abs() / approx < 1e-3);
    }

    #[test]
    fn test_combine() {
        let a = Binomial::new(0.4, 20).unwrap();
        let b = Binomial::new(0.4, 60).unwrap();
        let c = a.combine(&b).unwrap();
        assert_eq!(c.n(), 80);
        assert_eq!(c.p(), 0.4);
        assert!((c.mean() - 32.0).abs() < 1e-12);
        assert!((c.stdev() - 19.2_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_combine_unequal_p() {
        let a = Binomial::new(0.3, 10).unwrap();
        let b = Binomial::new(0.5, 5).unwrap();
        let err = a.combine(&b).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert_eq!(err.to_string(), "precondition failed: p values are not equal");
    }

    #[test]
    fn test_combine_trial_count_overflow() {
        let huge = Binomial::new(0.5, u64::MAX).unwrap();
        assert!(matches!(
            huge.combine(&huge),
            Err(Error::InvalidParameters(_))
        ));
        let one = Binomial::new(0.5, 1).unwrap();
        assert!(huge.combine(&one).is_err());
        let edge = Binomial::new(0.5, u64::MAX - 1).unwrap();
        assert_eq!(edge.combine(&one).unwrap().n(), u64::MAX);
    }

    #[test]
    fn test_combine_with_itself() {
        let b = Binomial::new(0.5, 20).unwrap();
        let c = b.combine(&b).unwrap();
        assert_eq!(c.n(), 40);
        assert_eq!(c.p(), 0.5);
        assert_eq!(b.n(), 20);
    }

    #[test]
    fn test_summary() {
        let b = Binomial::new(0.5, 20).unwrap();
        assert_eq!(
            b.summary(),
            format!("mean 10, standard deviation {}, p 0.5, n 20", 5.0_f64.sqrt())
        );
    }
}
