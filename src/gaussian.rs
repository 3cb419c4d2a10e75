//! Normal (Gaussian) distribution fitted to observations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::{check_observations, Distribution};
use crate::error::{Error, Result};
use crate::{special, stats};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Mathematical Definition
/// - PDF: φ(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
/// - Sum of independent normals: N(μ₁+μ₂, σ₁²+σ₂²)
///
/// The parameters are either given directly or estimated from loaded
/// observations with [`Gaussian::replace_stats_with_data`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GaussianRepr"))]
pub struct Gaussian {
    mean: f64,
    stdev: f64,
    data: Vec<f64>,
}

/// Deserialized form, validated through [`Gaussian::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GaussianRepr {
    mean: f64,
    stdev: f64,
    #[serde(default)]
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<GaussianRepr> for Gaussian {
    type Error = Error;

    fn try_from(repr: GaussianRepr) -> Result<Self> {
        let mut g = Gaussian::new(repr.mean, repr.stdev)?;
        g.data = repr.data;
        Ok(g)
    }
}

impl Gaussian {
    /// Creates a normal distribution with the given mean and standard
    /// deviation. `stdev == 0` is allowed (a point mass) but such an
    /// instance has no density.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`] if either value is not finite
    /// or `stdev < 0`.
    pub fn new(mean: f64, stdev: f64) -> Result<Self> {
        if !mean.is_finite() || !stdev.is_finite() || stdev < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "Gaussian requires finite μ and σ ≥ 0, got μ={mean}, σ={stdev}"
            )));
        }
        Ok(Self {
            mean,
            stdev,
            data: Vec::new(),
        })
    }

    /// Population mean of the loaded observations.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if no observations are loaded and
    /// [`Error::Domain`] if one of them is not finite.
    pub fn calculate_mean(&self) -> Result<f64> {
        check_observations(&self.data)?;
        stats::mean(&self.data)
            .ok_or_else(|| Error::DivisionByZero("mean of an empty data set".into()))
    }

    /// Standard deviation of the loaded observations, dividing the sum of
    /// squared deviations by `n − 1` when `sample` is set and by `n`
    /// otherwise.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if there are no observations, or only one
    /// with `sample` set. [`Error::Domain`] if one of them is not finite.
    pub fn calculate_stdev(&self, sample: bool) -> Result<f64> {
        check_observations(&self.data)?;
        if sample {
            stats::std_dev(&self.data).ok_or_else(|| {
                Error::DivisionByZero(format!(
                    "sample standard deviation needs at least 2 observations, got {}",
                    self.data.len()
                ))
            })
        } else {
            stats::population_std_dev(&self.data).ok_or_else(|| {
                Error::DivisionByZero("standard deviation of an empty data set".into())
            })
        }
    }

    /// Re-estimates μ and σ from the loaded observations and stores them.
    ///
    /// Returns the new `(mean, stdev)`. Nothing is changed on error.
    pub fn replace_stats_with_data(&mut self, sample: bool) -> Result<(f64, f64)> {
        let mean = self.calculate_mean()?;
        let stdev = self.calculate_stdev(sample)?;
        self.mean = mean;
        self.stdev = stdev;
        log::debug!(
            "gaussian fitted to {} observations: mean={mean}, stdev={stdev}",
            self.data.len()
        );
        Ok((mean, stdev))
    }

    /// Density at `x` under the stored μ and σ.
    ///
    /// # Errors
    /// [`Error::DivisionByZero`] if the stored σ is zero.
    pub fn pdf(&self, x: f64) -> Result<f64> {
        if self.stdev == 0.0 {
            return Err(Error::DivisionByZero(
                "Gaussian density with zero standard deviation".into(),
            ));
        }
        let z = (x - self.mean) / self.stdev;
        Ok(special::standard_normal_pdf(z) / self.stdev)
    }

    /// Distribution of the sum of two independent normal variables.
    ///
    /// The result carries no observations.
    pub fn combine(&self, other: &Gaussian) -> Gaussian {
        Gaussian {
            mean: self.mean + other.mean,
            stdev: self.stdev.hypot(other.stdev),
            data: Vec::new(),
        }
    }
}

impl Distribution for Gaussian {
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

impl fmt::Display for Gaussian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mean {}, standard deviation {}", self.mean, self.stdev)
    }
}
