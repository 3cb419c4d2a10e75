//! The capability set shared by every distribution family.
//!
//! A distribution is a value holding a current mean, a current standard
//! deviation and the observations it was (or will be) fitted to. The stored
//! statistics are only changed by explicit calls; loading new observations
//! leaves them untouched until the family's `replace_stats_with_data` runs.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io;

/// Common interface of [`Gaussian`](crate::Gaussian),
/// [`Binomial`](crate::Binomial) and [`Poisson`](crate::Poisson).
///
/// The trait is object safe; the generic loaders are only available on
/// concrete types.
pub trait Distribution: fmt::Display {
    /// Currently stored mean.
    fn mean(&self) -> f64;

    /// Currently stored standard deviation.
    fn stdev(&self) -> f64;

    /// Loaded observations, in source order.
    fn data(&self) -> &[f64];

    /// Replaces the observations. Stored statistics are not recomputed.
    fn set_data(&mut self, data: Vec<f64>);

    /// Human-readable rendering of the stored parameters.
    fn summary(&self) -> String {
        self.to_string()
    }

    /// Replaces the observations with the numbers read from `reader`,
    /// one per line.
    ///
    /// # Errors
    /// [`Error::Io`](crate::Error::Io) if reading fails and
    /// [`Error::Parse`](crate::Error::Parse) on a non-numeric line. On
    /// error the previous observations are kept.
    fn load_data<R: BufRead>(&mut self, reader: R) -> Result<()>
    where
        Self: Sized,
    {
        let data = io::read_observations(reader)?;
        self.set_data(data);
        Ok(())
    }

    /// Replaces the observations with the contents of the file at `path`.
    ///
    /// # Errors
    /// Same as [`load_data`](Distribution::load_data), plus
    /// [`Error::Io`](crate::Error::Io) when the file cannot be opened.
    fn read_data_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()>
    where
        Self: Sized,
    {
        let data = io::read_observations_file(path)?;
        self.set_data(data);
        Ok(())
    }
}

/// Rejects observation sets that no statistic can be computed from.
///
/// Empty data is a [`Error::DivisionByZero`]; a NaN or infinite value
/// (possible through [`Distribution::set_data`]) is an [`Error::Domain`].
pub(crate) fn check_observations(data: &[f64]) -> Result<()> {
    if data.is_empty() {
        return Err(Error::DivisionByZero("empty data set".into()));
    }
    if let Some((idx, bad)) = data.iter().enumerate().find(|&(_, x)| !x.is_finite()) {
        return Err(Error::Domain(format!(
            "observations must be finite, got {bad} at index {idx}"
        )));
    }
    Ok(())
}
