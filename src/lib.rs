//! # distkit
//!
//! Gaussian, Binomial and Poisson distributions as plain value types.
//!
//! Each distribution stores a current mean and standard deviation together
//! with the observations it was fitted to. Parameters can be given directly
//! or re-estimated from a line-delimited numeric file, and two
//! distributions of the same family can be combined into the distribution
//! of their sum.
//!
//! ## Modules
//!
//! - [`stats`] — Descriptive statistics with numerical stability guarantees
//! - [`special`] — Normal density, log-gamma and log-factorial
//! - [`io`] — Parsing observations from text sources
//! - [`distribution`] — The [`Distribution`] trait shared by all families
//! - [`gaussian`], [`binomial`], [`poisson`] — The distribution families
//!
//! ## Example
//!
//! ```
//! use distkit::{Binomial, Distribution};
//!
//! let mut coin = Binomial::new(0.5, 20)?;
//! coin.load_data("0\n1\n1\n0\n1\n".as_bytes())?;
//! let (p, n) = coin.replace_stats_with_data()?;
//! assert!((p - 0.6).abs() < 1e-12);
//! assert_eq!(n, 5);
//!
//! let doubled = coin.combine(&coin)?;
//! assert_eq!(doubled.n(), 10);
//! # Ok::<(), distkit::Error>(())
//! ```
//!
//! ## Feature flags
//!
//! - `serde` — `Serialize`/`Deserialize` for [`Gaussian`], [`Binomial`]
//!   and [`Poisson`].

pub mod binomial;
pub mod distribution;
pub mod error;
pub mod gaussian;
pub mod io;
pub mod poisson;
pub mod special;
pub mod stats;

pub use binomial::Binomial;
pub use distribution::Distribution;
pub use error::{Error, Result};
pub use gaussian::Gaussian;
pub use poisson::Poisson;
