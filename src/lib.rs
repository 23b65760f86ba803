//! # noise-priors
//!
//! Bayesian priors for the observation-noise variance of time-series state-space models.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error_models`] | Homoscedastic and AR(1) stochastic-volatility variance priors. |
//! | [`trace`] | Explicit model trace: named sample/deterministic sites, conditioning, scan. |
//! | [`distributions`] | Gamma, InverseGamma, Beta and Normal priors with sampling and log densities. |
//! | [`traits`] | `ErrorModelExt` and `DistributionExt`. |
//!
//! ```rust
//! use noise_priors::trace::Trace;
//! use noise_priors::error_models::stochastic_volatility;
//!
//! let mut trace = Trace::seeded(42);
//! let sigma2 = stochastic_volatility(&mut trace, 5)?;
//! assert_eq!(sigma2.len(), 5);
//! ```
//!
//! Posterior inference is left to the caller: [`Trace::log_joint`](trace::Trace::log_joint)
//! and [`ErrorModelExt::log_density`](traits::ErrorModelExt::log_density) expose the model
//! density an external sampler needs.
pub mod distributions;
pub mod error_models;
pub mod trace;
pub mod traits;

pub use error_models::homoscedastic;
pub use error_models::stochastic_volatility;
pub use trace::Trace;
pub use traits::DistributionExt;
pub use traits::ErrorModelExt;
