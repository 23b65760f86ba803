//! # Error Models
//!
//! $$
//! y_t = \text{signal}_t + \varepsilon_t,\qquad \varepsilon_t\sim\mathcal N(0,\sigma^2_t)
//! $$
//!
//! | Model | Variance | Sites |
//! |-------|----------|-------|
//! | [`Homoscedastic`] | constant `sigma2` | `C_0`, `sigma2` |
//! | [`StochasticVolatility`] | `sigma2_t = exp(h_t)` | `sv_phi`, `sv_sigma2_eta`, `sv_mu`, `h_0`, `h_t[i]`, `sigma2` |
//!
//! Both are leaf models: call them from a larger state-space model with the same [`Trace`]
//! to obtain the observation-noise variance.
//!
//! [`Trace`]: crate::trace::Trace
pub mod homoscedastic;
pub mod stochastic_volatility;

pub use homoscedastic::homoscedastic;
pub use homoscedastic::Homoscedastic;
pub use homoscedastic::HomoscedasticHyper;
pub use stochastic_volatility::stationary_variance;
pub use stochastic_volatility::stochastic_volatility;
pub use stochastic_volatility::StochasticVolatility;
pub use stochastic_volatility::StochasticVolatilityHyper;
