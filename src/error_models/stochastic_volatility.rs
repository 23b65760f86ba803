//! # Stochastic Volatility
//!
//! $$
//! h_t=\mu+\phi(h_{t-1}-\mu)+\eta_t,\quad \eta_t\sim\mathcal N(0,\sigma^2_\eta),\quad
//! h_0\sim\mathcal N\!\left(\mu,\frac{\sigma^2_\eta}{1-\phi^2}\right),\quad \sigma^2_t=e^{h_t}
//! $$
//!
//! AR(1) log-volatility with the hyperpriors of Knaus, Bitto-Nemling, Cadonna &
//! Frühwirth-Schnatter (2021), "Shrinkage in the Time-Varying Parameter Model Framework Using
//! the R Package shrinkTVP", JSS 100(13), <https://doi.org/10.18637/jss.v100.i13>.
//!
use anyhow::bail;
use anyhow::Result;
use ndarray::Array1;

use crate::distributions::Prior;
use crate::trace::Trace;
use crate::traits::ErrorModelExt;

/// Prior mean of `sv_mu` (`b_mu`).
pub const B_MU: f64 = 0.0;
/// First Beta shape of `sv_phi` (`a_phi`).
pub const A_PHI: f64 = 5.0;
/// Second Beta shape of `sv_phi` (`b_phi`).
pub const B_PHI: f64 = 1.5;
/// Prior variance of `sv_mu` (`B_mu`).
pub const B_MU_VARIANCE: f64 = 1.0;
/// Scale of the Gamma prior on `sv_sigma2_eta` (`B_sigma`).
pub const B_SIGMA: f64 = 1.0;
/// Shape of the Gamma prior on `sv_sigma2_eta`; its rate is `ETA_SHAPE * B_sigma`.
pub const ETA_SHAPE: f64 = 0.5;

pub const SITE_PHI: &str = "sv_phi";
pub const SITE_SIGMA2_ETA: &str = "sv_sigma2_eta";
pub const SITE_MU: &str = "sv_mu";
pub const SITE_H0: &str = "h_0";
pub const SITE_HT: &str = "h_t";
pub const SITE_SIGMA2: &str = "sigma2";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StochasticVolatilityHyper {
  /// `b_mu`
  pub mu_mean: f64,
  /// `B_mu`
  pub mu_variance: f64,
  /// `a_phi`
  pub phi_a: f64,
  /// `b_phi`
  pub phi_b: f64,
  /// `B_sigma`
  pub eta_scale: f64,
}

impl Default for StochasticVolatilityHyper {
  fn default() -> Self {
    Self {
      mu_mean: B_MU,
      mu_variance: B_MU_VARIANCE,
      phi_a: A_PHI,
      phi_b: B_PHI,
      eta_scale: B_SIGMA,
    }
  }
}

/// Time-varying observation-noise variance `sigma2_t = exp(h_t)`.
#[derive(Clone, Debug)]
pub struct StochasticVolatility {
  pub n_timesteps: usize,
  pub hyper: StochasticVolatilityHyper,
}

impl StochasticVolatility {
  pub fn new(n_timesteps: usize, hyper: StochasticVolatilityHyper) -> Result<Self> {
    Prior::beta(hyper.phi_a, hyper.phi_b)?;
    Prior::gamma(ETA_SHAPE, ETA_SHAPE * hyper.eta_scale)?;
    Prior::normal(hyper.mu_mean, hyper.mu_variance.sqrt())?;
    Ok(Self { n_timesteps, hyper })
  }

  pub fn with_defaults(n_timesteps: usize) -> Self {
    Self {
      n_timesteps,
      hyper: StochasticVolatilityHyper::default(),
    }
  }
}

impl ErrorModelExt for StochasticVolatility {
  type Output = Array1<f64>;

  fn sample(&self, trace: &mut Trace) -> Result<Array1<f64>> {
    let hp = &self.hyper;

    let sv_phi = trace.sample(SITE_PHI, Prior::beta(hp.phi_a, hp.phi_b)?)?;
    let phi = 2.0 * sv_phi - 1.0;
    let sigma2_eta = trace.sample(
      SITE_SIGMA2_ETA,
      Prior::gamma(ETA_SHAPE, ETA_SHAPE * hp.eta_scale)?,
    )?;
    let mu = trace.sample(SITE_MU, Prior::normal(hp.mu_mean, hp.mu_variance.sqrt())?)?;

    let h0_variance = stationary_variance(phi, sigma2_eta)?;
    let h_0 = trace.sample(SITE_H0, Prior::normal(mu, h0_variance.sqrt())?)?;

    let eta = sigma2_eta.sqrt();
    let (_, h) = trace.scan(SITE_HT, h_0, self.n_timesteps, |trace, h_prev| {
      let h_t = trace.sample(SITE_HT, Prior::normal(mu + phi * (h_prev - mu), eta)?)?;
      Ok((h_t, h_t))
    })?;

    let sigma2 = Array1::from(h).mapv(f64::exp);
    trace.deterministic(SITE_SIGMA2, sigma2.clone())?;
    tracing::debug!(
      n = self.n_timesteps,
      phi,
      sigma2_eta,
      mu,
      "stochastic volatility error model"
    );

    Ok(sigma2)
  }
}

/// Variance of the stationary distribution of an AR(1) process, `sigma2_eta / (1 - phi^2)`.
///
/// Fails when `|phi| >= 1` or the ratio overflows. The boundary is reachable because
/// `phi = 2 * Beta - 1` and a Beta draw can round onto 1.
pub fn stationary_variance(phi: f64, sigma2_eta: f64) -> Result<f64> {
  let denom = 1.0 - phi * phi;
  let variance = sigma2_eta / denom;

  if denom <= 0.0 || !variance.is_finite() {
    tracing::warn!(phi, sigma2_eta, "AR(1) persistence outside the stationary region");
    bail!(
      "stationary variance of h_0 is undefined: persistence sv_phi_trans = {phi} is not in (-1, 1) \
       (1 - phi^2 = {denom}, sv_sigma2_eta = {sigma2_eta})"
    );
  }

  Ok(variance)
}

/// Registers the stochastic-volatility sites for `n_timesteps` steps with the default
/// hyperparameters and returns `sigma2_t = exp(h_t)` in chronological order.
pub fn stochastic_volatility(trace: &mut Trace, n_timesteps: usize) -> Result<Array1<f64>> {
  StochasticVolatility::with_defaults(n_timesteps).sample(trace)
}
