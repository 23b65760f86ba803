//! # Homoscedastic
//!
//! $$
//! C_0\sim\mathrm{Gamma}(g_0, G_0),\qquad \sigma^2\mid C_0\sim\mathrm{InvGamma}(c_0, C_0)
//! $$
//!
use anyhow::ensure;
use anyhow::Result;

use crate::distributions::Prior;
use crate::trace::Trace;
use crate::traits::ErrorModelExt;

/// Shape of the Inverse-Gamma prior on `sigma2` (`c_0`).
pub const C0: f64 = 2.5;
/// Shape of the Gamma hyperprior on the scale `C_0` (`g_0`).
pub const G0: f64 = 5.0;
/// Rate of the Gamma hyperprior on the scale `C_0` (`G_0`).
pub const G0_RATE: f64 = 3.33;

pub const SITE_C0: &str = "C_0";
pub const SITE_SIGMA2: &str = "sigma2";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomoscedasticHyper {
  /// `c_0`
  pub c0: f64,
  /// `g_0`
  pub g0: f64,
  /// `G_0`
  pub g0_rate: f64,
}

impl Default for HomoscedasticHyper {
  fn default() -> Self {
    Self {
      c0: C0,
      g0: G0,
      g0_rate: G0_RATE,
    }
  }
}

/// Time-invariant observation-noise variance with a hierarchical scale.
#[derive(Clone, Debug, Default)]
pub struct Homoscedastic {
  pub hyper: HomoscedasticHyper,
}

impl Homoscedastic {
  pub fn new(hyper: HomoscedasticHyper) -> Result<Self> {
    Prior::gamma(hyper.g0, hyper.g0_rate)?;
    ensure!(
      hyper.c0.is_finite() && hyper.c0 > 0.0,
      "c0 must be finite and positive, got {}",
      hyper.c0
    );
    Ok(Self { hyper })
  }
}

impl ErrorModelExt for Homoscedastic {
  type Output = f64;

  fn sample(&self, trace: &mut Trace) -> Result<f64> {
    let h = &self.hyper;
    let c_0 = trace.sample(SITE_C0, Prior::gamma(h.g0, h.g0_rate)?)?;
    let sigma2 = trace.sample(SITE_SIGMA2, Prior::inverse_gamma(h.c0, c_0)?)?;
    tracing::debug!(c_0, sigma2, "homoscedastic error model");
    Ok(sigma2)
  }
}

/// Registers `C_0` and `sigma2` with the default hyperparameters and returns `sigma2`.
pub fn homoscedastic(trace: &mut Trace) -> Result<f64> {
  Homoscedastic::default().sample(trace)
}
