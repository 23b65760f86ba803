//! # Inverse Gamma
//!
//! $$
//! f(x)=\frac{\beta^\alpha}{\Gamma(\alpha)}x^{-\alpha-1}e^{-\beta/x},\quad x>0
//! $$
//!
use anyhow::anyhow;
use anyhow::ensure;
use anyhow::Result;
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::Continuous;

use super::gamma::standard_gamma;
use crate::traits::DistributionExt;

/// Inverse-Gamma distribution in the shape/scale parameterisation.
///
/// If `Y ~ Gamma(shape, rate = scale)` then `1 / Y ~ InverseGamma(shape, scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseGamma {
  shape: f64,
  scale: f64,
  density: statrs::distribution::InverseGamma,
}

impl InverseGamma {
  pub fn new(shape: f64, scale: f64) -> Result<Self> {
    ensure!(
      shape.is_finite() && shape > 0.0,
      "InverseGamma shape must be finite and positive, got {shape}"
    );
    ensure!(
      scale.is_finite() && scale > 0.0,
      "InverseGamma scale must be finite and positive, got {scale}"
    );
    // statrs names the scale `rate`; the density is the one above.
    let density = statrs::distribution::InverseGamma::new(shape, scale)
      .map_err(|e| anyhow!("InverseGamma(shape={shape}, scale={scale}): {e}"))?;

    Ok(Self {
      shape,
      scale,
      density,
    })
  }

  pub fn shape(&self) -> f64 {
    self.shape
  }

  pub fn scale(&self) -> f64 {
    self.scale
  }
}

impl DistributionExt for InverseGamma {
  fn ln_pdf(&self, x: f64) -> f64 {
    self.density.ln_pdf(x)
  }

  fn mean(&self) -> f64 {
    if self.shape > 1.0 {
      self.scale / (self.shape - 1.0)
    } else {
      f64::INFINITY
    }
  }

  fn variance(&self) -> f64 {
    if self.shape > 2.0 {
      let a1 = self.shape - 1.0;
      self.scale * self.scale / (a1 * a1 * (self.shape - 2.0))
    } else {
      f64::INFINITY
    }
  }
}

impl Distribution<f64> for InverseGamma {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    self.scale / standard_gamma(rng, self.shape)
  }
}
