//! # Normal
//!
//! $$
//! f(x)=\frac{1}{\sigma\sqrt{2\pi}}\exp\!\left(-\frac{(x-\mu)^2}{2\sigma^2}\right)
//! $$
//!
use anyhow::anyhow;
use anyhow::ensure;
use anyhow::Result;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::StandardNormal;
use statrs::distribution::Continuous;

use crate::traits::DistributionExt;

/// Normal distribution parameterised by mean and standard deviation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normal {
  mean: f64,
  std_dev: f64,
  density: statrs::distribution::Normal,
}

impl Normal {
  pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
    ensure!(mean.is_finite(), "Normal mean must be finite, got {mean}");
    ensure!(
      std_dev.is_finite() && std_dev > 0.0,
      "Normal std_dev must be finite and positive, got {std_dev}"
    );
    let density = statrs::distribution::Normal::new(mean, std_dev)
      .map_err(|e| anyhow!("Normal(mean={mean}, std_dev={std_dev}): {e}"))?;

    Ok(Self {
      mean,
      std_dev,
      density,
    })
  }

  pub fn loc(&self) -> f64 {
    self.mean
  }

  pub fn scale(&self) -> f64 {
    self.std_dev
  }
}

impl DistributionExt for Normal {
  fn ln_pdf(&self, x: f64) -> f64 {
    self.density.ln_pdf(x)
  }

  fn mean(&self) -> f64 {
    self.mean
  }

  fn variance(&self) -> f64 {
    self.std_dev * self.std_dev
  }

  fn std_dev(&self) -> f64 {
    self.std_dev
  }
}

impl Distribution<f64> for Normal {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    self.mean + self.std_dev * z
  }
}
