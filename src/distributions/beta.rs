//! # Beta
//!
//! $$
//! f(x)=\frac{x^{a-1}(1-x)^{b-1}}{B(a,b)},\quad 0\le x\le 1
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

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beta {
  a: f64,
  b: f64,
  density: statrs::distribution::Beta,
}

impl Beta {
  pub fn new(a: f64, b: f64) -> Result<Self> {
    ensure!(
      a.is_finite() && a > 0.0,
      "Beta shape a must be finite and positive, got {a}"
    );
    ensure!(
      b.is_finite() && b > 0.0,
      "Beta shape b must be finite and positive, got {b}"
    );
    let density =
      statrs::distribution::Beta::new(a, b).map_err(|e| anyhow!("Beta(a={a}, b={b}): {e}"))?;

    Ok(Self { a, b, density })
  }

  pub fn a(&self) -> f64 {
    self.a
  }

  pub fn b(&self) -> f64 {
    self.b
  }
}

impl DistributionExt for Beta {
  fn ln_pdf(&self, x: f64) -> f64 {
    self.density.ln_pdf(x)
  }

  fn mean(&self) -> f64 {
    self.a / (self.a + self.b)
  }

  fn variance(&self) -> f64 {
    let s = self.a + self.b;
    self.a * self.b / (s * s * (s + 1.0))
  }
}

impl Distribution<f64> for Beta {
  /// `X / (X + Y)` with `X ~ Gamma(a, 1)`, `Y ~ Gamma(b, 1)`.
  ///
  /// In floating point the result can land exactly on 0 or 1.
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    let x = standard_gamma(rng, self.a);
    let y = standard_gamma(rng, self.b);
    x / (x + y)
  }
}
