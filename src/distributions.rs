//! # Distributions
//!
//! $$
//! \pi\in\{\mathrm{Gamma}(\alpha,\beta),\ \mathrm{InvGamma}(\alpha,\beta),\ \mathrm{Beta}(a,b),\ \mathcal N(\mu,\sigma)\}
//! $$
//!
//! The closed set of prior families the error models draw from. Sampling runs on the
//! caller's RNG so a seeded [`Trace`](crate::trace::Trace) is reproducible end to end.
use std::fmt;

use anyhow::Result;
use rand::Rng;
use rand_distr::Distribution;

pub mod beta;
pub mod gamma;
pub mod inverse_gamma;
pub mod normal;

pub use beta::Beta;
pub use gamma::Gamma;
pub use inverse_gamma::InverseGamma;
pub use normal::Normal;

use crate::traits::DistributionExt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Prior {
  Gamma(Gamma),
  InverseGamma(InverseGamma),
  Beta(Beta),
  Normal(Normal),
}

impl Prior {
  pub fn gamma(shape: f64, rate: f64) -> Result<Self> {
    Ok(Self::Gamma(Gamma::new(shape, rate)?))
  }

  pub fn inverse_gamma(shape: f64, scale: f64) -> Result<Self> {
    Ok(Self::InverseGamma(InverseGamma::new(shape, scale)?))
  }

  pub fn beta(a: f64, b: f64) -> Result<Self> {
    Ok(Self::Beta(Beta::new(a, b)?))
  }

  pub fn normal(mean: f64, std_dev: f64) -> Result<Self> {
    Ok(Self::Normal(Normal::new(mean, std_dev)?))
  }

  pub fn family(&self) -> &'static str {
    match self {
      Prior::Gamma(_) => "Gamma",
      Prior::InverseGamma(_) => "InverseGamma",
      Prior::Beta(_) => "Beta",
      Prior::Normal(_) => "Normal",
    }
  }

  /// Whether `x` is a finite point of the support.
  ///
  /// Beta admits the closed interval because its sampler can round onto the endpoints.
  pub fn in_support(&self, x: f64) -> bool {
    if !x.is_finite() {
      return false;
    }
    match self {
      Prior::Gamma(_) | Prior::InverseGamma(_) => x > 0.0,
      Prior::Beta(_) => (0.0..=1.0).contains(&x),
      Prior::Normal(_) => true,
    }
  }

  fn as_ext(&self) -> &dyn DistributionExt {
    match self {
      Prior::Gamma(d) => d as &dyn DistributionExt,
      Prior::InverseGamma(d) => d,
      Prior::Beta(d) => d,
      Prior::Normal(d) => d,
    }
  }
}

impl DistributionExt for Prior {
  fn ln_pdf(&self, x: f64) -> f64 {
    self.as_ext().ln_pdf(x)
  }

  fn mean(&self) -> f64 {
    self.as_ext().mean()
  }

  fn variance(&self) -> f64 {
    self.as_ext().variance()
  }

  fn std_dev(&self) -> f64 {
    self.as_ext().std_dev()
  }
}

impl Distribution<f64> for Prior {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
    match self {
      Prior::Gamma(d) => d.sample(rng),
      Prior::InverseGamma(d) => d.sample(rng),
      Prior::Beta(d) => d.sample(rng),
      Prior::Normal(d) => d.sample(rng),
    }
  }
}

impl fmt::Display for Prior {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Prior::Gamma(d) => write!(f, "Gamma(shape={}, rate={})", d.shape(), d.rate()),
      Prior::InverseGamma(d) => {
        write!(f, "InverseGamma(shape={}, scale={})", d.shape(), d.scale())
      }
      Prior::Beta(d) => write!(f, "Beta(a={}, b={})", d.a(), d.b()),
      Prior::Normal(d) => write!(f, "Normal(mean={}, std_dev={})", d.loc(), d.scale()),
    }
  }
}

impl From<Gamma> for Prior {
  fn from(d: Gamma) -> Self {
    Prior::Gamma(d)
  }
}

impl From<InverseGamma> for Prior {
  fn from(d: InverseGamma) -> Self {
    Prior::InverseGamma(d)
  }
}

impl From<Beta> for Prior {
  fn from(d: Beta) -> Self {
    Prior::Beta(d)
  }
}

impl From<Normal> for Prior {
  fn from(d: Normal) -> Self {
    Prior::Normal(d)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use rand_distr::Distribution;
  use statrs::function::gamma::ln_gamma;

  use super::Beta;
  use super::Gamma;
  use super::InverseGamma;
  use super::Normal;
  use super::Prior;
  use crate::traits::DistributionExt;

  const N: usize = 20_000;

  fn sample_moments(prior: &Prior, seed: u64) -> (f64, f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let xs: Vec<f64> = (0..N).map(|_| prior.sample(&mut rng)).collect();
    let mean = xs.iter().sum::<f64>() / N as f64;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (N - 1) as f64;
    (mean, var)
  }

  #[test]
  fn gamma_sample_mean_matches_shape_over_rate() {
    let prior = Prior::gamma(5.0, 3.33).unwrap();
    let (mean, var) = sample_moments(&prior, 1);
    assert_abs_diff_eq!(mean, prior.mean(), epsilon = 0.03);
    assert_abs_diff_eq!(var, prior.variance(), epsilon = 0.05);
  }

  #[test]
  fn gamma_with_shape_below_one_uses_boost() {
    let prior = Prior::gamma(0.5, 0.5).unwrap();
    let (mean, _) = sample_moments(&prior, 2);
    assert_relative_eq!(prior.mean(), 1.0);
    assert_abs_diff_eq!(mean, 1.0, epsilon = 0.06);
  }

  #[test]
  fn beta_samples_stay_in_unit_interval() {
    let prior = Prior::beta(5.0, 1.5).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..N {
      let x = prior.sample(&mut rng);
      assert!(prior.in_support(x), "beta draw {x} left [0, 1]");
    }
    let (mean, _) = sample_moments(&prior, 4);
    assert_abs_diff_eq!(mean, 5.0 / 6.5, epsilon = 0.01);
  }

  #[test]
  fn inverse_gamma_uses_scale_parameterisation() {
    let prior = Prior::inverse_gamma(2.5, 1.2).unwrap();
    assert_relative_eq!(prior.mean(), 1.2 / 1.5);
    let (mean, _) = sample_moments(&prior, 5);
    assert_abs_diff_eq!(mean, 0.8, epsilon = 0.05);
  }

  #[test]
  fn normal_moments() {
    let prior = Prior::normal(-1.0, 2.0).unwrap();
    let (mean, var) = sample_moments(&prior, 6);
    assert_abs_diff_eq!(mean, -1.0, epsilon = 0.06);
    assert_abs_diff_eq!(var, 4.0, epsilon = 0.15);
    assert_relative_eq!(prior.std_dev(), 2.0);
  }

  #[test]
  fn ln_pdf_matches_closed_forms() {
    let normal = Prior::normal(0.0, 1.0).unwrap();
    assert_relative_eq!(
      normal.ln_pdf(0.0),
      -0.5 * (2.0 * std::f64::consts::PI).ln(),
      epsilon = 1e-12
    );

    let (shape, rate, x): (f64, f64, f64) = (5.0, 3.33, 1.7);
    let gamma = Prior::gamma(shape, rate).unwrap();
    let expected = shape * f64::ln(rate) - ln_gamma(shape) + (shape - 1.0) * x.ln() - rate * x;
    assert_relative_eq!(gamma.ln_pdf(x), expected, epsilon = 1e-10);

    let (shape, scale, x): (f64, f64, f64) = (2.5, 0.7, 0.4);
    let inv = Prior::inverse_gamma(shape, scale).unwrap();
    let expected = shape * f64::ln(scale) - ln_gamma(shape) - (shape + 1.0) * x.ln() - scale / x;
    assert_relative_eq!(inv.ln_pdf(x), expected, epsilon = 1e-10);
  }

  #[test]
  fn rejects_invalid_parameters() {
    assert!(Prior::gamma(0.0, 1.0).is_err());
    assert!(Prior::gamma(1.0, -3.0).is_err());
    assert!(Prior::inverse_gamma(2.5, f64::NAN).is_err());
    assert!(Prior::beta(5.0, 0.0).is_err());
    assert!(Prior::normal(0.0, 0.0).is_err());
    assert!(Prior::normal(f64::INFINITY, 1.0).is_err());

    let err = Prior::normal(0.0, -1.0).unwrap_err();
    assert!(err.to_string().contains("std_dev"), "{err}");
  }

  #[test]
  fn support_checks() {
    let beta = Prior::beta(5.0, 1.5).unwrap();
    assert!(beta.in_support(0.0) && beta.in_support(1.0));
    assert!(!beta.in_support(1.0 + 1e-12));

    let gamma = Prior::gamma(1.0, 1.0).unwrap();
    assert!(!gamma.in_support(0.0));
    assert!(!gamma.in_support(f64::INFINITY));

    let normal = Prior::normal(0.0, 1.0).unwrap();
    assert!(normal.in_support(-1e300));
    assert!(!normal.in_support(f64::NAN));
  }

  #[test]
  fn prior_draws_match_wrapped_family() {
    let cases: [(Prior, Prior); 4] = [
      (Prior::gamma(0.5, 0.5).unwrap(), Gamma::new(0.5, 0.5).unwrap().into()),
      (
        Prior::inverse_gamma(2.5, 1.2).unwrap(),
        InverseGamma::new(2.5, 1.2).unwrap().into(),
      ),
      (Prior::beta(5.0, 1.5).unwrap(), Beta::new(5.0, 1.5).unwrap().into()),
      (Prior::normal(0.0, 1.0).unwrap(), Normal::new(0.0, 1.0).unwrap().into()),
    ];

    for (prior, wrapped) in cases {
      let via_prior: Vec<f64> = prior.sample_iter(StdRng::seed_from_u64(7)).take(16).collect();
      let mut rng = StdRng::seed_from_u64(7);
      let direct: Vec<f64> = (0..16)
        .map(|_| match wrapped {
          Prior::Gamma(d) => d.sample(&mut rng),
          Prior::InverseGamma(d) => d.sample(&mut rng),
          Prior::Beta(d) => d.sample(&mut rng),
          Prior::Normal(d) => d.sample(&mut rng),
        })
        .collect();
      assert_eq!(via_prior, direct, "{prior}");
    }
  }

  #[test]
  fn family_draws_compose_with_rng_sample() {
    use rand::Rng;

    let gamma = Gamma::new(5.0, 3.33).unwrap();
    let mut a = StdRng::seed_from_u64(11);
    let mut b = StdRng::seed_from_u64(11);
    let x: f64 = a.sample(gamma);
    assert_eq!(x, gamma.sample(&mut b));
    assert!(x > 0.0);
  }

  #[test]
  fn display_names_family_and_parameters() {
    let prior = Prior::gamma(0.5, 0.5).unwrap();
    assert_eq!(prior.family(), "Gamma");
    assert_eq!(prior.to_string(), "Gamma(shape=0.5, rate=0.5)");
    assert_eq!(
      Prior::inverse_gamma(2.5, 1.0).unwrap().to_string(),
      "InverseGamma(shape=2.5, scale=1)"
    );
  }
}
