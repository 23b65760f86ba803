//! # Trace
//!
//! $$
//! \log p(\theta)=\sum_{s\in\text{sample sites}}\log \pi_s(\theta_s)
//! $$
//!
//! An explicit model context: every sample or deterministic site an error model declares is
//! recorded here in declaration order, under a unique name. Sites declared inside
//! [`Trace::scan`] carry their iteration index (`h_t[0]`, `h_t[1]`, ...).
use std::collections::HashMap;
use std::collections::HashSet;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;

use crate::distributions::Prior;
use crate::traits::DistributionExt;

#[derive(Clone, Debug, PartialEq)]
pub enum SiteValue {
  Scalar(f64),
  Vector(Array1<f64>),
}

impl From<f64> for SiteValue {
  fn from(v: f64) -> Self {
    SiteValue::Scalar(v)
  }
}

impl From<Array1<f64>> for SiteValue {
  fn from(v: Array1<f64>) -> Self {
    SiteValue::Vector(v)
  }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SiteKind {
  Sample {
    prior: Prior,
    value: f64,
    log_prob: f64,
    /// Value came from a condition rather than the RNG.
    observed: bool,
  },
  Deterministic {
    value: SiteValue,
  },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Site {
  name: String,
  kind: SiteKind,
}

impl Site {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> &SiteKind {
    &self.kind
  }

  pub fn is_sample(&self) -> bool {
    matches!(self.kind, SiteKind::Sample { .. })
  }

  pub fn is_observed(&self) -> bool {
    matches!(self.kind, SiteKind::Sample { observed: true, .. })
  }

  pub fn scalar(&self) -> Option<f64> {
    match &self.kind {
      SiteKind::Sample { value, .. } => Some(*value),
      SiteKind::Deterministic {
        value: SiteValue::Scalar(v),
      } => Some(*v),
      SiteKind::Deterministic { .. } => None,
    }
  }

  pub fn log_prob(&self) -> Option<f64> {
    match &self.kind {
      SiteKind::Sample { log_prob, .. } => Some(*log_prob),
      SiteKind::Deterministic { .. } => None,
    }
  }
}

#[derive(Debug)]
pub struct Trace {
  rng: StdRng,
  sites: Vec<Site>,
  index: HashMap<String, usize>,
  conditioned: HashMap<String, f64>,
  consumed: HashSet<String>,
  scope: Vec<usize>,
}

impl Trace {
  pub fn seeded(seed: u64) -> Self {
    tracing::debug!(seed, "seeding trace");
    Self::from_rng(StdRng::seed_from_u64(seed))
  }

  pub fn from_rng(rng: StdRng) -> Self {
    Self {
      rng,
      sites: Vec::new(),
      index: HashMap::new(),
      conditioned: HashMap::new(),
      consumed: HashSet::new(),
      scope: Vec::new(),
    }
  }

  /// Pins the site `name` to `value`; the RNG is not consulted for it.
  pub fn condition(mut self, name: impl Into<String>, value: f64) -> Self {
    self.conditioned.insert(name.into(), value);
    self
  }

  pub fn condition_all<I, K>(mut self, values: I) -> Self
  where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
  {
    self
      .conditioned
      .extend(values.into_iter().map(|(k, v)| (k.into(), v)));
    self
  }

  /// Registers a named random variable and returns its value.
  pub fn sample(&mut self, name: &str, prior: Prior) -> Result<f64> {
    let name = self.qualify(name);
    self.ensure_unique(&name)?;

    let (value, observed) = match self.conditioned.get(&name) {
      Some(&value) => {
        if !prior.in_support(value) {
          bail!("conditioned value {value} for site '{name}' is outside the support of {prior}");
        }
        self.consumed.insert(name.clone());
        (value, true)
      }
      None => (prior.sample(&mut self.rng), false),
    };
    let log_prob = prior.ln_pdf(value);
    tracing::trace!(site = %name, %prior, value, log_prob, observed, "sample site");

    self.push(
      name,
      SiteKind::Sample {
        prior,
        value,
        log_prob,
        observed,
      },
    );
    Ok(value)
  }

  /// Registers a value derived from earlier sites. No randomness is consumed.
  pub fn deterministic(&mut self, name: &str, value: impl Into<SiteValue>) -> Result<()> {
    let name = self.qualify(name);
    self.ensure_unique(&name)?;
    let value = value.into();
    tracing::trace!(site = %name, ?value, "deterministic site");
    self.push(name, SiteKind::Deterministic { value });
    Ok(())
  }

  /// Runs `step` `n` times in order, threading the carry through.
  ///
  /// Returns the final carry and the emitted values. Sites declared by `step` get the
  /// iteration index appended to their name; nested scans append one index per level.
  pub fn scan<C, Y, F>(
    &mut self,
    name: &str,
    init: C,
    n: usize,
    mut step: F,
  ) -> Result<(C, Vec<Y>)>
  where
    F: FnMut(&mut Trace, C) -> Result<(C, Y)>,
  {
    tracing::debug!(scan = name, steps = n, "scan");
    let mut carry = init;
    let mut ys = Vec::with_capacity(n);

    for i in 0..n {
      self.scope.push(i);
      let out = step(self, carry);
      self.scope.pop();

      let (next, y) = out.with_context(|| format!("scan '{name}' failed at step {i}"))?;
      carry = next;
      ys.push(y);
    }

    Ok((carry, ys))
  }

  pub fn site(&self, name: &str) -> Option<&Site> {
    self.index.get(name).map(|&i| &self.sites[i])
  }

  pub fn value(&self, name: &str) -> Option<SiteValue> {
    self.site(name).map(|site| match &site.kind {
      SiteKind::Sample { value, .. } => SiteValue::Scalar(*value),
      SiteKind::Deterministic { value } => value.clone(),
    })
  }

  pub fn scalar(&self, name: &str) -> Option<f64> {
    self.site(name).and_then(Site::scalar)
  }

  pub fn vector(&self, name: &str) -> Option<&Array1<f64>> {
    match &self.site(name)?.kind {
      SiteKind::Deterministic {
        value: SiteValue::Vector(v),
      } => Some(v),
      _ => None,
    }
  }

  /// Scalar values of the top-level scan sites `base[0]`, `base[1]`, ... in iteration order.
  pub fn scan_values(&self, base: &str) -> Array1<f64> {
    self
      .sites
      .iter()
      .filter(|site| {
        site.name.strip_prefix(base).is_some_and(|rest| {
          rest.starts_with('[') && rest.ends_with(']') && rest.matches('[').count() == 1
        })
      })
      .filter_map(Site::scalar)
      .collect()
  }

  pub fn sites(&self) -> &[Site] {
    &self.sites
  }

  pub fn sample_sites(&self) -> impl Iterator<Item = &Site> {
    self.sites.iter().filter(|site| site.is_sample())
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.sites.iter().map(|site| site.name.as_str())
  }

  pub fn len(&self) -> usize {
    self.sites.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sites.is_empty()
  }

  /// Sum of the log densities of all sample sites.
  pub fn log_joint(&self) -> f64 {
    self.sites.iter().filter_map(Site::log_prob).sum()
  }

  /// Conditioned names that no site has claimed, sorted.
  pub fn unused_conditions(&self) -> Vec<String> {
    let mut unused: Vec<String> = self
      .conditioned
      .keys()
      .filter(|k| !self.consumed.contains(*k))
      .cloned()
      .collect();
    unused.sort();
    unused
  }

  fn qualify(&self, name: &str) -> String {
    let mut qualified = name.to_string();
    for i in &self.scope {
      qualified.push_str(&format!("[{i}]"));
    }
    qualified
  }

  fn ensure_unique(&self, name: &str) -> Result<()> {
    if self.index.contains_key(name) {
      bail!("site '{name}' is already registered in this trace");
    }
    Ok(())
  }

  fn push(&mut self, name: String, kind: SiteKind) {
    self.index.insert(name.clone(), self.sites.len());
    self.sites.push(Site { name, kind });
  }
}
