//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{M}:\text{trace}\to\text{variance draws},\quad
//! \pi:\ x\mapsto(\log p(x), \mathbb{E}[X], \operatorname{Var}[X])
//! $$
//!
use std::collections::HashMap;

use anyhow::bail;
use anyhow::Result;
use rayon::prelude::*;

use crate::trace::Trace;

/// Summary statistics of a prior family.
///
/// Moments that do not exist for the given parameters are reported as `f64::INFINITY`.
pub trait DistributionExt {
  fn pdf(&self, x: f64) -> f64 {
    self.ln_pdf(x).exp()
  }

  fn ln_pdf(&self, x: f64) -> f64;

  fn mean(&self) -> f64;

  fn variance(&self) -> f64;

  fn std_dev(&self) -> f64 {
    self.variance().sqrt()
  }
}

/// An error model declared against a [`Trace`].
///
/// Implementors register their sites through the trace and return the derived
/// observation-noise variance (a scalar or one value per timestep).
pub trait ErrorModelExt: Send + Sync {
  type Output: Send;

  fn sample(&self, trace: &mut Trace) -> Result<Self::Output>;

  /// Joint log density of the model with every sample site pinned to `values`.
  ///
  /// Keys are fully qualified site names (`h_t[3]` for scan sites). Missing sites and
  /// names the model never declares are both errors.
  fn log_density(&self, values: &HashMap<String, f64>) -> Result<f64> {
    let mut trace = Trace::seeded(0).condition_all(values.iter().map(|(k, v)| (k.clone(), *v)));
    self.sample(&mut trace)?;

    if let Some(site) = trace.sample_sites().find(|site| !site.is_observed()) {
      bail!("no value supplied for sample site '{}'", site.name());
    }
    let unused = trace.unused_conditions();
    if !unused.is_empty() {
      bail!("values supplied for unknown sites: {}", unused.join(", "));
    }

    Ok(trace.log_joint())
  }

  /// Draws `m` independent prior-predictive outputs in parallel.
  ///
  /// Draw `i` uses its own trace seeded with `seed + i`, so the result does not depend on
  /// how rayon schedules the work.
  fn sample_par(&self, m: usize, seed: u64) -> Result<Vec<Self::Output>> {
    (0..m)
      .into_par_iter()
      .map(|i| {
        let mut trace = Trace::seeded(seed.wrapping_add(i as u64));
        self.sample(&mut trace)
      })
      .collect()
  }
}
