//! Definitions of leakage measures.
//!
//! In the documentation, we write V for the prior Bayes vulnerability
//! (the success probability of an adversary guessing before seeing the
//! data) and V' for the posterior one.
//!
//! # References
//! [1] M. S. Alvim et al. "Additive and multiplicative notions of leakage,
//!     and their capacities." CSF, 2014.
use float_cmp::approx_eq;

use crate::errors::{Error, Result};

fn check_prior(prior: f64) -> Result<()> {
    if approx_eq!(f64, prior, 0.) || prior < 0. {
        return Err(Error::Configuration("prior vulnerability must be positive".into()));
    }
    Ok(())
}

/// Computes the Multiplicative Bayes Leakage V'/V, as defined in [1].
pub fn multiplicative_leakage(prior: f64, posterior: f64) -> Result<f64> {
    check_prior(prior)?;
    Ok(posterior / prior)
}

/// Computes the Additive Bayes Leakage V' - V, as defined in [1].
pub fn additive_leakage(prior: f64, posterior: f64) -> Result<f64> {
    check_prior(prior)?;
    Ok(posterior - prior)
}

/// Computes the Min-entropy leakage log2(V'/V).
pub fn min_entropy_leakage(prior: f64, posterior: f64) -> Result<f64> {
    check_prior(prior)?;
    Ok((posterior / prior).log2())
}
