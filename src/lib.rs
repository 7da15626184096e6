//! BVM measures the vulnerability of microdata (tabular records describing
//! individuals) to re-identification and attribute inference, under a
//! Bayesian worst-case adversary.
//!
//! Given a set of quasi-identifying attributes (QIDs), records sharing the
//! same QID values form an equivalence class. An optimal adversary who
//! knows a target's QID values guesses within the target's class; the
//! measures computed here are the prior and posterior success
//! probabilities of such an adversary, both for singling out a record and
//! for inferring the value of a sensitive attribute, together with
//! histograms of per-record success chances and, when values carry a
//! worth, the adversary's expected gain.
//!
//! # Getting started
//!
//! Load a `Dataset`, build a `Config`, and call `assess()`:
//!
//! ```
//! use bvm::{assess, Config, Dataset};
//!
//! let data = "age,zip,disease\n30,1000,flu\n30,1000,cold\n41,2000,flu\n";
//! let dataset = Dataset::from_csv(data.as_bytes()).unwrap();
//! let config = Config::new(vec!["age", "zip"]).with_sensitive(vec!["disease"]);
//!
//! let results = assess(&dataset, &config).unwrap();
//! assert_eq!(results.re_identification()[0].classes, 2);
//! ```
//!
//! Several time-sliced datasets can be linked on a record identifier and
//! assessed together, see `longitudinal`.
//!
//! # References
//!
//! [1] 2020, "The Science of Quantitative Information Flow". _Alvim, Chatzikokolakis, McIver, Morgan, Palamidessi, Smith_.
pub mod assessment;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod longitudinal;
pub mod results;
pub mod security_measures;
pub mod vulnerability;

pub use assessment::assess_all;
pub use config::{Config, WorthAssignment};
pub use dataset::{Dataset, Value};
pub use errors::{Error, Result};
pub use longitudinal::{link, Longitudinal, QuasiIdentifiers};
pub use results::Results;
pub use vulnerability::assess;
