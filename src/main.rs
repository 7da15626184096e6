//! BVM measures the vulnerability of microdata to re-identification and
//! attribute inference by a Bayesian worst-case adversary.
//!
//! # Getting started
//!
//! BVM takes as input a headered CSV dataset, such as:
//!
//!     age, zip, sex, disease
//!     30, 1000, F, flu
//!     41, 2000, M, cold
//!     ...
//!
//! and the names of the quasi-identifying attributes (QIDs) an adversary
//! may know about their target.
//!
//! The general syntax is:
//!
//!     bvm assess --qids=<list> [options] <dataset>
//!
//! `--qids` can be repeated to assess several candidate sets of QIDs at
//! once. `--sensitive` names the attributes whose values the adversary
//! tries to infer, and `--worth` assigns a worth to some of their values,
//! from a CSV file of `attribute, value, worth` rows.
//!
//! ## Longitudinal assessment
//!
//!     bvm longitudinal --qids=<lists> --ids=<list> [options] <dataset>...
//!
//! links several datasets describing the same individuals at different
//! times on a record identifier (one per dataset, `--ids`), the first
//! dataset being the focal one. QIDs are either one list shared by all
//! datasets, or one list per dataset separated by ';'.
//!
//! ## Output
//!
//! Three tables are produced: re-identification, attribute inference and
//! information worth. They are printed to stdout, or written as CSV files
//! into the directory given with `--output`.
use docopt::Docopt;
use log::info;
use serde::Deserialize;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::process;

use bvm::security_measures::*;
use bvm::{assess_all, Config, Longitudinal, QuasiIdentifiers, Result, Results, WorthAssignment};

mod utils;

use utils::{load_dataset, load_worth, parse_list, parse_lists};


const USAGE: &str = "
Bayes vulnerability assessment for microdata.

Usage: bvm assess (--qids=<list>)... [options] <dataset>
       bvm longitudinal (--qids=<list>)... --ids=<list> [options] <dataset>...
       bvm (--help | --version)

Options:
    --qids=<list>               Comma-separated quasi-identifiers.
                                Repeat to assess several sets.
                                For longitudinal assessment, per-dataset
                                lists can be separated by ';'.
    --ids=<list>                Comma-separated identifiers linking the
                                datasets, one per dataset.
    --sensitive=<list>          Comma-separated sensitive attributes.
    --worth=<file>              CSV file of (attribute, value, worth) rows.
    --output=<dir>              Write the result tables into this directory.
    --leakage                   Print leakage measures for each result row.
    -h, --help                  Show help.
    --version                   Show the version.
";

#[derive(Deserialize)]
struct Args {
    cmd_longitudinal: bool,
    flag_qids: Vec<String>,
    flag_ids: Option<String>,
    flag_sensitive: Option<String>,
    flag_worth: Option<String>,
    flag_output: Option<String>,
    flag_leakage: bool,
    arg_dataset: Vec<String>,
}

/// Builds the configuration of a single assessment.
fn build_config(quasi_identifiers: Vec<String>, sensitive: &Option<Vec<String>>,
                worth: &Option<WorthAssignment>) -> Result<Config> {
    let mut config = Config::new(quasi_identifiers);
    if let Some(sensitive) = sensitive {
        config = config.with_sensitive(sensitive.clone());
    }
    if let Some(worth) = worth {
        for (attribute, values) in worth {
            config = config.with_worth(attribute, values.clone())?;
        }
    }
    Ok(config)
}

fn run_assess(args: &Args, sensitive: &Option<Vec<String>>,
              worth: &Option<WorthAssignment>) -> Result<Results> {
    let dataset = load_dataset(&args.arg_dataset[0])?;
    info!("loaded {} rows from {}", dataset.len(), args.arg_dataset[0]);

    let configs = args.flag_qids
                      .iter()
                      .map(|qids| build_config(parse_list(qids), sensitive, worth))
                      .collect::<Result<Vec<_>>>()?;

    assess_all(&dataset, &configs)
}

fn run_longitudinal(args: &Args, sensitive: &Option<Vec<String>>,
                    worth: &Option<WorthAssignment>) -> Result<Results> {
    let datasets = args.arg_dataset
                       .iter()
                       .map(|f| load_dataset(f))
                       .collect::<Result<Vec<_>>>()?;
    let identifiers = parse_list(args.flag_ids.as_deref().unwrap_or_default());
    let longitudinal = Longitudinal::new(datasets, identifiers)?;

    let mut results = Results::new();
    for qids in &args.flag_qids {
        let lists = parse_lists(qids)?;
        let qids = if lists.len() == 1 {
            QuasiIdentifiers::Shared(lists.into_iter().next().unwrap_or_default())
        } else {
            QuasiIdentifiers::PerDataset(lists)
        };
        results.append(longitudinal.assess(&qids, sensitive.clone(), worth.clone())?);
    }
    Ok(results)
}

/// Prints several leakage measures that can be derived from a pair of
/// prior and posterior vulnerabilities.
fn print_all_measures(label: &str, prior: f64, posterior: f64) -> Result<()> {
    println!("{}", label);
    println!("Multiplicative Leakage: {}", multiplicative_leakage(prior, posterior)?);
    println!("Additive Leakage: {}", additive_leakage(prior, posterior)?);
    println!("Min-entropy Leakage: {}", min_entropy_leakage(prior, posterior)?);
    Ok(())
}

fn print_leakage(results: &Results) -> Result<()> {
    for row in results.re_identification() {
        let label = format!("[*] re-identification, QID {}",
                            bvm::results::qid_label(&row.quasi_identifiers));
        print_all_measures(&label, row.prior, row.posterior)?;
    }
    for row in results.attribute_inference() {
        let label = format!("[*] attribute inference of {}, QID {}", row.sensitive,
                            bvm::results::qid_label(&row.quasi_identifiers));
        print_all_measures(&label, row.prior, row.posterior)?;
    }
    Ok(())
}

fn write_results(results: &Results, output: Option<&str>) -> Result<()> {
    match output {
        Some(dir) => {
            let dir = Path::new(dir);
            fs::create_dir_all(dir)?;
            results.write_re_identification_csv(File::create(dir.join("re_identification.csv"))?)?;
            results.write_attribute_inference_csv(File::create(dir.join("attribute_inference.csv"))?)?;
            results.write_information_worth_csv(File::create(dir.join("information_worth.csv"))?)?;
            info!("result tables written to {}", dir.display());
        },
        None => {
            let stdout = io::stdout();
            println!("# re-identification");
            results.write_re_identification_csv(stdout.lock())?;
            if !results.attribute_inference().is_empty() {
                println!("\n# attribute inference");
                results.write_attribute_inference_csv(stdout.lock())?;
            }
            if !results.information_worth().is_empty() {
                println!("\n# information worth");
                results.write_information_worth_csv(stdout.lock())?;
            }
        },
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let sensitive = args.flag_sensitive.as_deref().map(parse_list);
    let worth = args.flag_worth.as_deref().map(load_worth).transpose()?;

    let results = if args.cmd_longitudinal {
        run_longitudinal(args, &sensitive, &worth)?
    } else {
        run_assess(args, &sensitive, &worth)?
    };

    write_results(&results, args.flag_output.as_deref())?;
    if args.flag_leakage {
        println!();
        print_leakage(&results)?;
    }
    Ok(())
}


fn main() {
    env_logger::init();

    // Parse args from command line.
    let args: Args = Docopt::new(USAGE)
                            .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_owned()))
                                           .deserialize())
                            .unwrap_or_else(|e| e.exit());

    if let Err(e) = run(&args) {
        eprintln!("[!] {}", e);
        process::exit(1);
    }
}
