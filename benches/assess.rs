#[macro_use]
extern crate bencher;

extern crate bvm;

use bencher::Bencher;
use std::collections::BTreeMap;

use bvm::*;


/// Builds a synthetic census-like dataset.
///
/// NOTE: values come from a fixed linear congruential sequence; we don't
/// care about their distribution, only about having classes of varied
/// sizes. This dataset only serves for benchmark purposes.
fn census(n: usize) -> Dataset {
    let mut state: u64 = 42;
    let mut next = |m: u64| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) % m) as i64
    };
    let diseases = ["flu", "cold", "asthma", "diabetes", "none"];

    let rows = (0..n).map(|_| {
                        vec![Value::Integer(18 + next(60)),
                             Value::Integer(1000 + 100 * next(20)),
                             Value::from(if next(2) == 0 { "F" } else { "M" }),
                             Value::from(diseases[next(5) as usize])]
                     })
                     .collect();

    Dataset::new(vec!["age", "zip", "sex", "disease"], rows).unwrap()
}

fn bench_assess(b: &mut Bencher) {
    let dataset = census(10_000);
    let config = Config::new(vec!["age", "zip", "sex"]).with_sensitive(vec!["disease"]);

    b.iter(|| assess(&dataset, &config).unwrap());
}

fn bench_assess_worth(b: &mut Bencher) {
    let dataset = census(10_000);
    let mut worth = BTreeMap::new();
    worth.insert("diabetes", 10.);
    worth.insert("asthma", 4.);
    let config = Config::new(vec!["age", "zip"]).with_sensitive(vec!["disease"])
                                                .with_worth("disease", worth)
                                                .unwrap();

    b.iter(|| assess(&dataset, &config).unwrap());
}

fn bench_assess_all(b: &mut Bencher) {
    let dataset = census(10_000);
    let configs = vec![Config::new(vec!["age"]),
                       Config::new(vec!["age", "zip"]),
                       Config::new(vec!["age", "zip", "sex"]),
                       Config::new(vec!["zip", "sex"])];

    b.iter(|| assess_all(&dataset, &configs).unwrap());
}

benchmark_group!(benches, bench_assess, bench_assess_worth, bench_assess_all);
benchmark_main!(benches);
