use std::time::Instant;

use log::info;
use radixtrie::RadixTree;
use thousands::Separable;

const LOW_NAMES: &[&str] = &[
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];
const TENS_NAMES: &[&str] = &[
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const BIG_NAMES: &[&str] = &["thousand", "million", "billion"];

/// Spell out a non negative number in (american) english words
fn number_to_words(n0: u64) -> String {
    let mut n = n0;
    if n <= 999 {
        return convert999(n);
    }
    let mut s = String::new();
    let mut t = 0;
    while n > 0 {
        if n % 1000 != 0 {
            let mut s2 = convert999(n % 1000);
            if t > 0 {
                s2 = s2 + " " + BIG_NAMES[t - 1];
            }
            s = if s.is_empty() { s2 } else { s2 + ", " + &s };
        }
        n /= 1000;
        t += 1;
    }
    s
}

fn convert999(n: u64) -> String {
    let s1 = LOW_NAMES[(n / 100) as usize].to_string() + " hundred";
    let s2 = convert99(n % 100);
    if n <= 99 {
        s2
    } else if n % 100 == 0 {
        s1
    } else {
        s1 + " " + &s2
    }
}

fn convert99(n: u64) -> String {
    if n < 20 {
        LOW_NAMES[n as usize].to_string()
    } else {
        let s = TENS_NAMES[(n / 10 - 2) as usize].to_string();
        if n % 10 == 0 {
            s
        } else {
            s + "-" + LOW_NAMES[(n % 10) as usize]
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;
    let n = 1_000_000u64;

    let t0 = Instant::now();
    let mut tree = RadixTree::new();
    for i in 0..n {
        tree.insert(number_to_words(i), i);
    }
    info!(
        "inserted {} words in {} s",
        tree.len().separate_with_commas(),
        t0.elapsed().as_secs_f64()
    );
    tree.check_invariants()?;

    let t0 = Instant::now();
    let mut found = 0usize;
    for i in (0..n).step_by(7) {
        if tree.get(number_to_words(i)) == Some(&i) {
            found += 1;
        }
    }
    info!(
        "found {} of every 7th word in {} s",
        found.separate_with_commas(),
        t0.elapsed().as_secs_f64()
    );

    let query = "nine hundred ninety-nine thousand, nine hundred ninety-nine and then some";
    if let Some((key, value)) = tree.longest_prefix(query) {
        info!(
            "longest prefix of {:?} is {:?} = {}",
            query,
            std::str::from_utf8(key)?,
            value.separate_with_commas()
        );
    }

    for (key, value) in tree.scan_prefix("seven hundred seventy-seven thousand").take(3) {
        info!("{:?} = {}", std::str::from_utf8(key)?, value);
    }

    let t0 = Instant::now();
    let removed = tree.remove_prefix("one hundred");
    info!(
        "removed {} words starting with \"one hundred\" in {} s, {} left",
        removed.separate_with_commas(),
        t0.elapsed().as_secs_f64(),
        tree.len().separate_with_commas()
    );

    let t0 = Instant::now();
    tree.retain(|_, v| *v % 2 == 0);
    info!(
        "kept {} even numbers in {} s",
        tree.len().separate_with_commas(),
        t0.elapsed().as_secs_f64()
    );
    tree.check_invariants()?;

    if let (Some((min, _)), Some((max, _))) = (tree.minimum(), tree.maximum()) {
        info!(
            "first {:?}, last {:?}",
            std::str::from_utf8(min)?,
            std::str::from_utf8(max)?
        );
    }
    Ok(())
}
