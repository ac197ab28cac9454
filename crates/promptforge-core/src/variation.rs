use std::sync::LazyLock;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::{Captures, Regex};
use serde::Serialize;

use crate::catalog;

static STYLE_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"style:[^,\n]*(,|$)").expect("valid regex"));
static LIGHTING_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lighting:[^,\n]*(,|$)").expect("valid regex"));

/// Uniform randomness seam for variation generation. Implementations return
/// values in `[0, 1)`; tests supply a scripted sequence to pin outcomes.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::rng().random()
    }
}

/// Deterministic source for reproducible variation runs.
#[derive(Debug)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.random()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationEntry {
    pub prompt: String,
    pub id: i64,
    pub platform: String,
}

/// Produces `count` stochastic rewrites of `base_prompt`. Each iteration may
/// swap the first `style:` clause, swap the first `lighting:` clause, and
/// append one extra descriptor; a prompt without those labels passes through
/// the substitutions unchanged.
pub fn generate(
    base_prompt: &str,
    count: usize,
    platform_id: &str,
    random: &mut dyn RandomSource,
) -> Vec<VariationEntry> {
    let base_id = Utc::now().timestamp_millis();
    let mut variations = Vec::with_capacity(count);

    for index in 0..count {
        let mut prompt = base_prompt.to_string();

        if random.next_f64() > 0.5 {
            let style = choose(random, catalog::VARIATION_STYLES);
            prompt = STYLE_CLAUSE_RE
                .replace(&prompt, |caps: &Captures| {
                    format!("style: {style}{}", &caps[1])
                })
                .into_owned();
        }
        if random.next_f64() > 0.5 {
            let lighting = choose(random, catalog::VARIATION_LIGHTINGS);
            prompt = LIGHTING_CLAUSE_RE
                .replace(&prompt, |caps: &Captures| {
                    format!("lighting: {lighting}{}", &caps[1])
                })
                .into_owned();
        }
        if random.next_f64() > 0.7 {
            prompt.push_str(", ");
            prompt.push_str(choose(random, catalog::VARIATION_DESCRIPTORS));
        }

        variations.push(VariationEntry {
            prompt,
            id: base_id + index as i64,
            platform: platform_id.to_string(),
        });
    }

    tracing::debug!(
        count = variations.len(),
        platform = platform_id,
        "generated prompt variations"
    );
    variations
}

fn choose<'a>(random: &mut dyn RandomSource, options: &'a [&'a str]) -> &'a str {
    let index = ((random.next_f64() * options.len() as f64) as usize).min(options.len() - 1);
    options[index]
}
