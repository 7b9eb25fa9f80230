use std::collections::HashSet;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Issues identity tokens: millisecond timestamp followed by a 4-digit
/// random suffix, e.g. `17291234567890421`.
///
/// Every token issued (or registered via [`IdGenerator::observe`]) is
/// remembered for the life of the generator, so a token is never handed
/// out twice even after the row that carried it is deleted.
pub struct IdGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    /// Deterministic suffixes, for tests
    pub fn with_seed(seed: u64) -> Self {
        IdGenerator {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    /// Record tokens that already exist (loaded from storage)
    pub fn observe<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        self.issued.extend(tokens.into_iter().map(str::to_string));
    }

    pub fn next_token(&mut self) -> String {
        loop {
            let token = format!(
                "{}{:04}",
                Utc::now().timestamp_millis(),
                self.rng.gen_range(0..10_000u32)
            );
            if self.issued.insert(token.clone()) {
                return token;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
