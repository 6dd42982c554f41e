//! OTP code generation.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest value a generated code can take. Keeps every code at six
/// digits without zero padding.
pub const CODE_MIN: u32 = 100_000;

/// Largest value a generated code can take.
pub const CODE_MAX: u32 = 999_999;

/// Produces OTP codes. Abstracted so tests can script deterministic codes.
pub trait CodeGenerator: Send + Sync {
    /// Produce a 6-digit decimal code.
    fn generate(&self) -> String;
}

/// Codes drawn uniformly from `[100000, 999999]`.
pub struct RandomCodeGenerator {
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded generator for reproducible sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CODE_LENGTH;

    #[test]
    fn test_codes_are_six_decimal_digits_in_range() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..100 {
            let code = generator.generate();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = code.parse().unwrap();
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_seeded_generators_repeat_the_sequence() {
        let a = RandomCodeGenerator::from_seed(42);
        let b = RandomCodeGenerator::from_seed(42);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_codes_are_not_all_identical() {
        let generator = RandomCodeGenerator::from_seed(7);
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| generator.generate()).collect();
        assert!(codes.len() > 1);
    }
}
