//! Memoized prime oracle
//!
//! Produces the nth prime by trial division against all previously found
//! primes, caching every result in a growable table. The key search only
//! ever needs single-byte primes, so the table is bounded at the 54 primes
//! below 256; asking past that bound is the search's one fatal error.

use crate::errors::{KeybreakError, Result};

/// Number of primes below 256. The oracle never grows past this bound.
pub const PRIME_TABLE_CAPACITY: usize = 54;

/// Memoized generator of single-byte primes.
///
/// Lookups are idempotent and the cache grows monotonically: `nth(i)` fills
/// the table up to index `i` on first use and answers from the cache after
/// that.
#[derive(Debug, Clone)]
pub struct PrimeOracle {
    cache: Vec<u8>,
}

impl PrimeOracle {
    pub fn new() -> Self {
        Self {
            cache: Vec::with_capacity(PRIME_TABLE_CAPACITY),
        }
    }

    /// The nth prime, zero-based: `nth(0) == 2`, `nth(53) == 251`.
    pub fn nth(&mut self, index: usize) -> Result<u8> {
        if index >= PRIME_TABLE_CAPACITY {
            return Err(KeybreakError::PrimeSearchExhausted {
                index,
                capacity: PRIME_TABLE_CAPACITY,
            });
        }
        while self.cache.len() <= index {
            let next = self
                .scan_next()
                .ok_or(KeybreakError::PrimeSearchExhausted {
                    index,
                    capacity: PRIME_TABLE_CAPACITY,
                })?;
            self.cache.push(next);
        }
        Ok(self.cache[index])
    }

    /// The sliding two-prime window for round `index`: `(prev_prime, key)`.
    ///
    /// Round `i` uses `(nth(i), nth(i + 1))`, so consecutive rounds overlap
    /// by one prime and the final reachable round is `PRIME_TABLE_CAPACITY - 2`.
    pub fn window(&mut self, index: usize) -> Result<(u8, u8)> {
        Ok((self.nth(index)?, self.nth(index + 1)?))
    }

    /// Number of primes found so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Scan upward from the largest cached prime for the next integer not
    /// divisible by any cached prime. The scan is widened to u16 so the
    /// candidate after 251 runs off the byte range instead of wrapping.
    fn scan_next(&self) -> Option<u8> {
        let start = self.cache.last().map_or(2u16, |&p| u16::from(p) + 1);
        (start..=255)
            .find(|&n| self.cache.iter().all(|&p| n % u16::from(p) != 0))
            .map(|n| n as u8)
    }
}

impl Default for PrimeOracle {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_primes_match_the_standard_sequence() {
        let mut oracle = PrimeOracle::new();
        let expected = [2u8, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
        for (i, &p) in expected.iter().enumerate() {
            assert_eq!(oracle.nth(i).unwrap(), p);
        }
    }

    #[test]
    fn table_ends_at_251() {
        let mut oracle = PrimeOracle::new();
        assert_eq!(oracle.nth(PRIME_TABLE_CAPACITY - 1).unwrap(), 251);
        assert_eq!(oracle.len(), PRIME_TABLE_CAPACITY);
    }

    #[test]
    fn index_past_the_table_is_exhausted() {
        let mut oracle = PrimeOracle::new();
        let err = oracle.nth(PRIME_TABLE_CAPACITY).unwrap_err();
        assert!(matches!(
            err,
            KeybreakError::PrimeSearchExhausted {
                index: PRIME_TABLE_CAPACITY,
                capacity: PRIME_TABLE_CAPACITY,
            }
        ));
    }

    #[test]
    fn lookups_are_idempotent() {
        let mut oracle = PrimeOracle::new();
        assert_eq!(oracle.nth(10).unwrap(), 31);
        assert_eq!(oracle.nth(10).unwrap(), 31);
        assert_eq!(oracle.nth(3).unwrap(), 7);
        assert_eq!(oracle.len(), 11);
    }

    #[test]
    fn window_slides_by_one_index() {
        let mut oracle = PrimeOracle::new();
        assert_eq!(oracle.window(0).unwrap(), (2, 3));
        assert_eq!(oracle.window(1).unwrap(), (3, 5));
        assert_eq!(oracle.window(7).unwrap(), (19, 23));
    }

    #[test]
    fn last_reachable_window_and_exhaustion() {
        let mut oracle = PrimeOracle::new();
        assert_eq!(
            oracle.window(PRIME_TABLE_CAPACITY - 2).unwrap(),
            (241, 251)
        );
        assert!(oracle.window(PRIME_TABLE_CAPACITY - 1).is_err());
    }
}
