use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use rand::{Rng as _, RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 32-byte seed identifying a generation run.
///
/// The seed is the only source of randomness in this crate: the same seed
/// with the same generator parameters reproduces the same instance. Seeds
/// round-trip through their 64-digit lowercase hex representation.
///
/// # Examples
///
/// ```
/// use gridweave_generator::PuzzleSeed;
///
/// let seed: PuzzleSeed = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
///     .parse()
///     .unwrap();
/// assert_eq!(seed.to_string().len(), 64);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

impl PuzzleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Draws a fresh random seed from the operating system.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0_u8; 32];
        rand::rng().fill(&mut bytes[..]);
        Self(bytes)
    }

    /// Derives the RNG for one generation domain.
    ///
    /// The seed bytes and the domain string are hashed together, so distinct
    /// puzzle variants and level indices draw from independent streams of the
    /// same base seed. Repeated calls with the same domain return identical
    /// RNGs.
    #[must_use]
    pub fn rng(&self, domain: &str) -> Pcg64 {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(domain.as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        Pcg64::from_seed(digest)
    }
}

impl fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PuzzleSeed({self})")
    }
}

/// Error parsing a [`PuzzleSeed`] from hex.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParsePuzzleSeedError {
    /// The input was not exactly 64 hex digits long.
    #[display("seed must be 64 hex digits, got {len}")]
    InvalidLength {
        /// Number of characters in the rejected input.
        len: usize,
    },
    /// The input contained a non-hex character.
    #[display("invalid hex digit {digit:?} in seed")]
    InvalidDigit {
        /// The offending character.
        digit: char,
    },
}

impl FromStr for PuzzleSeed {
    type Err = ParsePuzzleSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 64 {
            return Err(ParsePuzzleSeedError::InvalidLength { len });
        }
        let mut bytes = [0_u8; 32];
        for (i, digit) in s.chars().enumerate() {
            let value = digit
                .to_digit(16)
                .ok_or(ParsePuzzleSeedError::InvalidDigit { digit })?;
            #[expect(clippy::cast_possible_truncation)]
            {
                bytes[i / 2] = (bytes[i / 2] << 4) | value as u8;
            }
        }
        Ok(Self(bytes))
    }
}
