use std::{convert::Infallible, fmt, str::FromStr};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const LCG_ZERO_SEED_REPLACEMENT: u32 = 123_456_789;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seed for deterministic tile spawning.
///
/// A seed is derived from an external token (a command-line argument, a
/// recording, a test fixture):
///
/// - a numeric token is converted to `u32` by truncating toward zero and
///   wrapping modulo 2^32 (`-1` becomes `4294967295`);
/// - an empty, non-numeric or numerically zero token is hashed with FNV-1a
///   over its UTF-16 code units.
///
/// The original token is kept so that it can be shown and recorded.
///
/// # Example
///
/// ```
/// use lineshift_engine::TileSeed;
///
/// assert_eq!(TileSeed::from_token("42").value(), 42);
/// assert_eq!(TileSeed::from_token("-1").value(), u32::MAX);
/// assert_eq!(TileSeed::from_token("abc").value(), 0x1a47_e90b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileSeed {
    token: String,
    value: u32,
}

impl TileSeed {
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let value = numeric_seed(token).unwrap_or_else(|| hash_token(token));
        Self {
            token: token.to_owned(),
            value,
        }
    }

    /// Generates a fresh decimal seed token from the OS random source.
    #[must_use]
    pub fn random() -> Self {
        let value: u32 = rand::rng().random_range(1..=u32::MAX);
        Self::from_token(&value.to_string())
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for TileSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl FromStr for TileSeed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl Serialize for TileSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.token)
    }
}

impl<'de> Deserialize<'de> for TileSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from_token(&token))
    }
}

/// Parses a numeric token, returning `None` when the token must be hashed.
fn numeric_seed(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let (negative, digits) = match token.as_bytes()[0] {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let radix = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    let number = if digits == "Infinity" {
        f64::INFINITY
    } else if let Some(radix) = radix {
        // Signed prefixed tokens are not numbers.
        if digits.len() != token.len() {
            return None;
        }
        let body = &digits[2..];
        if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let number = u128::from_str_radix(body, radix).ok()? as f64;
        number
    } else {
        // The sign was stripped above; only the exponent may carry another.
        let starts_like_number = digits
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_digit() || b == b'.');
        let is_decimal = starts_like_number
            && digits
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
        if !is_decimal {
            return None;
        }
        digits.parse::<f64>().ok()?
    };

    let number = if negative { -number } else { number };
    if number == 0.0 {
        return None;
    }
    Some(to_uint32(number))
}

/// Converts a number to `u32` by truncation and wrapping modulo 2^32.
fn to_uint32(number: f64) -> u32 {
    if !number.is_finite() {
        return 0;
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = number.trunc().rem_euclid(TWO_POW_32) as u32;
    value
}

/// FNV-1a fold over the first UTF-16 code unit of every character.
fn hash_token(token: &str) -> u32 {
    let mut buf = [0; 2];
    token.chars().fold(FNV_OFFSET_BASIS, |hash, ch| {
        let unit = ch.encode_utf16(&mut buf)[0];
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Linear congruential generator driving seeded sessions.
///
/// Pure `u32` wrapping arithmetic keeps the sequence identical on every
/// platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 {
            LCG_ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    /// Advances the state and returns it scaled to `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / TWO_POW_32
    }
}

/// Source of uniform draws in `[0, 1)` for tile spawning.
///
/// Seeded sessions use the [`Lcg`] so that they can be replayed exactly;
/// unseeded sessions draw from a PCG generator seeded by the OS.
#[derive(Debug, Clone)]
pub enum TileRng {
    Seeded(Lcg),
    Entropy(Pcg32),
}

impl TileRng {
    /// Creates a generator from an optional seed.
    #[must_use]
    pub fn new(seed: Option<&TileSeed>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    #[must_use]
    pub fn from_seed(seed: &TileSeed) -> Self {
        TileRng::Seeded(Lcg::new(seed.value()))
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        TileRng::Entropy(Pcg32::from_rng(&mut rand::rng()))
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self, TileRng::Seeded(_))
    }

    /// Returns the next uniform value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        match self {
            TileRng::Seeded(lcg) => lcg.next_unit(),
            TileRng::Entropy(rng) => rng.random::<f64>(),
        }
    }
}
