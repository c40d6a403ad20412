//! Rows written to and read from the benchmark table.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

pub const VARCHAR_LEN: usize = 20;
pub const INT_BOUND: i32 = 100_000;
pub const DECIMAL_BOUND: u32 = 100_000;
pub const DECIMAL_SCALE: i32 = 2;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq)]
pub struct TestRow {
    /// Assigned by the database; 0 for rows not yet inserted.
    pub id: i64,
    pub varchar: String,
    pub int: i32,
    pub decimal: f64,
    /// Unix seconds.
    pub created_at: i64,
}

impl TestRow {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, created_at: i64) -> Self {
        Self {
            id: 0,
            varchar: random_string(rng, VARCHAR_LEN),
            int: rng.gen_range(0..INT_BOUND),
            decimal: random_decimal(rng, DECIMAL_BOUND, DECIMAL_SCALE),
            created_at,
        }
    }
}

pub fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Uniform value in `[0, bound)` floored to `scale` decimal places.
pub fn random_decimal<R: Rng + ?Sized>(rng: &mut R, bound: u32, scale: i32) -> f64 {
    let whole = f64::from(rng.gen_range(0..bound));
    let frac: f64 = rng.gen();
    let factor = 10f64.powi(scale);
    ((whole + frac) * factor).floor() / factor
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
