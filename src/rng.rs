use rand::{rngs::StdRng, SeedableRng};

use crate::error::{Error, Result};

/// Create a [`StdRng`] from an explicit seed.
pub fn rng_from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Parse a seed override. `None` or an empty string means no override.
pub fn parse_seed(value: Option<&str>) -> Result<Option<u64>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|e| Error::InvalidConfig {
            field: "SEED",
            reason: format!("{s:?} is not an unsigned integer ({e})"),
        }),
    }
}

/// Seed override read from the `SEED` environment variable.
pub fn seed_from_env() -> Result<Option<u64>> {
    parse_seed(std::env::var("SEED").ok().as_deref())
}
