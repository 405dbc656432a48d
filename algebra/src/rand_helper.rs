use rand_chacha::{
    rand_core::{CryptoRng, RngCore, SeedableRng},
    ChaChaRng,
};

/// The environment variable that pins `test_rng` to a fixed seed.
const DETERMINISTIC_TEST_RNG: &str = "DETERMINISTIC_TEST_RNG";

fn fixed_seed_rng() -> ChaChaRng {
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(b"kestrel!");
    ChaChaRng::from_seed(seed)
}

/// Should be used only for tests, not for any real world usage.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    fixed_seed_rng()
}

/// Should be used only for tests, not for any real world usage.
///
/// Seeded from the OS unless `DETERMINISTIC_TEST_RNG=1` is set.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    match std::env::var(DETERMINISTIC_TEST_RNG) {
        Ok(val) if val == "1" => fixed_seed_rng(),
        _ => ChaChaRng::from_entropy(),
    }
}
