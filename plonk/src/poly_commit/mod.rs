/// Module for polynomial commitment errors.
pub mod errors;

/// Module for field polynomial.
#[cfg(any(test, feature = "test-utils"))]
pub mod field_polynomial;

/// Module for KZG polynomial commitment scheme.
pub mod kzg_poly_com;

/// Module for polynomial commitment traits.
pub mod pcs;

/// Module for polynomial commitment transcript.
pub mod transcript;
