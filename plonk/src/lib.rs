//! Verifier for PLONK proofs with KZG polynomial commitments over BN254.
//!
//! The `test-utils` feature additionally builds a small arithmetic
//! constraint system, an indexer and a prover that produce proofs this
//! verifier accepts.
#![deny(missing_docs)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]

/// Module for the errors of the verifier.
pub mod errors;

/// Module for the PLONK protocol.
pub mod plonk;

/// Module for polynomial commitments.
pub mod poly_commit;

pub use errors::{OpeningPoint, PlonkError};
