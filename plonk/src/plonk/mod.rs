//! The PLONK verifier, its SHA-256 Fiat-Shamir transcript and the test prover.

/// Module for help functions shared by the prover and the verifier.
pub mod helpers;

/// Module for the constraint system.
#[cfg(any(test, feature = "test-utils"))]
pub mod constraint_system;

/// Module for prover.
#[cfg(any(test, feature = "test-utils"))]
pub mod prover;

/// Module for indexer.
pub mod indexer;

/// Module for transcript.
pub mod transcript;

/// Module for verifier.
pub mod verifier;
