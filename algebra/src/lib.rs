//! Field, group and pairing arithmetic over BN254, wrapped behind small
//! traits so that the PLONK verifier stays generic over the curve.
#![deny(missing_docs)]
#![allow(clippy::upper_case_acronyms)]

/// Module for the BN254 curve
pub mod bn254;

/// Module for error handling
pub mod errors;

/// Module for the prelude
pub mod prelude;

/// Module for serialization of scalars and group elements
pub mod serialization;

/// Module for traits
pub mod traits;

mod rand_helper;

pub use ark_std::{borrow, fmt, iter, ops, rand, One, UniformRand, Zero};
