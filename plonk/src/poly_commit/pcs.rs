use crate::poly_commit::errors::PCSResult;
use ark_std::fmt::Debug;
use kestrel_algebra::prelude::*;
use serde::{Deserialize, Serialize};

/// The trait for help serialize to bytes,
/// implement by polynomial commitment.
pub trait ToBytes {
    /// Convert to bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// The trait for homomorphic polynomial commitment elements.
pub trait HomomorphicPolyComElem: ToBytes + Sized {
    /// This is the scalar field of the polynomial.
    type Scalar;

    /// Get base (generator) of the group.
    fn get_base() -> Self;

    /// Get identity of the group.
    fn get_identity() -> Self;

    /// Add the underlying polynomials.
    fn add(&self, other: &Self) -> Self;

    /// Add assign the underlying polynomials.
    fn add_assign(&mut self, other: &Self);

    /// Subtract the underlying polynomials.
    fn sub(&self, other: &Self) -> Self;

    /// Subtract assign the underlying polynomials.
    fn sub_assign(&mut self, other: &Self);

    /// Multiply underlying polynomial by scalar `exp`.
    fn mul(&self, exp: &Self::Scalar) -> Self;

    /// Multiply assign underlying polynomial by scalar `exp`.
    fn mul_assign(&mut self, exp: &Self::Scalar);
}

/// Proof that a committed polynomial evaluates to `claimed_value` at some point.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize, Clone)]
pub struct OpeningProof<C, F> {
    /// The commitment to the quotient (f(X) - y) / (X - x).
    pub witness: C,
    /// The claimed evaluation.
    pub claimed_value: F,
}

/// Proof that several committed polynomials evaluate to `claimed_values`
/// at one common point.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize, Clone)]
pub struct BatchOpeningProof<C, F> {
    /// The commitment to the quotient of the folded polynomial.
    pub witness: C,
    /// The claimed evaluations, one per commitment, in commitment order.
    pub claimed_values: Vec<F>,
}

/// Define the opening proof by given `PolyComScheme`.
pub type OpeningPf<PCS> =
    OpeningProof<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

/// Define the batched opening proof by given `PolyComScheme`.
pub type BatchOpeningPf<PCS> =
    BatchOpeningProof<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

/// Trait for the verifier side of a polynomial commitment scheme.
pub trait PolyComScheme: Sized {
    /// Type of prime field.
    type Field: Scalar;

    /// Type of commitment produces, need to implement `HomomorphicPolyComElem`.
    type Commitment: HomomorphicPolyComElem<Scalar = Self::Field>
        + Debug
        + PartialEq
        + Eq
        + Clone
        + Send
        + Sync
        + Serialize
        + for<'de> Deserialize<'de>;

    /// Verify that the polynomial inside `commitment` evaluates to
    /// `proof.claimed_value` on input `point`.
    fn verify(
        &self,
        commitment: &Self::Commitment,
        point: &Self::Field,
        proof: &OpeningPf<Self>,
    ) -> PCSResult<()>;

    /// Verify that each `commitments[i]` evaluates to `proof.claimed_values[i]`
    /// on the common input `point`.
    fn batch_verify_single_point(
        &self,
        commitments: &[&Self::Commitment],
        point: &Self::Field,
        proof: &BatchOpeningPf<Self>,
    ) -> PCSResult<()>;
}
