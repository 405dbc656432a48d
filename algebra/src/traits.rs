use crate::prelude::*;
use ark_ff::FftField;
use ark_std::fmt::Debug;
use serde::{Deserialize, Serialize};

/// The trait for scalars
pub trait Scalar:
    Copy
    + Default
    + Debug
    + PartialEq
    + Eq
    + Serialize
    + for<'de> Deserialize<'de>
    + Clone
    + One
    + Zero
    + Sized
    + Add<Self, Output = Self>
    + Mul<Self, Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + From<u32>
    + From<u64>
    + Neg<Output = Self>
    + Sync
    + Send
{
    /// Return a random scalar
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Interpret the bytes as a big-endian integer and reduce it modulo the field order.
    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self;

    /// Return multiplicative generator of order r - 1
    fn multiplicative_generator() -> Self;

    /// Return the len of the byte representation
    fn bytes_len() -> usize;

    /// Convert to little-endian bytes
    fn to_bytes(&self) -> Vec<u8>;

    /// Convert from little-endian bytes, rejecting non-canonical encodings
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// The canonical big-endian encoding, always `bytes_len()` long.
    fn to_be_bytes(&self) -> Vec<u8>;

    /// Return the modular inverse of the scalar if it exists
    fn inv(&self) -> Result<Self>;

    /// Return the square of the field element
    fn square(&self) -> Self;

    /// Raise to the power `exponent`, given as u64 limbs, least significant first.
    fn pow(&self, exponent: &[u64]) -> Self;
}

/// The trait for domain.
pub trait Domain: Scalar {
    /// The underlying arkworks field.
    type Field: FftField;

    /// Return the underlying field element.
    fn get_field(&self) -> Self::Field;

    /// Wrap an arkworks field element.
    fn from_field(field: Self::Field) -> Self;
}

/// The trait for group elements
pub trait Group:
    Debug
    + Default
    + Copy
    + Sized
    + PartialEq
    + Eq
    + Clone
    + Send
    + Sync
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self::ScalarType, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self::ScalarType>
    + Neg<Output = Self>
    + Serialize
    + for<'de> Deserialize<'de>
{
    /// The scalar type
    type ScalarType: Scalar;

    /// The number of bytes for a compressed representation of a group element
    const COMPRESSED_LEN: usize;

    /// Return the doubling of the group element
    fn double(&self) -> Self;

    /// Return the identity element (i.e., 0 * G)
    fn get_identity() -> Self;

    /// Return the base element (i.e., 1 * G)
    fn get_base() -> Self;

    /// Return a random element
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Convert to bytes in the compressed representation
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Convert from bytes in the compressed representation, checking curve and subgroup membership
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self>;

    /// Compute the multiscalar multiplication
    #[inline]
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        scalars
            .iter()
            .zip(points.iter())
            .fold(Self::get_identity(), |acc, (s, p)| acc.add(&p.mul(s)))
    }
}

/// The trait for a pair of groups for pairing
pub trait Pairing {
    /// The scalar type
    type ScalarField: Scalar;

    /// The first group
    type G1: Group<ScalarType = Self::ScalarField>;

    /// The second group
    type G2: Group<ScalarType = Self::ScalarField>;

    /// The target group, written multiplicatively
    type Gt: Copy + Debug + PartialEq + Eq + One + Send + Sync;

    /// The pairing operation
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt;

    /// The product of pairings, sharing a single final exponentiation
    fn product_of_pairings(a: &[Self::G1], b: &[Self::G2]) -> Self::Gt;
}
