use crate::bn254::BN254_SCALAR_LEN;
use crate::prelude::*;
use ark_bn254::Fr;
use ark_ff::{BigInteger, FftField, Field, PrimeField};
use ark_serialize::CanonicalDeserialize;
use ark_std::fmt::Debug;

/// The wrapped struct for `ark_bn254::Fr`
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BN254Scalar(pub(crate) Fr);

/// Printed as the canonical integer in decimal.
impl Debug for BN254Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "{}", self.0.into_bigint())
    }
}

impl One for BN254Scalar {
    #[inline]
    fn one() -> Self {
        BN254Scalar(Fr::one())
    }
}

impl Zero for BN254Scalar {
    #[inline]
    fn zero() -> Self {
        Self(Fr::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> Add<&'a BN254Scalar> for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> AddAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += rhs.0;
    }
}

impl<'a> Sub<&'a BN254Scalar> for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> SubAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= rhs.0;
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn mul(self, rhs: &Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        self.0 *= rhs.0;
    }
}

impl Neg for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<u32> for BN254Scalar {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from(value as u64)
    }
}

impl From<u64> for BN254Scalar {
    #[inline]
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl Scalar for BN254Scalar {
    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    #[inline]
    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Self(Fr::GENERATOR)
    }

    #[inline]
    fn bytes_len() -> usize {
        BN254_SCALAR_LEN
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_le()
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::bytes_len() {
            return Err(AlgebraError::DeserializationError);
        }
        Fr::deserialize_compressed(bytes)
            .map(Self)
            .map_err(|_| AlgebraError::DeserializationError)
    }

    #[inline]
    fn to_be_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_be()
    }

    #[inline]
    fn inv(&self) -> Result<Self> {
        self.0
            .inverse()
            .map(Self)
            .ok_or(AlgebraError::GroupInversionError)
    }

    #[inline]
    fn pow(&self, exponent: &[u64]) -> Self {
        Self(self.0.pow(exponent))
    }

    #[inline]
    fn square(&self) -> Self {
        Self(self.0.square())
    }
}

impl Domain for BN254Scalar {
    type Field = Fr;

    #[inline]
    fn get_field(&self) -> Self::Field {
        self.0
    }

    #[inline]
    fn from_field(field: Self::Field) -> Self {
        Self(field)
    }
}
