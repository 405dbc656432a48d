use crate::prelude::*;
use ark_bn254::Fq12;

/// The wrapped struct for `ark_bn254::Fq12`, which is the pairing result.
/// The group law is written multiplicatively.
#[derive(Copy, Default, Clone, PartialEq, Eq, Debug)]
pub struct BN254Gt(pub(crate) Fq12);

impl Mul for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl One for BN254Gt {
    #[inline]
    fn one() -> Self {
        Self(Fq12::one())
    }
}
