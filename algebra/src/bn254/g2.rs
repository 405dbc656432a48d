use crate::bn254::BN254Scalar;
use crate::prelude::*;
use ark_bn254::{G2Affine, G2Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};

/// The wrapped struct for ark_bn254::G2Projective
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BN254G2(pub(crate) G2Projective);

bn254_group!(BN254G2, G2Projective, G2Affine, 64);
