use crate::bn254::BN254Scalar;
use crate::prelude::*;
use ark_bn254::{G1Affine, G1Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};

/// The wrapped struct for ark_bn254::G1Projective
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BN254G1(pub(crate) G1Projective);

bn254_group!(BN254G1, G1Projective, G1Affine, 32);
