/// The number of bytes for a scalar value over BN254.
pub const BN254_SCALAR_LEN: usize = 32;

/// Implements `Group` and the operator traits for a wrapper around an
/// arkworks BN254 projective point.
macro_rules! bn254_group {
    ($name:ident, $projective:ty, $affine:ty, $compressed_len:expr) => {
        impl ark_std::fmt::Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
                <$affine as ark_std::fmt::Display>::fmt(&self.0.into_affine(), f)
            }
        }

        impl Group for $name {
            type ScalarType = BN254Scalar;
            const COMPRESSED_LEN: usize = $compressed_len;

            #[inline]
            fn double(&self) -> Self {
                Self(ark_ec::Group::double(&self.0))
            }

            #[inline]
            fn get_identity() -> Self {
                Self(<$projective>::zero())
            }

            #[inline]
            fn get_base() -> Self {
                Self(<$projective as ark_ec::Group>::generator())
            }

            #[inline]
            fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
                Self(<$projective>::rand(prng))
            }

            #[inline]
            fn to_compressed_bytes(&self) -> Vec<u8> {
                let affine = <$affine>::from(self.0);
                let mut buf = Vec::with_capacity($compressed_len);
                affine.serialize_with_mode(&mut buf, Compress::Yes).unwrap();

                buf
            }

            #[inline]
            fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $compressed_len {
                    return Err(AlgebraError::DeserializationError);
                }
                let affine = <$affine>::deserialize_with_mode(bytes, Compress::Yes, Validate::Yes)
                    .map_err(|_| AlgebraError::DeserializationError)?;

                Ok(Self(<$projective>::from(affine)))
            }

            #[inline]
            fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
                if scalars.len() != points.len() {
                    return Self::get_identity();
                }
                let scalars_raw: Vec<_> = scalars.iter().map(|r| r.0).collect();
                let points_raw = <$projective>::normalize_batch(
                    &points.iter().map(|r| r.0).collect::<Vec<$projective>>(),
                );

                Self(<$projective as VariableBaseMSM>::msm_unchecked(&points_raw, &scalars_raw))
            }
        }

        impl<'a> Add<&'a $name> for $name {
            type Output = $name;

            #[inline]
            fn add(self, rhs: &Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl<'a> Sub<&'a $name> for $name {
            type Output = $name;

            #[inline]
            fn sub(self, rhs: &Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl<'a> Mul<&'a BN254Scalar> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: &BN254Scalar) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl<'a> AddAssign<&'a $name> for $name {
            #[inline]
            fn add_assign(&mut self, rhs: &'a $name) {
                self.0 += rhs.0
            }
        }

        impl<'a> SubAssign<&'a $name> for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: &'a $name) {
                self.0 -= rhs.0
            }
        }

        impl<'a> MulAssign<&'a BN254Scalar> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: &'a BN254Scalar) {
                self.0 *= rhs.0
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }
    };
}

mod fr;
pub use fr::*;

mod g1;
pub use g1::*;

mod g2;
pub use g2::*;

mod gt;
pub use gt::*;

mod pairing;
pub use pairing::*;

#[cfg(test)]
mod bn254_groups_test {
    use crate::bn254::{BN254Gt, BN254PairingEngine, BN254Scalar, BN254G1, BN254G2};
    use crate::prelude::*;

    #[test]
    fn scalar_field_ops() {
        let mut prng = test_rng();
        let a = BN254Scalar::random(&mut prng);
        let b = BN254Scalar::random(&mut prng);

        assert_eq!(a.add(&b).sub(&b), a);
        assert!(a.add(&a.neg()).is_zero());
        assert_eq!(a.square(), a.mul(&a));
        assert!(a.mul(&a.inv().unwrap()).is_one());
        assert_eq!(
            BN254Scalar::zero().inv(),
            Err(AlgebraError::GroupInversionError)
        );

        // 2^64 + 3 spans two limbs
        let three = BN254Scalar::from(3u32);
        let two_64 = BN254Scalar::from(1u64 << 32).square();
        assert_eq!(
            three.pow(&[3, 1]),
            three.pow(&[3]).mul(&three.pow(&[0, 1]))
        );
        assert_eq!(three.pow(&[0, 1]), three.pow(&[1 << 32]).pow(&[1 << 32]));
        assert_eq!(BN254Scalar::from(2u32).pow(&[64]), two_64);
        assert_eq!(format!("{:?}", BN254Scalar::from(1234u32)), "1234");
    }

    #[test]
    fn scalar_rejects_bad_encodings() {
        assert_eq!(BN254Scalar::bytes_len(), 32);
        let too_large = vec![0xffu8; 32];
        assert!(BN254Scalar::from_bytes(&too_large).is_err());
        assert!(BN254Scalar::from_bytes(&[1u8; 31]).is_err());
    }

    #[test]
    fn scalar_from_to_bytes() {
        let small_value = BN254Scalar::from(165747u32);
        let small_value_bytes = small_value.to_bytes();
        let expected_small_value_bytes: [u8; 32] = [
            115, 135, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0,
        ];
        assert_eq!(small_value_bytes, expected_small_value_bytes);

        let small_value_from_bytes = BN254Scalar::from_bytes(&small_value_bytes).unwrap();
        assert_eq!(small_value_from_bytes, small_value);

        let mut be = expected_small_value_bytes.to_vec();
        be.reverse();
        assert_eq!(small_value.to_be_bytes(), be);
    }

    #[test]
    fn hash_reduction_wraps_modulus() {
        // r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
        let mut r_plus_one_be = BN254Scalar::zero().sub(&BN254Scalar::one()).to_be_bytes();
        // r - 1 is even, so adding two to the last byte cannot carry.
        r_plus_one_be[31] += 2;
        assert_eq!(
            BN254Scalar::from_be_bytes_mod_order(&r_plus_one_be),
            BN254Scalar::one()
        );
        assert_eq!(
            BN254Scalar::multiplicative_generator(),
            BN254Scalar::from(5u32)
        );
    }

    #[test]
    fn multiexp_matches_naive_sum() {
        let mut prng = test_rng();
        assert_eq!(BN254G1::multi_exp(&[], &[]), BN254G1::get_identity());

        let scalars: Vec<BN254Scalar> = (0..5).map(|_| BN254Scalar::random(&mut prng)).collect();
        let points: Vec<BN254G1> = (0..5).map(|_| BN254G1::random(&mut prng)).collect();
        let mut expected = BN254G1::get_identity();
        for (s, p) in scalars.iter().zip(points.iter()) {
            expected.add_assign(&p.mul(s));
        }
        let scalars_ref: Vec<&BN254Scalar> = scalars.iter().collect();
        let points_ref: Vec<&BN254G1> = points.iter().collect();
        assert_eq!(BN254G1::multi_exp(&scalars_ref, &points_ref), expected);

        let g2 = BN254G2::get_base();
        let two = BN254Scalar::from(2u32);
        assert_eq!(BN254G2::multi_exp(&[&two], &[&g2]), g2.double());
    }

    #[test]
    fn bilinear_properties() {
        let identity_g1 = BN254G1::get_identity();
        let identity_g2 = BN254G2::get_identity();
        let identity_gt_computed = BN254PairingEngine::pairing(&identity_g1, &identity_g2);
        assert!(identity_gt_computed.is_one());

        let mut prng = test_rng();

        let s1 = BN254Scalar::from(50 + prng.next_u32() % 50);
        let s2 = BN254Scalar::from(50 + prng.next_u32() % 50);

        let base_g1 = BN254G1::get_base();
        let base_g2 = BN254G2::get_base();

        let s1_base_g1 = base_g1.mul(&s1);
        let s2_base_g2 = base_g2.mul(&s2);
        let s1s2 = s1.mul(&s2);

        let gt_mapped_element = BN254PairingEngine::pairing(&s1_base_g1, &s2_base_g2);
        assert_eq!(
            gt_mapped_element,
            BN254PairingEngine::pairing(&base_g1.mul(&s1s2), &base_g2)
        );
        assert_eq!(
            gt_mapped_element,
            BN254PairingEngine::pairing(&base_g1, &base_g2.mul(&s1s2))
        );
        assert_ne!(gt_mapped_element, BN254Gt::one());

        let product = BN254PairingEngine::product_of_pairings(
            &[s1_base_g1, s1_base_g1.neg()],
            &[s2_base_g2, s2_base_g2],
        );
        assert!(product.is_one());
    }

    #[test]
    fn test_serialization_of_points() {
        let mut prng = test_rng();

        let g1 = BN254G1::random(&mut prng);
        let g1_bytes = g1.to_compressed_bytes();
        assert_eq!(g1_bytes.len(), BN254G1::COMPRESSED_LEN);
        let g1_recovered = BN254G1::from_compressed_bytes(&g1_bytes).unwrap();
        assert_eq!(g1, g1_recovered);
        assert!(BN254G1::from_compressed_bytes(&g1_bytes[1..]).is_err());

        let g2 = BN254G2::random(&mut prng);
        let g2_bytes = g2.to_compressed_bytes();
        assert_eq!(g2_bytes.len(), BN254G2::COMPRESSED_LEN);
        let g2_recovered = BN254G2::from_compressed_bytes(&g2_bytes).unwrap();
        assert_eq!(g2, g2_recovered);
    }
}
