use crate::poly_commit::{
    errors::{PCSResult, PolyComSchemeError},
    pcs::{BatchOpeningProof, HomomorphicPolyComElem, OpeningProof, PolyComScheme, ToBytes},
    transcript::PolyComTranscript,
};
use kestrel_algebra::{bn254::BN254PairingEngine, prelude::*};
use merlin::Transcript;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-utils"))]
use crate::poly_commit::field_polynomial::FpPolynomial;

/// The merlin label of the transcript that derives the batch folding challenge.
pub const KZG_BATCH_TRANSCRIPT_LABEL: &[u8] = b"KZG batch opening";

/// KZG commitment scheme over the `Group`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct KZGCommitment<G>(pub G);

impl<G: Group> ToBytes for KZGCommitment<G> {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_compressed_bytes()
    }
}

impl<G: Group> HomomorphicPolyComElem for KZGCommitment<G> {
    type Scalar = G::ScalarType;

    fn get_base() -> Self {
        KZGCommitment(G::get_base())
    }

    fn get_identity() -> Self {
        KZGCommitment(G::get_identity())
    }

    fn add(&self, other: &Self) -> Self {
        KZGCommitment(self.0.add(&other.0))
    }

    fn add_assign(&mut self, other: &Self) {
        self.0.add_assign(&other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        KZGCommitment(self.0.sub(&other.0))
    }

    fn sub_assign(&mut self, other: &Self) {
        self.0.sub_assign(&other.0)
    }

    fn mul(&self, exp: &G::ScalarType) -> Self {
        KZGCommitment(self.0.mul(exp))
    }

    fn mul_assign(&mut self, exp: &G::ScalarType) {
        self.0.mul_assign(exp)
    }
}

/// KZG commitment scheme about `PairingEngine`.
///
/// `public_parameter_group_1` holds `[1]_1, [s]_1, [s^2]_1, ...` and
/// `public_parameter_group_2` holds `[1]_2, [s]_2`. A verifier needs only
/// the first element of the former, see [`Self::shrink_to_verifier_only`].
#[derive(Debug, Serialize, Deserialize)]
pub struct KZGCommitmentScheme<P: Pairing> {
    /// public parameter about G1.
    pub public_parameter_group_1: Vec<P::G1>,
    /// public parameter about G2.
    pub public_parameter_group_2: Vec<P::G2>,
}

/// KZG commitment scheme over the BN254 curve
pub type KZGCommitmentSchemeBN254 = KZGCommitmentScheme<BN254PairingEngine>;

impl<P: Pairing> Clone for KZGCommitmentScheme<P> {
    fn clone(&self) -> Self {
        Self {
            public_parameter_group_1: self.public_parameter_group_1.clone(),
            public_parameter_group_2: self.public_parameter_group_2.clone(),
        }
    }
}

impl<P: Pairing> KZGCommitmentScheme<P> {
    /// Keep only `[1]_1`, `[1]_2` and `[s]_2`.
    pub fn shrink_to_verifier_only(&self) -> Self {
        Self {
            public_parameter_group_1: self.public_parameter_group_1.iter().take(1).copied().collect(),
            public_parameter_group_2: self.public_parameter_group_2.iter().take(2).copied().collect(),
        }
    }

    /// Check `e(cm - value * [1]_1, [1]_2) == e(witness, [s]_2 - point * [1]_2)`,
    /// rearranged into a single product of two pairings.
    fn check_opening(
        &self,
        cm: &P::G1,
        point: &P::ScalarField,
        value: &P::ScalarField,
        witness: &P::G1,
    ) -> PCSResult<()> {
        let (g1_0, g2_0, g2_1) = match (
            self.public_parameter_group_1.first(),
            self.public_parameter_group_2.first(),
            self.public_parameter_group_2.get(1),
        ) {
            (Some(g1_0), Some(g2_0), Some(g2_1)) => (g1_0, g2_0, g2_1),
            _ => return Err(PolyComSchemeError::ParameterError),
        };

        // cm - value * [1]_1 + point * W
        let left_first = cm.sub(&g1_0.mul(value)).add(&witness.mul(point));
        let pairing_eval =
            P::product_of_pairings(&[left_first, witness.neg()], &[*g2_0, *g2_1]);

        if pairing_eval.is_one() {
            Ok(())
        } else {
            Err(PolyComSchemeError::PCSProveEvalError)
        }
    }
}

/// Derive the folding challenge of a batched opening from the point,
/// the commitments and the claimed values.
pub(crate) fn batch_opening_challenge<C: ToBytes, F: Scalar>(
    point: &F,
    commitments: &[&C],
    values: &[F],
) -> F {
    let mut transcript = Transcript::new(KZG_BATCH_TRANSCRIPT_LABEL);
    transcript.append_field_elem(point);
    for commitment in commitments.iter() {
        transcript.append_commitment(*commitment);
    }
    for value in values.iter() {
        transcript.append_field_elem(value);
    }
    transcript.get_challenge_field_elem(b"rho")
}

impl<P: Pairing> PolyComScheme for KZGCommitmentScheme<P> {
    type Field = P::ScalarField;
    type Commitment = KZGCommitment<P::G1>;

    fn verify(
        &self,
        commitment: &Self::Commitment,
        point: &Self::Field,
        proof: &OpeningProof<Self::Commitment, Self::Field>,
    ) -> PCSResult<()> {
        self.check_opening(
            &commitment.0,
            point,
            &proof.claimed_value,
            &proof.witness.0,
        )
    }

    fn batch_verify_single_point(
        &self,
        commitments: &[&Self::Commitment],
        point: &Self::Field,
        proof: &BatchOpeningProof<Self::Commitment, Self::Field>,
    ) -> PCSResult<()> {
        if commitments.is_empty() || commitments.len() != proof.claimed_values.len() {
            return Err(PolyComSchemeError::ParameterError);
        }

        let rho = batch_opening_challenge(point, commitments, &proof.claimed_values);

        let mut folded_cm = P::G1::get_identity();
        let mut folded_value = P::ScalarField::zero();
        let mut rho_i = P::ScalarField::one();
        for (cm, value) in commitments.iter().zip(proof.claimed_values.iter()) {
            folded_cm.add_assign(&cm.0.mul(&rho_i));
            folded_value.add_assign(&value.mul(&rho_i));
            rho_i.mul_assign(&rho);
        }

        self.check_opening(&folded_cm, point, &folded_value, &proof.witness.0)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl<P: Pairing> KZGCommitmentScheme<P> {
    /// Create a new instance of a KZG polynomial commitment scheme from a
    /// locally sampled secret. Only for tests and benchmarks, since whoever
    /// runs it learns the trapdoor.
    /// `max_degree` - max degree of the polynomial,
    /// `prng` - pseudo-random generator.
    pub fn new<R: CryptoRng + RngCore>(max_degree: usize, prng: &mut R) -> KZGCommitmentScheme<P> {
        let s = P::ScalarField::random(prng);

        let mut public_parameter_group_1: Vec<P::G1> = Vec::with_capacity(max_degree + 1);
        let mut elem_g1 = P::G1::get_base();
        for _ in 0..=max_degree {
            public_parameter_group_1.push(elem_g1);
            elem_g1 = elem_g1.mul(&s);
        }

        let elem_g2 = P::G2::get_base();
        let public_parameter_group_2 = vec![elem_g2, elem_g2.mul(&s)];

        KZGCommitmentScheme {
            public_parameter_group_1,
            public_parameter_group_2,
        }
    }

    /// Return the max degree of a committable polynomial.
    pub fn max_degree(&self) -> usize {
        self.public_parameter_group_1.len().saturating_sub(1)
    }

    /// Commit to the polynomial.
    pub fn commit(
        &self,
        polynomial: &FpPolynomial<P::ScalarField>,
    ) -> PCSResult<KZGCommitment<P::G1>> {
        let coefs = polynomial.get_coefs_ref();
        let degree = polynomial.degree();

        if degree + 1 > self.public_parameter_group_1.len() {
            return Err(PolyComSchemeError::DegreeError);
        }

        let coefs_ref: Vec<&P::ScalarField> = coefs.iter().collect();
        let bases_ref: Vec<&P::G1> = self.public_parameter_group_1[0..degree + 1]
            .iter()
            .collect();

        Ok(KZGCommitment(P::G1::multi_exp(&coefs_ref, &bases_ref)))
    }

    /// Commit to `(f(X) - f(point)) / (X - point)`, returning f(point) and the witness.
    fn open(
        &self,
        polynomial: &FpPolynomial<P::ScalarField>,
        point: &P::ScalarField,
    ) -> PCSResult<(P::ScalarField, KZGCommitment<P::G1>)> {
        let eval = polynomial.eval(point);
        let numerator = polynomial.sub(&FpPolynomial::from_coefs(vec![eval]));
        let vanishing_poly = FpPolynomial::from_coefs(vec![point.neg(), P::ScalarField::one()]);
        let (q_poly, r_poly) = numerator
            .div_rem(&vanishing_poly)
            .ok_or(PolyComSchemeError::ParameterError)?;

        if !r_poly.is_zero() {
            return Err(PolyComSchemeError::PCSProveEvalError);
        }

        Ok((eval, self.commit(&q_poly)?))
    }

    /// Prove the evaluation of a polynomial at a point.
    pub fn prove(
        &self,
        polynomial: &FpPolynomial<P::ScalarField>,
        point: &P::ScalarField,
    ) -> PCSResult<OpeningProof<KZGCommitment<P::G1>, P::ScalarField>> {
        let (claimed_value, witness) = self.open(polynomial, point)?;
        Ok(OpeningProof {
            witness,
            claimed_value,
        })
    }

    /// Prove the evaluations of several polynomials at a common point.
    /// `commitments[i]` must be the commitment of `polynomials[i]`.
    pub fn batch_prove(
        &self,
        polynomials: &[&FpPolynomial<P::ScalarField>],
        commitments: &[&KZGCommitment<P::G1>],
        point: &P::ScalarField,
    ) -> PCSResult<BatchOpeningProof<KZGCommitment<P::G1>, P::ScalarField>> {
        if polynomials.is_empty() || polynomials.len() != commitments.len() {
            return Err(PolyComSchemeError::ParameterError);
        }

        let claimed_values: Vec<P::ScalarField> =
            polynomials.iter().map(|poly| poly.eval(point)).collect();
        let rho = batch_opening_challenge(point, commitments, &claimed_values);

        let mut folded = FpPolynomial::zero();
        let mut rho_i = P::ScalarField::one();
        for poly in polynomials.iter() {
            folded.add_assign(&poly.mul_scalar(&rho_i));
            rho_i.mul_assign(&rho);
        }

        let (_, witness) = self.open(&folded, point)?;
        Ok(BatchOpeningProof {
            witness,
            claimed_values,
        })
    }
}

#[cfg(test)]
mod tests_kzg_impl {
    use crate::poly_commit::{
        errors::PolyComSchemeError,
        field_polynomial::FpPolynomial,
        kzg_poly_com::{KZGCommitment, KZGCommitmentScheme, KZGCommitmentSchemeBN254},
        pcs::{HomomorphicPolyComElem, PolyComScheme},
    };
    use kestrel_algebra::{
        bn254::{BN254PairingEngine, BN254Scalar, BN254G1},
        prelude::*,
    };

    type Field = BN254Scalar;

    fn check_public_parameters_generation<P: Pairing>() {
        let param_size = 5;
        let mut prng = test_rng();
        let kzg_scheme = KZGCommitmentScheme::<P>::new(param_size, &mut prng);
        let g1_power1 = kzg_scheme.public_parameter_group_1[1];
        let g2_power1 = kzg_scheme.public_parameter_group_2[1];

        // Check parameters for G1
        for i in 0..param_size - 1 {
            let elem_first_group_1 = kzg_scheme.public_parameter_group_1[i];
            let elem_next_group_1 = kzg_scheme.public_parameter_group_1[i + 1];
            let elem_next_group_1_target = P::pairing(&elem_next_group_1, &P::G2::get_base());
            let elem_next_group_1_target_recomputed = P::pairing(&elem_first_group_1, &g2_power1);
            assert_eq!(
                elem_next_group_1_target_recomputed,
                elem_next_group_1_target
            );
        }

        // Check parameters for G2
        let elem_first_group_2 = kzg_scheme.public_parameter_group_2[0];
        let elem_second_group_2 = kzg_scheme.public_parameter_group_2[1];
        let elem_next_group_2_target = P::pairing(&P::G1::get_base(), &elem_second_group_2);
        let elem_next_group_2_target_recomputed = P::pairing(&g1_power1, &elem_first_group_2);

        assert_eq!(
            elem_next_group_2_target_recomputed,
            elem_next_group_2_target
        );
    }

    #[test]
    fn test_public_parameters() {
        check_public_parameters_generation::<BN254PairingEngine>();
    }

    #[test]
    fn test_generation_of_crs() {
        let n = 1 << 5;
        let mut prng = test_rng();
        let kzg_scheme = KZGCommitmentSchemeBN254::new(n, &mut prng);
        assert_eq!(kzg_scheme.public_parameter_group_1.len(), n + 1);
        assert_eq!(kzg_scheme.public_parameter_group_2.len(), 2);
        assert_eq!(kzg_scheme.max_degree(), n);

        let verifier_only = kzg_scheme.shrink_to_verifier_only();
        assert_eq!(verifier_only.public_parameter_group_1.len(), 1);
        assert_eq!(verifier_only.public_parameter_group_2.len(), 2);
    }

    #[test]
    fn test_homomorphic_poly_com_elem() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBN254::new(20, &mut prng);
        let one = Field::one();
        let two = one.add(&one);
        let three = two.add(&one);
        let four = three.add(&one);
        let six = three.add(&three);
        let eight = six.add(&two);
        let poly1 = FpPolynomial::from_coefs(vec![two, three, six]);
        let commitment1 = pcs.commit(&poly1).unwrap();

        let poly2 = FpPolynomial::from_coefs(vec![one, eight, four]);
        let commitment2 = pcs.commit(&poly2).unwrap();

        let poly_sum = poly1.add(&poly2);
        let commitment_sum = pcs.commit(&poly_sum).unwrap();
        assert_eq!(commitment_sum, commitment1.add(&commitment2));

        let exponent = four.add(&one);
        let poly1_mult_5 = poly1.mul_scalar(&exponent);
        let commitment_poly1_mult_5 = pcs.commit(&poly1_mult_5).unwrap();
        assert_eq!(commitment_poly1_mult_5, commitment1.mul(&exponent));
    }

    #[test]
    fn test_commit() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBN254::new(10, &mut prng);
        let one = Field::one();
        let two = one.add(&one);
        let three = two.add(&one);
        let six = three.add(&three);

        let fq_poly = FpPolynomial::from_coefs(vec![two, three, six]);
        let commitment = pcs.commit(&fq_poly).unwrap();

        // Doing the multiexp by hand
        let mut expected_committed_value = BN254G1::get_identity();
        for (i, coef) in fq_poly.get_coefs_ref().iter().enumerate() {
            let g_i = pcs.public_parameter_group_1[i];
            expected_committed_value = expected_committed_value.add(&g_i.mul(coef));
        }
        assert_eq!(expected_committed_value, commitment.0);

        let too_long = FpPolynomial::from_coefs(vec![one; 12]);
        assert_eq!(pcs.commit(&too_long), Err(PolyComSchemeError::DegreeError));
    }

    #[test]
    fn test_single_opening() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBN254::new(10, &mut prng);
        let poly = FpPolynomial::from_coefs((0..8).map(|_| Field::random(&mut prng)).collect());
        let cm = pcs.commit(&poly).unwrap();
        let point = Field::random(&mut prng);

        let proof = pcs.prove(&poly, &point).unwrap();
        assert_eq!(proof.claimed_value, poly.eval(&point));

        let verifier = pcs.shrink_to_verifier_only();
        assert!(verifier.verify(&cm, &point, &proof).is_ok());

        // wrong point
        let other_point = point.add(&Field::one());
        assert_eq!(
            verifier.verify(&cm, &other_point, &proof),
            Err(PolyComSchemeError::PCSProveEvalError)
        );

        // wrong value
        let mut bad_proof = proof.clone();
        bad_proof.claimed_value.add_assign(&Field::one());
        assert_eq!(
            verifier.verify(&cm, &point, &bad_proof),
            Err(PolyComSchemeError::PCSProveEvalError)
        );

        // wrong commitment
        let other_cm = KZGCommitment(cm.0.double());
        assert!(verifier.verify(&other_cm, &point, &proof).is_err());

        // no public parameters at all
        let empty = KZGCommitmentSchemeBN254 {
            public_parameter_group_1: vec![],
            public_parameter_group_2: vec![],
        };
        assert_eq!(
            empty.verify(&cm, &point, &proof),
            Err(PolyComSchemeError::ParameterError)
        );
    }

    #[test]
    fn test_batch_opening() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBN254::new(16, &mut prng);
        let polys: Vec<FpPolynomial<Field>> = (0..5)
            .map(|i| {
                FpPolynomial::from_coefs((0..(3 + 2 * i)).map(|_| Field::random(&mut prng)).collect())
            })
            .collect();
        let cms: Vec<KZGCommitment<BN254G1>> =
            polys.iter().map(|p| pcs.commit(p).unwrap()).collect();
        let polys_ref: Vec<&FpPolynomial<Field>> = polys.iter().collect();
        let cms_ref: Vec<&KZGCommitment<BN254G1>> = cms.iter().collect();
        let point = Field::random(&mut prng);

        let proof = pcs.batch_prove(&polys_ref, &cms_ref, &point).unwrap();
        for (poly, value) in polys.iter().zip(proof.claimed_values.iter()) {
            assert_eq!(poly.eval(&point), *value);
        }

        let verifier = pcs.shrink_to_verifier_only();
        assert!(verifier
            .batch_verify_single_point(&cms_ref, &point, &proof)
            .is_ok());

        // wrong point
        assert_eq!(
            verifier.batch_verify_single_point(&cms_ref, &point.add(&Field::one()), &proof),
            Err(PolyComSchemeError::PCSProveEvalError)
        );

        // one wrong value
        let mut bad_proof = proof.clone();
        bad_proof.claimed_values[3].add_assign(&Field::one());
        assert_eq!(
            verifier.batch_verify_single_point(&cms_ref, &point, &bad_proof),
            Err(PolyComSchemeError::PCSProveEvalError)
        );

        // swapped commitments
        let mut swapped = cms_ref.clone();
        swapped.swap(0, 1);
        assert!(verifier
            .batch_verify_single_point(&swapped, &point, &proof)
            .is_err());

        // mismatched lengths
        assert_eq!(
            verifier.batch_verify_single_point(&cms_ref[..4], &point, &proof),
            Err(PolyComSchemeError::ParameterError)
        );
        assert_eq!(
            pcs.batch_prove(&polys_ref[..4], &cms_ref, &point).err(),
            Some(PolyComSchemeError::ParameterError)
        );
    }
}
