use crate::errors::{PlonkError, Result};
use crate::poly_commit::pcs::{BatchOpeningProof, OpeningProof, PolyComScheme};
use kestrel_algebra::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-utils"))]
use crate::plonk::constraint_system::ConstraintSystem;
#[cfg(any(test, feature = "test-utils"))]
use ark_std::{end_timer, start_timer};
#[cfg(any(test, feature = "test-utils"))]
use crate::poly_commit::{field_polynomial::FpPolynomial, kzg_poly_com::KZGCommitmentScheme};

/// The number of values in the batched opening at \zeta.
pub const N_BATCHED_EVALS: usize = 7;

/// The data structure of a Plonk proof.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize, Clone)]
pub struct PlonkProof<C, F> {
    /// The commitments of the wire polynomials L, R and O.
    pub cm_lro: [C; 3],
    /// The commitment of the permutation accumulator Z.
    pub cm_z: C,
    /// The split quotient polynomial commitments H0, H1 and H2.
    pub cm_h: [C; 3],
    /// The batched opening at \zeta of the folded quotient, the linearization,
    /// L, R, O, S1 and S2, with the claimed values in that order.
    pub batched_proof: BatchOpeningProof<C, F>,
    /// The opening of Z at \zeta * \omega.
    pub z_shifted_opening: OpeningProof<C, F>,
}

/// The type of the Plonk proof with a specific polynomial commitment scheme.
pub type PlonkPf<PCS> =
    PlonkProof<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

/// The claimed evaluations carried by a proof, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofEvaluations<F> {
    /// H(\zeta).
    pub quotient: F,
    /// r(\zeta), the linearization polynomial.
    pub linearized: F,
    /// L(\zeta), R(\zeta) and O(\zeta).
    pub wires: [F; 3],
    /// S1(\zeta) and S2(\zeta).
    pub sigmas: [F; 2],
    /// Z(\zeta * \omega).
    pub zu: F,
}

impl<C, F: Scalar> PlonkProof<C, F> {
    /// Read the claimed evaluations, failing if the batched opening
    /// does not carry exactly `N_BATCHED_EVALS` values.
    pub fn evaluations(&self) -> Result<ProofEvaluations<F>> {
        match self.batched_proof.claimed_values.as_slice() {
            [quotient, linearized, a, b, c, s1, s2] => Ok(ProofEvaluations {
                quotient: *quotient,
                linearized: *linearized,
                wires: [*a, *b, *c],
                sigmas: [*s1, *s2],
                zu: self.z_shifted_opening.claimed_value,
            }),
            _ => Err(PlonkError::ProofShapeError),
        }
    }
}

/// Plonk verifier parameters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlonkVerifierParams<C, F> {
    /// The size of the evaluation domain, a power of two.
    pub size: usize,
    /// The inverse of `size` in the field.
    pub size_inv: F,
    /// The generator \omega of the evaluation domain.
    pub generator: F,
    /// The commitments of the selectors, in the order ql, qr, qm, qo, qk.
    pub cm_q_vec: [C; 5],
    /// The commitments of the permutation polynomials S1, S2 and S3.
    pub cm_s_vec: [C; 3],
    /// The coset shifts u and u^2 of the second and third wire.
    pub shifter: [F; 2],
}

/// Define the PLONK verifier params by given `PolyComScheme`.
pub type PlonkVK<PCS> =
    PlonkVerifierParams<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

impl<C, F: Scalar> PlonkVerifierParams<C, F> {
    /// Check that the domain data is consistent: `size` is a power of two
    /// (at least 2), `size * size_inv = 1` and `generator` has order exactly `size`.
    pub fn check(&self) -> Result<()> {
        let n = self.size;
        if n < 2 || !n.is_power_of_two() {
            return Err(PlonkError::VerifierParamsError);
        }
        if !F::from(n as u64).mul(&self.size_inv).is_one() {
            return Err(PlonkError::VerifierParamsError);
        }
        if !self.generator.pow(&[n as u64]).is_one()
            || self.generator.pow(&[(n / 2) as u64]).is_one()
        {
            return Err(PlonkError::VerifierParamsError);
        }
        Ok(())
    }
}

/// Plonk prover parameters.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone)]
pub struct PlonkProverParams<C, F> {
    /// The polynomials of the selectors ql, qr, qm, qo and qk.
    pub q_polys: [FpPolynomial<F>; 5],
    /// The polynomials of S1, S2 and S3.
    pub s_polys: [FpPolynomial<F>; 3],
    /// The evaluations of S1, S2 and S3 over the domain.
    pub s_evals: [Vec<F>; 3],
    /// The elements of the group.
    pub group: Vec<F>,
    /// The Plonk verifier parameters.
    pub verifier_params: PlonkVerifierParams<C, F>,
}

/// Prover parameters over a particular polynomial commitment scheme.
#[cfg(any(test, feature = "test-utils"))]
pub type PlonkPK<PCS> =
    PlonkProverParams<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

#[cfg(any(test, feature = "test-utils"))]
impl<C, F> PlonkProverParams<C, F> {
    /// Return the verifier parameters.
    pub fn get_verifier_params(self) -> PlonkVerifierParams<C, F> {
        self.verifier_params
    }

    /// Return a reference of verifier parameters.
    pub fn get_verifier_params_ref(&self) -> &PlonkVerifierParams<C, F> {
        &self.verifier_params
    }
}

/// Encode the permutation value, from an index to a group element:
/// position `i * n + j` maps to `k_i * \omega^j`.
pub fn encode_perm_to_group<F: Scalar>(group: &[F], perm: &[usize], k: &[F]) -> Vec<F> {
    let n = group.len();
    perm.iter()
        .map(|pi| k[pi / n].mul(&group[pi % n]))
        .collect()
}

/// Run the Plonk indexer.
/// Before invoking indexer function, the constraint system `cs` should pad the number of
/// constraints to a power of two.
#[cfg(any(test, feature = "test-utils"))]
pub fn indexer<P: Pairing, CS: ConstraintSystem<Field = P::ScalarField>>(
    cs: &CS,
    pcs: &KZGCommitmentScheme<P>,
) -> Result<PlonkPK<KZGCommitmentScheme<P>>>
where
    P::ScalarField: Domain,
{
    let indexer_timer = start_timer!(|| "PLONK indexer");
    let n = cs.size();
    let domain =
        FpPolynomial::<P::ScalarField>::evaluation_domain(n).ok_or(PlonkError::VerifierParamsError)?;
    let generator = P::ScalarField::from_field(domain.group_gen);

    let mut group = Vec::with_capacity(n);
    let mut elem = P::ScalarField::one();
    for _ in 0..n {
        group.push(elem);
        elem.mul_assign(&generator);
    }

    // 1. selectors
    let mut q_polys = Vec::with_capacity(cs.num_selectors());
    let mut cm_q_vec = Vec::with_capacity(cs.num_selectors());
    for i in 0..cs.num_selectors() {
        let q_poly = FpPolynomial::ifft_with_domain(&domain, cs.selector(i)?);
        cm_q_vec.push(pcs.commit(&q_poly)?);
        q_polys.push(q_poly);
    }

    // 2. permutation, with the cosets 1, u, u^2
    let u = P::ScalarField::multiplicative_generator();
    let u_square = u.square();
    let k = [P::ScalarField::one(), u, u_square];
    let perm = cs.compute_permutation();
    let s_evals_flat = encode_perm_to_group(&group, &perm, &k);
    let mut s_evals = Vec::with_capacity(3);
    let mut s_polys = Vec::with_capacity(3);
    let mut cm_s_vec = Vec::with_capacity(3);
    for chunk in s_evals_flat.chunks(n) {
        let s_poly = FpPolynomial::ifft_with_domain(&domain, chunk);
        cm_s_vec.push(pcs.commit(&s_poly)?);
        s_polys.push(s_poly);
        s_evals.push(chunk.to_vec());
    }

    let size_inv = P::ScalarField::from(n as u64).inv()?;
    let verifier_params = PlonkVerifierParams {
        size: n,
        size_inv,
        generator,
        cm_q_vec: cm_q_vec
            .try_into()
            .map_err(|_| PlonkError::VerifierParamsError)?,
        cm_s_vec: cm_s_vec
            .try_into()
            .map_err(|_| PlonkError::VerifierParamsError)?,
        shifter: [u, u_square],
    };
    verifier_params.check()?;

    let prover_params = PlonkProverParams {
        q_polys: q_polys
            .try_into()
            .map_err(|_| PlonkError::VerifierParamsError)?,
        s_polys: s_polys
            .try_into()
            .map_err(|_| PlonkError::VerifierParamsError)?,
        s_evals: s_evals
            .try_into()
            .map_err(|_| PlonkError::VerifierParamsError)?,
        group,
        verifier_params,
    };
    end_timer!(indexer_timer);
    Ok(prover_params)
}

#[cfg(test)]
mod test {
    use crate::errors::PlonkError;
    use crate::plonk::{
        constraint_system::{ArithCS, ConstraintSystem},
        indexer::{encode_perm_to_group, indexer},
    };
    use crate::poly_commit::{field_polynomial::FpPolynomial, kzg_poly_com::KZGCommitmentSchemeBN254};
    use kestrel_algebra::{bn254::BN254Scalar, prelude::*};

    type F = BN254Scalar;

    #[test]
    fn test_encode_perm() {
        let g = F::from(7u32);
        let group = vec![F::one(), g];
        let k = [F::one(), F::from(5u32), F::from(25u32)];
        let values = encode_perm_to_group(&group, &[1, 2, 5, 0, 4, 3], &k);
        assert_eq!(
            values,
            vec![g, F::from(5u32), g.mul(&F::from(25u32)), F::one(), F::from(25u32), g.mul(&F::from(5u32))]
        );
    }

    #[test]
    fn test_indexer() {
        let mut prng = test_rng();
        let mut cs = ArithCS::new();
        let x = cs.new_variable(F::from(3u32));
        cs.prepare_pi_variable(x);
        let y = cs.mul(x, x);
        cs.insert_constant_gate(y, F::from(9u32));
        cs.pad();

        let pcs = KZGCommitmentSchemeBN254::new(cs.size() + 2, &mut prng);
        let params = indexer(&cs, &pcs).unwrap();
        let vk = params.get_verifier_params_ref();
        assert!(vk.check().is_ok());
        assert_eq!(vk.size, 4);
        assert_eq!(vk.shifter[0], F::from(5u32));
        assert_eq!(vk.shifter[1], F::from(25u32));
        assert_eq!(vk.cm_q_vec[0], pcs.commit(&params.q_polys[0]).unwrap());
        assert_eq!(vk.cm_s_vec[2], pcs.commit(&params.s_polys[2]).unwrap());

        // the selector polynomials interpolate the selectors over the group
        for (i, point) in params.group.iter().enumerate() {
            assert_eq!(params.q_polys[2].eval(point), cs.selector(2).unwrap()[i]);
            assert_eq!(params.s_polys[1].eval(point), params.s_evals[1][i]);
        }

        let domain = FpPolynomial::<F>::evaluation_domain(4).unwrap();
        assert_eq!(vk.generator, F::from_field(domain.group_gen));
    }

    #[test]
    fn test_verifier_params_check() {
        let mut prng = test_rng();
        let mut cs = ArithCS::<F>::new();
        let x = cs.new_variable(F::one());
        cs.insert_constant_gate(x, F::one());
        cs.pad();
        let pcs = KZGCommitmentSchemeBN254::new(cs.size() + 2, &mut prng);
        let vk = indexer(&cs, &pcs).unwrap().get_verifier_params();

        let mut bad = vk.clone();
        bad.size = 6;
        assert_eq!(bad.check(), Err(PlonkError::VerifierParamsError));

        let mut bad = vk.clone();
        bad.size_inv = F::one();
        assert_eq!(bad.check(), Err(PlonkError::VerifierParamsError));

        // \omega^2 has order n / 2
        let mut bad = vk.clone();
        bad.generator = vk.generator.square();
        assert_eq!(bad.check(), Err(PlonkError::VerifierParamsError));

        let mut bad = vk;
        bad.generator = F::from(3u32);
        assert_eq!(bad.check(), Err(PlonkError::VerifierParamsError));
    }
}
