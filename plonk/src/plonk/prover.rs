use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::ConstraintSystem,
    helpers::{
        eval_pi_poly, fold_quotient_commitments, r_commitment, r_poly_or_comm, vanishing_eval,
        PlonkChallenges,
    },
    indexer::{PlonkPK, PlonkPf, PlonkProof, ProofEvaluations},
    transcript::{
        transcript_bind_commitments, transcript_get_plonk_challenge_alpha,
        transcript_get_plonk_challenge_gamma, transcript_get_plonk_challenge_zeta,
        transcript_init_plonk, ALPHA_LABEL, GAMMA_LABEL, ZETA_LABEL,
    },
};
use crate::poly_commit::{
    errors::PolyComSchemeError,
    field_polynomial::FpPolynomial,
    kzg_poly_com::{KZGCommitment, KZGCommitmentScheme},
};
use ark_std::{end_timer, start_timer};
use kestrel_algebra::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// PLONK Prover: it produces a proof that `witness` satisfies the constraint system `cs`.
///
/// The proof carries no blinding, so it is only meant to exercise the verifier.
/// It returns [PlonkError::InvalidWitness] when the witness does not satisfy `cs`,
/// and [PlonkError::Commitment] when the parameters of the polynomial commitment
/// scheme `pcs` are too short for the constraint system; `pcs` has to commit to
/// polynomials of degree `cs.size() + 1`.
pub fn prover<P: Pairing, CS: ConstraintSystem<Field = P::ScalarField>>(
    pcs: &KZGCommitmentScheme<P>,
    cs: &CS,
    prover_params: &PlonkPK<KZGCommitmentScheme<P>>,
    witness: &[P::ScalarField],
) -> Result<PlonkPf<KZGCommitmentScheme<P>>>
where
    P::ScalarField: Domain,
{
    let prover_timer = start_timer!(|| "PLONK prover");
    let verifier_params = &prover_params.verifier_params;
    let n = verifier_params.size;
    if cs.size() != n || witness.len() != cs.num_vars() {
        return Err(PlonkError::InvalidWitness);
    }
    let domain = FpPolynomial::<P::ScalarField>::evaluation_domain(n)
        .ok_or(PlonkError::VerifierParamsError)?;
    let one = P::ScalarField::one();
    let group = &prover_params.group;

    let pi: Vec<P::ScalarField> = cs
        .public_vars_witness_indices()
        .iter()
        .map(|i| witness[*i])
        .collect();
    let mut transcript = transcript_init_plonk();

    // 1. build the wire polynomials and commit
    let w_timer = start_timer!(|| "Round 1: wire polynomials");
    let extended_witness = cs.extend_witness(witness);
    let w_polys: Vec<FpPolynomial<P::ScalarField>> = extended_witness
        .chunks(n)
        .map(|evals| FpPolynomial::ifft_with_domain(&domain, evals))
        .collect();
    let cm_lro: [KZGCommitment<P::G1>; 3] = commit_polys(pcs, &w_polys)?
        .try_into()
        .map_err(|_| PlonkError::InvalidWitness)?;
    transcript_bind_commitments(&mut transcript, GAMMA_LABEL, &cm_lro)?;
    end_timer!(w_timer);

    // 2. get challenge gamma
    let gamma = transcript_get_plonk_challenge_gamma(&mut transcript)?;

    // 3. build the accumulator
    // z(\omega^{i+1}) = z(\omega^i) \prod_j (f_j + k_j \omega^i + \gamma) / (f_j + S_j(\omega^i) + \gamma)
    let z_timer = start_timer!(|| "Round 2: z polynomial");
    let k = [
        one,
        verifier_params.shifter[0],
        verifier_params.shifter[1],
    ];
    let mut z_evals = Vec::with_capacity(n);
    let mut prev = one;
    z_evals.push(prev);
    for i in 0..n - 1 {
        let mut numerator = one;
        let mut denominator = one;
        for j in 0..3 {
            let f_x = &extended_witness[j * n + i];
            numerator.mul_assign(&f_x.add(&k[j].mul(&group[i])).add(&gamma));
            denominator.mul_assign(&f_x.add(&prover_params.s_evals[j][i]).add(&gamma));
        }
        prev.mul_assign(&numerator.mul(&denominator.inv()?));
        z_evals.push(prev);
    }
    let z_poly = FpPolynomial::ifft_with_domain(&domain, &z_evals);
    let cm_z = pcs.commit(&z_poly)?;
    transcript_bind_commitments(&mut transcript, ALPHA_LABEL, core::slice::from_ref(&cm_z))?;
    end_timer!(z_timer);

    // 4. get challenge alpha
    let alpha = transcript_get_plonk_challenge_alpha(&mut transcript)?;

    // 5. build the quotient, split it into three degree-(n+1) polynomials and commit
    let t_timer = start_timer!(|| "Round 3: quotient polynomial");
    let mut pi_evals = vec![P::ScalarField::zero(); n];
    pi_evals[..pi.len()].copy_from_slice(&pi);
    let pi_poly = FpPolynomial::ifft_with_domain(&domain, &pi_evals);

    let mut l0_evals = vec![P::ScalarField::zero(); n];
    l0_evals[0] = one;
    let l0_poly = FpPolynomial::ifft_with_domain(&domain, &l0_evals);

    let t = t_poly::<P>(
        &w_polys,
        &z_poly,
        prover_params,
        &pi_poly,
        &l0_poly,
        &gamma,
        &alpha,
    );
    let mut z_h_coefs = vec![P::ScalarField::zero(); n + 1];
    z_h_coefs[0] = one.neg();
    z_h_coefs[n] = one;
    let (h_poly, rem) = t
        .div_rem(&FpPolynomial::from_coefs(z_h_coefs))
        .ok_or(PlonkError::InvalidWitness)?;
    if !rem.is_zero() {
        return Err(PlonkError::InvalidWitness);
    }
    let h_polys = split_quotient(&h_poly, n + 2)?;
    let cm_h: [KZGCommitment<P::G1>; 3] = commit_polys(pcs, &h_polys)?
        .try_into()
        .map_err(|_| PlonkError::InvalidWitness)?;
    transcript_bind_commitments(&mut transcript, ZETA_LABEL, &cm_h)?;
    end_timer!(t_timer);

    // 6. get challenge zeta
    let zeta = transcript_get_plonk_challenge_zeta(&mut transcript)?;
    let challenges = PlonkChallenges { gamma, alpha, zeta };

    // 7. evaluate at \zeta and \zeta\omega, build the linearization polynomial
    let r_timer = start_timer!(|| "Round 4: linearization polynomial");
    let zeta_omega = zeta.mul(&verifier_params.generator);
    let s_polys = &prover_params.s_polys;
    // quotient and linearized are read back from the batched opening
    let evals = ProofEvaluations {
        quotient: P::ScalarField::zero(),
        linearized: P::ScalarField::zero(),
        wires: [
            w_polys[0].eval(&zeta),
            w_polys[1].eval(&zeta),
            w_polys[2].eval(&zeta),
        ],
        sigmas: [s_polys[0].eval(&zeta), s_polys[1].eval(&zeta)],
        zu: z_poly.eval(&zeta_omega),
    };
    let (zeta_n, _) = vanishing_eval(&zeta, n)?;
    let (_, first_lagrange_eval_zeta) = eval_pi_poly(verifier_params, &pi, &zeta)?;

    let r_poly = r_poly_or_comm(
        &prover_params.q_polys,
        &s_polys[2],
        &z_poly,
        &evals,
        &challenges,
        &first_lagrange_eval_zeta,
        &verifier_params.shifter,
    );
    let cm_r = r_commitment::<KZGCommitmentScheme<P>>(
        verifier_params,
        &cm_z,
        &evals,
        &challenges,
        &first_lagrange_eval_zeta,
    );

    let zeta_n_plus_two = zeta_n.mul(&zeta.square());
    let h_folded = fold_quotient_commitments(&h_polys, &zeta_n_plus_two);
    let cm_h_folded = fold_quotient_commitments(&cm_h, &zeta_n_plus_two);
    end_timer!(r_timer);

    // 8. open
    let open_timer = start_timer!(|| "Round 5: openings");
    let batched_proof = pcs.batch_prove(
        &[
            &h_folded,
            &r_poly,
            &w_polys[0],
            &w_polys[1],
            &w_polys[2],
            &s_polys[0],
            &s_polys[1],
        ],
        &[
            &cm_h_folded,
            &cm_r,
            &cm_lro[0],
            &cm_lro[1],
            &cm_lro[2],
            &verifier_params.cm_s_vec[0],
            &verifier_params.cm_s_vec[1],
        ],
        &zeta,
    )?;
    let z_shifted_opening = pcs.prove(&z_poly, &zeta_omega)?;
    end_timer!(open_timer);

    end_timer!(prover_timer);
    Ok(PlonkProof {
        cm_lro,
        cm_z,
        cm_h,
        batched_proof,
        z_shifted_opening,
    })
}

/// Commit the polynomials, in order.
fn commit_polys<P: Pairing>(
    pcs: &KZGCommitmentScheme<P>,
    polys: &[FpPolynomial<P::ScalarField>],
) -> Result<Vec<KZGCommitment<P::G1>>> {
    #[cfg(feature = "parallel")]
    let iter = polys.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = polys.iter();

    iter.map(|poly| pcs.commit(poly).map_err(PlonkError::from))
        .collect()
}

/// Compute the polynomial vanishing on the domain for a valid witness:
/// ```text
///     ql a + qr b + qm ab + qo c + qk + PI
///     + \alpha [Z(\omega X) \prod_j (f_j + S_j + \gamma)
///               - Z(X) (a + X + \gamma)(b + uX + \gamma)(c + u^2X + \gamma)]
///     + \alpha^2 L_0(X) (Z(X) - 1)
/// ```
fn t_poly<P: Pairing>(
    w_polys: &[FpPolynomial<P::ScalarField>],
    z_poly: &FpPolynomial<P::ScalarField>,
    prover_params: &PlonkPK<KZGCommitmentScheme<P>>,
    pi_poly: &FpPolynomial<P::ScalarField>,
    l0_poly: &FpPolynomial<P::ScalarField>,
    gamma: &P::ScalarField,
    alpha: &P::ScalarField,
) -> FpPolynomial<P::ScalarField> {
    let verifier_params = &prover_params.verifier_params;
    let q = &prover_params.q_polys;
    let s = &prover_params.s_polys;
    let (a, b, c) = (&w_polys[0], &w_polys[1], &w_polys[2]);

    // 1. the gate
    let mut t = q[0].mul(a);
    t.add_assign(&q[1].mul(b));
    t.add_assign(&q[2].mul(&a.mul(b)));
    t.add_assign(&q[3].mul(c));
    t.add_assign(&q[4]);
    t.add_assign(pi_poly);

    // 2. the permutation
    let gamma_poly = FpPolynomial::from_coefs(vec![*gamma]);
    let mut perm_num = z_poly.mul_var(&verifier_params.generator);
    for (w, s_poly) in w_polys.iter().zip(s.iter()) {
        perm_num = perm_num.mul(&w.add(s_poly).add(&gamma_poly));
    }
    let mut perm_den = z_poly.clone();
    let shifts = [
        P::ScalarField::one(),
        verifier_params.shifter[0],
        verifier_params.shifter[1],
    ];
    for (w, k) in w_polys.iter().zip(shifts.iter()) {
        let id_poly = FpPolynomial::from_coefs(vec![*gamma, *k]);
        perm_den = perm_den.mul(&w.add(&id_poly));
    }
    let mut perm = perm_num.sub(&perm_den);
    perm.mul_scalar_assign(alpha);
    t.add_assign(&perm);

    // 3. the accumulator starts at one
    let mut z_minus_one = z_poly.clone();
    z_minus_one.add_coef_assign(&P::ScalarField::one().neg(), 0);
    let mut boundary = l0_poly.mul(&z_minus_one);
    boundary.mul_scalar_assign(&alpha.square());
    t.add_assign(&boundary);

    t
}

/// Split `h_poly` into three polynomials of `chunk_size` coefficients.
fn split_quotient<F: Scalar>(
    h_poly: &FpPolynomial<F>,
    chunk_size: usize,
) -> Result<[FpPolynomial<F>; 3]> {
    let coefs = h_poly.get_coefs_ref();
    if coefs.len() > 3 * chunk_size {
        return Err(PlonkError::Commitment(PolyComSchemeError::DegreeError));
    }
    let chunk = |i: usize| {
        FpPolynomial::from_coefs(
            coefs
                .iter()
                .skip(i * chunk_size)
                .take(chunk_size)
                .copied()
                .collect(),
        )
    };
    Ok([chunk(0), chunk(1), chunk(2)])
}
