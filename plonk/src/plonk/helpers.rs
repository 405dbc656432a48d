use crate::errors::{PlonkError, Result};
use crate::plonk::indexer::{PlonkVK, PlonkVerifierParams, ProofEvaluations};
use crate::poly_commit::pcs::{HomomorphicPolyComElem, PolyComScheme};
use kestrel_algebra::prelude::*;

/// The data structure for challenges in Plonk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlonkChallenges<F> {
    /// The permutation challenge.
    pub gamma: F,
    /// The constraint folding challenge.
    pub alpha: F,
    /// The evaluation point.
    pub zeta: F,
}

/// Return `(\zeta^n, Z_H(\zeta) = \zeta^n - 1)`, rejecting \zeta in the domain.
pub(crate) fn vanishing_eval<F: Scalar>(zeta: &F, n: usize) -> Result<(F, F)> {
    let zeta_n = zeta.pow(&[n as u64]);
    let z_h_eval_zeta = zeta_n.sub(&F::one());
    if z_h_eval_zeta.is_zero() {
        return Err(PlonkError::DivisionByZero);
    }
    Ok((zeta_n, z_h_eval_zeta))
}

/// Compute `PI(\zeta) = \sum_i w_i L_i(\zeta)` and `L_0(\zeta)`, where
/// `L_i` is the i-th Lagrange basis polynomial of the domain.
///
/// Starts from `L_0(\zeta) = (\zeta^n - 1) / (n (\zeta - 1))` and walks
/// `L_{i+1}(\zeta) = L_i(\zeta) \omega (\zeta - \omega^i) / (\zeta - \omega^{i+1})`,
/// one inversion per public input.
pub fn eval_pi_poly<C, F: Scalar>(
    verifier_params: &PlonkVerifierParams<C, F>,
    public_inputs: &[F],
    zeta: &F,
) -> Result<(F, F)> {
    let one = F::one();
    let z_h_eval_zeta = zeta.pow(&[verifier_params.size as u64]).sub(&one);

    let mut denominator = zeta.sub(&one);
    let denominator_inv = denominator.inv().map_err(|_| PlonkError::DivisionByZero)?;
    let first_lagrange_eval_zeta = z_h_eval_zeta
        .mul(&denominator_inv)
        .mul(&verifier_params.size_inv);

    let mut eval = F::zero();
    let mut lagrange = first_lagrange_eval_zeta;
    let mut root_to_i = one;
    for (i, public_value) in public_inputs.iter().enumerate() {
        eval.add_assign(&lagrange.mul(public_value));
        if i + 1 == public_inputs.len() {
            break;
        }
        // denominator holds \zeta - \omega^i here
        root_to_i.mul_assign(&verifier_params.generator);
        let next_denominator = zeta.sub(&root_to_i);
        let next_denominator_inv = next_denominator
            .inv()
            .map_err(|_| PlonkError::DivisionByZero)?;
        lagrange = lagrange
            .mul(&verifier_params.generator)
            .mul(&denominator)
            .mul(&next_denominator_inv);
        denominator = next_denominator;
    }
    Ok((eval, first_lagrange_eval_zeta))
}

/// Check the claimed quotient evaluation:
/// ```text
///     H(\zeta) = (r(\zeta) + PI(\zeta)
///                 + \alpha Z(\zeta\omega) (a + S1 + \gamma)(b + S2 + \gamma)(c + \gamma)
///                 - \alpha^2 L_0(\zeta)) / (\zeta^n - 1)
/// ```
pub fn check_quotient_eval<F: Scalar>(
    evals: &ProofEvaluations<F>,
    challenges: &PlonkChallenges<F>,
    pi_eval_zeta: &F,
    first_lagrange_eval_zeta: &F,
    z_h_eval_zeta: &F,
) -> Result<()> {
    let gamma = &challenges.gamma;
    let alpha = &challenges.alpha;
    let [a, b, c] = &evals.wires;
    let [s1, s2] = &evals.sigmas;

    let t1 = alpha
        .mul(&evals.zu)
        .mul(&a.add(s1).add(gamma))
        .mul(&b.add(s2).add(gamma))
        .mul(&c.add(gamma));
    let t2 = alpha.square().mul(first_lagrange_eval_zeta);

    let z_h_inv = z_h_eval_zeta
        .inv()
        .map_err(|_| PlonkError::DivisionByZero)?;
    let expected = evals
        .linearized
        .add(pi_eval_zeta)
        .add(&t1)
        .sub(&t2)
        .mul(&z_h_inv);

    if expected != evals.quotient {
        return Err(PlonkError::QuotientMismatch);
    }
    Ok(())
}

/// Compute the linearization polynomial or its commitment:
/// ```text
///     a Ql + b Qr + ab Qm + c Qo + Qk
///     + \alpha Z(\zeta\omega) (a + S1 + \gamma)(b + S2 + \gamma) S3
///     + (\alpha^2 L_0(\zeta) - \alpha (a + \zeta + \gamma)(b + u\zeta + \gamma)(c + u^2\zeta + \gamma)) Z
/// ```
pub(crate) fn r_poly_or_comm<F: Scalar, PCSType: HomomorphicPolyComElem<Scalar = F>>(
    q_polys_or_comms: &[PCSType],
    last_s_poly_or_comm: &PCSType,
    z_poly_or_comm: &PCSType,
    evals: &ProofEvaluations<F>,
    challenges: &PlonkChallenges<F>,
    first_lagrange_eval_zeta: &F,
    shifter: &[F; 2],
) -> PCSType {
    let gamma = &challenges.gamma;
    let alpha = &challenges.alpha;
    let zeta = &challenges.zeta;
    let [a, b, c] = &evals.wires;
    let [s1, s2] = &evals.sigmas;

    // 1. the gate, with the selector multipliers a, b, ab, c, 1
    let multipliers = [*a, *b, a.mul(b), *c, F::one()];
    let mut l = PCSType::get_identity();
    for (q, w) in q_polys_or_comms.iter().zip(multipliers.iter()) {
        l.add_assign(&q.mul(w));
    }

    // 2. the last permutation polynomial
    let s_last_scalar = alpha
        .mul(&evals.zu)
        .mul(&a.add(s1).add(gamma))
        .mul(&b.add(s2).add(gamma));
    l.add_assign(&last_s_poly_or_comm.mul(&s_last_scalar));

    // 3. the accumulator
    let id_product = alpha
        .mul(&a.add(zeta).add(gamma))
        .mul(&b.add(&shifter[0].mul(zeta)).add(gamma))
        .mul(&c.add(&shifter[1].mul(zeta)).add(gamma));
    let z_scalar = alpha
        .square()
        .mul(first_lagrange_eval_zeta)
        .sub(&id_product);
    l.add_assign(&z_poly_or_comm.mul(&z_scalar));
    l
}

/// Compute the commitment of the linearization polynomial.
pub fn r_commitment<PCS: PolyComScheme>(
    verifier_params: &PlonkVK<PCS>,
    cm_z: &PCS::Commitment,
    evals: &ProofEvaluations<PCS::Field>,
    challenges: &PlonkChallenges<PCS::Field>,
    first_lagrange_eval_zeta: &PCS::Field,
) -> PCS::Commitment {
    r_poly_or_comm::<PCS::Field, PCS::Commitment>(
        &verifier_params.cm_q_vec,
        &verifier_params.cm_s_vec[2],
        cm_z,
        evals,
        challenges,
        first_lagrange_eval_zeta,
        &verifier_params.shifter,
    )
}

/// Fold the split quotient as `(H2 \zeta^{n+2} + H1) \zeta^{n+2} + H0`.
pub fn fold_quotient_commitments<F: Scalar, PCSType: HomomorphicPolyComElem<Scalar = F>>(
    h_polys_or_comms: &[PCSType; 3],
    zeta_n_plus_two: &F,
) -> PCSType {
    let [h0, h1, h2] = h_polys_or_comms;
    let mut folded = h2.mul(zeta_n_plus_two);
    folded.add_assign(h1);
    folded.mul_assign(zeta_n_plus_two);
    folded.add_assign(h0);
    folded
}
