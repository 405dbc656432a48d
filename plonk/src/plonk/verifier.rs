use crate::errors::{OpeningPoint, PlonkError, Result};
use crate::plonk::{
    helpers::{
        check_quotient_eval, eval_pi_poly, fold_quotient_commitments, r_commitment,
        vanishing_eval, PlonkChallenges,
    },
    indexer::{PlonkPf, PlonkVK},
    transcript::{
        transcript_bind_commitments, transcript_get_plonk_challenge_alpha,
        transcript_get_plonk_challenge_gamma, transcript_get_plonk_challenge_zeta,
        transcript_init_plonk, ALPHA_LABEL, GAMMA_LABEL, ZETA_LABEL,
    },
};
use crate::poly_commit::pcs::PolyComScheme;
use ark_std::{end_timer, start_timer};
use kestrel_algebra::prelude::*;

/// Verify a proof against the verifier parameters and the public inputs.
///
/// The checks run in order and the first failure is returned:
/// the parameters and the proof shape, the quotient identity at \zeta,
/// the batched opening at \zeta and the opening of Z at \zeta\omega.
pub fn verifier<PCS: PolyComScheme>(
    pcs: &PCS,
    verifier_params: &PlonkVK<PCS>,
    pi: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()> {
    let verifier_timer = start_timer!(|| "PLONK verifier");
    verifier_params.check()?;
    if pi.len() > verifier_params.size {
        return Err(PlonkError::PublicInputsTooLong {
            len: pi.len(),
            size: verifier_params.size,
        });
    }
    let evals = proof.evaluations()?;

    // 1. compute all challenges such as gamma, alpha and zeta.
    let challenges_timer = start_timer!(|| "Derive the challenges");
    let challenges = compute_challenges::<PCS>(proof)?;
    let zeta = &challenges.zeta;
    end_timer!(challenges_timer);

    // 2. compute Z_h(\zeta), PI(\zeta) and L_0(\zeta).
    let pi_timer = start_timer!(|| "Evaluate the public inputs");
    let (zeta_n, z_h_eval_zeta) = vanishing_eval(zeta, verifier_params.size)?;
    let (pi_eval_zeta, first_lagrange_eval_zeta) = eval_pi_poly(verifier_params, pi, zeta)?;
    end_timer!(pi_timer);

    // 3. check the claimed quotient evaluation.
    check_quotient_eval(
        &evals,
        &challenges,
        &pi_eval_zeta,
        &first_lagrange_eval_zeta,
        &z_h_eval_zeta,
    )?;

    // 4. fold the quotient and derive the linearization polynomial commitment.
    let digest_timer = start_timer!(|| "Fold the quotient and the linearization");
    let zeta_n_plus_two = zeta_n.mul(&zeta.square());
    let cm_h_folded = fold_quotient_commitments(&proof.cm_h, &zeta_n_plus_two);
    let cm_r = r_commitment::<PCS>(
        verifier_params,
        &proof.cm_z,
        &evals,
        &challenges,
        &first_lagrange_eval_zeta,
    );
    end_timer!(digest_timer);

    // 5. verify opening proofs.
    let opening_timer = start_timer!(|| "Verify the openings");
    let commitments = [
        &cm_h_folded,
        &cm_r,
        &proof.cm_lro[0],
        &proof.cm_lro[1],
        &proof.cm_lro[2],
        &verifier_params.cm_s_vec[0],
        &verifier_params.cm_s_vec[1],
    ];
    pcs.batch_verify_single_point(&commitments, zeta, &proof.batched_proof)
        .map_err(|e| PlonkError::OpeningVerification(OpeningPoint::Zeta, e))?;

    let zeta_omega = zeta.mul(&verifier_params.generator);
    pcs.verify(&proof.cm_z, &zeta_omega, &proof.z_shifted_opening)
        .map_err(|e| PlonkError::OpeningVerification(OpeningPoint::ShiftedZeta, e))?;
    end_timer!(opening_timer);

    end_timer!(verifier_timer);
    Ok(())
}

/// Replay the transcript of a proof: gamma binds L, R and O, alpha binds Z
/// and zeta binds H0, H1 and H2.
pub(crate) fn compute_challenges<PCS: PolyComScheme>(
    proof: &PlonkPf<PCS>,
) -> Result<PlonkChallenges<PCS::Field>> {
    let mut transcript = transcript_init_plonk();

    // 1. compute gamma challenge.
    transcript_bind_commitments(&mut transcript, GAMMA_LABEL, &proof.cm_lro)?;
    let gamma = transcript_get_plonk_challenge_gamma(&mut transcript)?;

    // 2. compute alpha challenge.
    transcript_bind_commitments(
        &mut transcript,
        ALPHA_LABEL,
        core::slice::from_ref(&proof.cm_z),
    )?;
    let alpha = transcript_get_plonk_challenge_alpha(&mut transcript)?;

    // 3. compute zeta challenge.
    transcript_bind_commitments(&mut transcript, ZETA_LABEL, &proof.cm_h)?;
    let zeta = transcript_get_plonk_challenge_zeta(&mut transcript)?;

    Ok(PlonkChallenges { gamma, alpha, zeta })
}
