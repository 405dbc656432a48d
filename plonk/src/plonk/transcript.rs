use crate::errors::{PlonkError, Result};
use crate::poly_commit::pcs::ToBytes;
use ark_std::string::ToString;
use kestrel_algebra::prelude::*;
use sha2::{Digest, Sha256};

/// Label of the permutation challenge.
pub const GAMMA_LABEL: &str = "gamma";
/// Label of the constraint folding challenge.
pub const ALPHA_LABEL: &str = "alpha";
/// Label of the evaluation point challenge.
pub const ZETA_LABEL: &str = "zeta";

/// The challenges of a PLONK proof, in derivation order.
pub const PLONK_CHALLENGE_LABELS: [&str; 3] = [GAMMA_LABEL, ALPHA_LABEL, ZETA_LABEL];

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChallengeSlot {
    /// Bindings collected so far, not derived yet.
    Open(Vec<u8>),
    /// The derived digest, final.
    Computed([u8; 32]),
}

/// A Fiat-Shamir transcript over a fixed, ordered list of named challenges.
///
/// The challenge of slot `i` is
/// `SHA256(label_i || challenge_{i-1} || bindings_i)`, with no previous
/// challenge for the first slot. A slot accepts bindings until its
/// challenge is computed; after that it only returns the cached digest.
#[derive(Debug, Clone)]
pub struct FiatShamirTranscript {
    slots: Vec<(&'static str, ChallengeSlot)>,
}

impl FiatShamirTranscript {
    /// Create a transcript for the given challenge labels, in order.
    pub fn new(labels: &[&'static str]) -> Self {
        debug_assert!(
            labels.iter().all_unique(),
            "challenge labels must be distinct"
        );
        FiatShamirTranscript {
            slots: labels
                .iter()
                .map(|label| (*label, ChallengeSlot::Open(vec![])))
                .collect(),
        }
    }

    fn position(&self, label: &str) -> Result<usize> {
        self.slots
            .iter()
            .position(|(l, _)| *l == label)
            .ok_or_else(|| PlonkError::ChallengeNotFound(label.to_string()))
    }

    /// Append `bytes` to the bindings of the challenge `label`.
    pub fn bind(&mut self, label: &str, bytes: &[u8]) -> Result<()> {
        let i = self.position(label)?;
        match &mut self.slots[i].1 {
            ChallengeSlot::Open(bindings) => {
                bindings.extend_from_slice(bytes);
                Ok(())
            }
            ChallengeSlot::Computed(_) => {
                Err(PlonkError::ChallengeAlreadyComputed(label.to_string()))
            }
        }
    }

    /// Derive the challenge `label`, or return it if already derived.
    pub fn compute_challenge(&mut self, label: &str) -> Result<[u8; 32]> {
        let i = self.position(label)?;
        let mut hasher = Sha256::new();
        hasher.update(label.as_bytes());
        if i > 0 {
            match &self.slots[i - 1].1 {
                ChallengeSlot::Computed(previous) => hasher.update(previous),
                ChallengeSlot::Open(_) => {
                    return Err(PlonkError::PreviousChallengeNotComputed(label.to_string()))
                }
            }
        }
        let digest: [u8; 32] = match &self.slots[i].1 {
            ChallengeSlot::Computed(digest) => return Ok(*digest),
            ChallengeSlot::Open(bindings) => {
                hasher.update(bindings);
                hasher.finalize().into()
            }
        };
        self.slots[i].1 = ChallengeSlot::Computed(digest);
        Ok(digest)
    }

    /// Derive the challenge `label` as a field element, reading the digest
    /// as a big-endian integer reduced modulo the field order.
    pub fn challenge_scalar<F: Scalar>(&mut self, label: &str) -> Result<F> {
        let digest = self.compute_challenge(label)?;
        Ok(F::from_be_bytes_mod_order(&digest))
    }
}

/// Initialize the transcript when computing or verifying a PLONK proof.
pub(crate) fn transcript_init_plonk() -> FiatShamirTranscript {
    FiatShamirTranscript::new(&PLONK_CHALLENGE_LABELS)
}

/// Bind the commitments, in order, to the challenge `label`.
pub(crate) fn transcript_bind_commitments<C: ToBytes>(
    transcript: &mut FiatShamirTranscript,
    label: &str,
    commitments: &[C],
) -> Result<()> {
    for cm in commitments.iter() {
        transcript.bind(label, &cm.to_bytes())?;
    }
    Ok(())
}

/// Return the challenge result by label: "gamma".
pub(crate) fn transcript_get_plonk_challenge_gamma<F: Scalar>(
    transcript: &mut FiatShamirTranscript,
) -> Result<F> {
    transcript.challenge_scalar(GAMMA_LABEL)
}

/// Return the challenge result by label: "alpha".
pub(crate) fn transcript_get_plonk_challenge_alpha<F: Scalar>(
    transcript: &mut FiatShamirTranscript,
) -> Result<F> {
    transcript.challenge_scalar(ALPHA_LABEL)
}

/// Return the challenge result by label: "zeta".
pub(crate) fn transcript_get_plonk_challenge_zeta<F: Scalar>(
    transcript: &mut FiatShamirTranscript,
) -> Result<F> {
    transcript.challenge_scalar(ZETA_LABEL)
}

#[cfg(test)]
mod test {
    use super::*;
    use kestrel_algebra::bn254::BN254Scalar;

    #[test]
    fn test_challenges_chain() {
        let mut transcript = transcript_init_plonk();
        transcript.bind(GAMMA_LABEL, b"wires").unwrap();
        transcript.bind(ALPHA_LABEL, b"acc").unwrap();
        let gamma = transcript.compute_challenge(GAMMA_LABEL).unwrap();
        let alpha = transcript.compute_challenge(ALPHA_LABEL).unwrap();
        let zeta = transcript.compute_challenge(ZETA_LABEL).unwrap();

        let expected_gamma: [u8; 32] = Sha256::digest(b"gammawires").into();
        assert_eq!(gamma, expected_gamma);

        let mut hasher = Sha256::new();
        hasher.update(b"alpha");
        hasher.update(gamma);
        hasher.update(b"acc");
        let expected_alpha: [u8; 32] = hasher.finalize().into();
        assert_eq!(alpha, expected_alpha);

        let mut hasher = Sha256::new();
        hasher.update(b"zeta");
        hasher.update(alpha);
        let expected_zeta: [u8; 32] = hasher.finalize().into();
        assert_eq!(zeta, expected_zeta);

        // cached
        assert_eq!(transcript.compute_challenge(GAMMA_LABEL).unwrap(), gamma);

        let scalar: BN254Scalar = transcript.challenge_scalar(ZETA_LABEL).unwrap();
        assert_eq!(scalar, BN254Scalar::from_be_bytes_mod_order(&zeta));
    }

    #[test]
    fn test_deterministic() {
        let run = |bindings: &[u8]| {
            let mut transcript = transcript_init_plonk();
            transcript.bind(GAMMA_LABEL, bindings).unwrap();
            transcript_get_plonk_challenge_gamma::<BN254Scalar>(&mut transcript).unwrap()
        };
        assert_eq!(run(b"same"), run(b"same"));
        assert_ne!(run(b"same"), run(b"other"));

        // the label is part of the hash
        let mut a = FiatShamirTranscript::new(&["x"]);
        let mut b = FiatShamirTranscript::new(&["y"]);
        assert_ne!(
            a.compute_challenge("x").unwrap(),
            b.compute_challenge("y").unwrap()
        );
    }

    #[test]
    fn test_misuse() {
        let mut transcript = transcript_init_plonk();
        assert_eq!(
            transcript.bind("beta", b""),
            Err(PlonkError::ChallengeNotFound("beta".to_string()))
        );
        assert_eq!(
            transcript.compute_challenge(ALPHA_LABEL),
            Err(PlonkError::PreviousChallengeNotComputed(ALPHA_LABEL.to_string()))
        );

        transcript.compute_challenge(GAMMA_LABEL).unwrap();
        let err = transcript.bind(GAMMA_LABEL, b"late").unwrap_err();
        assert_eq!(err, PlonkError::ChallengeAlreadyComputed(GAMMA_LABEL.to_string()));
        assert!(err.is_protocol_misuse());

        // alpha still accepts bindings until it is computed
        assert!(transcript.bind(ALPHA_LABEL, b"z").is_ok());
        assert!(transcript.compute_challenge(ALPHA_LABEL).is_ok());
    }
}
