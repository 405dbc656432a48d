use crate::poly_commit::errors::PolyComSchemeError;
use ark_std::{error, fmt, string::String};
use kestrel_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, PlonkError>;

/// The opening check that rejected a proof.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OpeningPoint {
    /// The batched opening of the quotient, the linearization and the wires at zeta.
    Zeta,
    /// The opening of the permutation accumulator at zeta times the domain generator.
    ShiftedZeta,
}

impl fmt::Display for OpeningPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningPoint::Zeta => f.write_str("zeta"),
            OpeningPoint::ShiftedZeta => f.write_str("zeta * generator"),
        }
    }
}

/// The errors of proof verification and of the test prover.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlonkError {
    /// A binding was added to a challenge that is already computed.
    ChallengeAlreadyComputed(String),
    /// The label is not a challenge of the transcript.
    ChallengeNotFound(String),
    /// The challenge before this one has not been computed yet.
    PreviousChallengeNotComputed(String),
    /// Division by zero.
    DivisionByZero,
    /// The claimed quotient evaluation does not satisfy the circuit identity.
    QuotientMismatch,
    /// A polynomial commitment opening failed.
    OpeningVerification(OpeningPoint, PolyComSchemeError),
    /// The verifying key is inconsistent.
    VerifierParamsError,
    /// More public inputs than rows in the domain.
    PublicInputsTooLong {
        /// The number of public inputs given.
        len: usize,
        /// The domain size.
        size: usize,
    },
    /// The proof does not carry the expected number of claimed values.
    ProofShapeError,
    /// Algebra error
    Algebra(AlgebraError),
    /// The witness does not satisfy the constraint system.
    InvalidWitness,
    /// Committing or opening failed while proving.
    Commitment(PolyComSchemeError),
}

impl PlonkError {
    /// Whether the error comes from using the transcript out of protocol order.
    pub fn is_protocol_misuse(&self) -> bool {
        matches!(
            self,
            PlonkError::ChallengeAlreadyComputed(_)
                | PlonkError::ChallengeNotFound(_)
                | PlonkError::PreviousChallengeNotComputed(_)
        )
    }
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlonkError::*;
        match self {
            ChallengeAlreadyComputed(label) => {
                write!(f, "Challenge {} is already computed.", label)
            }
            ChallengeNotFound(label) => write!(f, "Challenge {} not found.", label),
            PreviousChallengeNotComputed(label) => {
                write!(f, "The challenge before {} is not computed.", label)
            }
            DivisionByZero => f.write_str("Division by zero."),
            QuotientMismatch => f.write_str("Claimed quotient is not as expected."),
            OpeningVerification(point, e) => {
                write!(f, "Opening verification at {} failed: {}", point, e)
            }
            VerifierParamsError => f.write_str("Verifier params error."),
            PublicInputsTooLong { len, size } => write!(
                f,
                "{} public inputs do not fit a domain of size {}.",
                len, size
            ),
            ProofShapeError => f.write_str("Proof shape error."),
            Algebra(e) => write!(f, "Algebra: {}", e),
            InvalidWitness => f.write_str("Proof error invalid witness."),
            Commitment(e) => write!(f, "Commitment error: {}", e),
        }
    }
}

impl error::Error for PlonkError {}

impl From<AlgebraError> for PlonkError {
    fn from(e: AlgebraError) -> PlonkError {
        PlonkError::Algebra(e)
    }
}

impl From<PolyComSchemeError> for PlonkError {
    fn from(e: PolyComSchemeError) -> PlonkError {
        PlonkError::Commitment(e)
    }
}
