use crate::poly_commit::pcs::ToBytes;
use kestrel_algebra::prelude::*;
use merlin::Transcript;
use rand_chacha::ChaChaRng;

/// The trait for polynomial commitment transcript.
pub trait PolyComTranscript {
    /// Append the commitment to the transcript.
    fn append_commitment<C: ToBytes>(&mut self, commitment: &C);

    /// Append the field element (big-endian) to the transcript.
    fn append_field_elem<F: Scalar>(&mut self, field_elem: &F);

    /// Get challenge result.
    fn get_challenge_field_elem<F: Scalar>(&mut self, label: &'static [u8]) -> F;
}

impl PolyComTranscript for Transcript {
    fn append_commitment<C: ToBytes>(&mut self, commitment: &C) {
        self.append_message(b"append commitment", &commitment.to_bytes());
    }

    fn append_field_elem<F: Scalar>(&mut self, field_elem: &F) {
        self.append_message(b"append field point", &field_elem.to_be_bytes());
    }

    fn get_challenge_field_elem<F: Scalar>(&mut self, label: &'static [u8]) -> F {
        let mut buff = [0u8; 32];
        self.challenge_bytes(label, &mut buff[..]);
        F::random(&mut ChaChaRng::from_seed(buff))
    }
}
