use crate::errors::Result;
use kestrel_algebra::prelude::*;

/// Module for the arithmetic constraint system.
pub mod arith;

pub use arith::ArithCS;

/// Variable index
pub type VarIndex = usize;
/// Constraint index
pub type CsIndex = usize;

/// Trait for PLONK constraint systems with three wires per gate.
pub trait ConstraintSystem: Sized {
    /// The field of the circuit.
    type Field: Scalar;

    /// Return the number of constraints in the system, a power of two once padded.
    fn size(&self) -> usize;

    /// Return number of variables in the constrain system
    fn num_vars(&self) -> usize;

    /// Return the wiring of the constrain system
    fn wiring(&self) -> &[Vec<VarIndex>];

    /// Return the number of wires in a single gate.
    fn n_wires_per_gate() -> usize;

    /// Return the number of selectors.
    fn num_selectors(&self) -> usize;

    /// Borrow the (index)-th selector vector.
    fn selector(&self, index: usize) -> Result<&[Self::Field]>;

    /// Return the indices of the witnesses bound to public inputs,
    /// in the order of the public input rows.
    fn public_vars_witness_indices(&self) -> &[VarIndex];

    /// Compute the permutation implied by the copy constraints.
    /// Position `i * size + j` is the i-th wire of the j-th gate.
    fn compute_permutation(&self) -> Vec<usize> {
        let n = self.size();
        let n_wires_per_gate = Self::n_wires_per_gate();
        let mut perm = vec![0usize; n_wires_per_gate * n];
        let mut marked = vec![false; self.num_vars()];
        let mut v = Vec::with_capacity(n_wires_per_gate * n);
        for wire_slice in self.wiring().iter() {
            v.extend_from_slice(wire_slice);
        }
        // one cycle per variable, through every position the variable occupies
        for (i, value) in v.iter().enumerate() {
            if marked[*value] {
                continue;
            }
            let first = i;
            let mut prev = i;
            for (j, current_value) in v[i + 1..].iter().enumerate() {
                if current_value == value {
                    perm[prev] = i + 1 + j;
                    prev = i + 1 + j;
                }
            }
            perm[prev] = first;
            marked[*value] = true
        }
        perm
    }

    /// Map the witnesses into the wires of the circuit.
    /// The (i * size + j)-th output element is the value of the i-th wire on the j-th gate.
    fn extend_witness(&self, witness: &[Self::Field]) -> Vec<Self::Field> {
        let mut extended = Vec::with_capacity(Self::n_wires_per_gate() * self.size());
        for wire_slice in self.wiring().iter() {
            for index in wire_slice.iter() {
                extended.push(witness[*index]);
            }
        }
        extended
    }

    /// Evaluate the constraint equation given public input and the values of the wires and the selectors.
    fn eval_gate_func(
        wire_vals: &[&Self::Field],
        sel_vals: &[&Self::Field],
        pub_input: &Self::Field,
    ) -> Result<Self::Field>;
}
