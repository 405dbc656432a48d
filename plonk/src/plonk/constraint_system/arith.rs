//! A vanilla PLONK arithmetic constraint system with three wires
//! `(a, b, c)` and five selectors per gate:
//! ```text
//!     ql * a + qr * b + qm * a * b + qo * c + qk + PI = 0
//! ```
//! Public inputs occupy the first rows, one per row, with `ql = -1`.
use super::{ConstraintSystem, CsIndex, VarIndex};
use crate::errors::{PlonkError, Result};
use kestrel_algebra::prelude::*;
use serde::{Deserialize, Serialize};

/// The wires number of a gate.
pub const N_WIRES_PER_GATE: usize = 3;

/// The selectors number, in the order `ql, qr, qm, qo, qk`.
pub const N_SELECTORS: usize = 5;

/// The smallest padded size of a circuit.
pub const MIN_CS_SIZE: usize = 4;

/// Arithmetic PLONK constraint system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArithCS<F> {
    /// the selectors of the circuit.
    pub selectors: Vec<Vec<F>>,
    /// the wiring of the circuit.
    pub wiring: [Vec<VarIndex>; N_WIRES_PER_GATE],
    /// the number of variable.
    pub num_vars: usize,
    /// the size of circuit.
    pub size: usize,
    /// the public witness variables indices, public row `i` holds the i-th one.
    pub public_vars_witness_indices: Vec<VarIndex>,
    /// A private witness for the circuit, cleared after computing a proof.
    pub witness: Vec<F>,
}

impl<F: Scalar> ConstraintSystem for ArithCS<F> {
    type Field = F;

    fn size(&self) -> usize {
        self.size
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn wiring(&self) -> &[Vec<VarIndex>] {
        &self.wiring[..]
    }

    fn n_wires_per_gate() -> usize {
        N_WIRES_PER_GATE
    }

    fn num_selectors(&self) -> usize {
        N_SELECTORS
    }

    fn selector(&self, index: usize) -> Result<&[F]> {
        self.selectors
            .get(index)
            .map(|s| s.as_slice())
            .ok_or(PlonkError::InvalidWitness)
    }

    fn public_vars_witness_indices(&self) -> &[VarIndex] {
        &self.public_vars_witness_indices
    }

    fn eval_gate_func(wire_vals: &[&F], sel_vals: &[&F], pub_input: &F) -> Result<F> {
        if wire_vals.len() != N_WIRES_PER_GATE || sel_vals.len() != N_SELECTORS {
            return Err(PlonkError::InvalidWitness);
        }
        let left = sel_vals[0].mul(wire_vals[0]);
        let right = sel_vals[1].mul(wire_vals[1]);
        let mul = sel_vals[2].mul(&wire_vals[0].mul(wire_vals[1]));
        let out = sel_vals[3].mul(wire_vals[2]);
        Ok(left
            .add(&right)
            .add(&mul)
            .add(&out)
            .add(sel_vals[4])
            .add(pub_input))
    }
}

impl<F: Scalar> Default for ArithCS<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> ArithCS<F> {
    /// Create an empty constraint system. Variable 0 is the constant zero.
    pub fn new() -> ArithCS<F> {
        let selectors: Vec<Vec<F>> = ark_std::iter::repeat(vec![])
            .take(N_SELECTORS)
            .collect();
        ArithCS {
            selectors,
            wiring: [vec![], vec![], vec![]],
            num_vars: 1,
            size: 0,
            public_vars_witness_indices: vec![],
            witness: vec![F::zero()],
        }
    }

    /// 0-index is Zero
    pub fn zero_var(&self) -> VarIndex {
        0
    }

    /// Add a variable (with actual value `value`) into the constraint system.
    pub fn new_variable(&mut self, value: F) -> VarIndex {
        self.num_vars += 1;
        self.witness.push(value);
        self.num_vars - 1
    }

    /// Add a gate `ql * a + qr * b + qm * a * b + qo * c + qk = 0`
    /// on the wires `[a, b, c]`.
    pub fn insert_gate(&mut self, wires: [VarIndex; N_WIRES_PER_GATE], sels: [F; N_SELECTORS]) {
        assert!(
            wires.iter().all(|&x| x < self.num_vars),
            "wire index out of bound"
        );
        for (selector, q) in self.selectors.iter_mut().zip(sels) {
            selector.push(q);
        }
        for (wire, var) in self.wiring.iter_mut().zip(wires) {
            wire.push(var);
        }
        self.size += 1;
    }

    /// Add an Add gate. (left, right, out).
    pub fn insert_add_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        let zero = F::zero();
        self.insert_gate(
            [left_var, right_var, out_var],
            [F::one(), F::one(), zero, F::one().neg(), zero],
        );
    }

    /// Add a Mul gate. (left, right, out).
    pub fn insert_mul_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        let zero = F::zero();
        self.insert_gate(
            [left_var, right_var, out_var],
            [zero, zero, F::one(), F::one().neg(), zero],
        );
    }

    /// Add a constant constraint: var = constant.
    pub fn insert_constant_gate(&mut self, var: VarIndex, constant: F) {
        let zero = F::zero();
        self.insert_gate([var, 0, 0], [F::one(), zero, zero, zero, constant.neg()]);
    }

    /// Add a new variable `left + right`.
    pub fn add(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        let out = self.new_variable(self.witness[left_var].add(&self.witness[right_var]));
        self.insert_add_gate(left_var, right_var, out);
        out
    }

    /// Add a new variable `left * right`.
    pub fn mul(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        assert!(left_var < self.num_vars, "left_var index out of bound");
        assert!(right_var < self.num_vars, "right_var index out of bound");
        let out = self.new_variable(self.witness[left_var].mul(&self.witness[right_var]));
        self.insert_mul_gate(left_var, right_var, out);
        out
    }

    /// Add constraint of a public IO value to be decided online.
    /// Public inputs have to be declared before any other gate.
    pub fn prepare_pi_variable(&mut self, var: VarIndex) {
        assert_eq!(
            self.size,
            self.public_vars_witness_indices.len(),
            "public inputs must come before other gates"
        );
        self.public_vars_witness_indices.push(var);
        let zero = F::zero();
        self.insert_gate([var, 0, 0], [F::one().neg(), zero, zero, zero, zero]);
    }

    /// Pad the number of constraints to a power of two, at least `MIN_CS_SIZE`.
    pub fn pad(&mut self) {
        let n = self.size.next_power_of_two().max(MIN_CS_SIZE);
        let diff = n - self.size;
        for selector in self.selectors.iter_mut() {
            selector.extend(vec![F::zero(); diff]);
        }
        for wire in self.wiring.iter_mut() {
            wire.extend(vec![0; diff]);
        }
        self.size += diff;
    }

    /// Return the witness index for given wire and cs index.
    fn get_witness_index(&self, wire_index: usize, cs_index: CsIndex) -> VarIndex {
        self.wiring[wire_index][cs_index]
    }

    /// Return the public inputs of the given witness.
    pub fn public_inputs(&self, witness: &[F]) -> Vec<F> {
        self.public_vars_witness_indices
            .iter()
            .map(|i| witness[*i])
            .collect()
    }

    /// Verify the given witness against the public inputs.
    pub fn verify_witness(&self, witness: &[F], online_vars: &[F]) -> Result<()> {
        if witness.len() != self.num_vars
            || online_vars.len() != self.public_vars_witness_indices.len()
        {
            return Err(PlonkError::InvalidWitness);
        }
        for cs_index in 0..self.size {
            let public_online = online_vars.get(cs_index).copied().unwrap_or_else(F::zero);
            if let Some(w_i) = self.public_vars_witness_indices.get(cs_index) {
                if witness[*w_i] != public_online {
                    return Err(PlonkError::InvalidWitness);
                }
            }
            let wire_vals: Vec<&F> = (0..N_WIRES_PER_GATE)
                .map(|i| &witness[self.get_witness_index(i, cs_index)])
                .collect();
            let sel_vals: Vec<&F> = self.selectors.iter().map(|s| &s[cs_index]).collect();
            if !Self::eval_gate_func(&wire_vals, &sel_vals, &public_online)?.is_zero() {
                return Err(PlonkError::InvalidWitness);
            }
        }
        Ok(())
    }

    /// Extract and clear the entire witness of the circuit. The witness consists of
    /// secret inputs, public inputs, and the values of intermediate variables.
    pub fn get_and_clear_witness(&mut self) -> Vec<F> {
        let res = self.witness.clone();
        self.witness.clear();
        res
    }
}
