use crate::poly_commit::pcs::{HomomorphicPolyComElem, ToBytes};
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};
use kestrel_algebra::prelude::*;

/// Field polynomial in the coefficient form, lowest degree first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FpPolynomial<F> {
    /// Coefficients (or evaluations) of the polynomial
    pub coefs: Vec<F>,
}

impl<F: Scalar> FpPolynomial<F> {
    /// Return the polynomial coefs reference.
    pub fn get_coefs_ref(&self) -> &[F] {
        self.coefs.as_slice()
    }

    /// Return the constant zero polynomial
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Return the constant one polynomial
    pub fn one() -> Self {
        Self::from_coefs(vec![F::one()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient first.
    /// High-order zero coefficients are trimmed.
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Build the polynomial `\prod_i (X - zeroes[i])`.
    pub fn from_zeroes(zeroes: &[F]) -> Self {
        let mut r = Self::one();
        for root in zeroes.iter() {
            r = r.mul(&Self::from_coefs(vec![root.neg(), F::one()]));
        }
        r
    }

    /// Remove high degree zero-coefficients
    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().map_or(false, |c| c.is_zero()) {
            self.coefs.pop();
        }
        if self.coefs.is_empty() {
            self.coefs.push(F::zero());
        }
    }

    /// Return degree of the polynomial
    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    /// Test if polynomial is the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coefs[0].is_zero()
    }

    /// Evaluate the polynomial on a point (Horner).
    pub fn eval(&self, point: &F) -> F {
        self.coefs
            .iter()
            .rev()
            .fold(F::zero(), |acc, coef| acc.mul(point).add(coef))
    }

    /// Add another polynomial to self
    pub fn add_assign(&mut self, other: &Self) {
        if self.coefs.len() < other.coefs.len() {
            self.coefs.resize(other.coefs.len(), F::zero());
        }
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.add_assign(other_coef);
        }
        self.trim_coefs();
    }

    /// Add with another polynomial, producing a new polynomial
    pub fn add(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.add_assign(other);
        new
    }

    /// Subtract another polynomial from self
    pub fn sub_assign(&mut self, other: &Self) {
        if self.coefs.len() < other.coefs.len() {
            self.coefs.resize(other.coefs.len(), F::zero());
        }
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            self_coef.sub_assign(other_coef);
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial, producing a new polynomial
    pub fn sub(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.sub_assign(other);
        new
    }

    /// Add `coef` to the coefficient of order `order`
    pub fn add_coef_assign(&mut self, coef: &F, order: usize) {
        if self.coefs.len() <= order {
            self.coefs.resize(order + 1, F::zero());
        }
        self.coefs[order].add_assign(coef);
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar
    pub fn mul_scalar_assign(&mut self, scalar: &F) {
        for coef in self.coefs.iter_mut() {
            coef.mul_assign(scalar)
        }
        self.trim_coefs();
    }

    /// Multiply polynomial by a constant scalar into a new polynomial
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        new.mul_scalar_assign(scalar);
        new
    }

    /// Return f(scalar * X), i.e. scale the i-th coefficient by scalar^i
    pub fn mul_var(&self, scalar: &F) -> Self {
        let mut power = F::one();
        let mut coefs = Vec::with_capacity(self.coefs.len());
        for coef in self.coefs.iter() {
            coefs.push(coef.mul(&power));
            power.mul_assign(scalar);
        }
        Self::from_coefs(coefs)
    }

    /// Schoolbook multiplication
    pub fn mul(&self, other: &Self) -> Self {
        let mut coefs = vec![F::zero(); self.coefs.len() + other.coefs.len() - 1];
        for (i, a) in self.coefs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coefs.iter().enumerate() {
                coefs[i + j].add_assign(&a.mul(b));
            }
        }
        Self::from_coefs(coefs)
    }

    /// Divide polynomial, producing quotient and remainder polynomials.
    /// Returns `None` when the divisor is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        if divisor.is_zero() {
            return None;
        }
        if self.degree() < divisor.degree() {
            return Some((Self::zero(), self.clone()));
        }
        let lead_inv = divisor.coefs[divisor.degree()].inv().ok()?;
        let mut rem = self.coefs.clone();
        let mut quo = vec![F::zero(); self.degree() - divisor.degree() + 1];
        for k in (0..quo.len()).rev() {
            let q = rem[k + divisor.degree()].mul(&lead_inv);
            for (j, d) in divisor.coefs.iter().enumerate() {
                rem[k + j].sub_assign(&q.mul(d));
            }
            quo[k] = q;
        }
        rem.truncate(divisor.degree().max(1));
        Some((Self::from_coefs(quo), Self::from_coefs(rem)))
    }
}

impl<F: Scalar> ToBytes for FpPolynomial<F> {
    fn to_bytes(&self) -> Vec<u8> {
        self.coefs.iter().flat_map(|c| c.to_be_bytes()).collect()
    }
}

/// Polynomials form the same module as their commitments, so code that
/// combines commitments can combine the polynomials behind them.
impl<F: Scalar> HomomorphicPolyComElem for FpPolynomial<F> {
    type Scalar = F;

    fn get_base() -> Self {
        Self::one()
    }

    fn get_identity() -> Self {
        Self::zero()
    }

    fn add(&self, other: &Self) -> Self {
        FpPolynomial::add(self, other)
    }

    fn add_assign(&mut self, other: &Self) {
        FpPolynomial::add_assign(self, other)
    }

    fn sub(&self, other: &Self) -> Self {
        FpPolynomial::sub(self, other)
    }

    fn sub_assign(&mut self, other: &Self) {
        FpPolynomial::sub_assign(self, other)
    }

    fn mul(&self, exp: &F) -> Self {
        self.mul_scalar(exp)
    }

    fn mul_assign(&mut self, exp: &F) {
        self.mul_scalar_assign(exp)
    }
}

impl<F: Domain> FpPolynomial<F> {
    /// Return the radix-2 evaluation domain of exactly `num_points` points,
    /// or `None` if the field has no subgroup of that order.
    pub fn evaluation_domain(num_points: usize) -> Option<Radix2EvaluationDomain<F::Field>> {
        if !num_points.is_power_of_two() {
            return None;
        }
        Radix2EvaluationDomain::<F::Field>::new(num_points)
            .filter(|domain| domain.size() == num_points)
    }

    /// Evaluate the polynomial over the domain.
    pub fn fft_with_domain(&self, domain: &Radix2EvaluationDomain<F::Field>) -> Vec<F> {
        let coefs: Vec<F::Field> = self.coefs.iter().map(|x| x.get_field()).collect();
        domain
            .fft(&coefs)
            .into_iter()
            .map(F::from_field)
            .collect()
    }

    /// Interpolate the polynomial from its values over the domain.
    pub fn ifft_with_domain(domain: &Radix2EvaluationDomain<F::Field>, values: &[F]) -> Self {
        let values: Vec<F::Field> = values.iter().map(|x| x.get_field()).collect();
        Self::from_coefs(
            domain
                .ifft(&values)
                .into_iter()
                .map(F::from_field)
                .collect(),
        )
    }
}
