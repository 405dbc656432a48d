use ark_std::{error, fmt};

/// Result type of the polynomial commitment scheme.
pub type PCSResult<T> = core::result::Result<T, PolyComSchemeError>;

/// Polynomial commitment scheme errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PolyComSchemeError {
    /// The opening does not prove F(x) = y.
    PCSProveEvalError,
    /// The inputs do not line up with each other or with the public parameters.
    ParameterError,
    /// The degree of the polynomial is higher than the maximum degree allowed.
    DegreeError,
}

impl fmt::Display for PolyComSchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PolyComSchemeError::PCSProveEvalError => "The opening does not prove F(x) = y.",
            PolyComSchemeError::ParameterError => {
                "The number of commitments, values or public parameters does not match."
            }
            PolyComSchemeError::DegreeError => {
                "The degree of the polynomial is higher than the maximum degree allowed."
            }
        };

        write!(f, "{}", c)
    }
}

impl error::Error for PolyComSchemeError {}
