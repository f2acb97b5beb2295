//! Error types for the calculation engine

use thiserror::Error;

/// Errors raised by the IRR/NPV solver and related metric calculations.
///
/// Two classes are distinguished: invalid-input errors (the cash-flow set
/// itself cannot support the calculation) and convergence errors (a valid
/// but pathological shape defeated the root finder). Callers use
/// [`CalcError::is_convergence`] to decide whether a derived metric may be
/// suppressed while the rest of the result bundle is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Fewer than 2 cash flows supplied
    #[error("at least 2 cash flows required")]
    TooFewCashFlows,

    /// All cash flows share one sign, so no IRR exists
    #[error("cash flows must contain both positive and negative values")]
    UniformSigns,

    /// Cash-flow and date arrays differ in length
    #[error("cash flows and dates must have the same length ({cash_flows} vs {dates})")]
    LengthMismatch { cash_flows: usize, dates: usize },

    /// Multiple calculation with no investment (no negative flows)
    #[error("no investment (outflows) found")]
    NoOutflows,

    /// Newton-Raphson derivative degenerated below tolerance
    #[error("derivative too small after {iterations} iterations")]
    DerivativeVanished { iterations: u32 },

    /// Newton-Raphson hit the iteration cap without converging
    #[error("did not converge within {iterations} iterations")]
    NotConverged { iterations: u32 },
}

impl CalcError {
    /// True for convergence-class failures (valid inputs, pathological
    /// shape); false for invalid-input failures.
    pub fn is_convergence(&self) -> bool {
        matches!(
            self,
            CalcError::DerivativeVanished { .. } | CalcError::NotConverged { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(!CalcError::TooFewCashFlows.is_convergence());
        assert!(!CalcError::UniformSigns.is_convergence());
        assert!(!CalcError::NoOutflows.is_convergence());
        assert!(CalcError::NotConverged { iterations: 100 }.is_convergence());
        assert!(CalcError::DerivativeVanished { iterations: 3 }.is_convergence());
    }

    #[test]
    fn test_error_messages() {
        let err = CalcError::LengthMismatch {
            cash_flows: 5,
            dates: 4,
        };
        assert_eq!(
            err.to_string(),
            "cash flows and dates must have the same length (5 vs 4)"
        );
    }
}
