use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefpropError {
    /// The query cannot be evaluated as given (no temperature and no
    /// pressure, no refrigerant, unknown configuration value, …).
    /// Always raised before REFPROP is called.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// REFPROP could not load the requested fluid or mixture file.
    #[error("Unidentified refrigerant file: {0}")]
    UnresolvedIdentity(String),

    /// The REFPROP DLL/so could not be located or loaded.
    #[error("REFPROP library not available: {0}")]
    EngineUnavailable(String),

    /// Error returned by a REFPROP routine (ierr > 0).
    #[error("REFPROP error {code}: {message}")]
    Refprop { code: i32, message: String },

    /// Catch‑all for calculation failures outside REFPROP itself.
    #[error("Calculation failed: {0}")]
    CalculationFailed(String),
}

pub type Result<T> = std::result::Result<T, RefpropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = RefpropError::UnresolvedIdentity("R999.FLD".into());
        assert!(err.to_string().contains("R999.FLD"));

        let err = RefpropError::Refprop { code: 1, message: "T < Tmin".into() };
        assert_eq!(err.to_string(), "REFPROP error 1: T < Tmin");
    }
}
