//! # irefprop
//!
//! Core of a test harness for [NIST REFPROP](https://www.nist.gov/srd/refprop):
//! given a refrigerant file and a temperature, a gauge pressure, or both,
//! report the state point in English engineering units.
//!
//! * **Temperature only**: bubble and dew pressures with saturated
//!   liquid and vapor properties
//! * **Pressure only**: bubble and dew temperatures, same properties
//! * **Both**: a flash, classified as subcooled liquid, superheated
//!   vapor or two-phase; properties that are meaningless inside the dome
//!   are left out
//!
//! Every report ends with the fluid's critical point, molar mass and the
//! REFPROP version.
//!
//! REFPROP is reached through one of two calling conventions, chosen by
//! [`Convention`]: the fixed-argument routines in K, kPa and molar units
//! ([`LegacyEvaluator`]), or `REFPROPdll` in English units
//! ([`ModernEvaluator`]). Unit conversion lives in the [`converter`]
//! crate.
//!
//! ## Quick example
//!
//! ```no_run
//! use irefprop::{HarnessConfig, StateQuery};
//!
//! let config = HarnessConfig::from_env()?;
//! let mut harness = irefprop::open(&config)?;
//!
//! let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), None))?;
//! println!("{report}");
//! # Ok::<(), irefprop::RefpropError>(())
//! ```
//!
//! ## Custom engines
//!
//! The evaluators are generic over [`LegacyEngine`] / [`ModernEngine`],
//! so anything that answers the same calls can stand in for REFPROP.

// ── Internal modules ─────────────────────────────────────────────────
mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod phase;
pub mod properties;
pub mod query;
pub mod session;
pub mod sys;

// ── Public re-exports ────────────────────────────────────────────────
pub use backend::refprop::{engine_available, RefpropBackend};
pub use config::{Convention, HarnessConfig};
pub use engine::{Branch, LegacyEngine, ModernEngine};
pub use error::{RefpropError, Result};
pub use evaluator::{EvaluateQuery, LegacyEvaluator, ModernEvaluator};
pub use phase::Phase;
pub use properties::{
    BoundaryPoints, CriticalProps, CriticalReport, FlashProps, FlashResult, PropertySample,
    Report, SaturatedPair, SaturationProps, SinglePhaseProps, StateReport,
};
pub use query::{QueryShape, StateQuery};
pub use session::{ProtocolSession, REUSE_SIGNAL};

pub use converter::{self, Converter, UnitSystem};

/// Load REFPROP from `config.refprop_path` and build the evaluator for
/// `config.convention`.
///
/// Fails with `EngineUnavailable` when the library lacks a routine the
/// convention needs: `RPVersion` for legacy, `REFPROPdll` for modern.
/// Both are REFPROP 10 exports, so a REFPROP 9 library is refused here
/// rather than on its first query.
pub fn open(config: &HarnessConfig) -> Result<Box<dyn EvaluateQuery>> {
    let backend = RefpropBackend::open(&config.refprop_path)?;
    check_exports(
        config.convention,
        backend.supports_refpropdll(),
        backend.supports_rpversion(),
    )?;
    let evaluator: Box<dyn EvaluateQuery> = match config.convention {
        Convention::Legacy => Box::new(LegacyEvaluator::new(backend)),
        Convention::Modern => Box::new(ModernEvaluator::new(backend)),
    };
    Ok(evaluator)
}

fn check_exports(convention: Convention, refpropdll: bool, rpversion: bool) -> Result<()> {
    let missing = match convention {
        Convention::Legacy if !rpversion => "RPVersion",
        Convention::Modern if !refpropdll => "REFPROPdll",
        _ => return Ok(()),
    };
    Err(RefpropError::EngineUnavailable(format!(
        "the loaded REFPROP library does not export {missing}, which the {convention} convention needs"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refprop_10_serves_both_conventions() {
        assert!(check_exports(Convention::Legacy, true, true).is_ok());
        assert!(check_exports(Convention::Modern, true, true).is_ok());
    }

    #[test]
    fn legacy_needs_rpversion() {
        let err = check_exports(Convention::Legacy, false, false).unwrap_err();
        assert!(matches!(err, RefpropError::EngineUnavailable(ref m) if m.contains("RPVersion")), "{err}");
    }

    #[test]
    fn modern_needs_refpropdll() {
        let err = check_exports(Convention::Modern, false, true).unwrap_err();
        assert!(matches!(err, RefpropError::EngineUnavailable(ref m) if m.contains("REFPROPdll")), "{err}");
        assert!(check_exports(Convention::Modern, true, false).is_ok());
    }
}
