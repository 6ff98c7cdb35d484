//! Phase classification from flash quality.

use serde::Serialize;

/// Thermodynamic state of a (T, P) flash result.
///
/// REFPROP reports single-phase states by returning a quality outside
/// `[0, 1]`: below zero for liquid, above one for vapor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase", content = "quality", rename_all = "snake_case")]
pub enum Phase {
    SubcooledLiquid,
    SuperheatedVapor,
    /// Vapor mass fraction, `0 ≤ q ≤ 1`.
    SaturatedTwoPhase(f64),
}

impl Phase {
    /// Classify a flash quality. `q = 0` and `q = 1` are both on the
    /// saturation dome.
    pub fn from_quality(q: f64) -> Self {
        if q < 0.0 {
            Self::SubcooledLiquid
        } else if q > 1.0 {
            Self::SuperheatedVapor
        } else {
            Self::SaturatedTwoPhase(q)
        }
    }

    /// Specific heats, sound speed and transport properties are only
    /// meaningful for a single-phase state.
    pub fn is_single_phase(&self) -> bool {
        !matches!(self, Self::SaturatedTwoPhase(_))
    }

    pub fn quality(&self) -> Option<f64> {
        match self {
            Self::SaturatedTwoPhase(q) => Some(*q),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubcooledLiquid => write!(f, "Subcooled Liquid"),
            Self::SuperheatedVapor => write!(f, "Superheated Vapor"),
            Self::SaturatedTwoPhase(q) => write!(f, "Saturated, Refrigerant Quality: {q:.4}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dome_edges_are_two_phase() {
        assert_eq!(Phase::from_quality(0.0), Phase::SaturatedTwoPhase(0.0));
        assert_eq!(Phase::from_quality(1.0), Phase::SaturatedTwoPhase(1.0));
        assert_eq!(Phase::from_quality(0.5).quality(), Some(0.5));
    }

    #[test]
    fn just_outside_the_dome_is_single_phase() {
        assert_eq!(Phase::from_quality(-1e-12), Phase::SubcooledLiquid);
        assert_eq!(Phase::from_quality(1.0 + 1e-12), Phase::SuperheatedVapor);
        // REFPROP's sentinel values for single-phase states.
        assert_eq!(Phase::from_quality(-998.0), Phase::SubcooledLiquid);
        assert_eq!(Phase::from_quality(998.0), Phase::SuperheatedVapor);
    }

    #[test]
    fn single_phase_predicate() {
        assert!(Phase::SubcooledLiquid.is_single_phase());
        assert!(Phase::SuperheatedVapor.is_single_phase());
        assert!(!Phase::SaturatedTwoPhase(0.25).is_single_phase());
    }
}
