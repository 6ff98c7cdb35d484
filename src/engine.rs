//! The property-engine boundary.
//!
//! REFPROP is reached through two calling conventions that expect
//! different units and handle the active fluid differently. Each is a
//! trait here so the evaluators can run against REFPROP itself
//! ([`RefpropBackend`](crate::RefpropBackend)) or any
//! other implementation.

use serde::Serialize;

use crate::error::*;
use crate::properties::*;

/// Which side of the saturation dome a saturation call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Saturated liquid (incipient vaporization).
    Bubble,
    /// Saturated vapor (incipient condensation).
    Dew,
}

impl Branch {
    /// REFPROP `kph` flag.
    pub fn kph(self) -> i32 {
        match self {
            Self::Bubble => 1,
            Self::Dew => 2,
        }
    }

    /// Quality pinned by this branch in a `TQ` / `PQ` call.
    pub fn quality(self) -> f64 {
        match self {
            Self::Bubble => 0.0,
            Self::Dew => 1.0,
        }
    }
}

/// REFPROP's fixed-argument routines (SATTdll, TPFLSHdll, …).
///
/// Inputs and outputs are REFPROP-native: K, kPa (absolute), mol/L,
/// J/mol, J/(mol·K), µPa·s, W/(m·K), m/s.
pub trait LegacyEngine {
    /// Load a fluid (`.FLD`) or predefined mixture (`.MIX`). Fails with
    /// `UnresolvedIdentity` if REFPROP cannot read it.
    fn setup(&mut self, identity: &str) -> Result<()>;

    fn saturation_t(&mut self, t: f64, branch: Branch) -> Result<SaturationProps>;

    fn saturation_p(&mut self, p: f64, branch: Branch) -> Result<SaturationProps>;

    fn flash_tp(&mut self, t: f64, p: f64) -> Result<FlashProps>;

    fn critical_point(&mut self) -> Result<CriticalProps>;

    fn version(&mut self) -> Result<f64>;
}

/// REFPROP's `REFPROPdll` entry point in its ENGLISH unit system.
///
/// Inputs and outputs are °F, psia (absolute), lbm/ft³, Btu/lbm,
/// Btu/lbm-°F, ft/s, lbm/ft-s, Btu-ft/h-ft²-°F. `fluid` is either a
/// file name, which makes REFPROP load it, or
/// [`REUSE_SIGNAL`](crate::session::REUSE_SIGNAL) to keep the loaded one.
pub trait ModernEngine {
    fn properties_t(&mut self, fluid: &str, t: f64, branch: Branch) -> Result<SaturationProps>;

    fn properties_p(&mut self, fluid: &str, p: f64, branch: Branch) -> Result<SaturationProps>;

    fn properties_tp(&mut self, fluid: &str, t: f64, p: f64) -> Result<FlashProps>;

    fn critical_point(&mut self, fluid: &str) -> Result<CriticalProps>;

    fn version(&mut self) -> Result<f64>;
}
