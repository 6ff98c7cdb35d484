use std::fmt;

use converter::{Converter, UnitSystem};
use serde::Serialize;

use crate::phase::Phase;

// ── One phase's worth of properties ─────────────────────────────────

/// Thermodynamic and transport properties of one phase.
///
/// `units` records what the numbers are expressed in: REFPROP-native
/// molar units straight from the legacy routines, English units from
/// `REFPROPdll`, or the converted values handed to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySample {
    pub density: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    /// Isochoric specific heat
    pub cv: f64,
    /// Isobaric specific heat
    pub cp: f64,
    pub sound_speed: f64,
    /// Dynamic viscosity
    pub viscosity: f64,
    pub thermal_conductivity: f64,
    pub units: UnitSystem,
}

impl PropertySample {
    /// Re-express a REFPROP-unit sample in `conv`'s target units.
    pub fn converted(&self, conv: &Converter) -> Self {
        Self {
            density: conv.d_from_rp(self.density),
            enthalpy: conv.h_from_rp(self.enthalpy),
            entropy: conv.s_from_rp(self.entropy),
            cv: conv.s_from_rp(self.cv),
            cp: conv.s_from_rp(self.cp),
            sound_speed: conv.w_from_rp(self.sound_speed),
            viscosity: conv.eta_from_rp(self.viscosity),
            thermal_conductivity: conv.tcx_from_rp(self.thermal_conductivity),
            units: conv.units,
        }
    }

    /// Same numbers, different unit tag. For samples whose values do not
    /// depend on the tag being changed (e.g. psia → psig).
    pub fn retagged(self, units: UnitSystem) -> Self {
        Self { units, ..self }
    }
}

// ── Raw engine outputs ──────────────────────────────────────────────

/// One branch (bubble or dew) of a saturation call.
///
/// `sample.density` is the density of the phase on that branch: liquid
/// at the bubble point, vapor at the dew point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaturationProps {
    pub temperature: f64,
    pub pressure: f64,
    pub sample: PropertySample,
}

/// Result of a temperature–pressure flash.
///
/// `quality` < 0 or > 1 means REFPROP extrapolated into a single-phase
/// region. `sample.density` is the bulk density. The separate liquid and
/// vapor densities are `Some` when the engine resolves them (TPFLSHdll
/// does; `REFPROPdll` with `TP` inputs does not).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashProps {
    pub temperature: f64,
    pub pressure: f64,
    pub quality: f64,
    pub liquid_density: Option<f64>,
    pub vapor_density: Option<f64>,
    pub sample: PropertySample,
}

/// Critical point and molar mass of the loaded fluid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalProps {
    pub temperature: f64,
    pub pressure: f64,
    pub density: f64,
    /// Molar mass (g/mol), mole-fraction weighted for mixtures.
    pub molar_mass: f64,
    pub units: UnitSystem,
}

// ── Query results (user units) ──────────────────────────────────────

/// The two saturation boundaries found for a single-input query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPoints {
    /// Temperature given: bubble and dew pressures (psig).
    Pressures { bubble: f64, dew: f64 },
    /// Pressure given: bubble and dew temperatures (°F).
    Temperatures { bubble: f64, dew: f64 },
}

/// Saturated liquid and vapor at a given temperature or pressure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaturatedPair {
    pub boundary: BoundaryPoints,
    /// Bubble-point (saturated liquid) properties.
    pub liquid: PropertySample,
    /// Dew-point (saturated vapor) properties.
    pub vapor: PropertySample,
}

/// Properties only reported outside the two-phase dome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinglePhaseProps {
    pub cv: f64,
    pub cp: f64,
    pub sound_speed: f64,
    pub viscosity: f64,
    pub thermal_conductivity: f64,
}

/// A classified (T, P) flash.
///
/// Only the quantities that are meaningful for `phase` are populated:
///
/// | phase              | liquid ρ | vapor ρ  | Cv, Cp, w, η, λ |
/// |--------------------|----------|----------|-----------------|
/// | subcooled liquid   | yes      | –        | yes             |
/// | superheated vapor  | –        | yes      | yes             |
/// | two-phase          | if known | if known | –               |
///
/// Inside the dome the phase densities are only reported when the flash
/// itself resolved them. The harness makes no extra saturation call to
/// fill them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashResult {
    pub phase: Phase,
    pub liquid_density: Option<f64>,
    pub vapor_density: Option<f64>,
    pub enthalpy: f64,
    pub entropy: f64,
    pub single_phase: Option<SinglePhaseProps>,
    pub units: UnitSystem,
}

impl FlashResult {
    /// Apply the reporting policy to a flash already in user units.
    ///
    /// `liquid` and `vapor` are the phase densities the flash resolved, if
    /// any. Outside the dome a missing phase density falls back to the
    /// bulk `sample.density`.
    pub fn classify(
        quality: f64,
        sample: PropertySample,
        liquid: Option<f64>,
        vapor: Option<f64>,
    ) -> Self {
        let phase = Phase::from_quality(quality);
        let (liquid_density, vapor_density) = match phase {
            Phase::SubcooledLiquid => (Some(liquid.unwrap_or(sample.density)), None),
            Phase::SuperheatedVapor => (None, Some(vapor.unwrap_or(sample.density))),
            Phase::SaturatedTwoPhase(_) => (liquid, vapor),
        };
        let single_phase = phase.is_single_phase().then(|| SinglePhaseProps {
            cv: sample.cv,
            cp: sample.cp,
            sound_speed: sample.sound_speed,
            viscosity: sample.viscosity,
            thermal_conductivity: sample.thermal_conductivity,
        });
        Self {
            phase,
            liquid_density,
            vapor_density,
            enthalpy: sample.enthalpy,
            entropy: sample.entropy,
            single_phase,
            units: sample.units,
        }
    }
}

/// Fluid constants appended to every report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalReport {
    /// °F
    pub temperature: f64,
    /// psig
    pub pressure: f64,
    /// lbm/ft³
    pub density: f64,
    pub molar_mass: f64,
    pub engine_version: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateReport {
    Saturated(SaturatedPair),
    Flash(FlashResult),
}

/// Everything a query produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub state: StateReport,
    pub critical: CriticalReport,
}

// ── Listing ─────────────────────────────────────────────────────────

impl fmt::Display for SaturatedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = &self.liquid.units;
        match self.boundary {
            BoundaryPoints::Pressures { bubble, dew } => {
                let p = u.pressure.symbol();
                writeln!(f, "Bubble Point Pressure ({p}): {bubble:.2}")?;
                writeln!(f, "Dew Point Pressure ({p}): {dew:.2}")?;
            }
            BoundaryPoints::Temperatures { bubble, dew } => {
                let t = u.temperature.symbol();
                writeln!(f, "Bubble Point Temperature ({t}): {bubble:.2}")?;
                writeln!(f, "Dew Point Temperature ({t}): {dew:.2}")?;
            }
        }
        let (l, v) = (&self.liquid, &self.vapor);
        let (d, h, s) = (u.density.symbol(), u.energy.symbol(), u.entropy.symbol());
        let (w, eta, tcx) = (u.speed.symbol(), u.viscosity.symbol(), u.conductivity.symbol());
        writeln!(f, "Liquid Density ({d}): {:.3}", l.density)?;
        writeln!(f, "Vapor Density ({d}): {:.3}", v.density)?;
        writeln!(f, "Liquid Enthalpy ({h}): {:.2}", l.enthalpy)?;
        writeln!(f, "Vapor Enthalpy ({h}): {:.2}", v.enthalpy)?;
        writeln!(f, "Liquid Entropy ({s}): {:.4}", l.entropy)?;
        writeln!(f, "Vapor Entropy ({s}): {:.4}", v.entropy)?;
        writeln!(f, "Liquid Isochoric Specific Heat ({s}): {:.4}", l.cv)?;
        writeln!(f, "Vapor Isochoric Specific Heat ({s}): {:.4}", v.cv)?;
        writeln!(f, "Liquid Isobaric Specific Heat ({s}): {:.4}", l.cp)?;
        writeln!(f, "Vapor Isobaric Specific Heat ({s}): {:.4}", v.cp)?;
        writeln!(f, "Liquid Speed of Sound ({w}): {:.2}", l.sound_speed)?;
        writeln!(f, "Vapor Speed of Sound ({w}): {:.2}", v.sound_speed)?;
        writeln!(f, "Liquid Dynamic Viscosity ({eta}): {:.4e}", l.viscosity)?;
        writeln!(f, "Vapor Dynamic Viscosity ({eta}): {:.4e}", v.viscosity)?;
        writeln!(f, "Liquid Thermal Conductivity ({tcx}): {:.4e}", l.thermal_conductivity)?;
        write!(f, "Vapor Thermal Conductivity ({tcx}): {:.4e}", v.thermal_conductivity)
    }
}

impl fmt::Display for FlashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = &self.units;
        let d = u.density.symbol();
        writeln!(f, "{}", self.phase)?;
        if let Some(rho) = self.liquid_density {
            writeln!(f, "Liquid Density ({d}): {rho:.3}")?;
        }
        if let Some(rho) = self.vapor_density {
            writeln!(f, "Vapor Density ({d}): {rho:.3}")?;
        }
        writeln!(f, "Enthalpy ({}): {:.2}", u.energy.symbol(), self.enthalpy)?;
        write!(f, "Entropy ({}): {:.4}", u.entropy.symbol(), self.entropy)?;
        if let Some(sp) = &self.single_phase {
            let s = u.entropy.symbol();
            writeln!(f)?;
            writeln!(f, "Isochoric Specific Heat ({s}): {:.4}", sp.cv)?;
            writeln!(f, "Isobaric Specific Heat ({s}): {:.4}", sp.cp)?;
            writeln!(f, "Speed of Sound ({}): {:.2}", u.speed.symbol(), sp.sound_speed)?;
            writeln!(f, "Dynamic Viscosity ({}): {:.4e}", u.viscosity.symbol(), sp.viscosity)?;
            write!(
                f,
                "Thermal Conductivity ({}): {:.4e}",
                u.conductivity.symbol(),
                sp.thermal_conductivity
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for CriticalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Critical Temperature (°F): {:.2}", self.temperature)?;
        writeln!(f, "Critical Pressure (psig): {:.2}", self.pressure)?;
        writeln!(f, "Critical Density (lbm/ft3): {:.3}", self.density)?;
        writeln!(f, "Molecular Weight: {:.2}", self.molar_mass)?;
        write!(f, "RefProp Version: {:.4}", self.engine_version)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            StateReport::Saturated(pair) => writeln!(f, "{pair}")?,
            StateReport::Flash(flash) => writeln!(f, "{flash}")?,
        }
        write!(f, "{}", self.critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(density: f64) -> PropertySample {
        PropertySample {
            density,
            enthalpy: 110.0,
            entropy: 0.22,
            cv: 0.2,
            cp: 0.25,
            sound_speed: 480.0,
            viscosity: 8.0e-6,
            thermal_conductivity: 7.0e-3,
            units: UnitSystem::english(),
        }
    }

    #[test]
    fn subcooled_reports_liquid_density_only() {
        let r = FlashResult::classify(-998.0, sample(75.0), None, None);
        assert_eq!(r.phase, Phase::SubcooledLiquid);
        assert_eq!(r.liquid_density, Some(75.0));
        assert_eq!(r.vapor_density, None);
        assert!(r.single_phase.is_some());
    }

    #[test]
    fn two_phase_suppresses_densities_and_single_phase_props() {
        let r = FlashResult::classify(0.5, sample(10.0), None, None);
        assert_eq!(r.phase, Phase::SaturatedTwoPhase(0.5));
        assert_eq!(r.liquid_density, None);
        assert_eq!(r.vapor_density, None);
        assert_eq!(r.single_phase, None);
        assert_eq!(r.enthalpy, 110.0);

        let listing = r.to_string();
        assert!(listing.starts_with("Saturated, Refrigerant Quality: 0.5000"));
        assert!(!listing.contains("Speed of Sound"));
    }

    #[test]
    fn superheated_listing() {
        let listing = FlashResult::classify(1.5, sample(1.2), None, None).to_string();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Superheated Vapor");
        assert_eq!(lines[1], "Vapor Density (lbm/ft3): 1.200");
        assert_eq!(lines[2], "Enthalpy (Btu/lbm): 110.00");
        assert_eq!(lines[6], "Speed of Sound (ft/s): 480.00");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn two_phase_lists_resolved_phase_densities() {
        let r = FlashResult::classify(0.25, sample(10.0), Some(80.0), Some(1.5));
        assert_eq!(r.liquid_density, Some(80.0));
        assert_eq!(r.vapor_density, Some(1.5));
        assert_eq!(r.single_phase, None);

        let listing = r.to_string();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[1], "Liquid Density (lbm/ft3): 80.000");
        assert_eq!(lines[2], "Vapor Density (lbm/ft3): 1.500");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn single_phase_prefers_the_resolved_phase_density() {
        let r = FlashResult::classify(-998.0, sample(75.0), Some(74.5), Some(74.5));
        assert_eq!(r.liquid_density, Some(74.5));
        assert_eq!(r.vapor_density, None);
    }
}
