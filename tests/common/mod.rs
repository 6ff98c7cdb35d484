//! In-memory stand-ins for REFPROP that record every call.

#![allow(dead_code)]

use irefprop::{
    Branch, CriticalProps, FlashProps, LegacyEngine, ModernEngine, PropertySample, RefpropError,
    Result, SaturationProps, UnitSystem,
};

/// R-134a molar mass (g/mol).
pub const MOLAR_MASS: f64 = 102.032;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Setup(String),
    SaturationT(f64, Branch),
    SaturationP(f64, Branch),
    FlashTp(f64, f64),
    CriticalPoint,
    Version,
    PropertiesT(String, f64, Branch),
    PropertiesP(String, f64, Branch),
    PropertiesTp(String, f64, f64),
    ModernCriticalPoint(String),
    ModernVersion,
}

pub fn sample(density: f64, units: UnitSystem) -> PropertySample {
    PropertySample {
        density,
        enthalpy: 20_000.0,
        entropy: 100.0,
        cv: 80.0,
        cp: 120.0,
        sound_speed: 150.0,
        viscosity: 200.0,
        thermal_conductivity: 0.08,
        units,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Legacy (K, kPa, molar)
// ═══════════════════════════════════════════════════════════════════

pub struct MockLegacy {
    pub calls: Vec<Call>,
    pub flash_quality: f64,
    /// Identities whose setup fails.
    pub unresolved: Vec<String>,
    /// REFPROP error code returned by `flash_tp`.
    pub flash_error: Option<i32>,
}

impl MockLegacy {
    pub const BUBBLE_KPA: f64 = 300.0;
    pub const DEW_KPA: f64 = 290.0;
    pub const BUBBLE_K: f64 = 270.0;
    pub const DEW_K: f64 = 272.0;
    pub const LIQUID_MOL_L: f64 = 13.0;
    pub const VAPOR_MOL_L: f64 = 0.6;
    pub const FLASH_MOL_L: f64 = 5.0;
    pub const TC_K: f64 = 374.21;
    pub const PC_KPA: f64 = 4059.28;
    pub const DC_MOL_L: f64 = 5.017;

    pub fn new() -> Self {
        Self { calls: Vec::new(), flash_quality: -998.0, unresolved: Vec::new(), flash_error: None }
    }

    pub fn with_flash_quality(mut self, q: f64) -> Self {
        self.flash_quality = q;
        self
    }

    fn saturation(t: f64, p: f64, branch: Branch) -> SaturationProps {
        let d = match branch {
            Branch::Bubble => Self::LIQUID_MOL_L,
            Branch::Dew => Self::VAPOR_MOL_L,
        };
        SaturationProps { temperature: t, pressure: p, sample: sample(d, UnitSystem::refprop()) }
    }
}

impl LegacyEngine for MockLegacy {
    fn setup(&mut self, identity: &str) -> Result<()> {
        self.calls.push(Call::Setup(identity.to_string()));
        if self.unresolved.iter().any(|u| u == identity) {
            return Err(RefpropError::UnresolvedIdentity(identity.to_string()));
        }
        Ok(())
    }

    fn saturation_t(&mut self, t: f64, branch: Branch) -> Result<SaturationProps> {
        self.calls.push(Call::SaturationT(t, branch));
        let p = match branch {
            Branch::Bubble => Self::BUBBLE_KPA,
            Branch::Dew => Self::DEW_KPA,
        };
        Ok(Self::saturation(t, p, branch))
    }

    fn saturation_p(&mut self, p: f64, branch: Branch) -> Result<SaturationProps> {
        self.calls.push(Call::SaturationP(p, branch));
        let t = match branch {
            Branch::Bubble => Self::BUBBLE_K,
            Branch::Dew => Self::DEW_K,
        };
        Ok(Self::saturation(t, p, branch))
    }

    fn flash_tp(&mut self, t: f64, p: f64) -> Result<FlashProps> {
        self.calls.push(Call::FlashTp(t, p));
        if let Some(code) = self.flash_error {
            return Err(RefpropError::Refprop { code, message: "temperature below lower limit".into() });
        }
        let mut sample = sample(Self::FLASH_MOL_L, UnitSystem::refprop());
        // TPFLSHdll returns dl = dv = d outside the dome.
        let (dl, dv) = if (0.0..=1.0).contains(&self.flash_quality) {
            sample.viscosity = f64::NAN;
            sample.thermal_conductivity = f64::NAN;
            (Self::LIQUID_MOL_L, Self::VAPOR_MOL_L)
        } else {
            (Self::FLASH_MOL_L, Self::FLASH_MOL_L)
        };
        Ok(FlashProps {
            temperature: t,
            pressure: p,
            quality: self.flash_quality,
            liquid_density: Some(dl),
            vapor_density: Some(dv),
            sample,
        })
    }

    fn critical_point(&mut self) -> Result<CriticalProps> {
        self.calls.push(Call::CriticalPoint);
        Ok(CriticalProps {
            temperature: Self::TC_K,
            pressure: Self::PC_KPA,
            density: Self::DC_MOL_L,
            molar_mass: MOLAR_MASS,
            units: UnitSystem::refprop(),
        })
    }

    fn version(&mut self) -> Result<f64> {
        self.calls.push(Call::Version);
        Ok(10.0)
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Modern (°F, psia, English mass units)
// ═══════════════════════════════════════════════════════════════════

pub struct MockModern {
    pub calls: Vec<Call>,
    pub flash_quality: f64,
    pub unresolved: Vec<String>,
}

impl MockModern {
    pub const BUBBLE_PSIA: f64 = 40.0;
    pub const DEW_PSIA: f64 = 38.0;
    pub const BUBBLE_F: f64 = 20.0;
    pub const DEW_F: f64 = 25.0;
    pub const LIQUID_LBM_FT3: f64 = 80.0;
    pub const VAPOR_LBM_FT3: f64 = 1.0;
    pub const FLASH_LBM_FT3: f64 = 4.5;
    pub const TC_F: f64 = 213.9;
    pub const PC_PSIA: f64 = 588.7;
    pub const DC_LBM_FT3: f64 = 31.96;

    pub fn new() -> Self {
        Self { calls: Vec::new(), flash_quality: 998.0, unresolved: Vec::new() }
    }

    pub fn with_flash_quality(mut self, q: f64) -> Self {
        self.flash_quality = q;
        self
    }

    /// The `fluid` argument of every call, in order.
    pub fn fluids_sent(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::PropertiesT(f, ..)
                | Call::PropertiesP(f, ..)
                | Call::PropertiesTp(f, ..)
                | Call::ModernCriticalPoint(f) => Some(f.as_str()),
                _ => None,
            })
            .collect()
    }

    fn check(&self, fluid: &str) -> Result<()> {
        if self.unresolved.iter().any(|u| u == fluid) {
            return Err(RefpropError::UnresolvedIdentity(fluid.to_string()));
        }
        Ok(())
    }

    fn saturation(t: f64, p: f64, branch: Branch) -> SaturationProps {
        let d = match branch {
            Branch::Bubble => Self::LIQUID_LBM_FT3,
            Branch::Dew => Self::VAPOR_LBM_FT3,
        };
        SaturationProps {
            temperature: t,
            pressure: p,
            sample: sample(d, UnitSystem::english_absolute()),
        }
    }
}

impl ModernEngine for MockModern {
    fn properties_t(&mut self, fluid: &str, t: f64, branch: Branch) -> Result<SaturationProps> {
        self.calls.push(Call::PropertiesT(fluid.to_string(), t, branch));
        self.check(fluid)?;
        let p = match branch {
            Branch::Bubble => Self::BUBBLE_PSIA,
            Branch::Dew => Self::DEW_PSIA,
        };
        Ok(Self::saturation(t, p, branch))
    }

    fn properties_p(&mut self, fluid: &str, p: f64, branch: Branch) -> Result<SaturationProps> {
        self.calls.push(Call::PropertiesP(fluid.to_string(), p, branch));
        self.check(fluid)?;
        let t = match branch {
            Branch::Bubble => Self::BUBBLE_F,
            Branch::Dew => Self::DEW_F,
        };
        Ok(Self::saturation(t, p, branch))
    }

    fn properties_tp(&mut self, fluid: &str, t: f64, p: f64) -> Result<FlashProps> {
        self.calls.push(Call::PropertiesTp(fluid.to_string(), t, p));
        self.check(fluid)?;
        Ok(FlashProps {
            temperature: t,
            pressure: p,
            quality: self.flash_quality,
            liquid_density: None,
            vapor_density: None,
            sample: sample(Self::FLASH_LBM_FT3, UnitSystem::english_absolute()),
        })
    }

    fn critical_point(&mut self, fluid: &str) -> Result<CriticalProps> {
        self.calls.push(Call::ModernCriticalPoint(fluid.to_string()));
        Ok(CriticalProps {
            temperature: Self::TC_F,
            pressure: Self::PC_PSIA,
            density: Self::DC_LBM_FT3,
            molar_mass: MOLAR_MASS,
            units: UnitSystem::english_absolute(),
        })
    }

    fn version(&mut self) -> Result<f64> {
        self.calls.push(Call::ModernVersion);
        Ok(10.0)
    }
}
