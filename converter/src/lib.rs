//! Exact unit conversion between English engineering units and the
//! units spoken by REFPROP.
//!
//! REFPROP's legacy routines use **K, kPa, mol/L, J/mol, J/(mol·K),
//! µPa·s, W/(m·K), m/s**.  Its `REFPROPdll` entry point can answer in
//! English units directly (°F, psia, lbm/ft³, Btu/lbm, …) but still
//! wants *absolute* pressure.  Users think in °F and **psig**.
//!
//! Every factor in this crate is a `const` expression built from a
//! handful of exact primitive ratios, so revisiting a primitive moves
//! every derived factor with it.
//!
//! | Quantity      | REFPROP     | English               |
//! |---------------|-------------|-----------------------|
//! | temperature   | K           | °F                    |
//! | pressure      | kPa         | psig / psia           |
//! | density       | mol/L       | lbm/ft³               |
//! | enthalpy      | J/mol       | Btu/lbm               |
//! | entropy, Cv…  | J/(mol·K)   | Btu/lbm-°F            |
//! | viscosity     | µPa·s       | lbm/ft-s              |
//! | conductivity  | W/(m·K)     | Btu-ft/h-ft²-°F       |
//! | speed         | m/s         | ft/s                  |
//!
//! ```
//! use converter::{f_to_k, psig_to_psia, ATM_PSIA};
//!
//! assert!((f_to_k(32.0) - 273.15).abs() < 1e-9);
//! assert_eq!(psig_to_psia(0.0), ATM_PSIA);
//! ```

// ────────────────────────────────────────────────────────────────────
//  Primitive exact ratios
// ────────────────────────────────────────────────────────────────────

/// Feet → meters.
pub const FT_M: f64 = 0.3048;
/// Square inches → square meters.
pub const IN2_M2: f64 = 0.000_645_16;
/// Pounds-force → kilonewtons.
pub const LBF_KN: f64 = 0.004_448_221_615_260_5;
/// Pounds-force → meganewtons.
pub const LBF_MN: f64 = 0.000_004_448_221_615_260_5;
/// Standard atmosphere → MPa.
pub const ATM_MPA: f64 = 0.101_325;
/// Cubic feet → liters.
pub const FT3_L: f64 = 28.316_846_592;
/// Pounds-mass → grams.
pub const LB_GM: f64 = 453.592_37;
/// International-table Btu → kJ.
pub const BTU_IT_KJ: f64 = 1.055_055_852_62;

/// Size of one Rankine degree in kelvin⁻¹ (°R per K).
pub const R_PER_K: f64 = 1.8;
/// Rankine value of 0 °F.
pub const F_ZERO_R: f64 = 459.67;
/// Seconds per hour.
pub const S_PER_H: f64 = 3600.0;

// ────────────────────────────────────────────────────────────────────
//  Derived factors
// ────────────────────────────────────────────────────────────────────

/// psia → kPa.
pub const PSIA_KPA: f64 = LBF_KN / IN2_M2;
/// psia → MPa.
pub const PSIA_MPA: f64 = LBF_MN / IN2_M2;
/// One standard atmosphere in psia (≈ 14.6959).
pub const ATM_PSIA: f64 = ATM_MPA / PSIA_MPA;
/// ft³/lbm → L/g.
pub const FT3LB_LGM: f64 = FT3_L / LB_GM;
/// lbm → kg.
pub const LB_KG: f64 = LB_GM / 1000.0;
/// Btu/lbm → kJ/kg (= 2.326).
pub const BTU_LB_KJ_KG: f64 = BTU_IT_KJ / LB_KG;
/// Btu/lbm-°F → kJ/(kg·K) (= 4.1868).
pub const BTU_LBR_KJ_KGK: f64 = BTU_LB_KJ_KG * R_PER_K;
/// lbm/(ft·s) → µPa·s.
pub const LB_FT_S_UPA_S: f64 = LB_KG / (FT_M * 1.0e-6);
/// Btu-ft/(h·ft²·°F) → W/(m·K).
pub const BTU_FT_H_FT2_F_W_MK: f64 = BTU_IT_KJ * 1000.0 / S_PER_H * R_PER_K / FT_M;

// ────────────────────────────────────────────────────────────────────
//  Closed-form conversions
// ────────────────────────────────────────────────────────────────────

// ── Temperature ─────────────────────────────────────────────────────

/// °F → K
pub const fn f_to_k(t: f64) -> f64 {
    (t + F_ZERO_R) / R_PER_K
}

/// K → °F
pub const fn k_to_f(t: f64) -> f64 {
    R_PER_K * t - F_ZERO_R
}

// ── Pressure ────────────────────────────────────────────────────────

/// psig → absolute kPa
pub const fn psig_to_kpa(p: f64) -> f64 {
    (p + ATM_PSIA) * PSIA_KPA
}

/// absolute kPa → psig
pub const fn kpa_to_psig(p: f64) -> f64 {
    p / PSIA_KPA - ATM_PSIA
}

/// psia → kPa
pub const fn psia_to_kpa(p: f64) -> f64 {
    p * PSIA_KPA
}

/// kPa → psia
pub const fn kpa_to_psia(p: f64) -> f64 {
    p / PSIA_KPA
}

/// psig → psia
pub const fn psig_to_psia(p: f64) -> f64 {
    p + ATM_PSIA
}

/// psia → psig
pub const fn psia_to_psig(p: f64) -> f64 {
    p - ATM_PSIA
}

// ── Density ─────────────────────────────────────────────────────────

/// mol/L → lbm/ft³, given the molar mass in g/mol.
pub const fn mol_l_to_lbm_ft3(d: f64, molar_mass: f64) -> f64 {
    d * molar_mass * FT3LB_LGM
}

/// lbm/ft³ → mol/L
pub const fn lbm_ft3_to_mol_l(d: f64, molar_mass: f64) -> f64 {
    d / (molar_mass * FT3LB_LGM)
}

// ── Energy / entropy ────────────────────────────────────────────────

/// J/mol → Btu/lbm
pub const fn j_mol_to_btu_lbm(h: f64, molar_mass: f64) -> f64 {
    h / (molar_mass * BTU_LB_KJ_KG)
}

/// Btu/lbm → J/mol
pub const fn btu_lbm_to_j_mol(h: f64, molar_mass: f64) -> f64 {
    h * molar_mass * BTU_LB_KJ_KG
}

/// J/(mol·K) → Btu/lbm-°F.  Also used for Cv and Cp.
pub const fn j_mol_k_to_btu_lbm_f(s: f64, molar_mass: f64) -> f64 {
    s / (molar_mass * BTU_LBR_KJ_KGK)
}

/// Btu/lbm-°F → J/(mol·K)
pub const fn btu_lbm_f_to_j_mol_k(s: f64, molar_mass: f64) -> f64 {
    s * molar_mass * BTU_LBR_KJ_KGK
}

// ── Transport ───────────────────────────────────────────────────────

/// µPa·s → lbm/(ft·s)
pub const fn upa_s_to_lbm_ft_s(eta: f64) -> f64 {
    eta / LB_FT_S_UPA_S
}

/// lbm/(ft·s) → µPa·s
pub const fn lbm_ft_s_to_upa_s(eta: f64) -> f64 {
    eta * LB_FT_S_UPA_S
}

/// W/(m·K) → Btu-ft/(h·ft²·°F)
pub const fn w_m_k_to_btu_ft_h_ft2_f(tcx: f64) -> f64 {
    tcx / BTU_FT_H_FT2_F_W_MK
}

/// Btu-ft/(h·ft²·°F) → W/(m·K)
pub const fn btu_ft_h_ft2_f_to_w_m_k(tcx: f64) -> f64 {
    tcx * BTU_FT_H_FT2_F_W_MK
}

// ── Length / speed ──────────────────────────────────────────────────

/// m (or m/s) → ft (or ft/s)
pub const fn m_to_ft(l: f64) -> f64 {
    l / FT_M
}

/// ft (or ft/s) → m (or m/s)
pub const fn ft_to_m(l: f64) -> f64 {
    l * FT_M
}

// ────────────────────────────────────────────────────────────────────
//  Unit enums
// ────────────────────────────────────────────────────────────────────

/// Temperature unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TempUnit {
    /// Kelvin (REFPROP native)
    Kelvin,
    /// Degrees Fahrenheit
    Fahrenheit,
}

/// Pressure unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressUnit {
    /// Absolute kilopascal (REFPROP native)
    KPa,
    /// Absolute pounds per square inch
    Psia,
    /// Gauge pounds per square inch (relative to one standard atmosphere)
    Psig,
}

/// Density unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DensityUnit {
    /// mol/L (REFPROP native)
    MolPerL,
    /// lbm/ft³ (requires molar mass)
    LbmPerFt3,
}

/// Enthalpy unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergyUnit {
    /// J/mol (REFPROP native)
    JPerMol,
    /// Btu/lbm (requires molar mass)
    BtuPerLbm,
}

/// Entropy / heat-capacity unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntropyUnit {
    /// J/(mol·K) (REFPROP native)
    JPerMolK,
    /// Btu/lbm-°F (requires molar mass)
    BtuPerLbmF,
}

/// Dynamic viscosity unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViscosityUnit {
    /// µPa·s (REFPROP native)
    MicroPaS,
    /// lbm/(ft·s)
    LbmPerFtS,
}

/// Thermal conductivity unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConductivityUnit {
    /// W/(m·K) (REFPROP native)
    WPerMK,
    /// Btu-ft/(h·ft²·°F)
    BtuFtPerHFt2F,
}

/// Speed-of-sound unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedUnit {
    /// m/s (REFPROP native)
    MPerS,
    /// ft/s
    FtPerS,
}

impl TempUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Fahrenheit => "°F",
        }
    }
}

impl PressUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::KPa => "kPa",
            Self::Psia => "psia",
            Self::Psig => "psig",
        }
    }
}

impl DensityUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::MolPerL => "mol/L",
            Self::LbmPerFt3 => "lbm/ft3",
        }
    }
}

impl EnergyUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::JPerMol => "J/mol",
            Self::BtuPerLbm => "Btu/lbm",
        }
    }
}

impl EntropyUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::JPerMolK => "J/mol-K",
            Self::BtuPerLbmF => "Btu/lbm-°F",
        }
    }
}

impl ViscosityUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::MicroPaS => "µPa-s",
            Self::LbmPerFtS => "lbm/ft-s",
        }
    }
}

impl ConductivityUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::WPerMK => "W/m-K",
            Self::BtuFtPerHFt2F => "Btu-ft/h-ft2-°F",
        }
    }
}

impl SpeedUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::MPerS => "m/s",
            Self::FtPerS => "ft/s",
        }
    }
}

// ────────────────────────────────────────────────────────────────────
//  UnitSystem — which unit every quantity is expressed in
// ────────────────────────────────────────────────────────────────────

/// The unit each quantity of a result is expressed in.
///
/// Values carry one of these as a tag so a reader always knows whether
/// a number is still engine-native or already converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSystem {
    pub temperature:  TempUnit,
    pub pressure:     PressUnit,
    pub density:      DensityUnit,
    pub energy:       EnergyUnit,
    pub entropy:      EntropyUnit,
    pub viscosity:    ViscosityUnit,
    pub conductivity: ConductivityUnit,
    pub speed:        SpeedUnit,
}

impl UnitSystem {
    /// Start from REFPROP-native units.
    pub fn new() -> Self { Self::refprop() }

    // ── Presets ──────────────────────────────────────────────────────

    /// Legacy REFPROP routines: K, kPa, mol/L, J/mol, J/(mol·K), µPa·s,
    /// W/(m·K), m/s.
    pub fn refprop() -> Self {
        Self {
            temperature:  TempUnit::Kelvin,
            pressure:     PressUnit::KPa,
            density:      DensityUnit::MolPerL,
            energy:       EnergyUnit::JPerMol,
            entropy:      EntropyUnit::JPerMolK,
            viscosity:    ViscosityUnit::MicroPaS,
            conductivity: ConductivityUnit::WPerMK,
            speed:        SpeedUnit::MPerS,
        }
    }

    /// `REFPROPdll` in its ENGLISH unit system: °F, psia, lbm/ft³,
    /// Btu/lbm, Btu/lbm-°F, lbm/ft-s, Btu-ft/h-ft²-°F, ft/s.
    pub fn english_absolute() -> Self {
        Self {
            temperature:  TempUnit::Fahrenheit,
            pressure:     PressUnit::Psia,
            density:      DensityUnit::LbmPerFt3,
            energy:       EnergyUnit::BtuPerLbm,
            entropy:      EntropyUnit::BtuPerLbmF,
            viscosity:    ViscosityUnit::LbmPerFtS,
            conductivity: ConductivityUnit::BtuFtPerHFt2F,
            speed:        SpeedUnit::FtPerS,
        }
    }

    /// What the harness reports: English units with gauge pressure.
    pub fn english() -> Self {
        Self::english_absolute().pressure(PressUnit::Psig)
    }

    // ── Builder methods ─────────────────────────────────────────────

    pub fn temperature(mut self, u: TempUnit) -> Self { self.temperature = u; self }
    pub fn pressure(mut self, u: PressUnit) -> Self { self.pressure = u; self }
    pub fn density(mut self, u: DensityUnit) -> Self { self.density = u; self }
    pub fn energy(mut self, u: EnergyUnit) -> Self { self.energy = u; self }
    pub fn entropy(mut self, u: EntropyUnit) -> Self { self.entropy = u; self }
    pub fn viscosity(mut self, u: ViscosityUnit) -> Self { self.viscosity = u; self }
    pub fn conductivity(mut self, u: ConductivityUnit) -> Self { self.conductivity = u; self }
    pub fn speed(mut self, u: SpeedUnit) -> Self { self.speed = u; self }
}

impl Default for UnitSystem {
    fn default() -> Self { Self::refprop() }
}

// ────────────────────────────────────────────────────────────────────
//  Converter — UnitSystem + molar mass → ready to convert
// ────────────────────────────────────────────────────────────────────

/// Converts between REFPROP legacy units and a target [`UnitSystem`].
///
/// Mass-basis targets need the fluid's molar mass (g/mol).
#[derive(Debug, Clone)]
pub struct Converter {
    pub units: UnitSystem,
    /// Molar mass in g/mol.
    pub molar_mass: f64,
}

impl Converter {
    pub fn new(units: UnitSystem, molar_mass: f64) -> Self {
        Self { units, molar_mass }
    }

    /// Identity converter: REFPROP units in, REFPROP units out.
    pub fn identity() -> Self {
        Self { units: UnitSystem::refprop(), molar_mass: 1.0 }
    }

    // ── Temperature ─────────────────────────────────────────────────

    /// Target → REFPROP (K)
    pub fn t_to_rp(&self, t: f64) -> f64 {
        match self.units.temperature {
            TempUnit::Kelvin     => t,
            TempUnit::Fahrenheit => f_to_k(t),
        }
    }

    /// REFPROP (K) → target
    pub fn t_from_rp(&self, t: f64) -> f64 {
        match self.units.temperature {
            TempUnit::Kelvin     => t,
            TempUnit::Fahrenheit => k_to_f(t),
        }
    }

    // ── Pressure ────────────────────────────────────────────────────

    /// Target → REFPROP (kPa)
    pub fn p_to_rp(&self, p: f64) -> f64 {
        match self.units.pressure {
            PressUnit::KPa  => p,
            PressUnit::Psia => psia_to_kpa(p),
            PressUnit::Psig => psig_to_kpa(p),
        }
    }

    /// REFPROP (kPa) → target
    pub fn p_from_rp(&self, p: f64) -> f64 {
        match self.units.pressure {
            PressUnit::KPa  => p,
            PressUnit::Psia => kpa_to_psia(p),
            PressUnit::Psig => kpa_to_psig(p),
        }
    }

    // ── Density ─────────────────────────────────────────────────────

    /// Target → REFPROP (mol/L)
    pub fn d_to_rp(&self, d: f64) -> f64 {
        match self.units.density {
            DensityUnit::MolPerL   => d,
            DensityUnit::LbmPerFt3 => lbm_ft3_to_mol_l(d, self.molar_mass),
        }
    }

    /// REFPROP (mol/L) → target
    pub fn d_from_rp(&self, d: f64) -> f64 {
        match self.units.density {
            DensityUnit::MolPerL   => d,
            DensityUnit::LbmPerFt3 => mol_l_to_lbm_ft3(d, self.molar_mass),
        }
    }

    // ── Enthalpy ────────────────────────────────────────────────────

    /// Target → REFPROP (J/mol)
    pub fn h_to_rp(&self, h: f64) -> f64 {
        match self.units.energy {
            EnergyUnit::JPerMol   => h,
            EnergyUnit::BtuPerLbm => btu_lbm_to_j_mol(h, self.molar_mass),
        }
    }

    /// REFPROP (J/mol) → target
    pub fn h_from_rp(&self, h: f64) -> f64 {
        match self.units.energy {
            EnergyUnit::JPerMol   => h,
            EnergyUnit::BtuPerLbm => j_mol_to_btu_lbm(h, self.molar_mass),
        }
    }

    // ── Entropy / Cv / Cp ───────────────────────────────────────────

    /// Target → REFPROP (J/(mol·K))
    pub fn s_to_rp(&self, s: f64) -> f64 {
        match self.units.entropy {
            EntropyUnit::JPerMolK   => s,
            EntropyUnit::BtuPerLbmF => btu_lbm_f_to_j_mol_k(s, self.molar_mass),
        }
    }

    /// REFPROP (J/(mol·K)) → target
    pub fn s_from_rp(&self, s: f64) -> f64 {
        match self.units.entropy {
            EntropyUnit::JPerMolK   => s,
            EntropyUnit::BtuPerLbmF => j_mol_k_to_btu_lbm_f(s, self.molar_mass),
        }
    }

    // ── Viscosity ───────────────────────────────────────────────────

    /// REFPROP (µPa·s) → target
    pub fn eta_from_rp(&self, eta: f64) -> f64 {
        match self.units.viscosity {
            ViscosityUnit::MicroPaS  => eta,
            ViscosityUnit::LbmPerFtS => upa_s_to_lbm_ft_s(eta),
        }
    }

    /// Target → REFPROP (µPa·s)
    pub fn eta_to_rp(&self, eta: f64) -> f64 {
        match self.units.viscosity {
            ViscosityUnit::MicroPaS  => eta,
            ViscosityUnit::LbmPerFtS => lbm_ft_s_to_upa_s(eta),
        }
    }

    // ── Thermal conductivity ────────────────────────────────────────

    /// REFPROP (W/(m·K)) → target
    pub fn tcx_from_rp(&self, tcx: f64) -> f64 {
        match self.units.conductivity {
            ConductivityUnit::WPerMK        => tcx,
            ConductivityUnit::BtuFtPerHFt2F => w_m_k_to_btu_ft_h_ft2_f(tcx),
        }
    }

    /// Target → REFPROP (W/(m·K))
    pub fn tcx_to_rp(&self, tcx: f64) -> f64 {
        match self.units.conductivity {
            ConductivityUnit::WPerMK        => tcx,
            ConductivityUnit::BtuFtPerHFt2F => btu_ft_h_ft2_f_to_w_m_k(tcx),
        }
    }

    // ── Speed of sound ──────────────────────────────────────────────

    /// REFPROP (m/s) → target
    pub fn w_from_rp(&self, w: f64) -> f64 {
        match self.units.speed {
            SpeedUnit::MPerS  => w,
            SpeedUnit::FtPerS => m_to_ft(w),
        }
    }

    /// Target → REFPROP (m/s)
    pub fn w_to_rp(&self, w: f64) -> f64 {
        match self.units.speed {
            SpeedUnit::MPerS  => w,
            SpeedUnit::FtPerS => ft_to_m(w),
        }
    }
}
