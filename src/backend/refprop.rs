use std::os::raw::{c_char, c_long};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use converter::UnitSystem;
use tracing::{debug, info, warn};

use crate::engine::*;
use crate::error::*;
use crate::phase::Phase;
use crate::properties::*;
use crate::session::REUSE_SIGNAL;
use crate::sys::*;

// ── Global lock (REFPROP is NOT thread-safe) ────────────────────────
// The lock value is the fluid string REFPROP currently has loaded, so
// SETUPdll is only re-called when the active refrigerant changes.
static REFPROP_LOCK: Mutex<Option<String>> = Mutex::new(None);

/// Outputs requested from `REFPROPdll` for a saturation call, after the
/// free variable (`P` for a `TQ` call, `T` for a `PQ` call).
const SATURATION_OUTPUTS: &str = "D;H;S;CV;CP;W;ETA;TCX";
const FLASH_OUTPUTS: &str = "D;H;S;CV;CP;W";
const TRANSPORT_OUTPUTS: &str = "ETA;TCX";
const CRITICAL_OUTPUTS: &str = "TC;PC;DC;M";

/// Whether a REFPROP shared library can be loaded from `refprop_path`.
pub fn engine_available(refprop_path: &Path) -> bool {
    refprop_path.exists() && RefpropLibrary::load_from_dir(refprop_path).is_ok()
}

/// Fluid loaded by the legacy routines.
struct LoadedFluid {
    identity: String,
    /// Pipe-separated fluid file string passed to SETUPdll.
    hfld: String,
    nc: usize,
    z: [f64; REFPROP_NC_MAX],
}

// ── Backend ─────────────────────────────────────────────────────────

/// [`LegacyEngine`] and [`ModernEngine`] over a dynamically loaded
/// REFPROP library.
pub struct RefpropBackend {
    lib: RefpropLibrary,
    refprop_path: PathBuf,
    /// Set by [`LegacyEngine::setup`].
    loaded: Option<LoadedFluid>,
    /// Composition array handed to `REFPROPdll`. REFPROP fills it in when
    /// it loads a `.MIX` file, and it must be sent back unchanged with
    /// the reuse signal.
    modern_z: [f64; REFPROP_NC_MAX],
    /// Enum value of REFPROP's `ENGLISH` unit system, looked up once.
    english_units: Option<i32>,
}

impl RefpropBackend {
    /// Load the REFPROP library found in `refprop_path` (the directory
    /// holding the DLL/so and the `fluids/` and `mixtures/` folders).
    pub fn open(refprop_path: impl AsRef<Path>) -> Result<Self> {
        let path = refprop_path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(RefpropError::EngineUnavailable(format!(
                "{} does not exist",
                path.display()
            )));
        }

        let lib = RefpropLibrary::load_from_dir(&path)
            .map_err(|e| RefpropError::EngineUnavailable(e.to_string()))?;
        info!(
            path = %path.display(),
            refpropdll = lib.has_refpropdll(),
            rpversion = lib.has_rpversion(),
            "loaded REFPROP"
        );

        Self::set_path_raw(&lib, &path);

        let mut modern_z = [0.0; REFPROP_NC_MAX];
        modern_z[0] = 1.0;
        Ok(Self {
            lib,
            refprop_path: path,
            loaded: None,
            modern_z,
            english_units: None,
        })
    }

    pub fn refprop_path(&self) -> &Path {
        &self.refprop_path
    }

    /// Whether the loaded library exports `REFPROPdll` (REFPROP 10+).
    pub fn supports_refpropdll(&self) -> bool {
        self.lib.has_refpropdll()
    }

    /// Whether the loaded library exports `RPVersion` (REFPROP 10+).
    pub fn supports_rpversion(&self) -> bool {
        self.lib.has_rpversion()
    }

    // ================================================================
    //  Lock helper
    // ================================================================

    /// Acquire the global REFPROP lock, recovering gracefully from
    /// poisoning instead of panicking.
    fn lock_refprop() -> Result<MutexGuard<'static, Option<String>>> {
        REFPROP_LOCK.lock().map_err(|_| {
            RefpropError::CalculationFailed(
                "REFPROP global lock is poisoned (a previous call panicked)".into(),
            )
        })
    }

    fn validate_finite(name: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(RefpropError::InvalidInput(format!(
                "{name} must be a finite number, got {value}"
            )));
        }
        Ok(())
    }

    // ================================================================
    //  Setup helpers
    // ================================================================

    fn set_path_raw(lib: &RefpropLibrary, path: &Path) {
        let path_str = path.to_str().unwrap_or_default();
        let path_c = to_c_string(path_str, REFPROP_STRLEN);
        unsafe { lib.SETPATHdll(path_c.as_ptr(), path_str.len() as c_long) };
    }

    fn is_mixture(identity: &str) -> bool {
        identity.to_ascii_uppercase().ends_with(".MIX")
    }

    /// Resolve a `.MIX` name to a file: as given, then under
    /// `mixtures/` or `MIXTURES/`.
    fn find_mix_file(&self, identity: &str) -> Option<PathBuf> {
        let given = PathBuf::from(identity);
        if given.is_file() {
            return Some(given);
        }
        ["mixtures", "MIXTURES"]
            .iter()
            .map(|dir| self.refprop_path.join(dir).join(identity))
            .find(|p| p.exists())
    }

    /// SETMIXdll: read composition and component files from a `.MIX`.
    /// **Caller must hold REFPROP_LOCK.**
    fn read_mixture(&self, identity: &str) -> Result<LoadedFluid> {
        let mix = self
            .find_mix_file(identity)
            .ok_or_else(|| RefpropError::UnresolvedIdentity(identity.to_string()))?;

        let mix_str = mix.to_str().unwrap_or_default();
        let hmxnme = to_c_string(mix_str, REFPROP_STRLEN);
        let hfmix = to_c_string("HMX.BNC", REFPROP_STRLEN);
        let hrf = to_c_string("DEF", REFPROP_STRLEN);

        let mut nc: i32 = 0;
        let mut hfld_buf = [0 as c_char; REFPROP_FILESTR];
        let mut z = [0.0f64; REFPROP_NC_MAX];
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];

        unsafe {
            self.lib.SETMIXdll(
                hmxnme.as_ptr(),
                hfmix.as_ptr(),
                hrf.as_ptr(),
                &mut nc,
                hfld_buf.as_mut_ptr(),
                z.as_mut_ptr(),
                &mut ierr,
                herr.as_mut_ptr(),
                REFPROP_STRLEN as c_long,
                REFPROP_STRLEN as c_long,
                REFPROP_STRLEN as c_long,
                REFPROP_FILESTR as c_long,
                REFPROP_STRLEN as c_long,
            );
        }
        Self::check_setup_err(identity, ierr, &herr)?;

        Ok(LoadedFluid {
            identity: identity.to_string(),
            hfld: from_c_string(&hfld_buf),
            nc: nc.max(1) as usize,
            z,
        })
    }

    /// Call SETPATHdll + SETUPdll.  **Caller must hold REFPROP_LOCK.**
    fn setup_fluid_inner(&self, fluid: &LoadedFluid) -> Result<()> {
        Self::set_path_raw(&self.lib, &self.refprop_path);

        let nc_i: i32 = fluid.nc as i32;
        let hfld = to_c_string(&fluid.hfld, REFPROP_FILESTR);
        let hfmix = to_c_string("HMX.BNC", REFPROP_STRLEN);
        let hrf = to_c_string("DEF", REFPROP_STRLEN);
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];

        unsafe {
            self.lib.SETUPdll(
                &nc_i,
                hfld.as_ptr(),
                hfmix.as_ptr(),
                hrf.as_ptr(),
                &mut ierr,
                herr.as_mut_ptr(),
                REFPROP_FILESTR as c_long,
                REFPROP_STRLEN as c_long,
                REFPROP_STRLEN as c_long,
                REFPROP_STRLEN as c_long,
            );
        }
        Self::check_setup_err(&fluid.identity, ierr, &herr)
    }

    /// Ensure REFPROP has *this* backend's fluid loaded and return it.
    /// **Caller must hold `current` from REFPROP_LOCK.**
    fn ensure_setup(&self, current: &mut Option<String>) -> Result<&LoadedFluid> {
        let fluid = self
            .loaded
            .as_ref()
            .ok_or_else(|| RefpropError::InvalidInput("no refrigerant has been set up".into()))?;
        if current.as_deref() != Some(fluid.hfld.as_str()) {
            self.setup_fluid_inner(fluid)?;
            *current = Some(fluid.hfld.clone());
        }
        Ok(fluid)
    }

    // ================================================================
    //  Legacy inner methods (caller MUST hold REFPROP_LOCK and call
    //  ensure_setup first)
    // ================================================================

    /// SATTdll / SATPdll wrapper. Returns `(t, p, dl, dv)`.
    fn saturation_inner(
        &self,
        z: &[f64; REFPROP_NC_MAX],
        given: Given,
        branch: Branch,
    ) -> Result<(f64, f64, f64, f64)> {
        let kph = branch.kph();
        let (mut out, mut dl, mut dv) = (0.0, 0.0, 0.0);
        let mut x = [0.0f64; REFPROP_NC_MAX];
        let mut y = [0.0f64; REFPROP_NC_MAX];
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];

        unsafe {
            match given {
                Given::Temperature(t) => self.lib.SATTdll(
                    &t,
                    z.as_ptr(),
                    &kph,
                    &mut out,
                    &mut dl,
                    &mut dv,
                    x.as_mut_ptr(),
                    y.as_mut_ptr(),
                    &mut ierr,
                    herr.as_mut_ptr(),
                    REFPROP_STRLEN as c_long,
                ),
                Given::Pressure(p) => self.lib.SATPdll(
                    &p,
                    z.as_ptr(),
                    &kph,
                    &mut out,
                    &mut dl,
                    &mut dv,
                    x.as_mut_ptr(),
                    y.as_mut_ptr(),
                    &mut ierr,
                    herr.as_mut_ptr(),
                    REFPROP_STRLEN as c_long,
                ),
            }
        }
        Self::check_err(ierr, &herr)?;
        Ok(match given {
            Given::Temperature(t) => (t, out, dl, dv),
            Given::Pressure(p) => (out, p, dl, dv),
        })
    }

    /// THERMdll + TRNPRPdll at (T, D), as a REFPROP-unit sample.
    fn sample_inner(&self, z: &[f64; REFPROP_NC_MAX], t: f64, d: f64) -> Result<PropertySample> {
        let (mut p, mut e, mut h, mut s, mut cv, mut cp, mut w, mut hjt) =
            (0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        unsafe {
            self.lib.THERMdll(
                &t,
                &d,
                z.as_ptr(),
                &mut p,
                &mut e,
                &mut h,
                &mut s,
                &mut cv,
                &mut cp,
                &mut w,
                &mut hjt,
            );
        }
        let (viscosity, thermal_conductivity) = self.transport_inner(z, t, d)?;
        Ok(PropertySample {
            density: d,
            enthalpy: h,
            entropy: s,
            cv,
            cp,
            sound_speed: w,
            viscosity,
            thermal_conductivity,
            units: UnitSystem::refprop(),
        })
    }

    fn transport_inner(&self, z: &[f64; REFPROP_NC_MAX], t: f64, d: f64) -> Result<(f64, f64)> {
        let (mut eta, mut tcx) = (0.0, 0.0);
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];

        unsafe {
            self.lib.TRNPRPdll(
                &t,
                &d,
                z.as_ptr(),
                &mut eta,
                &mut tcx,
                &mut ierr,
                herr.as_mut_ptr(),
                REFPROP_STRLEN as c_long,
            );
        }
        Self::check_err(ierr, &herr)?;
        Ok((eta, tcx))
    }

    /// Molar mass of the loaded fluid, M = Σ zᵢ·Mᵢ (g/mol).
    fn molar_mass_inner(&self, fluid: &LoadedFluid) -> f64 {
        let mut m_mix = 0.0;
        for i in 0..fluid.nc {
            let icomp: i32 = (i + 1) as i32;
            let (mut wmm, mut d1, mut d2, mut d3, mut d4) = (0.0, 0.0, 0.0, 0.0, 0.0);
            let (mut d5, mut d6, mut d7, mut d8, mut d9) = (0.0, 0.0, 0.0, 0.0, 0.0);
            unsafe {
                self.lib.INFOdll(
                    &icomp, &mut wmm, &mut d1, &mut d2, &mut d3, &mut d4, &mut d5, &mut d6,
                    &mut d7, &mut d8, &mut d9,
                );
            }
            m_mix += fluid.z[i] * wmm;
        }
        m_mix
    }

    // ================================================================
    //  REFPROPdll helpers
    // ================================================================

    /// GETENUMdll("ENGLISH"), cached. **Caller must hold REFPROP_LOCK.**
    fn english_units(&mut self) -> Result<i32> {
        if let Some(units) = self.english_units {
            return Ok(units);
        }
        let iflag: i32 = 0;
        let henum = to_c_string("ENGLISH", REFPROP_STRLEN);
        let mut ienum: i32 = 0;
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];
        unsafe {
            self.lib
                .GETENUMdll(
                    &iflag,
                    henum.as_ptr(),
                    &mut ienum,
                    &mut ierr,
                    herr.as_mut_ptr(),
                    REFPROP_STRLEN as c_long,
                    REFPROP_STRLEN as c_long,
                )
                .map_err(|e| RefpropError::EngineUnavailable(e.to_string()))?;
        }
        Self::check_err(ierr, &herr)?;
        self.english_units = Some(ienum);
        Ok(ienum)
    }

    /// One `REFPROPdll` call in ENGLISH units on a molar basis.
    /// **Caller must hold `current` from REFPROP_LOCK.**
    fn refpropdll_inner(
        &mut self,
        current: &mut Option<String>,
        fluid: &str,
        hin: &str,
        hout: &str,
        a: f64,
        b: f64,
    ) -> Result<RefpropOutput> {
        let iunits = self.english_units()?;
        let (imass, iflag): (i32, i32) = (0, 0);

        let hfld = to_c_string(fluid, REFPROP_FILESTR);
        let hin_c = to_c_string(hin, REFPROP_STRLEN);
        let hout_c = to_c_string(hout, REFPROP_STRLEN);
        let mut output = [0.0f64; REFPROP_OUTPUT_LEN];
        let mut hunits = [0 as c_char; REFPROP_STRLEN];
        let mut iucode: i32 = 0;
        let mut x = [0.0f64; REFPROP_NC_MAX];
        let mut y = [0.0f64; REFPROP_NC_MAX];
        let mut x3 = [0.0f64; REFPROP_NC_MAX];
        let mut q = 0.0;
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];

        unsafe {
            self.lib
                .REFPROPdll(
                    hfld.as_ptr(),
                    hin_c.as_ptr(),
                    hout_c.as_ptr(),
                    &iunits,
                    &imass,
                    &iflag,
                    &a,
                    &b,
                    self.modern_z.as_mut_ptr(),
                    output.as_mut_ptr(),
                    hunits.as_mut_ptr(),
                    &mut iucode,
                    x.as_mut_ptr(),
                    y.as_mut_ptr(),
                    x3.as_mut_ptr(),
                    &mut q,
                    &mut ierr,
                    herr.as_mut_ptr(),
                    REFPROP_FILESTR as c_long,
                    REFPROP_STRLEN as c_long,
                    REFPROP_STRLEN as c_long,
                    REFPROP_STRLEN as c_long,
                    REFPROP_STRLEN as c_long,
                )
                .map_err(|e| RefpropError::EngineUnavailable(e.to_string()))?;
        }
        if fluid != REUSE_SIGNAL {
            // REFPROPdll has replaced whatever SETUPdll loaded.
            *current = Some(fluid.to_string());
        }
        Self::check_err(ierr, &herr)?;
        Ok(RefpropOutput { values: output, quality: q })
    }

    fn modern_saturation(&mut self, fluid: &str, given: Given, branch: Branch) -> Result<SaturationProps> {
        let (hin, free, a) = match given {
            Given::Temperature(t) => {
                Self::validate_finite("temperature", t)?;
                ("TQ", "P", t)
            }
            Given::Pressure(p) => {
                Self::validate_finite("pressure", p)?;
                ("PQ", "T", p)
            }
        };
        let hout = format!("{free};{SATURATION_OUTPUTS}");

        let mut current = Self::lock_refprop()?;
        let out = self.refpropdll_inner(&mut current, fluid, hin, &hout, a, branch.quality())?;
        let v = &out.values;
        let (temperature, pressure) = match given {
            Given::Temperature(t) => (t, v[0]),
            Given::Pressure(p) => (v[0], p),
        };
        Ok(SaturationProps {
            temperature,
            pressure,
            sample: PropertySample {
                density: v[1],
                enthalpy: v[2],
                entropy: v[3],
                cv: v[4],
                cp: v[5],
                sound_speed: v[6],
                viscosity: v[7],
                thermal_conductivity: v[8],
                units: UnitSystem::english_absolute(),
            },
        })
    }

    // ================================================================
    //  Helpers
    // ================================================================

    /// Check the REFPROP error code.
    ///
    /// - `ierr > 0`: hard error. Codes 101–199 mean a fluid or mixture
    ///   file could not be read.
    /// - `ierr < 0`: warning, logged.
    fn check_err(ierr: i32, herr: &[c_char]) -> Result<()> {
        if ierr > 0 {
            let message = from_c_string(herr);
            if (101..=199).contains(&ierr) {
                return Err(RefpropError::UnresolvedIdentity(message));
            }
            return Err(RefpropError::Refprop { code: ierr, message });
        }
        if ierr < 0 {
            warn!(code = ierr, message = %from_c_string(herr), "REFPROP warning");
        }
        Ok(())
    }

    /// Any setup failure means the identity could not be loaded.
    fn check_setup_err(identity: &str, ierr: i32, herr: &[c_char]) -> Result<()> {
        if ierr > 0 {
            debug!(identity, code = ierr, message = %from_c_string(herr), "setup failed");
            return Err(RefpropError::UnresolvedIdentity(identity.to_string()));
        }
        Self::check_err(ierr, herr)
    }
}

#[derive(Clone, Copy)]
enum Given {
    Temperature(f64),
    Pressure(f64),
}

struct RefpropOutput {
    values: [f64; REFPROP_OUTPUT_LEN],
    quality: f64,
}

// ── Fixed-argument routines ─────────────────────────────────────────

impl LegacyEngine for RefpropBackend {
    fn setup(&mut self, identity: &str) -> Result<()> {
        let mut current = Self::lock_refprop()?;
        if let Some(fluid) = &self.loaded {
            if fluid.identity == identity && current.as_deref() == Some(fluid.hfld.as_str()) {
                return Ok(());
            }
        }

        let fluid = if Self::is_mixture(identity) {
            self.read_mixture(identity)?
        } else {
            let mut z = [0.0f64; REFPROP_NC_MAX];
            z[0] = 1.0;
            LoadedFluid { identity: identity.to_string(), hfld: identity.to_string(), nc: 1, z }
        };
        debug!(identity, nc = fluid.nc, "SETUPdll");

        // Whatever REFPROP held before is gone even if this fails.
        *current = None;
        self.loaded = None;
        self.setup_fluid_inner(&fluid)?;
        *current = Some(fluid.hfld.clone());
        self.loaded = Some(fluid);
        Ok(())
    }

    fn saturation_t(&mut self, t: f64, branch: Branch) -> Result<SaturationProps> {
        Self::validate_finite("temperature", t)?;
        let mut current = Self::lock_refprop()?;
        let z = self.ensure_setup(&mut current)?.z;
        let (t, p, dl, dv) = self.saturation_inner(&z, Given::Temperature(t), branch)?;
        let d = match branch {
            Branch::Bubble => dl,
            Branch::Dew => dv,
        };
        let sample = self.sample_inner(&z, t, d)?;
        Ok(SaturationProps { temperature: t, pressure: p, sample })
    }

    fn saturation_p(&mut self, p: f64, branch: Branch) -> Result<SaturationProps> {
        Self::validate_finite("pressure", p)?;
        let mut current = Self::lock_refprop()?;
        let z = self.ensure_setup(&mut current)?.z;
        let (t, p, dl, dv) = self.saturation_inner(&z, Given::Pressure(p), branch)?;
        let d = match branch {
            Branch::Bubble => dl,
            Branch::Dew => dv,
        };
        let sample = self.sample_inner(&z, t, d)?;
        Ok(SaturationProps { temperature: t, pressure: p, sample })
    }

    fn flash_tp(&mut self, t: f64, p: f64) -> Result<FlashProps> {
        Self::validate_finite("temperature", t)?;
        Self::validate_finite("pressure", p)?;
        let mut current = Self::lock_refprop()?;
        let z = self.ensure_setup(&mut current)?.z;

        let (mut d, mut dl, mut dv) = (0.0, 0.0, 0.0);
        let mut x = [0.0f64; REFPROP_NC_MAX];
        let mut y = [0.0f64; REFPROP_NC_MAX];
        let (mut q, mut e, mut h, mut s, mut cv, mut cp, mut w) =
            (0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];

        unsafe {
            self.lib.TPFLSHdll(
                &t,
                &p,
                z.as_ptr(),
                &mut d,
                &mut dl,
                &mut dv,
                x.as_mut_ptr(),
                y.as_mut_ptr(),
                &mut q,
                &mut e,
                &mut h,
                &mut s,
                &mut cv,
                &mut cp,
                &mut w,
                &mut ierr,
                herr.as_mut_ptr(),
                REFPROP_STRLEN as c_long,
            );
        }
        Self::check_err(ierr, &herr)?;

        // Transport properties are undefined inside the dome.
        let (viscosity, thermal_conductivity) = if Phase::from_quality(q).is_single_phase() {
            self.transport_inner(&z, t, d)?
        } else {
            (f64::NAN, f64::NAN)
        };

        Ok(FlashProps {
            temperature: t,
            pressure: p,
            quality: q,
            liquid_density: Some(dl),
            vapor_density: Some(dv),
            sample: PropertySample {
                density: d,
                enthalpy: h,
                entropy: s,
                cv,
                cp,
                sound_speed: w,
                viscosity,
                thermal_conductivity,
                units: UnitSystem::refprop(),
            },
        })
    }

    fn critical_point(&mut self) -> Result<CriticalProps> {
        let mut current = Self::lock_refprop()?;
        let fluid = self.ensure_setup(&mut current)?;

        let (mut tc, mut pc, mut dc) = (0.0, 0.0, 0.0);
        let mut ierr: i32 = 0;
        let mut herr = [0 as c_char; REFPROP_STRLEN];

        unsafe {
            self.lib.CRITPdll(
                fluid.z.as_ptr(),
                &mut tc,
                &mut pc,
                &mut dc,
                &mut ierr,
                herr.as_mut_ptr(),
                REFPROP_STRLEN as c_long,
            );
        }
        Self::check_err(ierr, &herr)?;
        Ok(CriticalProps {
            temperature: tc,
            pressure: pc,
            density: dc,
            molar_mass: self.molar_mass_inner(fluid),
            units: UnitSystem::refprop(),
        })
    }

    fn version(&mut self) -> Result<f64> {
        let _current = Self::lock_refprop()?;
        let mut hv = [0 as c_char; REFPROP_STRLEN];
        unsafe {
            self.lib
                .RPVersion(hv.as_mut_ptr(), REFPROP_STRLEN as c_long)
                .map_err(|e| RefpropError::CalculationFailed(e.to_string()))?;
        }
        let text = from_c_string(&hv);
        parse_version(&text).ok_or_else(|| {
            RefpropError::CalculationFailed(format!("unrecognised REFPROP version string {text:?}"))
        })
    }
}

// ── REFPROPdll ──────────────────────────────────────────────────────

impl ModernEngine for RefpropBackend {
    fn properties_t(&mut self, fluid: &str, t: f64, branch: Branch) -> Result<SaturationProps> {
        self.modern_saturation(fluid, Given::Temperature(t), branch)
    }

    fn properties_p(&mut self, fluid: &str, p: f64, branch: Branch) -> Result<SaturationProps> {
        self.modern_saturation(fluid, Given::Pressure(p), branch)
    }

    fn properties_tp(&mut self, fluid: &str, t: f64, p: f64) -> Result<FlashProps> {
        Self::validate_finite("temperature", t)?;
        Self::validate_finite("pressure", p)?;
        let mut current = Self::lock_refprop()?;
        let out = self.refpropdll_inner(&mut current, fluid, "TP", FLASH_OUTPUTS, t, p)?;
        let v = out.values;

        let (viscosity, thermal_conductivity) = if Phase::from_quality(out.quality).is_single_phase() {
            let trn =
                self.refpropdll_inner(&mut current, REUSE_SIGNAL, "TD", TRANSPORT_OUTPUTS, t, v[0])?;
            (trn.values[0], trn.values[1])
        } else {
            (f64::NAN, f64::NAN)
        };

        Ok(FlashProps {
            temperature: t,
            pressure: p,
            quality: out.quality,
            liquid_density: None,
            vapor_density: None,
            sample: PropertySample {
                density: v[0],
                enthalpy: v[1],
                entropy: v[2],
                cv: v[3],
                cp: v[4],
                sound_speed: v[5],
                viscosity,
                thermal_conductivity,
                units: UnitSystem::english_absolute(),
            },
        })
    }

    fn critical_point(&mut self, fluid: &str) -> Result<CriticalProps> {
        let mut current = Self::lock_refprop()?;
        let out = self.refpropdll_inner(&mut current, fluid, "", CRITICAL_OUTPUTS, 0.0, 0.0)?;
        let v = out.values;
        Ok(CriticalProps {
            temperature: v[0],
            pressure: v[1],
            density: v[2],
            molar_mass: v[3],
            units: UnitSystem::english_absolute(),
        })
    }

    fn version(&mut self) -> Result<f64> {
        let mut current = Self::lock_refprop()?;
        let out = self.refpropdll_inner(&mut current, REUSE_SIGNAL, "", "DLL#", 0.0, 0.0)?;
        Ok(out.values[0])
    }
}
