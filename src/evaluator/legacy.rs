use converter::{Converter, UnitSystem};
use tracing::debug;

use super::EvaluateQuery;
use crate::config::Convention;
use crate::engine::{Branch, LegacyEngine};
use crate::error::Result;
use crate::properties::*;
use crate::query::{QueryShape, StateQuery};

/// Evaluates queries through REFPROP's fixed-argument routines.
///
/// Inputs go to the engine in K and absolute kPa; molar outputs come
/// back per mole and are scaled to mass units with the fluid's molar
/// mass.
pub struct LegacyEvaluator<E> {
    engine: E,
}

/// Raw state outputs, still in REFPROP units.
enum RawState {
    SaturatedT(SaturationProps, SaturationProps),
    SaturatedP(SaturationProps, SaturationProps),
    Flash(FlashProps),
}

impl<E: LegacyEngine> LegacyEvaluator<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    fn retrieve(&mut self, shape: QueryShape) -> Result<RawState> {
        let to_rp = Converter::new(UnitSystem::english(), 1.0);
        Ok(match shape {
            QueryShape::TemperatureOnly(t) => {
                let t = to_rp.t_to_rp(t);
                let bubble = self.engine.saturation_t(t, Branch::Bubble)?;
                let dew = self.engine.saturation_t(t, Branch::Dew)?;
                RawState::SaturatedT(bubble, dew)
            }
            QueryShape::PressureOnly(p) => {
                let p = to_rp.p_to_rp(p);
                let bubble = self.engine.saturation_p(p, Branch::Bubble)?;
                let dew = self.engine.saturation_p(p, Branch::Dew)?;
                RawState::SaturatedP(bubble, dew)
            }
            QueryShape::Both(t, p) => {
                RawState::Flash(self.engine.flash_tp(to_rp.t_to_rp(t), to_rp.p_to_rp(p))?)
            }
        })
    }
}

impl<E: LegacyEngine> EvaluateQuery for LegacyEvaluator<E> {
    fn evaluate(&mut self, query: &StateQuery) -> Result<Report> {
        let shape = query.validate()?;
        debug!(identity = %query.identity, ?shape, "legacy evaluation");

        self.engine.setup(&query.identity)?;
        let raw = self.retrieve(shape)?;
        let crit = self.engine.critical_point()?;
        let engine_version = self.engine.version()?;

        let conv = Converter::new(UnitSystem::english(), crit.molar_mass);
        let state = match raw {
            RawState::SaturatedT(bubble, dew) => StateReport::Saturated(SaturatedPair {
                boundary: BoundaryPoints::Pressures {
                    bubble: conv.p_from_rp(bubble.pressure),
                    dew: conv.p_from_rp(dew.pressure),
                },
                liquid: bubble.sample.converted(&conv),
                vapor: dew.sample.converted(&conv),
            }),
            RawState::SaturatedP(bubble, dew) => StateReport::Saturated(SaturatedPair {
                boundary: BoundaryPoints::Temperatures {
                    bubble: conv.t_from_rp(bubble.temperature),
                    dew: conv.t_from_rp(dew.temperature),
                },
                liquid: bubble.sample.converted(&conv),
                vapor: dew.sample.converted(&conv),
            }),
            RawState::Flash(flash) => {
                let density = |d: Option<f64>| d.map(|d| conv.d_from_rp(d));
                StateReport::Flash(FlashResult::classify(
                    flash.quality,
                    flash.sample.converted(&conv),
                    density(flash.liquid_density),
                    density(flash.vapor_density),
                ))
            }
        };

        Ok(Report {
            state,
            critical: CriticalReport {
                temperature: conv.t_from_rp(crit.temperature),
                pressure: conv.p_from_rp(crit.pressure),
                density: conv.d_from_rp(crit.density),
                molar_mass: crit.molar_mass,
                engine_version,
            },
        })
    }

    fn convention(&self) -> Convention {
        Convention::Legacy
    }
}
