use converter::{psia_to_psig, psig_to_psia, UnitSystem};
use tracing::debug;

use super::EvaluateQuery;
use crate::config::Convention;
use crate::engine::{Branch, ModernEngine};
use crate::error::Result;
use crate::properties::*;
use crate::query::{QueryShape, StateQuery};
use crate::session::{ProtocolSession, REUSE_SIGNAL};

/// Evaluates queries through `REFPROPdll` in English units.
///
/// Only pressure needs converting (gauge ↔ absolute). The first engine
/// call of a query carries the refrigerant as resolved by the
/// [`ProtocolSession`]; every later call in the same query sends the
/// reuse signal.
pub struct ModernEvaluator<E> {
    engine: E,
    session: ProtocolSession,
}

impl<E: ModernEngine> ModernEvaluator<E> {
    pub fn new(engine: E) -> Self {
        Self::with_session(engine, ProtocolSession::new())
    }

    pub fn with_session(engine: E, session: ProtocolSession) -> Self {
        Self { engine, session }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn session(&self) -> &ProtocolSession {
        &self.session
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}

impl<E: ModernEngine> EvaluateQuery for ModernEvaluator<E> {
    fn evaluate(&mut self, query: &StateQuery) -> Result<Report> {
        let shape = query.validate()?;
        debug!(identity = %query.identity, ?shape, "modern evaluation");

        let units = UnitSystem::english();
        let fluid = self.session.resolve(&query.identity);

        let state = match shape {
            QueryShape::TemperatureOnly(t) => {
                let bubble = self.engine.properties_t(fluid, t, Branch::Bubble)?;
                let dew = self.engine.properties_t(REUSE_SIGNAL, t, Branch::Dew)?;
                StateReport::Saturated(SaturatedPair {
                    boundary: BoundaryPoints::Pressures {
                        bubble: psia_to_psig(bubble.pressure),
                        dew: psia_to_psig(dew.pressure),
                    },
                    liquid: bubble.sample.retagged(units),
                    vapor: dew.sample.retagged(units),
                })
            }
            QueryShape::PressureOnly(p) => {
                let p = psig_to_psia(p);
                let bubble = self.engine.properties_p(fluid, p, Branch::Bubble)?;
                let dew = self.engine.properties_p(REUSE_SIGNAL, p, Branch::Dew)?;
                StateReport::Saturated(SaturatedPair {
                    boundary: BoundaryPoints::Temperatures {
                        bubble: bubble.temperature,
                        dew: dew.temperature,
                    },
                    liquid: bubble.sample.retagged(units),
                    vapor: dew.sample.retagged(units),
                })
            }
            QueryShape::Both(t, p) => {
                let flash = self.engine.properties_tp(fluid, t, psig_to_psia(p))?;
                StateReport::Flash(FlashResult::classify(
                    flash.quality,
                    flash.sample.retagged(units),
                    flash.liquid_density,
                    flash.vapor_density,
                ))
            }
        };

        let crit = self.engine.critical_point(REUSE_SIGNAL)?;
        let engine_version = self.engine.version()?;

        Ok(Report {
            state,
            critical: CriticalReport {
                temperature: crit.temperature,
                pressure: psia_to_psig(crit.pressure),
                density: crit.density,
                molar_mass: crit.molar_mass,
                engine_version,
            },
        })
    }

    fn convention(&self) -> Convention {
        Convention::Modern
    }
}
