//! A single harness request: refrigerant + optional temperature and
//! gauge pressure, in user units (°F, psig).

use crate::error::*;

/// What the user typed into the harness.
#[derive(Debug, Clone, PartialEq)]
pub struct StateQuery {
    /// Fluid (`.FLD`) or predefined mixture (`.MIX`) file name, e.g.
    /// `"R134A.FLD"`.
    pub identity: String,
    /// Temperature (°F)
    pub temperature: Option<f64>,
    /// Gauge pressure (psig)
    pub pressure: Option<f64>,
}

/// Which inputs a query carries. Picks the retrieval path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryShape {
    /// Saturation pair at a temperature (°F).
    TemperatureOnly(f64),
    /// Saturation pair at a gauge pressure (psig).
    PressureOnly(f64),
    /// Flash at (°F, psig).
    Both(f64, f64),
}

impl StateQuery {
    pub fn new(identity: impl Into<String>, temperature: Option<f64>, pressure: Option<f64>) -> Self {
        Self { identity: identity.into(), temperature, pressure }
    }

    /// Build a query from raw text fields.
    ///
    /// An empty field means "not supplied"; whitespace alone does not
    /// count as empty. A field that does not parse as a number is taken
    /// as `0.0`; callers wanting strict validation must check the text
    /// themselves.
    pub fn from_text(identity: &str, temperature: &str, pressure: &str) -> Self {
        Self::new(identity, parse_field(temperature), parse_field(pressure))
    }

    /// Classify the inputs. Fails when neither temperature nor pressure
    /// is present.
    pub fn shape(&self) -> Result<QueryShape> {
        match (self.temperature, self.pressure) {
            (Some(t), None) => Ok(QueryShape::TemperatureOnly(t)),
            (None, Some(p)) => Ok(QueryShape::PressureOnly(p)),
            (Some(t), Some(p)) => Ok(QueryShape::Both(t, p)),
            (None, None) => Err(RefpropError::InvalidInput(
                "Must enter either a temperature or pressure, or both.".into(),
            )),
        }
    }

    /// Full pre-flight check: a refrigerant must be named and at least
    /// one state variable supplied.
    pub fn validate(&self) -> Result<QueryShape> {
        if self.identity.is_empty() {
            return Err(RefpropError::InvalidInput("Must enter a NIST refrigerant file.".into()));
        }
        self.shape()
    }
}

fn parse_field(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    Some(text.trim().parse().unwrap_or(0.0))
}
