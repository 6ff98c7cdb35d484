mod common;

use approx::assert_relative_eq;
use common::{Call, MockModern};
use irefprop::converter::{psia_to_psig, ATM_PSIA};
use irefprop::{
    BoundaryPoints, Branch, Convention, EvaluateQuery, ModernEvaluator, Phase, ProtocolSession,
    RefpropError, StateQuery, StateReport, UnitSystem, REUSE_SIGNAL,
};

// ═══════════════════════════════════════════════════════════════════
//  Identity cache
// ═══════════════════════════════════════════════════════════════════

#[test]
fn repeated_identity_sends_the_reuse_signal() {
    let mut harness = ModernEvaluator::new(MockModern::new());

    harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), None)).unwrap();
    assert_eq!(harness.engine().fluids_sent(), vec!["R134A.FLD", REUSE_SIGNAL, REUSE_SIGNAL]);

    harness.evaluate(&StateQuery::new("R134A.FLD", Some(50.0), None)).unwrap();
    assert_eq!(&harness.engine().fluids_sent()[3..], &[REUSE_SIGNAL; 3]);

    harness.evaluate(&StateQuery::new("R22.FLD", Some(50.0), None)).unwrap();
    assert_eq!(&harness.engine().fluids_sent()[6..], &["R22.FLD", REUSE_SIGNAL, REUSE_SIGNAL]);
    assert_eq!(harness.session().last_sent(), Some("R22.FLD"));
}

#[test]
fn identity_cache_spans_query_shapes() {
    let mut harness = ModernEvaluator::new(MockModern::new());

    harness.evaluate(&StateQuery::new("R410A.MIX", None, Some(100.0))).unwrap();
    harness.evaluate(&StateQuery::new("R410A.MIX", Some(70.0), Some(100.0))).unwrap();

    let fluids = harness.engine().fluids_sent();
    assert_eq!(fluids[0], "R410A.MIX");
    assert!(fluids[1..].iter().all(|f| *f == REUSE_SIGNAL), "{fluids:?}");
}

#[test]
fn a_preloaded_session_skips_the_first_load() {
    let mut session = ProtocolSession::new();
    session.resolve("R134A.FLD");
    let mut harness = ModernEvaluator::with_session(MockModern::new(), session);

    harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), Some(20.0))).unwrap();
    assert_eq!(harness.engine().fluids_sent(), vec![REUSE_SIGNAL, REUSE_SIGNAL]);
}

#[test]
fn failed_load_still_counts_as_sent() {
    let mut engine = MockModern::new();
    engine.unresolved.push("R999.FLD".into());
    let mut harness = ModernEvaluator::new(engine);

    let err = harness.evaluate(&StateQuery::new("R999.FLD", Some(40.0), None)).unwrap_err();
    assert!(matches!(err, RefpropError::UnresolvedIdentity(ref id) if id == "R999.FLD"));
    assert_eq!(harness.engine().calls.len(), 1);
    assert_eq!(harness.session().last_sent(), Some("R999.FLD"));
}

// ═══════════════════════════════════════════════════════════════════
//  Units
// ═══════════════════════════════════════════════════════════════════

#[test]
fn temperature_passes_through_in_fahrenheit() {
    let mut harness = ModernEvaluator::new(MockModern::new());
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), None)).unwrap();

    assert_eq!(
        harness.engine().calls[..2],
        [
            Call::PropertiesT("R134A.FLD".into(), 40.0, Branch::Bubble),
            Call::PropertiesT(REUSE_SIGNAL.into(), 40.0, Branch::Dew),
        ]
    );

    let StateReport::Saturated(pair) = &report.state else {
        panic!("expected a saturated pair");
    };
    match pair.boundary {
        BoundaryPoints::Pressures { bubble, dew } => {
            assert_relative_eq!(bubble, MockModern::BUBBLE_PSIA - ATM_PSIA, max_relative = 1e-12);
            assert_relative_eq!(dew, MockModern::DEW_PSIA - ATM_PSIA, max_relative = 1e-12);
        }
        other => panic!("expected pressures, got {other:?}"),
    }
    assert_eq!(pair.liquid.units, UnitSystem::english());
    assert_eq!(pair.liquid.density, MockModern::LIQUID_LBM_FT3);
    assert_eq!(pair.vapor.density, MockModern::VAPOR_LBM_FT3);
}

#[test]
fn gauge_pressure_is_sent_as_psia() {
    let mut harness = ModernEvaluator::new(MockModern::new());
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", None, Some(0.0))).unwrap();

    match &harness.engine().calls[0] {
        Call::PropertiesP(_, p, Branch::Bubble) => assert_relative_eq!(*p, 14.6959, epsilon = 1e-4),
        other => panic!("unexpected call {other:?}"),
    }

    let StateReport::Saturated(pair) = &report.state else {
        panic!("expected a saturated pair");
    };
    assert_eq!(
        pair.boundary,
        BoundaryPoints::Temperatures { bubble: MockModern::BUBBLE_F, dew: MockModern::DEW_F }
    );
}

#[test]
fn flash_classification_follows_quality() {
    let mut harness = ModernEvaluator::new(MockModern::new().with_flash_quality(0.5));
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), Some(35.0))).unwrap();
    let StateReport::Flash(result) = &report.state else {
        panic!("expected a flash result");
    };
    assert_eq!(result.phase, Phase::SaturatedTwoPhase(0.5));
    assert_eq!(result.single_phase, None);

    let mut harness = ModernEvaluator::new(MockModern::new().with_flash_quality(1.5));
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(150.0), Some(35.0))).unwrap();
    let StateReport::Flash(result) = &report.state else {
        panic!("expected a flash result");
    };
    assert_eq!(result.phase, Phase::SuperheatedVapor);
    assert_eq!(result.vapor_density, Some(MockModern::FLASH_LBM_FT3));
    let single = result.single_phase.as_ref().expect("single-phase properties");
    assert_eq!(single.cp, 120.0);
    assert_eq!(single.thermal_conductivity, 0.08);
}

#[test]
fn critical_pressure_is_reported_as_gauge() {
    let mut harness = ModernEvaluator::new(MockModern::new());
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), None)).unwrap();

    assert_eq!(report.critical.temperature, MockModern::TC_F);
    assert_relative_eq!(report.critical.pressure, psia_to_psig(MockModern::PC_PSIA), max_relative = 1e-12);
    assert_eq!(report.critical.density, MockModern::DC_LBM_FT3);
    assert_eq!(report.critical.engine_version, 10.0);
    assert_eq!(harness.engine().calls.last(), Some(&Call::ModernVersion));
}

#[test]
fn reports_its_convention() {
    assert_eq!(ModernEvaluator::new(MockModern::new()).convention(), Convention::Modern);
}
