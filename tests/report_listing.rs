mod common;

use common::{MockLegacy, MockModern, MOLAR_MASS};
use irefprop::converter::*;
use irefprop::{EvaluateQuery, LegacyEvaluator, ModernEvaluator, StateQuery};

#[test]
fn saturated_listing() {
    let mut harness = LegacyEvaluator::new(MockLegacy::new());
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(32.0), None)).unwrap();
    let listing = report.to_string();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines.len(), 23, "{listing}");
    assert_eq!(
        lines[0],
        format!("Bubble Point Pressure (psig): {:.2}", kpa_to_psig(MockLegacy::BUBBLE_KPA))
    );
    assert_eq!(
        lines[2],
        format!(
            "Liquid Density (lbm/ft3): {:.3}",
            mol_l_to_lbm_ft3(MockLegacy::LIQUID_MOL_L, MOLAR_MASS)
        )
    );
    assert!(lines[14].starts_with("Liquid Dynamic Viscosity (lbm/ft-s): "), "{}", lines[14]);
    assert!(lines[14].contains('e'), "viscosity should be in scientific notation: {}", lines[14]);
    assert_eq!(lines[18], format!("Critical Temperature (°F): {:.2}", k_to_f(MockLegacy::TC_K)));
    assert_eq!(lines[21], format!("Molecular Weight: {MOLAR_MASS:.2}"));
    assert_eq!(lines[22], "RefProp Version: 10.0000");
}

#[test]
fn pressure_only_listing_leads_with_temperatures() {
    let mut harness = ModernEvaluator::new(MockModern::new());
    let listing = harness
        .evaluate(&StateQuery::new("R134A.FLD", None, Some(20.0)))
        .unwrap()
        .to_string();

    assert!(listing.starts_with("Bubble Point Temperature (°F): 20.00\nDew Point Temperature (°F): 25.00\n"));
}

#[test]
fn modern_two_phase_listing_shows_quality_only() {
    let mut harness = ModernEvaluator::new(MockModern::new().with_flash_quality(0.25));
    let listing = harness
        .evaluate(&StateQuery::new("R134A.FLD", Some(40.0), Some(35.0)))
        .unwrap()
        .to_string();

    assert!(listing.starts_with("Saturated, Refrigerant Quality: 0.2500\n"), "{listing}");
    assert!(!listing.contains("Liquid Density"), "{listing}");
    assert!(!listing.contains("Vapor Density"), "{listing}");
    assert!(!listing.contains("Specific Heat"), "{listing}");
    assert!(!listing.contains("Viscosity"), "{listing}");
    assert!(listing.contains("Critical Density (lbm/ft3): 31.960"), "{listing}");
}

#[test]
fn legacy_two_phase_listing_shows_phase_densities() {
    let mut harness = LegacyEvaluator::new(MockLegacy::new().with_flash_quality(0.25));
    let listing = harness
        .evaluate(&StateQuery::new("R134A.FLD", Some(40.0), Some(35.0)))
        .unwrap()
        .to_string();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines[0], "Saturated, Refrigerant Quality: 0.2500");
    assert_eq!(
        lines[1],
        format!(
            "Liquid Density (lbm/ft3): {:.3}",
            mol_l_to_lbm_ft3(MockLegacy::LIQUID_MOL_L, MOLAR_MASS)
        )
    );
    assert_eq!(
        lines[2],
        format!(
            "Vapor Density (lbm/ft3): {:.3}",
            mol_l_to_lbm_ft3(MockLegacy::VAPOR_MOL_L, MOLAR_MASS)
        )
    );
    assert!(!listing.contains("Viscosity"), "{listing}");
}

#[test]
fn json_report() {
    let mut harness = LegacyEvaluator::new(MockLegacy::new().with_flash_quality(0.5));
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), Some(35.0))).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let flash = &json["state"]["flash"];
    assert_eq!(flash["phase"]["phase"], "saturated_two_phase");
    assert_eq!(flash["phase"]["quality"], 0.5);
    assert!(flash["liquid_density"].is_f64());
    assert!(flash["vapor_density"].is_f64());
    assert!(flash["single_phase"].is_null());
    assert_eq!(json["critical"]["engine_version"], 10.0);

    let mut harness = LegacyEvaluator::new(MockLegacy::new());
    let report = harness.evaluate(&StateQuery::new("R134A.FLD", Some(40.0), None)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["state"]["saturated"]["boundary"]["pressures"]["bubble"].is_f64());
}
