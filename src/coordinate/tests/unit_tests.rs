//! Tests for linear unit conversion

use crate::coordinate::LinearUnit;

const UNITS: [LinearUnit; 3] = [
    LinearUnit::Meter,
    LinearUnit::UsSurveyFoot,
    LinearUnit::InternationalFoot,
];

#[test]
fn test_exact_factors() {
    assert_eq!(LinearUnit::Meter.to_meters(), 1.0);
    assert_eq!(LinearUnit::UsSurveyFoot.to_meters(), 1200.0 / 3937.0);
    assert_eq!(LinearUnit::InternationalFoot.to_meters(), 0.3048);
}

#[test]
fn test_survey_and_international_foot_differ() {
    // The two foot definitions are ~2 ppm apart; at state-plane
    // magnitudes the difference is multiple feet and must never be
    // flattened into a single "foot".
    let easting_ft = 6_829_001.34;
    let as_survey = LinearUnit::UsSurveyFoot.convert(easting_ft, LinearUnit::Meter);
    let as_intl = LinearUnit::InternationalFoot.convert(easting_ft, LinearUnit::Meter);
    assert!((as_survey - as_intl).abs() > 10.0 * 0.3048);
}

#[test]
fn test_conversion_transitivity() {
    // U1 -> U2 -> U3 must agree with U1 -> U3 to floating-point precision
    let value = 12_345.678;
    for u1 in UNITS {
        for u2 in UNITS {
            for u3 in UNITS {
                let chained = u2.convert(u1.convert(value, u2), u3);
                let direct = u1.convert(value, u3);
                assert!(
                    (chained - direct).abs() <= direct.abs() * 1e-12,
                    "{} -> {} -> {} diverged from {} -> {}",
                    u1, u2, u3, u1, u3
                );
            }
        }
    }
}

#[test]
fn test_identity_conversion_is_exact() {
    for unit in UNITS {
        assert_eq!(unit.convert(42.0, unit), 42.0);
    }
}

#[test]
fn test_from_name() {
    assert_eq!(LinearUnit::from_name("us_survey_foot").unwrap(), LinearUnit::UsSurveyFoot);
    assert_eq!(LinearUnit::from_name("ftUS").unwrap(), LinearUnit::UsSurveyFoot);
    assert_eq!(LinearUnit::from_name("Meter").unwrap(), LinearUnit::Meter);
    assert_eq!(LinearUnit::from_name("ft").unwrap(), LinearUnit::InternationalFoot);
    assert!(LinearUnit::from_name("furlong").is_err());
}
