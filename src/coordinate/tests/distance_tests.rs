//! Tests for distance calculation and the unit reconciliation guard

use crate::coordinate::{
    assert_consistent_units, distance_2d, distance_3d, LinearUnit, SurveyError, SurveyPoint,
};

#[test]
fn test_distance_to_self_is_zero() {
    let p = SurveyPoint::new(6_829_001.34, 2_187_051.01, 2871, LinearUnit::UsSurveyFoot);
    assert_eq!(distance_2d(&p, &p).unwrap(), 0.0);
}

#[test]
fn test_distance_is_symmetric() {
    let p = SurveyPoint::new(100.0, 200.0, 2767, LinearUnit::Meter);
    let q = SurveyPoint::new(163.0, 284.0, 2767, LinearUnit::Meter);
    let pq = distance_2d(&p, &q).unwrap();
    let qp = distance_2d(&q, &p).unwrap();
    assert_eq!(pq, qp);
    assert!((pq - 105.0).abs() < 1e-9); // 63-84-105 triangle
}

#[test]
fn test_distance_3d_includes_elevation() {
    let p = SurveyPoint::new_3d(0.0, 0.0, 0.0, 2767, LinearUnit::Meter);
    let q = SurveyPoint::new_3d(3.0, 4.0, 12.0, 2767, LinearUnit::Meter);
    assert!((distance_2d(&p, &q).unwrap() - 5.0).abs() < 1e-12);
    assert!((distance_3d(&p, &q).unwrap() - 13.0).abs() < 1e-12);
}

#[test]
fn test_unit_mismatch_is_fatal() {
    let p = SurveyPoint::new(100.0, 200.0, 2871, LinearUnit::UsSurveyFoot);
    let q = SurveyPoint::new(100.0, 200.0, 2871, LinearUnit::Meter);
    match distance_2d(&p, &q) {
        Err(SurveyError::UnitMismatch(_, _)) => {}
        other => panic!("expected UnitMismatch, got {:?}", other),
    }
}

#[test]
fn test_system_mismatch_is_fatal() {
    // Same numbers, different declared systems: comparing these raw is
    // exactly the bug class the guard exists to stop.
    let p = SurveyPoint::new(2_081_471.89, 666_616.08, 2767, LinearUnit::Meter);
    let q = SurveyPoint::new(2_081_471.89, 666_616.08, 26942, LinearUnit::Meter);
    match assert_consistent_units(&p, &q) {
        Err(SurveyError::SystemMismatch(2767, 26942)) => {}
        other => panic!("expected SystemMismatch, got {:?}", other),
    }
}
