//! Tests for cumulative-distance station assignment

use crate::alignment::{assign_stations, check_station_range, distance_along, format_station};
use crate::coordinate::{LinearUnit, SurveyPoint};

fn colinear_points(spacing_ft: f64, count: usize) -> Vec<SurveyPoint> {
    (0..count)
        .map(|i| {
            SurveyPoint::new_3d(
                6_829_000.0 + spacing_ft * i as f64,
                2_187_000.0,
                120.0,
                2871,
                LinearUnit::UsSurveyFoot,
            )
        })
        .collect()
}

#[test]
fn test_colinear_stations() {
    let points = colinear_points(10.0, 3);
    let stations = assign_stations(&points, 30000.0).unwrap();

    let labels: Vec<String> = stations.iter().map(|s| format_station(*s)).collect();
    assert_eq!(labels, vec!["300+00.00", "300+10.00", "300+20.00"]);
}

#[test]
fn test_cumulative_ignores_elevation() {
    // Stations are a horizontal measure; a vertical jump must not
    // stretch them
    let mut points = colinear_points(10.0, 3);
    points[1].z = Some(220.0);
    let stations = assign_stations(&points, 0.0).unwrap();
    assert!((stations[2] - 20.0).abs() < 1e-9);
}

#[test]
fn test_cumulative_matches_interpolation_on_exact_input() {
    // When the claimed range equals the measured length, the rejected
    // interpolation formula and the cumulative sum coincide
    let points = colinear_points(10.0, 4);
    let start = 30000.0;
    let end = 30030.0;

    let stations = assign_stations(&points, start).unwrap();
    let total = stations.last().unwrap() - start;

    for station in &stations {
        let cumulative = station - start;
        let interpolated = start + (end - start) * (cumulative / total);
        assert!((station - interpolated).abs() < 1e-9);
    }
    assert_eq!(check_station_range(&stations, end, 0.1), 0.0);
}

#[test]
fn test_cumulative_diverges_from_interpolation_on_wrong_range() {
    // Regression for the fixed bug: with a wrong claimed end station
    // the interpolation formula rescales every intermediate label,
    // while the cumulative sum stays tied to the measured geometry
    let points = colinear_points(10.0, 4);
    let start = 30000.0;
    let wrong_end = 30050.0; // actual length is 30.0

    let stations = assign_stations(&points, start).unwrap();
    let total = stations.last().unwrap() - start;

    let cumulative_mid = stations[1];
    let interpolated_mid = start + (wrong_end - start) * ((stations[1] - start) / total);
    assert!((cumulative_mid - 30010.0).abs() < 1e-9);
    assert!((interpolated_mid - 30016.666_666_666_668).abs() < 1e-6);
    assert!((cumulative_mid - interpolated_mid).abs() > 5.0);

    // The mismatch is surfaced, not rescaled away
    let mismatch = check_station_range(&stations, wrong_end, 0.1);
    assert!((mismatch - 20.0).abs() < 1e-9);
}

#[test]
fn test_distance_along_versus_straight_line() {
    // An L-shaped path: along-alignment distance and straight-line
    // distance are different quantities and stay separate operations
    let points = vec![
        SurveyPoint::new(0.0, 0.0, 2767, LinearUnit::Meter),
        SurveyPoint::new(30.0, 0.0, 2767, LinearUnit::Meter),
        SurveyPoint::new(30.0, 40.0, 2767, LinearUnit::Meter),
    ];

    let along = distance_along(&points, 0, 2).unwrap();
    assert!((along - 70.0).abs() < 1e-9);

    let straight = crate::coordinate::distance_2d(&points[0], &points[2]).unwrap();
    assert!((straight - 50.0).abs() < 1e-9);
}

#[test]
fn test_distance_along_is_direction_independent() {
    let points = colinear_points(7.5, 5);
    let forward = distance_along(&points, 0, 4).unwrap();
    let backward = distance_along(&points, 4, 0).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn test_empty_alignment_is_rejected() {
    assert!(assign_stations(&[], 0.0).is_err());
}

#[test]
fn test_single_point_gets_start_station() {
    let points = colinear_points(10.0, 1);
    let stations = assign_stations(&points, 32.67).unwrap();
    assert_eq!(stations, vec![32.67]);
}

#[test]
fn test_mixed_units_are_rejected() {
    let mut points = colinear_points(10.0, 3);
    points[1].unit = LinearUnit::Meter;
    assert!(assign_stations(&points, 0.0).is_err());
}
