//! Integration tests for the conversion workflow

extern crate std;

use std::fs;
use std::path::PathBuf;

use surveykit::coordinate::{distance_2d, CoordinateTransformer, ReferenceSystemRegistry};
use surveykit::{LinearUnit, SurveyKit, SurveyPoint};

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("surveykit_test_{}_{}", std::process::id(), name));
    path
}

#[test]
fn test_csv_to_kml_workflow() {
    let csv_path = temp_path("control_points.csv");
    let kml_path = temp_path("control_points.kml");
    let log_path = temp_path("convert.log");

    fs::write(
        &csv_path,
        "id,station,status,northing,easting,elevation,notes\n\
         1,CM 10.99,found,2187051.01,6829001.34,126.80,ok\n\
         2,CM 10.90,found,2186000.00,6828000.00,125.00,ok\n\
         3,BAD ROW,found,not-a-number,6828000.00,125.00,ok\n",
    )
    .unwrap();

    let kit = SurveyKit::new(log_path.to_str()).unwrap();
    let count = kit
        .convert(csv_path.to_str().unwrap(), kml_path.to_str().unwrap(), Some("csv"), None, None)
        .unwrap();

    // Two good rows, one skipped with a warning
    std::assert_eq!(count, 2);

    let kml = fs::read_to_string(&kml_path).unwrap();
    std::assert!(kml.contains("<name>CM 10.99</name>"));
    std::assert!(kml.contains("<name>CM 10.90</name>"));
    std::assert!(!kml.contains("BAD ROW"));

    // Output coordinates must be geographic lon,lat in California
    std::assert!(kml.contains("<coordinates>-12"));

    // Deterministic output for the same input
    let kit2 = SurveyKit::new(log_path.to_str()).unwrap();
    let kml_path2 = temp_path("control_points_2.kml");
    kit2.convert(csv_path.to_str().unwrap(), kml_path2.to_str().unwrap(), Some("csv"), None, None)
        .unwrap();
    std::assert_eq!(kml, fs::read_to_string(&kml_path2).unwrap());

    let _ = fs::remove_file(&csv_path);
    let _ = fs::remove_file(&kml_path);
    let _ = fs::remove_file(&kml_path2);
    let _ = fs::remove_file(&log_path);
}

#[test]
fn test_landxml_to_kml_workflow() {
    let xml_path = temp_path("wall.xml");
    let kml_path = temp_path("wall.kml");
    let log_path = temp_path("landxml.log");

    fs::write(
        &xml_path,
        r#"<?xml version="1.0"?>
<LandXML xmlns="http://www.landxml.org/schema/LandXML-1.2">
  <Alignments>
    <Alignment name="RW Line 1" length="30.0">
      <CoordGeom>
        <Line>
          <Start>2187051.01 6829001.34</Start>
          <End>2187051.01 6829031.34</End>
        </Line>
      </CoordGeom>
    </Alignment>
  </Alignments>
</LandXML>"#,
    )
    .unwrap();

    let kit = SurveyKit::new(log_path.to_str()).unwrap();
    let count = kit
        .convert(xml_path.to_str().unwrap(), kml_path.to_str().unwrap(), None, None, None)
        .unwrap();
    std::assert_eq!(count, 1);

    let kml = fs::read_to_string(&kml_path).unwrap();
    std::assert!(kml.contains("<name>RW Line 1</name>"));
    std::assert!(kml.contains("<LineString>"));

    let _ = fs::remove_file(&xml_path);
    let _ = fs::remove_file(&kml_path);
    let _ = fs::remove_file(&log_path);
}

#[test]
fn test_control_monument_reconciliation() {
    // The full workflow behind the original investigation: a control
    // monument in the ftUS zone against a wall station from the meter
    // zone must come out ~39.3 ft apart, not the 2x figure produced by
    // comparing them raw.
    let registry = ReferenceSystemRegistry::bundled();
    let transformer = CoordinateTransformer::new(registry);

    let cm = SurveyPoint::new(6_829_001.34, 2_187_051.01, 2871, LinearUnit::UsSurveyFoot);
    let rw = SurveyPoint::new(2_081_471.89, 666_616.08, 2767, LinearUnit::Meter);

    let cm_ft = transformer.convert_point(&cm, 2871).unwrap();
    let rw_ft = transformer.convert_point(&rw, 2871).unwrap();
    let dist_ft = distance_2d(&cm_ft, &rw_ft).unwrap();

    std::assert!((dist_ft - 39.34).abs() < 0.5, "got {} ft", dist_ft);

    // Same comparison in the meter zone agrees after unit conversion
    let cm_m = transformer.convert_point(&cm, 2767).unwrap();
    let rw_m = transformer.convert_point(&rw, 2767).unwrap();
    let dist_m = distance_2d(&cm_m, &rw_m).unwrap();
    std::assert!((dist_m * 3937.0 / 1200.0 - dist_ft).abs() < 1e-3);
}

#[test]
fn test_ifc_property_extraction_workflow() {
    let ifc_path = temp_path("wall.ifc");
    let kml_path = temp_path("wall_ifc.kml");
    let log_path = temp_path("ifc.log");

    fs::write(
        &ifc_path,
        "ISO-10303-21;\nDATA;\n\
         #100=IFCPROPERTYSINGLEVALUE('Station',$,IFCTEXT('0+000.00'),$);\n\
         #101=IFCPROPERTYSINGLEVALUE('Start Point',$,IFCTEXT('2081533.5399142911,666940.64371720655,0'),$);\n\
         #200=IFCPROPERTYSINGLEVALUE('Station',$,IFCTEXT('0+035.11'),$);\n\
         #201=IFCPROPERTYSINGLEVALUE('Start Point',$,IFCTEXT('2081471.89,666616.08,0'),$);\n\
         ENDSEC;\nEND-ISO-10303-21;\n",
    )
    .unwrap();

    let kit = SurveyKit::new(log_path.to_str()).unwrap();
    let count = kit
        .convert(ifc_path.to_str().unwrap(), kml_path.to_str().unwrap(), None, None, None)
        .unwrap();
    std::assert_eq!(count, 2);

    let kml = fs::read_to_string(&kml_path).unwrap();
    std::assert!(kml.contains("<name>RW Sta 0+000.00</name>"));
    std::assert!(kml.contains("<name>RW Sta 0+035.11</name>"));

    let _ = fs::remove_file(&ifc_path);
    let _ = fs::remove_file(&kml_path);
    let _ = fs::remove_file(&log_path);
}
