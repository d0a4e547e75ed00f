//! Integration test: descent against the bundled GeoJSON schema.
//!
//! Each case pairs a document with the node the descent must report.

use gjv_core::GeoJsonKind;
use gjv_partial::{
    find_all_invalid_units, find_invalid_unit, geojson_is_valid, geojson_is_valid_strict,
    locate_invalid_unit, PartialValidator, TerminalReason,
};
use gjv_schema::SchemaValidator;
use serde_json::{json, Value};

fn validator() -> &'static SchemaValidator {
    gjv_schema::bundled().expect("bundled schema must build")
}

fn point(x: f64, y: f64) -> Value {
    json!({"type": "Point", "coordinates": [x, y]})
}

fn feature(geometry: Value) -> Value {
    json!({"type": "Feature", "geometry": geometry, "properties": {}})
}

#[test]
fn valid_point_has_no_unit() {
    let doc = json!({"type": "Point", "coordinates": [1.0, 2.0]});
    assert!(geojson_is_valid(validator(), &doc));
    assert_eq!(find_invalid_unit(validator(), &doc), None);
}

#[test]
fn point_with_string_coordinates_is_its_own_unit() {
    let doc = json!({"type": "Point", "coordinates": "not-a-list"});
    assert!(!geojson_is_valid(validator(), &doc));
    assert_eq!(find_invalid_unit(validator(), &doc), Some(&doc));

    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert_eq!(unit.reason, TerminalReason::LeafGeometry);
}

#[test]
fn feature_collection_reports_broken_geometry_of_second_feature() {
    let doc = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {"name": "ok"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": ["x", 1]}, "properties": {"name": "bad"}}
        ]
    });
    let found = find_invalid_unit(validator(), &doc).unwrap();
    assert_eq!(found, &doc["features"][1]["geometry"]);
    assert_ne!(found, &doc);
    assert_ne!(found, &doc["features"][0]);

    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert_eq!(unit.path.to_pointer(), "/features/1/geometry");
    assert_eq!(unit.kind, GeoJsonKind::Point);
}

#[test]
fn geometry_collection_reports_short_linestring() {
    let doc = json!({
        "type": "GeometryCollection",
        "geometries": [
            {"type": "Point", "coordinates": [0, 0]},
            {"type": "LineString", "coordinates": [[0, 0]]}
        ]
    });
    assert_eq!(
        find_invalid_unit(validator(), &doc),
        Some(&json!({"type": "LineString", "coordinates": [[0, 0]]}))
    );
}

#[test]
fn feature_without_geometry_is_its_own_unit() {
    let doc = json!({"type": "Feature"});
    assert!(!geojson_is_valid(validator(), &doc));
    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert_eq!(unit.node, &doc);
    assert!(matches!(unit.reason, TerminalReason::StructuralLookup(_)));
}

#[test]
fn empty_object_is_its_own_unit() {
    let doc = json!({});
    assert!(!geojson_is_valid(validator(), &doc));
    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert_eq!(unit.node, &doc);
    assert_eq!(unit.reason, TerminalReason::UnrecognizedType);
}

#[test]
fn feature_missing_properties_is_blamed_over_valid_geometry() {
    let doc = json!({"type": "Feature", "geometry": point(0.0, 0.0)});
    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert!(unit.is_root());
    assert_eq!(unit.reason, TerminalReason::NoInvalidChild);
}

#[test]
fn unlocated_feature_missing_properties_is_blamed() {
    let doc = json!({"type": "Feature", "geometry": null});
    assert_eq!(find_invalid_unit(validator(), &doc), Some(&doc));
}

#[test]
fn features_member_that_is_not_an_array_reports_collection() {
    let doc = json!({"type": "FeatureCollection", "features": 5});
    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert!(unit.is_root());
    assert!(matches!(unit.reason, TerminalReason::StructuralLookup(_)));
}

#[test]
fn nested_geometry_collection_blames_outer_collection() {
    // The inner collection is valid GeoJSON on its own, but the schema does
    // not allow collections inside "geometries".
    let doc = json!({
        "type": "GeometryCollection",
        "geometries": [{"type": "GeometryCollection", "geometries": []}]
    });
    assert_eq!(find_invalid_unit(validator(), &doc), Some(&doc));
}

#[test]
fn feature_with_collection_geometry_blames_feature() {
    let doc = json!({
        "type": "FeatureCollection",
        "features": [feature(json!({"type": "GeometryCollection", "geometries": []}))]
    });
    assert_eq!(
        find_invalid_unit(validator(), &doc),
        Some(&doc["features"][0])
    );
}

#[test]
fn feature_with_bad_properties_is_reported_before_later_broken_geometry() {
    let doc = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": point(0.0, 0.0), "properties": 5},
            feature(json!({"type": "Point", "coordinates": ["x", 1]}))
        ]
    });
    assert_eq!(
        find_invalid_unit(validator(), &doc),
        Some(&doc["features"][0])
    );
}

#[test]
fn collection_level_bbox_violation_blames_collection() {
    let doc = json!({
        "type": "FeatureCollection",
        "bbox": ["a"],
        "features": [{"type": "Feature", "geometry": null, "properties": {}}]
    });
    assert_eq!(find_invalid_unit(validator(), &doc), Some(&doc));
}

#[test]
fn unknown_type_is_its_own_unit() {
    let doc = json!({"type": "Sphere", "radius": 1});
    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert_eq!(unit.kind, GeoJsonKind::Unrecognized);
    assert_eq!(unit.node, &doc);
}

#[test]
fn strict_mode_surfaces_violations() {
    let doc = json!({"type": "LineString", "coordinates": [[0, 0]]});
    let err = geojson_is_valid_strict(validator(), &doc).unwrap_err();
    assert!(err.count() > 0);
    assert!(geojson_is_valid_strict(validator(), &point(1.0, 2.0)).unwrap());
}

#[test]
fn unit_carries_its_own_violations() {
    let doc = json!({
        "type": "GeometryCollection",
        "geometries": [{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [0, 0]]]}]
    });
    let unit = locate_invalid_unit(validator(), &doc).unwrap();
    assert_eq!(unit.path.to_pointer(), "/geometries/0");
    assert!(unit.error.count() > 0);
    // Violations are relative to the unit, not to the root.
    assert!(unit
        .error
        .violations()
        .iter()
        .all(|v| !v.instance_path.starts_with("/geometries")));
}

#[test]
fn find_all_reports_each_broken_feature_geometry() {
    let doc = json!({
        "type": "FeatureCollection",
        "features": [
            feature(json!({"type": "LineString", "coordinates": [[0, 0]]})),
            feature(point(1.0, 1.0)),
            feature(json!({"type": "Point", "coordinates": "x"}))
        ]
    });
    let units = find_all_invalid_units(validator(), &doc);
    let pointers: Vec<String> = units.iter().map(|u| u.path.to_pointer()).collect();
    assert_eq!(pointers, vec!["/features/0/geometry", "/features/2/geometry"]);
    assert_eq!(Some(units[0].node), find_invalid_unit(validator(), &doc));
}

#[test]
fn bundled_partial_validator_matches_free_functions() {
    let pv = PartialValidator::bundled().unwrap();
    let doc = json!({"type": "GeometryCollection", "geometries": [point(0.0, 0.0), json!({})]});
    assert_eq!(
        pv.find_invalid_unit(&doc),
        find_invalid_unit(validator(), &doc)
    );
    assert_eq!(pv.find_invalid_unit(&doc), Some(&json!({})));
}

#[test]
fn directory_loaded_validator_descends_identically() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("gjv-schema")
        .join("schemas");
    let from_disk = SchemaValidator::from_dir(dir).unwrap();
    let doc = json!({
        "type": "FeatureCollection",
        "features": [feature(json!({"type": "MultiPoint", "coordinates": [[0, "y"]]}))]
    });
    assert_eq!(
        find_invalid_unit(&from_disk, &doc),
        find_invalid_unit(validator(), &doc)
    );
}

#[test]
fn concurrent_callers_share_the_bundled_validator() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let doc = json!({
                    "type": "GeometryCollection",
                    "geometries": [point(i as f64, 0.0), {"type": "Point", "coordinates": "x"}]
                });
                locate_invalid_unit(validator(), &doc).map(|u| u.path.to_pointer())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("/geometries/1"));
    }
}
