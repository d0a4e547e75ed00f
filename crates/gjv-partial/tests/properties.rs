//! Property tests: descent invariants over generated GeoJSON trees with
//! randomly corrupted nodes.

use gjv_partial::{find_all_invalid_units, find_invalid_unit, geojson_is_valid, locate_invalid_unit};
use gjv_schema::SchemaValidator;
use proptest::prelude::*;
use serde_json::{json, Value};

fn validator() -> &'static SchemaValidator {
    gjv_schema::bundled().expect("bundled schema must build")
}

fn geometry() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (-180.0f64..180.0, -90.0f64..90.0)
            .prop_map(|(x, y)| json!({"type": "Point", "coordinates": [x, y]})),
        2 => (2usize..5).prop_map(|n| {
            let coords: Vec<Value> = (0..n).map(|i| json!([i, i])).collect();
            json!({"type": "LineString", "coordinates": coords})
        }),
        1 => Just(json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]})),
        // corrupted leaves
        1 => Just(json!({"type": "Point", "coordinates": "not-a-list"})),
        1 => Just(json!({"type": "LineString", "coordinates": [[0, 0]]})),
        1 => Just(json!({"type": "Polygon"})),
    ]
}

fn feature() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => geometry().prop_map(|g| json!({"type": "Feature", "geometry": g, "properties": {}})),
        1 => Just(json!({"type": "Feature", "geometry": null, "properties": null})),
        // corrupted features
        1 => geometry().prop_map(|g| json!({"type": "Feature", "geometry": g})),
        1 => Just(json!({"type": "Feature", "properties": {}})),
    ]
}

fn document() -> impl Strategy<Value = Value> {
    prop_oneof![
        geometry(),
        feature(),
        prop::collection::vec(geometry(), 0..5)
            .prop_map(|gs| json!({"type": "GeometryCollection", "geometries": gs})),
        prop::collection::vec(feature(), 0..5)
            .prop_map(|fs| json!({"type": "FeatureCollection", "features": fs})),
        Just(json!({})),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Valid documents have no unit; invalid ones have a unit that is itself invalid.
    #[test]
    fn unit_exists_iff_invalid(doc in document()) {
        let valid = geojson_is_valid(validator(), &doc);
        match find_invalid_unit(validator(), &doc) {
            None => prop_assert!(valid),
            Some(unit) => {
                prop_assert!(!valid);
                prop_assert!(!geojson_is_valid(validator(), unit));
            }
        }
    }

    /// Repeated calls give the same answer.
    #[test]
    fn descent_is_idempotent(doc in document()) {
        let first = find_invalid_unit(validator(), &doc);
        let second = find_invalid_unit(validator(), &doc);
        prop_assert_eq!(first, second);
    }

    /// The unit is reachable from the root by its reported path.
    #[test]
    fn unit_path_resolves_to_unit(doc in document()) {
        if let Some(unit) = locate_invalid_unit(validator(), &doc) {
            let resolved = unit.path.resolve(&doc);
            prop_assert!(resolved.is_some_and(|n| std::ptr::eq(n, unit.node)));
            for step in unit.path.steps() {
                prop_assert!(["features", "geometries", "geometry"].contains(&step.member()));
            }
        }
    }

    /// The exhaustive variant starts with the single-result answer, and
    /// every unit it reports is invalid on its own.
    #[test]
    fn find_all_agrees_with_find(doc in document()) {
        let all = find_all_invalid_units(validator(), &doc);
        let first = find_invalid_unit(validator(), &doc);
        prop_assert_eq!(all.first().map(|u| u.node), first);
        for unit in &all {
            prop_assert!(!geojson_is_valid(validator(), unit.node));
        }
    }
}
