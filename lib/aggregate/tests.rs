//! Aggregator tests.

use super::{AggregatorState, ManifestAggregator};
use crate::artifact::Artifact;
use crate::bundle::BundleTag;
use crate::compat::{ApiVersionTable, ApiVersions, CapabilityTable, NoCapabilities};
use crate::context::ManifestContext;
use crate::error::ManifestError;
use crate::project::ProjectConfig;
use proptest::prelude::*;
use serde_json::json;

const APP_ID: &str = "b4ae822e-eca9-4fcb-8747-217f2a1f53a1";

fn project() -> ProjectConfig {
    ProjectConfig::new(APP_ID, "6.0.0")
}

fn table() -> ApiVersionTable {
    ApiVersionTable::new().with("6.0.0", ApiVersions::new("5.0.0", "3.0.0"))
}

fn device(family: &str) -> Artifact {
    Artifact::new(format!("device-{}.zip", family)).with_bundle(&BundleTag::device(family, &[family]))
}

fn native(family: &str) -> Artifact {
    Artifact::new(format!("device-{}.bin", family))
        .with_bundle(&BundleTag::native_device(family, &[family]))
}

fn companion(path: &str) -> Artifact {
    Artifact::new(path).with_bundle(&BundleTag::Companion)
}

#[test]
fn test_lifecycle_states() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));
    assert_eq!(aggregator.state(), AggregatorState::Empty);

    aggregator.ingest(Artifact::new("resources/index.gui")).unwrap();
    assert_eq!(aggregator.state(), AggregatorState::Accumulating);
    assert_eq!(aggregator.ingested(), 1);

    aggregator.finalize().unwrap();
    assert_eq!(aggregator.state(), AggregatorState::Finalized);
}

#[test]
fn test_artifact_forwarded_unchanged() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    let artifact = device("ionic").with_source_map("device.ionic");
    let forwarded = aggregator.ingest(artifact.clone()).unwrap();
    assert_eq!(forwarded, artifact);
}

#[test]
fn test_untagged_artifact_registers_nothing() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(Artifact::new("resources/icon.png")).unwrap();
    assert!(aggregator.components().watch.is_empty());
    assert!(aggregator.components().companion.is_none());
    assert!(aggregator.source_maps().is_empty());
}

#[test]
fn test_duplicate_family_names_both_files() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(device("ionic")).unwrap();
    let second = Artifact::new("other/ionic.zip").with_bundle(&BundleTag::device("ionic", &["ionic"]));
    let err = aggregator.ingest(second).unwrap_err();

    match err {
        ManifestError::DuplicateComponent {
            slot,
            file,
            existing,
        } => {
            assert_eq!(slot, "ionic");
            assert_eq!(file, "other/ionic.zip");
            assert_eq!(existing, "device-ionic.zip");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_companion() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(companion("companion.js")).unwrap();
    let err = aggregator.ingest(companion("companion-2.js")).unwrap_err();

    match err {
        ManifestError::DuplicateComponent {
            slot,
            file,
            existing,
        } => {
            assert_eq!(slot, "companion");
            assert_eq!(file, "companion-2.js");
            assert_eq!(existing, "companion.js");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_mixed_native_and_js() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(native("fenix")).unwrap();
    let err = aggregator.ingest(device("ionic")).unwrap_err();
    match err {
        ManifestError::MixedComponentType { file } => assert_eq!(file, "device-ionic.zip"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_failed_ingestion_leaves_state_untouched() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(native("fenix")).unwrap();
    let before = aggregator.components().clone();

    assert!(aggregator.ingest(device("ionic").with_source_map("device.ionic")).is_err());
    assert_eq!(aggregator.components(), &before);
    assert!(!aggregator.components().has_js);
    assert!(aggregator.source_maps().is_empty());
    assert_eq!(aggregator.ingested(), 1);

    // Another native family is still accepted.
    aggregator.ingest(native("versa")).unwrap();
    assert_eq!(aggregator.components().watch.len(), 2);
}

#[test]
fn test_invalid_tag_aborts_ingestion() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    let artifact = Artifact::new("broken.zip")
        .with_raw_bundle(json!({ "type": "device", "family": "ionic" }))
        .with_source_map("device.ionic");
    let err = aggregator.ingest(artifact).unwrap_err();

    match err {
        ManifestError::InvalidBundleTag(tag_err) => {
            assert_eq!(tag_err.file, "broken.zip");
            assert_eq!(tag_err.issues.len(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(aggregator.source_maps().is_empty());
}

#[test]
fn test_supports_only_for_js_devices() {
    let project = project();
    let table = table();
    let capabilities = CapabilityTable::new()
        .with("ionic", json!({ "screenSize": { "w": 348, "h": 250 } }))
        .with("fenix", json!({ "screenSize": { "w": 260, "h": 260 } }));

    let mut js =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &capabilities, &table));
    js.ingest(device("ionic")).unwrap();
    assert_eq!(
        js.components().watch["ionic"].supports,
        Some(json!({ "screenSize": { "w": 348, "h": 250 } }))
    );

    let mut native_build =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &capabilities, &table));
    native_build.ingest(native("fenix")).unwrap();
    assert_eq!(native_build.components().watch["fenix"].supports, None);
}

#[test]
fn test_source_map_paths_are_normalized() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator
        .ingest(Artifact::new(".\\maps\\device-ionic.js.map").with_source_map("device.ionic"))
        .unwrap();
    aggregator
        .ingest(Artifact::new("maps/companion.js.map").with_source_map("companion"))
        .unwrap();
    aggregator
        .ingest(Artifact::new("maps/device-ionic-2.js.map").with_source_map("device.ionic"))
        .unwrap();

    assert_eq!(
        aggregator.source_maps().path("device.ionic"),
        Some("maps/device-ionic-2.js.map")
    );
    assert_eq!(
        aggregator.source_maps().path("companion"),
        Some("maps/companion.js.map")
    );
}

#[test]
fn test_ingest_after_finalize() {
    let project = project();
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.finalize().unwrap();
    let err = aggregator.ingest(device("ionic")).unwrap_err();
    assert!(matches!(err, ManifestError::Lifecycle { .. }));
    assert!(matches!(
        aggregator.finalize().unwrap_err(),
        ManifestError::Lifecycle { .. }
    ));
}

#[test]
fn test_failed_finalize_still_closes() {
    let project = ProjectConfig::new(APP_ID, "0.1.0");
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(companion("companion.js")).unwrap();
    assert!(matches!(
        aggregator.finalize().unwrap_err(),
        ManifestError::VersionResolution { .. }
    ));
    assert!(matches!(
        aggregator.ingest(Artifact::new("late.js")).unwrap_err(),
        ManifestError::Lifecycle { .. }
    ));
}

#[test]
fn test_finalize_omits_tiles_for_js_build() {
    let mut project = project();
    project
        .tiles
        .push(crate::project::TileDeclaration::new("Clock", "t1"));
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(device("ionic")).unwrap();
    let output = aggregator.finalize().unwrap();
    assert_eq!(output.descriptor.components.tiles, None);
}

#[test]
fn test_finalize_maps_tiles_for_native_build() {
    let mut project = project();
    project.tiles.push(
        crate::project::TileDeclaration::new("Clock", "t1").with_build_targets(&["fenix", "versa"]),
    );
    let table = table();
    let mut aggregator =
        ManifestAggregator::new(ManifestContext::new("0x1", &project, &NoCapabilities, &table));

    aggregator.ingest(native("fenix")).unwrap();
    let output = aggregator.finalize().unwrap();
    let tiles = output.descriptor.components.tiles.unwrap();
    assert_eq!(tiles[0].platforms, vec!["fenix"]);
}

//--------------------------------------------------------------------------------------------------
// Property Tests
//--------------------------------------------------------------------------------------------------

fn families() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{3,8}", 1..6).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn distinct_families_register_independent_of_order(
        (declared, shuffled) in families().prop_flat_map(|f| (Just(f.clone()), Just(f).prop_shuffle())),
        is_native in any::<bool>(),
    ) {
        let project = project();
        let table = table();
        let build = |order: &[String]| {
            let mut aggregator = ManifestAggregator::new(
                ManifestContext::new("0x1", &project, &NoCapabilities, &table),
            );
            for family in order {
                let artifact = if is_native { native(family) } else { device(family) };
                aggregator.ingest(artifact).unwrap();
            }
            aggregator.components().clone()
        };

        let first = build(&declared);
        let second = build(&shuffled);

        prop_assert_eq!(first.watch.len(), declared.len());
        prop_assert_eq!(&first, &second);
        prop_assert!(!(first.has_native && first.has_js));
    }

    #[test]
    fn duplicate_family_fails_in_either_order(
        family in "[a-z]{3,8}",
        swap in any::<bool>(),
    ) {
        let project = project();
        let table = table();
        let mut aggregator = ManifestAggregator::new(
            ManifestContext::new("0x1", &project, &NoCapabilities, &table),
        );

        let a = Artifact::new("a.zip").with_bundle(&BundleTag::device(family.as_str(), &["p"]));
        let b = Artifact::new("b.zip").with_bundle(&BundleTag::device(family.as_str(), &["q"]));
        let (first, second) = if swap { (b, a) } else { (a, b) };

        aggregator.ingest(first).unwrap();
        match aggregator.ingest(second) {
            Err(ManifestError::DuplicateComponent { file, existing, .. }) => {
                let mut named = vec![file, existing];
                named.sort();
                prop_assert_eq!(named, vec!["a.zip".to_string(), "b.zip".to_string()]);
            }
            other => prop_assert!(false, "expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn mixed_nativity_fails_in_either_order(
        native_family in "[a-z]{3,8}",
        js_family in "[a-z]{3,8}",
        native_first in any::<bool>(),
    ) {
        let project = project();
        let table = table();
        let mut aggregator = ManifestAggregator::new(
            ManifestContext::new("0x1", &project, &NoCapabilities, &table),
        );

        let native_artifact = Artifact::new("n.bin")
            .with_bundle(&BundleTag::native_device(native_family.as_str(), &["n"]));
        let js_artifact =
            Artifact::new("j.zip").with_bundle(&BundleTag::device(js_family.as_str(), &["j"]));
        let (first, second) = if native_first {
            (native_artifact, js_artifact)
        } else {
            (js_artifact, native_artifact)
        };

        aggregator.ingest(first).unwrap();
        let result = aggregator.ingest(second);
        prop_assert!(
            matches!(result, Err(ManifestError::MixedComponentType { .. })),
            "expected mixed type error, got {:?}",
            result
        );
    }
}
