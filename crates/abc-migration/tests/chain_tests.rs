use std::sync::Arc;

use abc_migration::{
    default_updater, is_encrypted, MigrationConfig, MigrationError, ProjectUpdater,
    CURRENT_VERSION,
};
use abc_project::{
    LayerKind, LayoutFormat, LayoutFormats, LayoutManifest, LegendDisplay, MapView,
    ProjectManifest, ProjectSet,
};
use abc_test_utils::{
    init_tracing, legacy_v010_manifest, legacy_v010_project, FakeEncryptor, StubPrompt,
    TEST_PASSWORD,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn updater_with(prompt: Arc<StubPrompt>, encryptor: Arc<FakeEncryptor>) -> ProjectUpdater {
    default_updater(prompt, encryptor, MigrationConfig::default()).unwrap()
}

async fn migrate_fixture() -> (ProjectSet, Arc<StubPrompt>) {
    init_tracing();
    let prompt = Arc::new(StubPrompt::confirming(TEST_PASSWORD));
    let updater = updater_with(prompt.clone(), Arc::new(FakeEncryptor::new()));
    let project = updater.update(legacy_v010_project()).await.unwrap();
    (project, prompt)
}

#[tokio::test]
async fn legacy_fixture_reaches_current_version() {
    let (project, prompt) = migrate_fixture().await;

    assert_eq!(project.version(), CURRENT_VERSION);
    assert_eq!(prompt.calls(), 1);
}

#[tokio::test]
async fn wms_url_is_encrypted_and_moved() {
    let (project, _) = migrate_fixture().await;

    let wms = &project.manifest.wms_layers().next().unwrap().metadata;
    assert_eq!(wms.remote_url, None);

    let urls = wms.remote_urls.as_ref().unwrap();
    assert_eq!(urls.len(), 1);
    assert!(is_encrypted(&urls[0]));
    assert!(urls[0].len() > "encrypted:".len());
    assert!(!urls[0].contains("http://localhost"));
    assert_eq!(
        FakeEncryptor::decrypt(&urls[0], TEST_PASSWORD).as_deref(),
        Some("http://localhost/geoserver/wms")
    );
    assert_eq!(project.manifest.metadata.contains_credentials, Some(true));
}

#[tokio::test]
async fn every_transition_is_visible_in_the_manifest() {
    let (project, _) = migrate_fixture().await;
    let manifest = &project.manifest;

    // 0.2
    assert_eq!(manifest.view, Some(MapView::default()));
    // 0.4
    assert_eq!(manifest.metadata.projection, None);
    // 0.5
    assert_eq!(manifest.layouts[0].format.id.as_deref(), Some("A4_LANDSCAPE"));
    assert_eq!(manifest.layouts[0].format.name, None);
    // 0.6
    assert_eq!(manifest.shared_views, Some(vec![]));
    assert_eq!(manifest.metadata.public, Some(false));
    // 0.7
    assert_eq!(manifest.legend, None);
    let legend = manifest.layouts[0].legend.as_ref().unwrap();
    assert_eq!(legend.display, LegendDisplay::BottomRightCorner);
    let texts: Vec<&str> = legend.items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["Communes", "Annotations"]);
    assert_ne!(legend.id, "f5cb0f6e-4179-4cbf-8c1d-5d6e7f8091a2");
}

#[tokio::test]
async fn unmodelled_fields_survive() {
    let (project, _) = migrate_fixture().await;
    let value = project.manifest.to_value().unwrap();

    assert_eq!(
        value["metadata"]["creationDate"],
        json!("2020-11-05T10:12:45.000Z")
    );
    assert_eq!(value["layers"][1]["metadata"]["opacity"], json!(0.8));
    assert_eq!(
        value["layers"][2]["features"]["features"][0]["properties"]["label"],
        json!("Rennes")
    );
    assert_eq!(value["layouts"][0]["name"], json!("Page 1"));
    assert_eq!(value["layouts"][0]["format"]["width"], json!(297));
    assert_eq!(value["layouts"][0]["legend"]["width"], json!(200));
    assert!(value.get("legend").is_none());
}

#[tokio::test]
async fn layers_keep_their_order_and_kind() {
    let (project, _) = migrate_fixture().await;
    let kinds: Vec<LayerKind> = project.manifest.layers.iter().map(|l| l.kind()).collect();
    assert_eq!(kinds, vec![LayerKind::Predefined, LayerKind::Wms, LayerKind::Vector]);
}

#[tokio::test]
async fn attached_files_are_untouched() {
    let input = legacy_v010_project();
    let (project, _) = migrate_fixture().await;
    assert_eq!(project.files, input.files);
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let (migrated, _) = migrate_fixture().await;
    let prompt = Arc::new(StubPrompt::confirming(TEST_PASSWORD));
    let encryptor = Arc::new(FakeEncryptor::new());
    let updater = updater_with(prompt.clone(), encryptor.clone());

    let report = updater.update_with_report(migrated.clone()).await.unwrap();

    assert!(!report.changed());
    assert_eq!(report.project, migrated);
    assert_eq!(prompt.calls(), 0);
    assert_eq!(encryptor.calls(), 0);
}

#[tokio::test]
async fn migrated_manifest_round_trips_through_json() {
    let (project, _) = migrate_fixture().await;
    let json = project.manifest.to_json().unwrap();
    assert_eq!(ProjectManifest::from_json(&json).unwrap(), project.manifest);
}

#[tokio::test]
async fn cancelled_password_aborts_whole_update() {
    let prompt = Arc::new(StubPrompt::cancelling());
    let encryptor = Arc::new(FakeEncryptor::new());
    let updater = updater_with(prompt.clone(), encryptor.clone());

    let err = updater.update(legacy_v010_project()).await.unwrap_err();

    assert!(matches!(err, MigrationError::PasswordMandatory));
    assert_eq!(err.to_string(), "Password is mandatory");
    assert_eq!(prompt.calls(), 1);
    assert_eq!(encryptor.calls(), 0);
}

#[tokio::test]
async fn report_lists_whole_chain() {
    let updater = updater_with(
        Arc::new(StubPrompt::confirming(TEST_PASSWORD)),
        Arc::new(FakeEncryptor::new()),
    );

    let report = updater.update_with_report(legacy_v010_project()).await.unwrap();

    let transitions: Vec<(&str, &str)> = report
        .applied
        .iter()
        .map(|a| (a.from.as_str(), a.to.as_str()))
        .collect();
    assert_eq!(
        transitions,
        vec![
            ("0.1", "0.2.0"),
            ("0.2.0", "0.3.0"),
            ("0.3.0", "0.4.0"),
            ("0.4.0", "0.5.0"),
            ("0.5.0", "0.6.0"),
            ("0.6.0", "0.7.0"),
        ]
    );
}

#[tokio::test]
async fn configured_fallback_format_is_used() {
    let mut manifest = legacy_v010_manifest();
    manifest.layouts[0].format = LayoutFormat::from_name("US Letter");

    let config = MigrationConfig::from_yaml("fallback_layout_format: A3_PORTRAIT\n").unwrap();
    let updater = default_updater(
        Arc::new(StubPrompt::confirming(TEST_PASSWORD)),
        Arc::new(FakeEncryptor::new()),
        config,
    )
    .unwrap();

    let project = updater.update(ProjectSet::from_manifest(manifest)).await.unwrap();
    assert_eq!(
        project.manifest.layouts[0].format.id.as_deref(),
        Some("A3_PORTRAIT")
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn legacy_layout_names_map_through_full_chain(
        known in proptest::sample::select(LayoutFormats::ALL),
    ) {
        let manifest = ProjectManifest::new("0.1").with_layout(LayoutManifest {
            format: LayoutFormat::from_name(known.legacy_name),
            ..LayoutManifest::default()
        });
        let updater = updater_with(
            Arc::new(StubPrompt::cancelling()),
            Arc::new(FakeEncryptor::new()),
        );

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let project = runtime
            .block_on(updater.update(ProjectSet::from_manifest(manifest)))
            .unwrap();

        prop_assert_eq!(project.version(), CURRENT_VERSION);
        prop_assert_eq!(project.manifest.layouts[0].format.id.as_deref(), Some(known.id));
        prop_assert!(project.manifest.layouts[0].legend.is_some());
    }
}
