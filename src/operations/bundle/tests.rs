use super::*;
use crate::config::RepositorySource;
use crate::executor::BatchStatus;
use crate::test_fixtures::{FakeDevice, FakeFetcher, MemoryStore, catalog_of};

fn context() -> (ConfigContext<MemoryStore>, MemoryStore) {
    let mut config = Configuration::default();
    config.repos.push(RepositorySource::new("izzy", "https://example.org/izzy"));
    let store = MemoryStore::new(config);
    (ConfigContext::load(store.clone()).unwrap(), store)
}

fn session(device: &FakeDevice, fetcher: &FakeFetcher) -> Session {
    Session::new(
        Box::new(catalog_of(&[("A", 1), ("B", 5)])),
        Box::new(device.clone()),
        Box::new(fetcher.clone()),
    )
}

#[test]
fn test_create_snapshots_known_repositories() {
    let (mut ctx, store) = context();
    create(&mut ctx, "daily").unwrap();

    let bundle = ctx.config().bundle("daily").unwrap();
    assert!(bundle.apps.is_empty());
    assert_eq!(bundle.sources, vec!["f-droid", "izzy"]);
    assert_eq!(store.saved().unwrap(), *ctx.config());
}

#[test]
fn test_create_rejects_duplicate_name() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    let err = create(&mut ctx, "daily").unwrap_err();
    assert!(matches!(err, ApkupError::BundleExists { .. }));
    assert_eq!(ctx.config().bundles.len(), 1);
}

#[test]
fn test_remove_bundle() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    let removed = remove(&mut ctx, "daily").unwrap();
    assert_eq!(removed.id, "daily");
    assert!(ctx.config().bundle("daily").is_none());

    let err = remove(&mut ctx, "daily").unwrap_err();
    assert!(err.to_string().contains("could not be found"));
}

#[test]
fn test_add_and_remove_apps() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    add_app(&mut ctx, "daily", "org.example.a").unwrap();
    add_app(&mut ctx, "daily", "org.example.b").unwrap();

    let err = add_app(&mut ctx, "daily", "org.example.a").unwrap_err();
    assert!(matches!(err, ApkupError::DuplicateMember { .. }));

    remove_app(&mut ctx, "daily", "org.example.a").unwrap();
    assert_eq!(ctx.config().bundle("daily").unwrap().apps, vec!["org.example.b"]);

    let err = remove_app(&mut ctx, "daily", "org.example.a").unwrap_err();
    assert!(matches!(err, ApkupError::MemberNotFound { .. }));
}

#[test]
fn test_add_app_to_missing_bundle() {
    let (mut ctx, store) = context();
    let err = add_app(&mut ctx, "nope", "org.example.a").unwrap_err();
    assert!(matches!(err, ApkupError::BundleNotFound { .. }));
    assert!(store.saved().is_none());
}

#[test]
fn test_add_source_requires_known_repository() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    remove_source(&mut ctx, "daily", "izzy").unwrap();

    let err = add_source(&mut ctx, "daily", "unknown").unwrap_err();
    assert!(matches!(err, ApkupError::RepoNotFound { .. }));

    add_source(&mut ctx, "daily", "izzy").unwrap();
    assert_eq!(
        ctx.config().bundle("daily").unwrap().sources,
        vec!["f-droid", "izzy"]
    );
}

#[test]
fn test_failed_write_leaves_memory_unchanged() {
    let (mut ctx, store) = context();
    create(&mut ctx, "daily").unwrap();
    let before = ctx.config().clone();

    store.fail_writes(true);
    let err = add_app(&mut ctx, "daily", "org.example.a").unwrap_err();

    assert!(matches!(err, ApkupError::ConfigWriteFailed { .. }));
    assert_eq!(*ctx.config(), before);
    assert_eq!(store.saved().unwrap(), before);
}

#[test]
fn test_apply_with_removed_repository_touches_nothing() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    add_app(&mut ctx, "daily", "A").unwrap();
    ctx.update(|c| c.remove_repo("f-droid")).unwrap();

    let device = FakeDevice::new();
    let fetcher = FakeFetcher::new();
    let mut opened = false;
    let err = apply(ctx.config(), "daily", false, |_| {
        opened = true;
        Ok(session(&device, &fetcher))
    })
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Bundle 'daily' contains unknown repository id 'f-droid'"
    );
    assert!(!opened);
    assert!(fetcher.fetched().is_empty());
    assert!(device.installs().is_empty());
}

#[test]
fn test_apply_empty_bundle_fails() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();

    let device = FakeDevice::new();
    let fetcher = FakeFetcher::new();
    let mut opened = false;
    let err = apply(ctx.config(), "daily", false, |_| {
        opened = true;
        Ok(session(&device, &fetcher))
    })
    .unwrap_err();

    assert!(matches!(err, ApkupError::Precondition { .. }));
    assert!(err.to_string().contains("Bundle 'daily' has no apps"));
    assert!(!opened);
    assert!(fetcher.fetched().is_empty());
    assert!(device.installs().is_empty());
}

#[test]
fn test_apply_unknown_bundle_fails() {
    let (ctx, _) = context();
    let err = plan_apply(ctx.config(), "nope").unwrap_err();
    assert!(matches!(err, ApkupError::BundleNotFound { .. }));
}

#[test]
fn test_apply_is_best_effort() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    for app in ["A", "X", "B"] {
        add_app(&mut ctx, "daily", app).unwrap();
    }

    let device = FakeDevice::new().with_installed("B", 4);
    let fetcher = FakeFetcher::new().failing_on("A_1.apk");
    let report = apply(ctx.config(), "daily", false, |_| Ok(session(&device, &fetcher))).unwrap();

    assert_eq!(fetcher.fetched(), vec!["A_1.apk", "B_5.apk"]);
    assert_eq!(device.installs(), vec![FakeFetcher::path_for("B_5.apk")]);
    assert_eq!(report.upgraded_count(), 1);
    assert_eq!(
        report.status(),
        BatchStatus::Failed {
            failed: 1,
            total: 2
        }
    );
    let failed: Vec<&str> = report.failures().into_iter().map(|(app, _)| app).collect();
    assert_eq!(failed, vec!["A", "X"]);
}

#[test]
fn test_apply_dry_run() {
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    add_app(&mut ctx, "daily", "A").unwrap();

    let device = FakeDevice::new();
    let fetcher = FakeFetcher::new();
    let report = apply(ctx.config(), "daily", true, |_| Ok(session(&device, &fetcher))).unwrap();

    assert_eq!(report.planned_lines(), vec!["install A:1"]);
    assert!(device.installs().is_empty());
}

#[test]
fn test_export_then_import_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    add_app(&mut ctx, "daily", "org.example.a").unwrap();

    let path = export(ctx.config(), "daily", dir.path()).unwrap();
    assert_eq!(path, dir.path().join("daily.yaml"));

    let store = MemoryStore::new(Configuration::default());
    let mut other = ConfigContext::load(store).unwrap();
    let id = import(&mut other, &path).unwrap();

    assert_eq!(id, "daily");
    assert_eq!(other.config().bundle("daily"), ctx.config().bundle("daily"));
}

#[test]
fn test_export_never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    std::fs::write(dir.path().join("daily.yaml"), "keep me").unwrap();

    let err = export(ctx.config(), "daily", dir.path()).unwrap_err();

    assert!(matches!(err, ApkupError::ExportExists { .. }));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("daily.yaml")).unwrap(),
        "keep me"
    );
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_failed_export_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    let missing = dir.path().join("missing");

    let err = export(ctx.config(), "daily", &missing).unwrap_err();
    assert!(matches!(err, ApkupError::IoError { .. }));
    assert!(!missing.join("daily.yaml").exists());

    std::fs::create_dir(&missing).unwrap();
    let path = export(ctx.config(), "daily", &missing).unwrap();
    assert!(path.is_file());
    assert_eq!(std::fs::read_dir(&missing).unwrap().count(), 1);
}

#[test]
fn test_import_rejects_existing_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let (mut ctx, _) = context();
    create(&mut ctx, "daily").unwrap();
    let path = dir.path().join("daily.yaml");
    std::fs::write(&path, "id: daily\napps: [org.example.z]\n").unwrap();

    let err = import(&mut ctx, &path).unwrap_err();

    assert!(matches!(err, ApkupError::BundleExists { .. }));
    assert!(ctx.config().bundle("daily").unwrap().apps.is_empty());
}

#[test]
fn test_import_reports_document_path() {
    let dir = tempfile::tempdir().unwrap();
    let (mut ctx, _) = context();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "apps: [org.example.z]\n").unwrap();

    match import(&mut ctx, &path).unwrap_err() {
        ApkupError::ConfigParseFailed { path: reported, .. } => {
            assert!(reported.ends_with("broken.yaml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
