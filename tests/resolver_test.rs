// tests/resolver_test.rs
use lconf_version::config::VersionConfig;
use lconf_version::domain::{Keywords, VersionRecord};
use lconf_version::runner::MockRunner;
use lconf_version::sources::vcs::{DESCRIBE_ARGS, REV_PARSE_ARGS};
use lconf_version::Resolver;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HASH: &str = "9fceb02d0ae598e95dc970b74767f19372d61af8";

/// Lays out `<tmp>/<dirname>/LCONF/_version.py` and returns the version file path.
fn source_tree(tmp: &TempDir, dirname: &str, with_git: bool) -> PathBuf {
    let root = tmp.path().join(dirname);
    fs::create_dir_all(root.join("LCONF")).unwrap();
    if with_git {
        fs::create_dir(root.join(".git")).unwrap();
    }
    let versionfile = root.join("LCONF").join("_version.py");
    fs::write(&versionfile, "git_refnames = '$Format:%d$'\ngit_full = '$Format:%H$'\n").unwrap();
    versionfile
}

fn live_runner() -> MockRunner {
    MockRunner::new()
        .with_output(&DESCRIBE_ARGS, "0.8.0-2-g9fceb02")
        .with_output(&REV_PARSE_ARGS, HASH)
}

#[test]
fn test_keywords_short_circuit_live_query() {
    let tmp = TempDir::new().unwrap();
    let versionfile = source_tree(&tmp, "LCONF-0.7.0", true);

    let resolver = Resolver::with_runner(VersionConfig::default(), live_runner())
        .with_versionfile(&versionfile)
        .with_keywords(Some(Keywords::new("(HEAD -> master, tag: 0.9.0)", HASH)));

    let record = resolver.resolve(None, false);

    assert_eq!(record, VersionRecord::new("0.9.0", HASH));
    assert_eq!(resolver.runner().spawn_count(), 0);
    assert!(resolver.runner().calls().is_empty());
}

#[test]
fn test_live_checkout_beats_parentdir() {
    let tmp = TempDir::new().unwrap();
    let versionfile = source_tree(&tmp, "LCONF-0.7.0", true);

    let resolver =
        Resolver::with_runner(VersionConfig::default(), live_runner()).with_versionfile(&versionfile);

    let record = resolver.resolve(None, false);

    assert_eq!(record, VersionRecord::new("0.8.0-2-g9fceb02", HASH));
    assert_eq!(resolver.runner().spawn_count(), 2);

    let root = tmp.path().join("LCONF-0.7.0");
    for call in resolver.runner().calls() {
        assert_eq!(call.cwd, root);
    }
}

#[test]
fn test_failed_live_query_falls_back_to_parentdir() {
    let tmp = TempDir::new().unwrap();
    let versionfile = source_tree(&tmp, "LCONF-0.7.0", true);
    let runner = MockRunner::new()
        .with_output(&DESCRIBE_ARGS, "0.8.0")
        .with_failure(&REV_PARSE_ARGS, 128);

    let resolver = Resolver::with_runner(VersionConfig::default(), runner).with_versionfile(&versionfile);

    assert_eq!(resolver.resolve(None, false), VersionRecord::new("0.7.0", ""));
}

#[test]
fn test_parentdir_without_metadata() {
    let tmp = TempDir::new().unwrap();
    let versionfile = source_tree(&tmp, "LCONF-0.7.0", false);

    let resolver =
        Resolver::with_runner(VersionConfig::default(), live_runner()).with_versionfile(&versionfile);

    let record = resolver.resolve(None, false);
    assert_eq!(record.version(), "0.7.0");
    assert_eq!(record.full(), "");
    assert!(resolver.runner().calls().is_empty());
}

#[test]
fn test_total_fallback_returns_default_unmodified() {
    let tmp = TempDir::new().unwrap();
    let versionfile = source_tree(&tmp, "checkout", false);
    let default = VersionRecord::new("0+unknown", "");

    let resolver =
        Resolver::with_runner(VersionConfig::default(), live_runner()).with_versionfile(&versionfile);

    assert_eq!(resolver.resolve(Some(default.clone()), false), default);
    assert_eq!(resolver.resolve(None, false), VersionRecord::default());
}

#[test]
fn test_resolve_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let versionfile = source_tree(&tmp, "LCONF-0.7.0", true);

    let resolver =
        Resolver::with_runner(VersionConfig::default(), live_runner()).with_versionfile(&versionfile);

    let first = resolver.resolve(None, false);
    let second = resolver.resolve(None, true);
    assert_eq!(first, second);
}

#[test]
fn test_tag_prefix_applies_to_live_output() {
    let tmp = TempDir::new().unwrap();
    let versionfile = source_tree(&tmp, "project", true);
    let config = VersionConfig {
        tag_prefix: "v".to_string(),
        ..VersionConfig::default()
    };
    let runner = MockRunner::new()
        .with_output(&DESCRIBE_ARGS, "v1.2-3-gabcdef-dirty")
        .with_output(&REV_PARSE_ARGS, HASH);

    let resolver = Resolver::with_runner(config, runner).with_versionfile(&versionfile);
    let record = resolver.resolve(None, false);

    assert_eq!(record.version(), "1.2-3-gabcdef-dirty");
    assert_eq!(record.full(), format!("{}-dirty", HASH));
}

#[test]
fn test_configured_commands_and_metadata_dir() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tree");
    fs::create_dir_all(root.join(".hg-like")).unwrap();

    let mut config = VersionConfig {
        versionfile_source: "VERSION".to_string(),
        ..VersionConfig::default()
    };
    config.vcs.metadata_dir = ".hg-like".to_string();
    config.vcs.commands = vec!["git.exe".to_string(), "git".to_string()];

    let resolver =
        Resolver::with_runner(config, live_runner()).with_versionfile(root.join("VERSION"));

    assert_eq!(resolver.root().as_deref(), Some(root.as_path()));
    assert_eq!(resolver.resolve(None, false).version(), "0.8.0-2-g9fceb02");
}

#[test]
fn test_keywords_loaded_from_config() {
    let config: VersionConfig = toml::from_str(
        r#"
tag_prefix = "LCONF-"

[keywords]
refnames = " (HEAD -> master, tag: LCONF-1.0, tag: LCONF-1.0rc1)"
full = "9fceb02d0ae598e95dc970b74767f19372d61af8"
"#,
    )
    .unwrap();

    let resolver = Resolver::with_runner(config, MockRunner::new())
        .with_versionfile(Path::new("/nonexistent/LCONF/_version.py"));

    assert_eq!(resolver.resolve(None, false), VersionRecord::new("1.0", HASH));
}
