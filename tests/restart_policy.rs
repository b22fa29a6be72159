mod common;
use crate::common::builders::{ConfigFileBuilder, added, changed, dir_changed, removed};
use crate::common::init_tracing;

use std::path::Path;

use proptest::prelude::*;

use devreload::types::ChangeKind;
use devreload::types::ChangeEvent;
use devreload::watch::{IgnorePrefixes, ReloadPattern, RestartPolicy};

fn policy_with_ignores(ignores: &[&str]) -> RestartPolicy {
    RestartPolicy::new(true, IgnorePrefixes::from_prefixes(ignores.iter().copied()), None)
}

#[test]
fn ignore_prefixes_suppress_only_their_subtrees() {
    init_tracing();

    let policy = policy_with_ignores(&["/app/app/views", "/app/app/assets"]);

    assert!(!policy.should_restart(&changed("/app/app/views/index.html")));
    assert!(!policy.should_restart(&changed("/app/app/assets/x.css")));
    assert!(policy.should_restart(&changed("/app/app/controller/user.js")));
}

#[test]
fn ignore_prefix_is_a_plain_string_prefix() {
    let policy = policy_with_ignores(&["/app/app/assets"]);

    // Sibling directory sharing the textual prefix is ignored as well.
    assert!(!policy.should_restart(&changed("/app/app/assets2/app.js")));
    assert!(!policy.should_restart(&changed("/app/app/assets.js")));
    assert!(policy.should_restart(&changed("/app/app/asset/app.js")));
}

#[test]
fn directory_events_never_restart() {
    let policy = policy_with_ignores(&[]);

    assert!(!policy.should_restart(&dir_changed("/app/app/service")));
    assert!(!policy.should_restart(&ChangeEvent::directory("/app/config", ChangeKind::Added)));
    assert!(policy.should_restart(&changed("/app/app/service/user.js")));
}

#[test]
fn added_and_removed_files_restart() {
    let policy = policy_with_ignores(&["/app/app/public"]);

    assert!(policy.should_restart(&added("/app/app/router.js")));
    assert!(policy.should_restart(&removed("/app/app/router.js")));
    assert!(!policy.should_restart(&removed("/app/app/public/logo.png")));
}

#[test]
fn reload_on_change_false_disables_everything() {
    let policy = RestartPolicy::new(false, IgnorePrefixes::default(), None);

    assert!(!policy.should_restart(&changed("/app/app/service/user.js")));
    assert!(!policy.should_restart(&added("/app/config/config.default.js")));
}

#[test]
fn reload_pattern_restricts_to_matching_files() {
    let pattern = ReloadPattern::new("/app", &["**/*.js".to_string()]).unwrap();
    let policy = RestartPolicy::new(true, IgnorePrefixes::default(), Some(pattern));

    assert!(!policy.should_restart(&changed("/app/app/config/config.json")));
    assert!(policy.should_restart(&changed("/app/app/service/user.js")));
}

#[test]
fn reload_pattern_exclusions_win_over_includes() {
    let pattern = ReloadPattern::new(
        "/app",
        &["**/*.js".to_string(), "!**/*.test.js".to_string()],
    )
    .unwrap();

    assert!(pattern.matches(Path::new("/app/app/service/user.js")));
    assert!(!pattern.matches(Path::new("/app/app/service/user.test.js")));
}

#[test]
fn reload_pattern_matches_paths_relative_to_base_dir() {
    let pattern = ReloadPattern::new("/srv/project", &["app/**/*.rs".to_string()]).unwrap();

    assert!(pattern.matches(Path::new("/srv/project/app/handlers/user.rs")));
    assert!(!pattern.matches(Path::new("/srv/project/config/user.rs")));
    assert!(!pattern.matches(Path::new("/elsewhere/app/handlers/user.rs")));
}

#[test]
fn ignore_prefixes_apply_before_reload_pattern() {
    let settings = ConfigFileBuilder::new()
        .reload_pattern("**/*.js")
        .settings("/app");
    let policy = settings.policy();

    // Default ignore dirs are resolved against the base dir.
    assert!(!policy.should_restart(&changed("/app/app/public/bundle.js")));
    assert!(policy.should_restart(&changed("/app/app/controller/home.js")));
    assert!(!policy.should_restart(&changed("/app/app/controller/home.ts")));
}

#[test]
fn invalid_glob_is_rejected() {
    let err = ReloadPattern::new("/app", &["app/[".to_string()]).unwrap_err();
    assert!(err.to_string().contains("app/["));
}

proptest! {
    #[test]
    fn directory_events_are_suppressed_for_any_path(
        segments in proptest::collection::vec("[a-z0-9_.]{1,8}", 1..6),
        kind in prop_oneof![
            Just(ChangeKind::Added),
            Just(ChangeKind::Changed),
            Just(ChangeKind::Removed),
        ],
    ) {
        let path = format!("/{}", segments.join("/"));
        let pattern = ReloadPattern::new("/", &["**".to_string()]).unwrap();
        let policy = RestartPolicy::new(true, IgnorePrefixes::default(), Some(pattern));

        prop_assert!(!policy.should_restart(&ChangeEvent::directory(path.clone(), kind)));
        prop_assert!(policy.should_restart(&ChangeEvent::file(path, kind)));
    }
}
