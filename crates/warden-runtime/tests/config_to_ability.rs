//! Layered config files through to permission decisions.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use warden_runtime::config::{ConfigError, ConfigLoader, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE};
use warden_runtime::AbilityBuilder;
use warden_types::{ErrorCode, SubjectKind, SubjectRef};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Article {
    author: u64,
}

impl SubjectKind for Article {
    const NAME: &'static str = "Article";
}

struct Comment;

impl SubjectKind for Comment {
    const NAME: &'static str = "Comment";
}

fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("should create config dir");
    }
    std::fs::write(path, content).expect("should write config file");
    path.to_path_buf()
}

fn project_config(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE)
}

#[test]
fn global_and_project_files_build_one_ability() {
    init_tracing();
    let global = TempDir::new().expect("should create temp dir");
    let project = TempDir::new().expect("should create temp dir");

    let global_path = write(
        &global.path().join(PROJECT_CONFIG_FILE),
        r#"
default_aliases = true

[[grants]]
action = "read"
subject = "all"
"#,
    );
    write(
        &project_config(project.path()),
        r#"
denied_message = "Ask an editor."

[aliases]
moderate = ["approve", "reject"]

[[grants]]
action = "moderate"
subject = "Comment"
"#,
    );

    let loader = ConfigLoader::new()
        .with_global_config(&global_path)
        .with_project_root(project.path())
        .skip_env_vars();
    let mut ability = AbilityBuilder::new(7_u64)
        .load(&loader)
        .expect("config should load")
        .build()
        .expect("config should be valid");

    // From the global file, through the default aliases.
    assert!(ability.is_allowed("show", &Article { author: 1 }));
    assert!(ability.is_allowed("index", SubjectRef::of::<Comment>()));

    // From the project file.
    assert!(ability.is_allowed("approve", &Comment));
    assert!(ability.is_denied("approve", &Article { author: 1 }));

    // Code adds the conditional part.
    let me = *ability.principal();
    ability.grant_if("update", move |article: &Article, _| article.author == me);
    assert!(ability.is_allowed("edit", &Article { author: 7 }));
    assert!(ability.is_denied("edit", &Article { author: 8 }));

    let err = ability
        .enforce("destroy", &Article { author: 7 })
        .expect_err("destroy is not granted");
    assert_eq!(err.to_string(), "Ask an editor.");
}

#[test]
fn invalid_subject_in_file_is_rejected_at_build() {
    let project = TempDir::new().expect("should create temp dir");
    write(
        &project_config(project.path()),
        r#"
[[grants]]
action = "read"
subject = "Blog Post"
"#,
    );

    let loader = ConfigLoader::new()
        .skip_global_config()
        .with_project_root(project.path())
        .skip_env_vars();
    let err = AbilityBuilder::new(())
        .load(&loader)
        .expect("file itself parses")
        .build()
        .expect_err("subject name has whitespace");

    assert!(matches!(err, ConfigError::InvalidName { .. }));
    assert_eq!(err.code(), "CONFIG_INVALID_NAME");
    assert!(!err.is_recoverable());
}

#[test]
fn unreadable_toml_is_reported_at_load() {
    let project = TempDir::new().expect("should create temp dir");
    write(&project_config(project.path()), "[[grants]\naction = ");

    let loader = ConfigLoader::new()
        .skip_global_config()
        .with_project_root(project.path())
        .skip_env_vars();
    let err = AbilityBuilder::new(())
        .load(&loader)
        .expect_err("broken TOML");

    assert_eq!(err.code(), "CONFIG_PARSE_TOML");
}
