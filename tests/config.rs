// ABOUTME: Integration tests for config parsing, discovery, and scaffolding.
// ABOUTME: Uses tempdirs; no network access.

use std::time::Duration;

use skafos::arm::DEFAULT_POLL_INTERVAL;
use skafos::config::{self, CONFIG_FILENAME, Config};
use skafos::error::Error;

#[test]
fn parses_a_minimal_config() {
    let config = Config::from_yaml("app: my-app\nresource_group: my-rg\n").unwrap();

    assert_eq!(config.app.as_str(), "my-app");
    assert_eq!(config.resource_group.as_str(), "my-rg");
    assert_eq!(config.publish_type(), None);
    assert_eq!(config.slot_name(), None);
    assert!(!config.delete_temp_image());
    assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    assert_eq!(config.poll_interval, Duration::from_secs(30));
}

#[test]
fn parses_a_full_docker_config() {
    let yaml = r#"
app: my-app
resource_group: my-rg
subscription: 00000000-0000-0000-0000-000000000000
publish: Docker
slot: staging
source_directory: target
target_directory: site/wwwroot
docker:
  image: myregistry.azurecr.io/my-app:1.2.3
  dockerfile: docker/Dockerfile
  context: .
  delete_temp_image: true
poll_interval: 10s
"#;

    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.publish_type(), Some("Docker"));
    assert_eq!(config.slot_name(), Some("staging"));
    assert!(config.delete_temp_image());
    assert_eq!(config.poll_interval, Duration::from_secs(10));

    let docker = config.docker.unwrap();
    assert_eq!(docker.image.registry(), Some("myregistry.azurecr.io"));
    assert_eq!(docker.image.name(), "my-app");
    assert_eq!(docker.image.tag(), "1.2.3");
    assert_eq!(docker.dockerfile, "docker/Dockerfile");
}

#[test]
fn trims_publish_type_and_slot() {
    let config =
        Config::from_yaml("app: my-app\nresource_group: my-rg\npublish: \" docker \"\nslot: \" staging \"\n")
            .unwrap();

    assert_eq!(config.publish_type(), Some("docker"));
    assert_eq!(config.slot_name(), Some("staging"));
}

#[test]
fn rejects_invalid_app_name() {
    let result = Config::from_yaml("app: \"-bad-\"\nresource_group: my-rg\n");
    assert!(result.is_err());
}

#[test]
fn rejects_invalid_resource_group() {
    let result = Config::from_yaml("app: my-app\nresource_group: \"bad/group\"\n");
    assert!(result.is_err());
}

#[test]
fn discover_finds_skafos_yml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILENAME),
        "app: my-app\nresource_group: my-rg\n",
    )
    .unwrap();

    let config = Config::discover(dir.path()).unwrap();
    assert_eq!(config.app.as_str(), "my-app");
}

#[test]
fn discover_falls_back_to_dotdir_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".skafos")).unwrap();
    std::fs::write(
        dir.path().join(".skafos/config.yml"),
        "app: fallback-app\nresource_group: my-rg\n",
    )
    .unwrap();

    let config = Config::discover(dir.path()).unwrap();
    assert_eq!(config.app.as_str(), "fallback-app");
}

#[test]
fn discover_fails_when_no_config_exists() {
    let dir = tempfile::tempdir().unwrap();

    let err = Config::discover(dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
}

#[test]
fn init_writes_a_loadable_template() {
    let dir = tempfile::tempdir().unwrap();

    config::init_config(dir.path(), Some("demo-app"), Some("demo-rg"), false).unwrap();

    let config = Config::discover(dir.path()).unwrap();
    assert_eq!(config.app.as_str(), "demo-app");
    assert_eq!(config.resource_group.as_str(), "demo-rg");
    assert_eq!(config.source_directory, ".");
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILENAME), "app: keep\n").unwrap();

    let err = config::init_config(dir.path(), None, None, false).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
}

#[test]
fn init_overwrites_with_force() {
    let dir = tempfile::tempdir().unwrap();
    config::init_config(dir.path(), Some("first-app"), None, false).unwrap();
    config::init_config(dir.path(), Some("second-app"), None, true).unwrap();

    let config = Config::discover(dir.path()).unwrap();
    assert_eq!(config.app.as_str(), "second-app");
}

#[test]
fn init_rejects_invalid_names() {
    let dir = tempfile::tempdir().unwrap();

    let err = config::init_config(dir.path(), Some("-bad-"), None, false).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
