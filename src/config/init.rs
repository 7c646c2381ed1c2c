// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates skafos.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{AppName, ResourceGroupName};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    app: Option<&str>,
    resource_group: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(a) = app {
        config.app = AppName::new(a).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    if let Some(rg) = resource_group {
        config.resource_group =
            ResourceGroupName::new(rg).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"app: {}
resource_group: {}
# subscription: 00000000-0000-0000-0000-000000000000
# publish: docker
# slot: staging
source_directory: .
# target_directory: site/wwwroot
# docker:
#   image: myregistry.azurecr.io/{}:latest
#   dockerfile: Dockerfile
#   context: .
#   delete_temp_image: true
# poll_interval: 30s
"#,
        config.app, config.resource_group, config.app
    )
}
