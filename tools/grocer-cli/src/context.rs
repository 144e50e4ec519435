//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use grocer_data::{FetchClient, ReqwestTransport};
use grocer_store::{Effects, Services, Storefront};

use crate::config::CliConfig;
use crate::demo;
use crate::output::Output;

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["grocer.toml", ".grocer.toml", "grocer.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Serve every domain from demo data.
    pub offline: bool,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, offline: bool, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path.to_string_lossy())?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config: config.with_env_overrides(),
            config_path,
            output,
            cwd,
            offline,
        })
    }

    /// Network collaborators for every domain.
    pub fn services(&self) -> Services {
        if self.offline {
            self.output.debug("using demo data");
            return demo::services();
        }

        let mut client = FetchClient::new(ReqwestTransport::new())
            .with_base_url(self.config.api.base_url.clone());
        if let Some(token) = &self.config.api.token {
            client = client.with_bearer_token(token);
        }
        self.output.debug(&format!("api: {}", self.config.api.base_url));
        Services::rest(client)
    }

    /// Mount the storefront and wait for every auto-fetch.
    pub async fn storefront(&self) -> Storefront {
        let output = Arc::new(self.output.clone());
        let effects = Effects::new(output.clone(), output);

        let spinner = self.output.spinner("Loading storefront...");
        let mut storefront = Storefront::mount(self.services(), effects, self.config.store.clone());
        storefront.settled().await;
        spinner.finish_and_clear();

        storefront
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in the directory tree.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = std::env::temp_dir().join(format!("grocer-cli-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".grocer.toml"), "[api]\n").unwrap();

        assert_eq!(find_config_file(&nested), Some(root.join(".grocer.toml")));

        std::fs::write(nested.join("grocer.json"), "{}").unwrap();
        assert_eq!(find_config_file(&nested), Some(nested.join("grocer.json")));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
