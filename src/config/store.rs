use std::{
    ops::Deref,
    path::PathBuf,
};

use anyhow::bail;

use super::structure::{LocalMindConfigInner, LocalMindConfigTOML};

/// Read-once process configuration. Loaded from `config.toml` at startup; a
/// default file is written when none exists yet so there is something to
/// fill in.
#[derive(Debug, Clone)]
pub struct LocalMindConfig {
    pub path: PathBuf,
    cached: LocalMindConfigTOML,
}

impl LocalMindConfig {
    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let path = match path.is_dir() {
            true => path.join("config.toml"),
            false => path,
        };

        if !path.exists() {
            return Self::new(path);
        }

        if !path.is_file() {
            bail!("given config path exists and is not a file, refusing to touch it");
        }

        let config_str = std::fs::read_to_string(&path)?;

        Ok(Self {
            path,
            cached: toml::from_str(&config_str)?,
        })
    }

    fn new(path: PathBuf) -> Result<Self, anyhow::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self {
            path,
            cached: LocalMindConfigTOML::default(),
        };

        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, toml::to_string(&self.cached)?)?;

        Ok(())
    }
}

impl Deref for LocalMindConfig {
    type Target = LocalMindConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.cached.config
    }
}

impl PartialEq for LocalMindConfig {
    fn eq(&self, other: &Self) -> bool {
        self.cached.config == other.cached.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = LocalMindConfig::read(path.clone()).unwrap();
        assert!(path.is_file());
        assert_eq!(config.llm.model, "local-model");
        assert!(config.discord.token.is_empty());
    }

    #[test]
    fn round_trips_through_save_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = LocalMindConfig::read(path.clone()).unwrap();
        config.cached.config.discord.token = "secret".to_string();
        config.cached.config.context.max_messages = 8;
        config.save().unwrap();

        let reread = LocalMindConfig::read(path).unwrap();
        assert_eq!(reread, config);
        assert_eq!(reread.discord.token, "secret");
        assert_eq!(reread.context.max_messages, 8);
    }

    #[test]
    fn directory_path_resolves_to_config_toml_inside_it() {
        let dir = tempfile::tempdir().unwrap();

        let config = LocalMindConfig::read(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.path, dir.path().join("config.toml"));
    }
}
