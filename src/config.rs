use crate::error::{PostboardError, Result};
use crate::model::{MemberType, MemberTypeId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".postboard.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostboardConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default = "default_member_types")]
    pub member_types: Vec<MemberType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve GraphiQL on `GET /`.
    #[serde(default = "default_playground")]
    pub playground: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// JSON snapshot file. Relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_playground() -> bool {
    true
}

fn default_member_types() -> Vec<MemberType> {
    vec![
        MemberType {
            id: MemberTypeId::Basic,
            discount: 2.3,
            posts_limit_per_month: 20,
        },
        MemberType {
            id: MemberTypeId::Business,
            discount: 7.7,
            posts_limit_per_month: 100,
        },
    ]
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            playground: default_playground(),
        }
    }
}

impl Default for PostboardConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            store: StoreSettings::default(),
            member_types: default_member_types(),
        }
    }
}

impl PostboardConfig {
    /// Load the nearest config file at or above `start_path`.
    ///
    /// A missing file is not an error: defaults are returned with `start_path`
    /// as the project root.
    pub fn discover(start_path: &Path) -> Result<(Self, PathBuf)> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load(&path),
            None => Ok((Self::default(), start_path.to_path_buf())),
        }
    }

    pub fn load(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: PostboardConfig = toml::from_str(&content)?;
        config.validate()?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| {
                PostboardError::Config("Config file has no parent directory".to_string())
            })?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for id in MemberTypeId::ALL {
            let count = self.member_types.iter().filter(|m| m.id == id).count();
            if count > 1 {
                return Err(PostboardError::Config(format!(
                    "member type {} is declared {} times",
                    id, count
                )));
            }
        }
        Ok(())
    }

    pub fn data_file(&self, project_root: &Path) -> Option<PathBuf> {
        self.store
            .data_file
            .as_ref()
            .map(|p| if p.is_absolute() { p.clone() } else { project_root.join(p) })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: PostboardConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(config.server.playground);
        assert!(config.store.data_file.is_none());
        assert_eq!(config.member_types.len(), 2);
    }

    #[test]
    fn test_parse_sections() {
        let config: PostboardConfig = toml::from_str(
            r#"
            [server]
            port = 4000
            playground = false

            [store]
            data_file = "data.json"

            [[member_types]]
            id = "BASIC"
            discount = 1.5
            postsLimitPerMonth = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.server.playground);
        assert_eq!(config.member_types.len(), 1);
        assert_eq!(config.member_types[0].posts_limit_per_month, 5);
        assert_eq!(
            config.data_file(Path::new("/srv/app")),
            Some(PathBuf::from("/srv/app/data.json"))
        );
    }

    #[test]
    fn test_discover_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[server]\nport = 9001\n",
        )
        .unwrap();

        let (config, root) = PostboardConfig::discover(&nested).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_duplicate_member_types_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
            [[member_types]]
            id = "BASIC"
            discount = 1.0
            postsLimitPerMonth = 1

            [[member_types]]
            id = "BASIC"
            discount = 2.0
            postsLimitPerMonth = 2
            "#,
        )
        .unwrap();
        assert!(matches!(
            PostboardConfig::load(&path),
            Err(PostboardError::Config(_))
        ));
    }

    #[test]
    fn test_save_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        PostboardConfig::default().save(&path).unwrap();
        let (config, root) = PostboardConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.member_types.len(), 2);
        assert_eq!(root, temp_dir.path());
    }
}
