//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Project-level config file name.
const PROJECT_CONFIG_FILE: &str = "twin.toml";

/// Flat environment variables understood for compatibility with existing
/// deployments, mapped to their nested config keys.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("AI_MODEL_USE", "provider.model_use"),
    ("OPENAI_MODEL_ID", "provider.openai_model_id"),
    ("BEDROCK_MODEL_ID", "provider.bedrock_model_id"),
    ("DEFAULT_AWS_REGION", "provider.bedrock.region"),
    ("USE_S3", "storage.use_s3"),
    ("S3_BUCKET", "storage.s3_bucket"),
    ("MEMORY_DIR", "storage.memory_dir"),
    ("CORS_ORIGINS", "server.cors_origins"),
    ("PORT", "server.port"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TWIN_*` environment variables (`TWIN_STORAGE__USE_S3=true`)
    /// 2. Legacy flat environment variables (`AI_MODEL_USE`, `S3_BUCKET`, ...)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./twin.toml`
    /// 5. XDG config: `$XDG_CONFIG_HOME/digital-twin/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_env_only() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::raw().filter_map(|key| {
                LEGACY_ENV
                    .iter()
                    .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                    .map(|(_, path)| (*path).into())
            }))
            .merge(Env::prefixed("TWIN_").split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/digital-twin/config.toml if set,
    /// otherwise falls back to ~/.config/digital-twin/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("digital-twin").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources() -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        lines.push("  [ENV  ] TWIN_* and legacy variables (AI_MODEL_USE, USE_S3, ...)".to_string());

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE)),
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", marker, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_legacy_env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("AI_MODEL_USE", "bedrock");
            jail.set_env("BEDROCK_MODEL_ID", "amazon.nova-pro-v1:0");
            jail.set_env("USE_S3", "true");
            jail.set_env("S3_BUCKET", "twin-memory");
            jail.set_env("CORS_ORIGINS", "https://twin.example");

            let config = ConfigLoader::load_env_only().map_err(|e| e.to_string())?;
            assert_eq!(config.provider.model_use, "bedrock");
            assert_eq!(config.provider.bedrock_model_id, "amazon.nova-pro-v1:0");
            assert!(config.storage.use_s3);
            assert_eq!(config.storage.s3_bucket, "twin-memory");
            assert_eq!(config.server.cors_origins, "https://twin.example");
            Ok(())
        });
    }

    #[test]
    fn test_legacy_use_s3_ignores_case() {
        Jail::expect_with(|jail| {
            jail.set_env("S3_BUCKET", "twin-memory");
            for value in ["True", "TRUE", "true"] {
                jail.set_env("USE_S3", value);
                let config = ConfigLoader::load_env_only().map_err(|e| e.to_string())?;
                assert!(config.storage.use_s3, "USE_S3={value}");
            }

            jail.set_env("USE_S3", "False");
            let config = ConfigLoader::load_env_only().map_err(|e| e.to_string())?;
            assert!(!config.storage.use_s3);
            Ok(())
        });
    }

    #[test]
    fn test_unrecognized_use_s3_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("USE_S3", "maybe");
            assert!(ConfigLoader::load_env_only().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_wins_over_legacy() {
        Jail::expect_with(|jail| {
            jail.set_env("MEMORY_DIR", "/legacy");
            jail.set_env("TWIN_STORAGE__MEMORY_DIR", "/prefixed");

            let config = ConfigLoader::load_env_only().map_err(|e| e.to_string())?;
            assert_eq!(config.storage.memory_dir, PathBuf::from("/prefixed"));
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_merged() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "twin.toml",
                r#"
                [provider]
                model_use = "bedrock"

                [server]
                port = 9000
                "#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.provider.model_use, "bedrock");
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.provider.openai_model_id, "gpt-4o-mini");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_wins_over_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file("twin.toml", "[server]\nport = 9000\n")?;
            jail.create_file("custom.toml", "[server]\nport = 9100\n")?;

            let path = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&path)).map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 9100);
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("digital-twin"));
    }
}
