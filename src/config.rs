use config::{Config, ConfigError, File, FileFormat};

#[derive(Clone, Debug, serde::Deserialize)]
pub struct PixConfig {
    pub persistence: PersistenceConfig,
    pub debug: bool,
}

impl PixConfig {
    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::new(config_path, FileFormat::Toml));

        let config: PixConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct PersistenceConfig {
    pub db_path: String,
}
