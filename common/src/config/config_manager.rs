use std::marker::PhantomData;

use serde::Deserialize;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: for<'de> Deserialize<'de> + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_content_provider: TConfigContentProvider,
    config_serializer: TConfigSerializer,
    _config: PhantomData<TConfig>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: for<'de> Deserialize<'de> + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: for<'de> Deserialize<'de> + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_content_provider,
            config_serializer,
            _config: PhantomData,
        }
    }

    pub fn source(&self) -> String {
        self.config_content_provider.describe()
    }

    /// Defaults when the source is absent; an unreadable or invalid source is an error.
    pub fn load(&self) -> Result<TConfig, String> {
        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(default)]
    struct TestConfig {
        name: String,
        limit: u32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                limit: 10,
            }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.limit == 0 {
                return Err("limit must be positive".to_string());
            }
            Ok(())
        }
    }

    struct StaticProvider(Option<&'static str>);

    impl ConfigContentProvider for StaticProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.0.map(str::to_string))
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    fn manager(content: Option<&'static str>) -> ConfigManager<StaticProvider, TestConfig> {
        ConfigManager::new(StaticProvider(content), YamlConfigSerializer)
    }

    #[test]
    fn test_absent_content_gives_defaults() {
        assert_eq!(manager(None).load().unwrap(), TestConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_remaining_defaults() {
        let config = manager(Some("limit: 3\n")).load().unwrap();
        assert_eq!(config.limit, 3);
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = manager(Some("limit: 0\n")).load().unwrap_err();
        assert!(err.contains("limit must be positive"));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        assert!(manager(Some("limit: [oops")).load().is_err());
    }
}
