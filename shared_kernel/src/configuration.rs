use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine the current directory")]
    WorkingDirectory(#[source] std::io::Error),
    #[error("Failed to build configuration")]
    Build(#[source] config::ConfigError),
    #[error("Missing or invalid settings")]
    Invalid(#[source] config::ConfigError),
}

/// Loads `configuration/base.yaml` from the working directory, when present,
/// and overlays `APP_`-prefixed environment variables, `__` separating nested keys.
/// e.g: `APP_LOCATION__PLACE=gdansk` sets `location.place`.
///
/// `defaults` are `(key, value)` pairs used for keys neither source sets.
pub fn config<Settings: DeserializeOwned>(
    defaults: &[(&str, &str)],
) -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
    let file = base_path.join("configuration").join("base.yaml");
    config_from(defaults, &file, None)
}

/// Same layering as [`config`]. `environment` replaces the process environment when given.
pub fn config_from<Settings: DeserializeOwned>(
    defaults: &[(&str, &str)],
    file: &Path,
    environment: Option<config::Map<String, String>>,
) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();
    for (key, value) in defaults {
        builder = builder
            .set_default(*key, *value)
            .map_err(ConfigError::Build)?;
    }
    let settings = builder
        .add_source(config::File::from(file).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .source(environment),
        )
        .build()
        .map_err(ConfigError::Build)?;

    deserialize(settings)
}

fn deserialize<Settings: DeserializeOwned>(
    settings: config::Config,
) -> Result<Settings, ConfigError> {
    settings
        .try_deserialize::<Settings>()
        .map_err(ConfigError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::{config_from, deserialize, ConfigError};
    use serde::Deserialize;
    use std::path::Path;

    #[derive(Deserialize, Debug)]
    struct Settings {
        location: Location,
    }

    #[derive(Deserialize, Debug)]
    struct Location {
        place: String,
    }

    fn from_yaml(yaml: &str) -> config::Config {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_settings_are_deserialized_when_all_values_are_present() {
        let settings = deserialize::<Settings>(from_yaml("location:\n  place: gdansk\n")).unwrap();
        assert_eq!(settings.location.place, "gdansk");
    }

    #[test]
    fn test_missing_required_value_is_a_config_error() {
        let result = deserialize::<Settings>(from_yaml("location: {}\n"));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_defaults_fill_keys_the_environment_leaves_out() {
        let environment = config::Map::from([(
            "APP_LOCATION__PLACE".to_string(),
            "sopot".to_string(),
        )]);
        let settings = config_from::<Settings>(
            &[("location.place", "gdansk")],
            Path::new("/nonexistent/configuration/base.yaml"),
            Some(environment),
        )
        .unwrap();
        assert_eq!(settings.location.place, "sopot");

        let settings = config_from::<Settings>(
            &[("location.place", "gdansk")],
            Path::new("/nonexistent/configuration/base.yaml"),
            Some(config::Map::new()),
        )
        .unwrap();
        assert_eq!(settings.location.place, "gdansk");
    }
}
