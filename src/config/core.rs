use super::Settings;
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct ForkbenchConfig {
    figment: Figment,
}

impl ForkbenchConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None, None::<&()>)
    }

    /// Merge every configuration layer, lowest priority first:
    /// embedded defaults, user config, repo config, `custom_config`,
    /// `FORKBENCH_*` environment variables and finally `cli_overrides`.
    pub fn load_with<T: Serialize>(
        custom_config: Option<&str>,
        cli_overrides: Option<T>,
    ) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(Self::user_config_path()))
            .merge(Toml::file("forkbench.toml"));

        if let Some(custom_path) = custom_config {
            if !Path::new(custom_path).is_file() {
                anyhow::bail!("Config file not found: {}", custom_path);
            }
            figment = match Path::new(custom_path)
                .extension()
                .and_then(|ext| ext.to_str())
            {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        }

        figment = figment.merge(Env::prefixed("FORKBENCH_").split("__"));

        if let Some(cli) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(cli));
        }

        Ok(ForkbenchConfig { figment })
    }

    /// Extract and validate the typed settings
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("Failed to parse configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/forkbench/config.toml", home),
            Err(_) => "~/.config/forkbench/config.toml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn isolate(jail: &mut Jail) {
        let home = jail.directory().display().to_string();
        jail.set_env("HOME", home);
    }

    fn load(custom: Option<&str>) -> figment::error::Result<Settings> {
        ForkbenchConfig::load_with(custom, None::<&()>)
            .and_then(|config| config.settings())
            .map_err(|e| figment::Error::from(format!("{e:#}")))
    }

    #[test]
    fn test_config_loads_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let settings = load(None)?;
            assert_eq!(settings.parallel.max_threads, 0);
            assert_eq!(settings.parallel.thread_percentage, 100);
            assert_eq!(settings.download.image_count, 50);
            assert_eq!(settings.download.count, 50);
            assert_eq!(settings.download.runs, 3);
            assert!(settings.download.url_template.contains("{n}"));
            assert_eq!(settings.matrix.size, 1000);
            assert_eq!(settings.matrix.runs, 5);
            assert_eq!(settings.sort.length, 1_000_000);
            assert_eq!(settings.bench.seed, None);
            Ok(())
        });
    }

    #[test]
    fn test_repo_config_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("forkbench.toml", "[matrix]\nsize = 64\n")?;
            let settings = load(None)?;
            assert_eq!(settings.matrix.size, 64);
            assert_eq!(settings.matrix.max_value, 100);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("forkbench.toml", "[sort]\nlength = 10\n")?;
            jail.set_env("FORKBENCH_SORT__LENGTH", "20");
            jail.set_env("FORKBENCH_BENCH__SEED", "7");
            let settings = load(None)?;
            assert_eq!(settings.sort.length, 20);
            assert_eq!(settings.bench.seed, Some(7));
            Ok(())
        });
    }

    #[test]
    fn test_custom_config_formats() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("custom.json", r#"{"sort": {"runs": 2}}"#)?;
            jail.create_file("custom.yaml", "matrix:\n  runs: 4\n")?;
            assert_eq!(load(Some("custom.json"))?.sort.runs, 2);
            assert_eq!(load(Some("custom.yaml"))?.matrix.runs, 4);
            Ok(())
        });
    }

    #[test]
    fn test_missing_custom_config_is_an_error() {
        Jail::expect_with(|jail| {
            isolate(jail);
            assert!(load(Some("non_existent.toml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_cli_overrides_win() {
        #[derive(Serialize)]
        struct Overrides {
            parallel: serde_json::Value,
        }

        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("FORKBENCH_PARALLEL__MAX_THREADS", "8");
            let overrides = Overrides {
                parallel: serde_json::json!({ "max_threads": 2 }),
            };
            let settings = ForkbenchConfig::load_with(None, Some(overrides))
                .and_then(|config| config.settings())
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(settings.parallel.max_threads, 2);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_rejected() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("forkbench.toml", "[parallel]\nthread_percentage = 0\n")?;
            assert!(load(None).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_get_section() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = ForkbenchConfig::load().map_err(|e| figment::Error::from(e.to_string()))?;
            let section = config
                .get_section("download")
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(section["image_count"], 50);
            Ok(())
        });
    }
}
