use crate::config::schema::{DashboardConfig, OutputConfig};
use crate::error::{Error, Result};
use crate::output::{Renderer, console::ConsoleOutput, json::JsonOutput};
use chrono::format::{Item, StrftimeItems};
use indicatif::MultiProgress;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use validator::Validate;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DashboardConfig> {
        let config = Self::load_file(path.as_ref())?;
        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &DashboardConfig) -> Result<()> {
        config.validate()?;

        if StrftimeItems::new(&config.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "Invalid time format: {}",
                config.time_format
            )));
        }

        Ok(())
    }

    fn load_file(path: &Path) -> Result<DashboardConfig> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(Error::Config(format!(
                "Unsupported file extension: {}",
                path.display()
            ))),
        }
    }

    pub fn create_renderer(
        config: &DashboardConfig,
        multi: Option<Arc<MultiProgress>>,
    ) -> Result<Box<dyn Renderer>> {
        let renderer: Box<dyn Renderer> = match &config.output {
            Some(OutputConfig::Json { path }) => Box::new(JsonOutput::new(PathBuf::from(path))?),
            Some(OutputConfig::Console) | None => Box::new(ConsoleOutput::new(multi)),
        };
        Ok(renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_time_format() {
        let config = DashboardConfig {
            time_format: "%Q".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(ConfigLoader::validate(&config), Err(Error::Config(_))));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ConfigLoader::validate(&DashboardConfig::default()).is_ok());
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = ConfigLoader::load_file(Path::new("dashboard.ini")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
