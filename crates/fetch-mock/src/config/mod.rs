//! Configuration for fetch mocks: execution context and fixtures.

mod context;
mod fixtures;

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use context::{ContextConfig, ContextKind};
pub use fixtures::{Fixture, FixtureAction, FixtureMatch};

use crate::engine::{FetchMock, Installer};
use crate::request::ExecutionContext;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockConfig {
    #[serde(default)]
    pub context: ContextConfig,

    /// Registered in order, so one-shot fixtures queue in file order.
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

impl MockConfig {
    /// Load configuration from a YAML or JSON file (chosen by extension)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: MockConfig = if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, anyhow::Error> {
        let config: MockConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.context.validate()?;
        for (index, fixture) in self.fixtures.iter().enumerate() {
            fixture
                .validate()
                .with_context(|| format!("Invalid {}", fixture.label(index)))?;
        }
        Ok(())
    }

    pub fn execution_context(&self) -> Result<ExecutionContext, anyhow::Error> {
        ExecutionContext::try_from(&self.context)
    }

    /// Register every fixture on `mock`, in order.
    pub fn register(&self, mock: &FetchMock) -> Result<(), anyhow::Error> {
        for (index, fixture) in self.fixtures.iter().enumerate() {
            fixture
                .register(mock, index)
                .with_context(|| format!("Failed to register {}", fixture.label(index)))?;
        }
        info!("Registered {} fixture(s)", self.fixtures.len());
        Ok(())
    }
}

impl FetchMock {
    /// Engine with the configured context and fixtures.
    pub fn from_config(
        config: &MockConfig,
        installer: Arc<dyn Installer>,
    ) -> Result<Self, anyhow::Error> {
        config.validate()?;
        let mock = FetchMock::with_context(installer, config.execution_context()?);
        config.register(&mock)?;
        Ok(mock)
    }
}
