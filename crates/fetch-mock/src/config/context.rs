//! Execution context configuration.

use crate::request::ExecutionContext;
use serde::{Deserialize, Serialize};
use url::Url;

/// Where relative URLs are resolved from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Document,
    Worker,
    #[default]
    Detached,
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Document => "document",
            ContextKind::Worker => "worker",
            ContextKind::Detached => "detached",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    #[serde(default)]
    pub kind: ContextKind,
    /// Document base URL or worker origin. Ignored for detached contexts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ContextConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        ExecutionContext::try_from(self).map(|_| ())
    }
}

impl TryFrom<&ContextConfig> for ExecutionContext {
    type Error = anyhow::Error;

    fn try_from(config: &ContextConfig) -> Result<Self, Self::Error> {
        let base = match (config.kind, config.base_url.as_deref()) {
            (ContextKind::Detached, _) => return Ok(ExecutionContext::Detached),
            (kind, None) => anyhow::bail!(
                "context.baseUrl is required when context.kind is '{}'",
                kind.as_str()
            ),
            (_, Some(raw)) => Url::parse(raw)
                .map_err(|e| anyhow::anyhow!("Invalid context.baseUrl '{}': {}", raw, e))?,
        };

        Ok(match config.kind {
            ContextKind::Document => ExecutionContext::Document { base_url: base },
            _ => ExecutionContext::Worker { origin: base },
        })
    }
}
