use serde::Serialize;
use std::path::PathBuf;

/// Command-line values layered on top of every other config source.
///
/// Unset fields are skipped during serialization so they never mask values
/// coming from files or the environment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
    #[serde(skip_serializing_if = "GpgOverrides::is_empty")]
    pub gpg: GpgOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GpgOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl GpgOverrides {
    pub fn is_empty(&self) -> bool {
        self.program.is_none()
    }
}
