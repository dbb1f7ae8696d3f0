use figment::Provider;
use figment::providers::{Format, Json, Toml, Yaml};
use std::path::Path;

/// Provider for a config file, choosing the format from its extension.
///
/// Unknown extensions are sniffed from the content and fall back to TOML.
pub fn auto<P: AsRef<Path>>(path: P) -> impl Provider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let format = match extension.as_str() {
        "toml" => FileFormat::Toml,
        "json" => FileFormat::Json,
        "yaml" | "yml" => FileFormat::Yaml,
        _ => std::fs::read_to_string(path)
            .ok()
            .and_then(|content| detect_format_from_content(&content))
            .unwrap_or(FileFormat::Toml),
    };

    tracing::trace!(path = %path.display(), ?format, "loading config file");

    match format {
        FileFormat::Toml => SmartProvider::Toml(Toml::file(path)),
        FileFormat::Json => SmartProvider::Json(Json::file(path)),
        FileFormat::Yaml => SmartProvider::Yaml(Yaml::file(path)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Json,
    Yaml,
}

enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

fn detect_format_from_content(content: &str) -> Option<FileFormat> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(FileFormat::Json);
    }

    let mut lines = trimmed.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#'));
    if lines.clone().any(|l| (l.starts_with('[') && l.ends_with(']')) || l.contains(" = ")) {
        return Some(FileFormat::Toml);
    }
    if trimmed.starts_with("---") || lines.any(|l| l.contains(": ") || l.ends_with(':')) {
        return Some(FileFormat::Yaml);
    }

    None
}
