//! Input loading shared by the command handlers.

use crate::artifact::{Artifact, parse_artifacts};
use crate::compat::{ApiVersionTable, CapabilityTable};
use crate::constants::{DEFAULT_ARTIFACTS_FILE, DEFAULT_PROJECT_FILE};
use crate::error::ManifestResult;
use crate::project::ProjectConfig;
use anyhow::Context;
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Load the project configuration, defaulting to `project.json`.
pub async fn load_project(path: Option<String>) -> ManifestResult<ProjectConfig> {
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE));
    let content = read_input(&path, "project configuration").await?;
    ProjectConfig::parse(&path, &content)
}

/// Load the artifact listing, defaulting to `artifacts.json`.
pub async fn load_artifacts(path: Option<String>) -> ManifestResult<(PathBuf, Vec<Artifact>)> {
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_FILE));
    let content = read_input(&path, "artifact listing").await?;
    let artifacts = parse_artifacts(&content)?;
    tracing::debug!(path = %path.display(), count = artifacts.len(), "loaded artifacts");
    Ok((path, artifacts))
}

/// Load the capability table. No file means no capabilities.
pub async fn load_capabilities(path: Option<String>) -> ManifestResult<CapabilityTable> {
    match path {
        Some(path) => {
            let content = read_input(Path::new(&path), "capability table").await?;
            CapabilityTable::from_json_str(&content)
        }
        None => Ok(CapabilityTable::new()),
    }
}

/// Load the API version table. No file means an empty table.
pub async fn load_api_versions(path: Option<String>) -> ManifestResult<ApiVersionTable> {
    match path {
        Some(path) => {
            let content = read_input(Path::new(&path), "API version table").await?;
            let table = ApiVersionTable::from_json_str(&content)?;
            tracing::debug!(path = %path, versions = table.len(), "loaded API version table");
            Ok(table)
        }
        None => Ok(ApiVersionTable::new()),
    }
}

async fn read_input(path: &Path, what: &str) -> ManifestResult<String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {} {}", what, path.display()))?;
    Ok(content)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{ApiVersionResolver, ApiVersions, CapabilityLookup};
    use crate::error::ManifestError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_load_inputs() {
        let dir = TempDir::new().unwrap();
        let project = write(
            &dir,
            "project.json",
            r#"{ "appId": "b4ae822e-eca9-4fcb-8747-217f2a1f53a1", "sdkVersion": "6.0.0" }"#,
        );
        let artifacts = write(
            &dir,
            "artifacts.json",
            r#"[{ "path": "companion.zip", "bundle": { "type": "companion" } }]"#,
        );
        let capabilities = write(&dir, "caps.json", r#"{ "ionic": { "touch": true } }"#);
        let versions = write(
            &dir,
            "versions.json",
            r#"{ "6.0": { "deviceApi": "5.0.0", "companionApi": "3.0.0" } }"#,
        );

        let project = load_project(Some(project)).await.unwrap();
        assert_eq!(project.sdk_version, "6.0.0");

        let (_, artifacts) = load_artifacts(Some(artifacts)).await.unwrap();
        assert_eq!(artifacts.len(), 1);

        let capabilities = load_capabilities(Some(capabilities)).await.unwrap();
        assert!(capabilities.supports("ionic").is_some());

        let versions = load_api_versions(Some(versions)).await.unwrap();
        assert_eq!(
            versions.resolve("6.0.2"),
            Some(ApiVersions::new("5.0.0", "3.0.0"))
        );
    }

    #[tokio::test]
    async fn test_load_project_file() {
        let dir = TempDir::new().unwrap();
        let toml = write(
            &dir,
            "project.toml",
            "appId = \"b4ae822e-eca9-4fcb-8747-217f2a1f53a1\"\nsdkVersion = \"6.1.0\"\n",
        );
        let config = load_project(Some(toml)).await.unwrap();
        assert_eq!(config.sdk_version, "6.1.0");

        let bad = write(
            &dir,
            "bad.json",
            r#"{ "appId": "not-a-uuid", "sdkVersion": "6.1.0" }"#,
        );
        assert!(matches!(
            load_project(Some(bad)).await.unwrap_err(),
            ManifestError::ConfigParseError(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_optional_tables() {
        assert!(load_api_versions(None).await.unwrap().is_empty());
        assert!(load_capabilities(None).await.unwrap().supports("ionic").is_none());
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json").to_string_lossy().into_owned();

        let err = load_artifacts(Some(missing)).await.unwrap_err();
        match err {
            ManifestError::Generic(msg) => {
                assert!(msg.contains("artifact listing"));
                assert!(msg.contains("nope.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
