use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::SpindleConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "spindle.toml",
    "spindle.yaml",
    "spindle.yml",
    "spindle.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<SpindleConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_config(&substitute_env(&raw), path)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./spindle.{toml,yaml,yml,json}`
/// 2. `<user config dir>/spindle.{toml,yaml,yml,json}`
///
/// Returns `SpindleConfig::default()` if no file is found or the file found
/// cannot be loaded.
pub fn discover_and_load() -> SpindleConfig {
    let Some(path) = find_config_file() else {
        debug!("no config file found, using defaults");
        return SpindleConfig::default();
    };
    debug!(path = %path.display(), "loading config");
    load_config(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
        SpindleConfig::default()
    })
}

/// First existing config file in the working directory, then the user
/// config directory.
pub fn find_config_file() -> Option<PathBuf> {
    find_in(Path::new(".")).or_else(|| config_dir().and_then(|dir| find_in(&dir)))
}

/// Returns the user-global config directory (`~/.config/spindle/` on Linux).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "spindle").map(|d| d.config_dir().to_path_buf())
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<SpindleConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_partial_toml_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "spindle.toml",
            "[backend]\nbase_url = \"http://users:3000\"\n\n[graphql]\ngraphiql = false\n",
        );

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.backend.base_url, "http://users:3000");
        assert_eq!(cfg.backend.timeout_secs, 10);
        assert!(!cfg.graphql.graphiql);
        assert_eq!(cfg.graphql.max_depth, 16);
        assert_eq!(cfg.server.address(), "127.0.0.1:4000");
    }

    #[test]
    fn loads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write(dir.path(), "spindle.yml", "server:\n  port: 8081\n");
        assert_eq!(load_config(&yaml).unwrap().server.port, 8081);

        let json = write(
            dir.path(),
            "spindle.json",
            r#"{"backend": {"timeout_secs": 3}}"#,
        );
        let cfg = load_config(&json).unwrap();
        assert_eq!(cfg.backend.timeout().as_secs(), 3);
    }

    #[test]
    fn substitutes_environment_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "spindle.toml",
            "[backend]\nbase_url = \"${SPINDLE_LOADER_TEST_UNSET_VAR}\"\n",
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.backend.base_url, "${SPINDLE_LOADER_TEST_UNSET_VAR}");
    }

    #[test]
    fn reports_broken_and_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write(dir.path(), "spindle.toml", "[server\nport = 1");
        let err = load_config(&broken).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"));

        let ini = write(dir.path(), "spindle.ini", "port=1");
        assert!(load_config(&ini).is_err());

        assert!(load_config(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn finds_first_standard_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_in(dir.path()), None);

        write(dir.path(), "spindle.json", "{}");
        write(dir.path(), "spindle.yaml", "{}");
        assert_eq!(find_in(dir.path()), Some(dir.path().join("spindle.yaml")));
    }
}
