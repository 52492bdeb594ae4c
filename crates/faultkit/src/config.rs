//! Launcher configuration

use serde::{Deserialize, Serialize};

/// Immutable configuration for one launcher.
///
/// Mirrors the handful of constants a deployment bakes into the device
/// image: which script to supervise, where scripts live, how wide the
/// context window is, and where the error log goes. Every component reads
/// it by reference; nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Logical name of the script to supervise. May be a bare module-style
    /// name ("v02", "pkg.helper") or a path.
    pub script: String,

    /// Directory student scripts are stored under.
    pub script_dir: String,

    /// Directory bundled libraries are stored under; listed alongside the
    /// script directory when an import fault is diagnosed.
    pub lib_dir: String,

    /// Source identifier the launcher's own stack frames carry. Frames
    /// matching it are skipped when walking a fault's frame chain.
    pub launcher_id: String,

    /// Number of context lines shown on each side of the target line.
    pub context_radius: usize,

    /// Path of the on-device error log.
    pub log_file: String,

    /// Size at which the log file is truncated instead of appended to.
    pub max_log_bytes: u64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            script: "v02".to_string(),
            script_dir: "/py_scripts".to_string(),
            lib_dir: "/lib".to_string(),
            launcher_id: "main.py".to_string(),
            context_radius: 2,
            log_file: "/error_log.txt".to_string(),
            max_log_bytes: 12 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LaunchConfig::default();
        assert_eq!(config.script, "v02");
        assert_eq!(config.script_dir, "/py_scripts");
        assert_eq!(config.context_radius, 2);
        assert_eq!(config.max_log_bytes, 12 * 1024);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LaunchConfig =
            serde_json::from_str(r#"{"script": "lab3", "context_radius": 4}"#).unwrap();
        assert_eq!(config.script, "lab3");
        assert_eq!(config.context_radius, 4);
        assert_eq!(config.script_dir, "/py_scripts");
        assert_eq!(config.log_file, "/error_log.txt");
    }
}
