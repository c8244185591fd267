//! Version information for the console, populated at build time.
//!
//! Environment display format:
//! - Prod (stable): `stable:{version}`
//! - Staging: `staging:{commit}`
//! - Test: `main:{commit}`

/// Get the build date in RFC3339 format
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Get the git commit hash (short)
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

/// Get the package version
pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns the environment label and version/info string based on build features.
pub fn env_version_info() -> (&'static str, &'static str) {
    if cfg!(feature = "env_staging") {
        ("staging", build_commit())
    } else if cfg!(feature = "env_test") {
        ("main", build_commit())
    } else {
        // Production (stable)
        ("stable", build_version())
    }
}

/// Format the environment and version info as a display string.
pub fn format_env_version() -> String {
    let (env_name, info) = env_version_info();
    format!("{env_name}:{info}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_date_not_empty() {
        assert!(!build_date().is_empty());
    }

    #[test]
    fn test_build_commit_not_empty() {
        assert!(!build_commit().is_empty());
    }

    #[test]
    fn test_build_version_not_empty() {
        assert!(!build_version().is_empty());
    }

    #[test]
    fn test_format_env_version() {
        let formatted = format_env_version();
        assert!(formatted.contains(':'));
    }
}
