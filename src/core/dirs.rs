use crate::core::error::RepoRenderError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, RepoRenderError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config")),
        "macos" => dirs::home_dir()
            .unwrap_or_default()
            .join("Library/Application Support"),
        "windows" => dirs::config_dir().unwrap_or_default(),
        _ => dirs::config_dir().unwrap_or_default(),
    };

    if base.as_os_str().is_empty() {
        return Err(RepoRenderError::ConfigDirectoryNotFound);
    }

    Ok(base.join("repo-render"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_directory_ends_with_app_name() {
        if let Ok(dir) = get_config_directory() {
            assert!(dir.ends_with("repo-render"));
        }
    }
}
