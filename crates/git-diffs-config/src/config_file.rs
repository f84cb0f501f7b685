use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".git-diffs.toml";

/// Load config file content
///
/// Searches in order:
/// 1. `.git-diffs.toml` in the current working directory
/// 2. `.git-diffs.toml` in the home directory
/// 3. `config.toml` in the platform config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    candidate_paths().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = get_home_config_path() {
        paths.push(home);
    }
    if let Ok(global) = crate::paths::app_config_path() {
        paths.push(global);
    }
    paths
}

/// Returns ~/.git-diffs.toml if HOME environment variable is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_directory_comes_first() {
        let paths = candidate_paths();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE));
        assert!(paths.len() <= 3);
    }
}
