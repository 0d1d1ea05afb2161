//! Path utilities: expand ~, resolve output targets relative to the cwd.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Resolve a user-supplied output path. Relative paths are anchored
/// at the current working directory.
pub fn resolve_output_path(path: &str) -> std::io::Result<PathBuf> {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_pass_through() {
        let p = resolve_output_path("/tmp/out.pdf").unwrap();
        assert_eq!(p, PathBuf::from("/tmp/out.pdf"));
    }

    #[test]
    fn relative_paths_are_anchored() {
        let p = resolve_output_path("out.pdf").unwrap();
        assert!(p.is_absolute());
        assert!(p.ends_with("out.pdf"));
    }
}
