//! Resolution of the data root given in the config file or on the command line.

use std::env;
use std::path::PathBuf;

/// Replace a leading `~/` with the home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Absolute form of a `--root` value; relative paths hang off the current
/// directory.
pub fn absolute_root(raw: &str) -> PathBuf {
    let path = expand_home(raw);
    if path.is_absolute() {
        return path;
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_root_is_anchored_at_cwd() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(absolute_root("data"), cwd.join("data"));
        assert_eq!(absolute_root("/srv/rtrack"), PathBuf::from("/srv/rtrack"));
    }

    #[test]
    fn home_prefix_only_at_start() {
        assert_eq!(expand_home("a/~/b"), PathBuf::from("a/~/b"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/track"), home.join("track"));
        }
    }
}
