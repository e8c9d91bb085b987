use std::path::{Path, PathBuf};

use anyhow::Result;

pub trait FsExt {
    // Converts the provided relative path to be based from the path of the currently working directory.
    // If the path is absolute, then it returns the absolute path.
    fn relative_to_cwd(&self) -> Result<PathBuf>
    where
        Self: AsRef<Path>,
    {
        let cwd_dir = std::env::current_dir()?;

        Ok(cwd_dir.join(self))
    }
}

impl FsExt for String {}

impl FsExt for &str {}

impl FsExt for PathBuf {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_is_joined_to_cwd() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!("ply0.json".relative_to_cwd().unwrap(), cwd.join("ply0.json"));
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let absolute = PathBuf::from("/tmp/snapshots");

        assert_eq!(absolute.relative_to_cwd().unwrap(), absolute);
    }
}
