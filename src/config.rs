use std::path::{Path, PathBuf};

/// Environment variable naming the generated class-path file
pub const CLASSPATHS_ENV: &str = "DUNIT_OLD_VERSION_CLASSPATHS";

/// Location of the generated file when running from a module's build directory
const PRIMARY_CLASSPATHS_FILE: &str =
    "../../../geode-old-versions/build/generated-resources/main/geodeOldVersionClasspaths.txt";

/// Location of the generated file when running from a module's root, as IDEs do
const SECONDARY_CLASSPATHS_FILE: &str =
    "../geode-old-versions/build/generated-resources/main/geodeOldVersionClasspaths.txt";

/// Returns the path to the generated class-path file.
/// Uses $DUNIT_OLD_VERSION_CLASSPATHS if it is set,
/// otherwise the first legacy location that exists relative to the working directory,
/// or the primary legacy location if neither exists.
pub fn classpaths_file() -> PathBuf {
    classpaths_file_with_env(std::env::var(CLASSPATHS_ENV).ok(), Path::new("."))
}

pub fn classpaths_file_with_env(env_path: Option<String>, base_dir: &Path) -> PathBuf {
    if let Some(path) = env_path.filter(|path| !path.is_empty()) {
        return PathBuf::from(path);
    }

    let primary = base_dir.join(PRIMARY_CLASSPATHS_FILE);
    if primary.exists() {
        return primary;
    }

    let secondary = base_dir.join(SECONDARY_CLASSPATHS_FILE);
    if secondary.exists() {
        return secondary;
    }

    primary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Creates `<root>/a/b/c` so the primary location resolves inside `root`
    fn nested_base(root: &Path) -> PathBuf {
        let base = root.join("a/b/c");
        std::fs::create_dir_all(&base).unwrap();
        base
    }

    fn write_file(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "test=/cur\n").unwrap();
    }

    #[test]
    fn classpaths_file_with_env_uses_env_path_when_set() {
        let path = classpaths_file_with_env(
            Some("/tmp/classpaths.txt".to_string()),
            Path::new("/work"),
        );

        assert_eq!(path, PathBuf::from("/tmp/classpaths.txt"));
    }

    #[test]
    fn classpaths_file_with_env_ignores_empty_env_path() {
        let path = classpaths_file_with_env(Some(String::new()), Path::new("/work"));

        assert_eq!(path, Path::new("/work").join(PRIMARY_CLASSPATHS_FILE));
    }

    #[test]
    fn classpaths_file_with_env_prefers_primary_location() {
        let temp_dir = TempDir::new().unwrap();
        let base = nested_base(temp_dir.path());
        write_file(&base.join(PRIMARY_CLASSPATHS_FILE));
        write_file(&base.join(SECONDARY_CLASSPATHS_FILE));

        let path = classpaths_file_with_env(None, &base);

        assert_eq!(path, base.join(PRIMARY_CLASSPATHS_FILE));
    }

    #[test]
    fn classpaths_file_with_env_falls_back_to_secondary_location() {
        let temp_dir = TempDir::new().unwrap();
        let base = nested_base(temp_dir.path());
        write_file(&base.join(SECONDARY_CLASSPATHS_FILE));

        let path = classpaths_file_with_env(None, &base);

        assert_eq!(path, base.join(SECONDARY_CLASSPATHS_FILE));
    }

    #[test]
    fn classpaths_file_with_env_returns_primary_when_nothing_exists() {
        let temp_dir = TempDir::new().unwrap();
        let base = nested_base(temp_dir.path());

        let path = classpaths_file_with_env(None, &base);

        assert_eq!(path, base.join(PRIMARY_CLASSPATHS_FILE));
    }
}
