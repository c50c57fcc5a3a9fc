//! The driver: reads a SOURCE package off disk and runs it through the translator.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::DriverError;
use crate::source::Package;
use crate::target::File;
use crate::translate::translate_package;

/// Reads `<dir>/package.json`, deserializes it as a `Package`, and translates it.
///
/// `package.json` stands in for the handoff an external parser/type-checker would produce; this
/// crate never parses SOURCE-language concrete syntax itself.
pub fn translate_dir(dir: &Path, config: Config) -> Result<File, DriverError> {
    let package_path = dir.join("package.json");
    log::info!("reading package from {}", package_path.display());

    let contents = fs::read_to_string(&package_path).map_err(|source| DriverError::Io {
        path: package_path.clone(),
        source,
    })?;

    let package: Package =
        serde_json::from_str(&contents).map_err(|source| DriverError::Deserialize {
            path: package_path.clone(),
            source,
        })?;

    translate_package(&package, config).map_err(DriverError::Translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_package_json_is_an_io_error() {
        let dir = std::env::temp_dir().join("effectify-driver-test-missing");
        let _ = fs::create_dir_all(&dir);
        let result = translate_dir(&dir, Config::default());
        assert!(matches!(result, Err(DriverError::Io { .. })));
    }

    #[test]
    fn malformed_package_json_is_a_deserialize_error() {
        let dir = std::env::temp_dir().join("effectify-driver-test-malformed");
        fs::create_dir_all(&dir).unwrap();
        let mut file = fs::File::create(dir.join("package.json")).unwrap();
        write!(file, "not json").unwrap();
        let result = translate_dir(&dir, Config::default());
        assert!(matches!(result, Err(DriverError::Deserialize { .. })));
    }
}
