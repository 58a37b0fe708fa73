//! YAML parsing and writing with error handling

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors reading or writing entity YAML
#[derive(Debug, Error)]
pub enum YamlError {
    #[error("Failed to parse {filename}: {source}")]
    Syntax {
        filename: String,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Failed to serialize YAML: {0}")]
    Serialize(#[source] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse YAML content into a typed value
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content).map_err(|e| YamlError::Syntax {
        filename: filename.to_string(),
        source: e,
    })
}

/// Parse YAML from a file path
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();
    parse_yaml(&content, &filename)
}

/// Serialize a value and write it to a file path
pub fn write_yaml_file<T: Serialize>(path: &Path, value: &T) -> Result<(), YamlError> {
    let content = serde_yml::to_string(value).map_err(YamlError::Serialize)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestStruct {
        name: String,
        value: i32,
    }

    #[test]
    fn test_parse_valid_yaml() {
        let yaml = "name: test\nvalue: 42";
        let result: TestStruct = parse_yaml(yaml, "test.yaml").unwrap();
        assert_eq!(result.name, "test");
        assert_eq!(result.value, 42);
    }

    #[test]
    fn test_parse_invalid_yaml_returns_error() {
        let yaml = "name: test\n  invalid indentation";
        let result: Result<TestStruct, _> = parse_yaml(yaml, "test.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_write_then_parse_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.yaml");
        let value = TestStruct {
            name: "roundtrip".to_string(),
            value: 7,
        };

        write_yaml_file(&path, &value).unwrap();
        let parsed: TestStruct = parse_yaml_file(&path).unwrap();
        assert_eq!(parsed, value);
    }
}
