//! YAML parsing utilities

pub mod parser;

pub use parser::{parse_yaml, parse_yaml_file, write_yaml_file, YamlError};
