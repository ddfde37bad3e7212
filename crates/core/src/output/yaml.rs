//! YAML output formatter

use crate::output::FormatError;
use serde::Serialize;

/// Format outline data as YAML
pub fn format_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileOutline, Language, OutlineMap};
    use crate::outline::{OutlineTree, StartLocation};
    use crate::tokenized_text::{class_name, keyword, whitespace};
    use std::path::PathBuf;

    fn create_test_data() -> OutlineMap {
        OutlineMap::single(FileOutline {
            path: PathBuf::from("src/widget.js"),
            absolute_path: PathBuf::from("/test/src/widget.js"),
            language: Language::JavaScript,
            total_lines: 10,
            outline: vec![OutlineTree::new(
                vec![keyword("class"), whitespace(" "), class_name("Widget")],
                vec![],
                StartLocation {
                    start_line: 0,
                    start_column: 0,
                },
            )],
            errors: vec![],
        })
    }

    #[test]
    fn test_format_yaml() {
        let yaml = format_yaml(&create_test_data()).unwrap();
        assert!(yaml.contains("root:"));
        assert!(yaml.contains("files:"));
        assert!(yaml.contains("tokenizedText:"));
        assert!(yaml.contains("kind: class-name"));
        assert!(yaml.contains("Widget"));
    }
}
