//! JSON output formatter

use crate::output::FormatError;
use serde::Serialize;

/// Format outline data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{OutlineTree, StartLocation};
    use crate::tokenized_text::{keyword, method, plain, whitespace};
    use serde_json::{json, Value};

    #[test]
    fn test_outline_tree_shape() {
        let tree = OutlineTree::new(
            vec![keyword("function"), whitespace(" "), method("run"), plain("("), plain(")")],
            vec![],
            StartLocation {
                start_line: 4,
                start_column: 2,
            },
        );

        let value: Value = serde_json::from_str(&format_json(&tree).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "tokenizedText": [
                    { "kind": "keyword", "value": "function" },
                    { "kind": "whitespace", "value": " " },
                    { "kind": "method", "value": "run" },
                    { "kind": "plain", "value": "(" },
                    { "kind": "plain", "value": ")" }
                ],
                "children": [],
                "startLine": 4,
                "startColumn": 2
            })
        );
    }
}
