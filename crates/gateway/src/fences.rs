//! Markdown code-fence removal for free-form model replies.

/// Removes every ```` ```json ```` and ```` ``` ```` marker and trims the result.
///
/// Free-form providers often wrap the JSON object in a fenced block, sometimes with a
/// language tag. The markers are removed wherever they occur; the JSON itself never
/// contains backtick triples.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_json_tagged_fence() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strips_bare_fence_and_whitespace() {
        let text = "\n  ```\n{\"a\": 1}\n```  \n";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn test_leaves_unfenced_text_untouched() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_upper_case_tag() {
        assert_eq!(strip_code_fences("```JSON\n{}\n```"), "{}");
    }
}
