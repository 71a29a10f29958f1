//! Locating a JSON object inside free-form model output.
//!
//! Models like to wrap their JSON in prose or markdown code fences, and the
//! payload itself is full of braces (CSS, JS) that sit inside JSON strings.
//! [`json_candidates`] returns every top-level balanced `{...}` span in order,
//! tracking string literals so braces inside them don't count. A stray
//! unmatched `{` is skipped rather than swallowing the rest of the text.
//!
//! If there is no balanced span at all but some `{` precedes a later `}`, the
//! greedy first-`{`-to-last-`}` span is returned as the only candidate, so
//! the caller can report it as malformed.

/// Candidate JSON object spans, in the order they appear in `raw`.
/// Empty means there is no `{...}` span at all.
pub fn json_candidates(raw: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = raw[pos..].find('{') {
        let start = pos + offset;
        match balanced_len(&raw[start..]) {
            Some(len) => {
                spans.push(&raw[start..start + len]);
                pos = start + len;
            }
            // unmatched `{`: rescans the tail, quadratic only on pathological input
            None => pos = start + 1,
        }
    }

    if spans.is_empty() {
        spans.extend(greedy_span(raw));
    }

    spans
}

/// `s` must start with `{`. Returns the byte length up to and including the
/// matching `}`.
fn balanced_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn greedy_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::json_candidates;

    #[test]
    fn bare_object() {
        let raw = r#"{"html": "<p>hi</p>"}"#;
        assert_eq!(json_candidates(raw), vec![raw]);
    }

    #[test]
    fn prose_and_code_fences() {
        let raw = indoc::indoc! {r#"
            Sure! Here is your website:

            ```json
            {"html": "<p>hi</p>", "css": "body { margin: 0; }", "js": "", "images": []}
            ```

            Let me know if you want changes.
        "#};
        assert_eq!(
            json_candidates(raw),
            vec![r#"{"html": "<p>hi</p>", "css": "body { margin: 0; }", "js": "", "images": []}"#]
        );
    }

    #[test]
    fn no_braces() {
        assert!(json_candidates("I'm sorry, I can't help with that.").is_empty());
        assert!(json_candidates("closing } before { opening").is_empty());
        assert!(json_candidates("").is_empty());
    }

    #[test]
    fn braces_inside_strings_are_ignored() {
        let raw = r#"{"css": "a { color: red; } }}}", "js": "if (x) { y(\"}\"); }"}"#;
        assert_eq!(json_candidates(raw), vec![raw]);
    }

    #[test]
    fn multiple_top_level_spans_keep_order() {
        let raw = r#"Wrap code in {curly braces}. Result: {"a": {"b": 1}} done"#;
        assert_eq!(
            json_candidates(raw),
            vec!["{curly braces}", r#"{"a": {"b": 1}}"#]
        );
    }

    #[test]
    fn stray_open_brace_is_skipped() {
        let raw = r#"Careful with { in prose. {"a": 1}"#;
        assert_eq!(json_candidates(raw), vec![r#"{"a": 1}"#]);
    }

    #[test]
    fn unbalanced_falls_back_to_greedy_span() {
        let raw = r#"Here: {"html": "unterminated } and more }"#;
        assert_eq!(
            json_candidates(raw),
            vec![r#"{"html": "unterminated } and more }"#]
        );
    }

    #[test]
    fn multibyte_text_around_object() {
        let raw = "Voilà — “site” ➜ {\"a\": \"ünïcødé\"} ✓";
        assert_eq!(json_candidates(raw), vec!["{\"a\": \"ünïcødé\"}"]);
    }
}
