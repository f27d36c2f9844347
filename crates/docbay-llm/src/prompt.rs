//! Fixed instruction prompt for the text refiner.

/// Formatting instructions with one worked example. The extracted text is
/// appended below the final line.
const REFINE_PROMPT: &str = r#"Please reformat the provided text according to the following requirements and the reference example.

Core requirements:
1. Preserve the original content: apart from the removals listed below, do not alter the original sentences or their core information.
2. Improve layout and readability: focus on heading levels, paragraph structure and list formatting so the result is clear and easy to read.

Content that must be removed (it must not appear in the output):
1. Page markers, such as "Page 3" or "Page 3 of 10" or similar page information.
2. Document metadata and auxiliary sections, such as revision histories, change records, effective dates, version numbers and tables of contents. When these appear as standalone sections or paragraphs, delete them outright.

Formatting details (follow the reference example closely):
1. Heading levels: keep the hierarchy clear and consistent (e.g. `### 1.` and `#### 1.1.`).
2. Paragraphs: split paragraphs sensibly so each one covers a single point.
3. List items:
   * Top-level list items use the `- **bold text**` form.
   * Nested items (explanations or examples for a top-level item) use `o plain text` with appropriate indentation.

Reference example:
---

### 1. Purpose of bid management

#### 1.1. Improving the win rate

- **Respond precisely to the tender**
  o Study the tender requirements, including technical specifications, commercial terms and delivery deadlines, and make sure the bid answers each of them accurately and completely.
  o For example, analyse the hardware and software parameters and quality standards the tender specifies and prepare a targeted solution to raise the chance of winning.

- **Highlight competitive strengths**
  o Analyse competing bidders and emphasise the differentiators, such as proven technology, rich experience and a strong track record, so the bid stands out.
---

Please process the following text:
"#;

/// Compose the full refinement prompt for one request.
///
/// `extra` is appended after the main text under a distinct labeled section
/// when present.
pub fn build_prompt(text: &str, extra: Option<&str>) -> String {
    let mut prompt = format!("{}{}", REFINE_PROMPT, text);

    if let Some(extra) = extra {
        prompt.push_str(
            "\n\nThe following content is important link information; append it after the main body:\n",
        );
        prompt.push_str(extra);
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = build_prompt("the document body", None);
        assert!(prompt.ends_with("the document body"));
        assert!(prompt.contains("Reference example"));
        assert!(!prompt.contains("link information"));
    }

    #[test]
    fn test_prompt_appends_extra_section() {
        let prompt = build_prompt("body", Some("https://example.com"));
        assert!(prompt.contains("body"));
        assert!(prompt.contains("important link information"));
        assert!(prompt.ends_with("https://example.com"));
    }
}
