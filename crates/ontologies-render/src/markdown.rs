//! Markdown → HTML via comrak (GFM extensions, raw HTML passed through).

/// Convert one page body to an HTML fragment.
pub fn markdown_to_html(text: &str) -> String {
    let mut options = comrak::Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    // Raw HTML in notes passes through.
    options.render.unsafe_ = true;

    comrak::markdown_to_html(text, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let html = markdown_to_html("# Title\n\nSome *text*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_reference_tokens_survive_conversion() {
        let html = markdown_to_html("before [[Y]] after");
        assert!(html.contains("[[Y]]"));
    }

    #[test]
    fn test_tables_are_enabled() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
