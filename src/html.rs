//! HTML helpers for Hackage pages.
//!
//! Both functions are pure: they take an already fetched document body and
//! never touch the network, which keeps them testable without a server.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose subtrees never contribute text. `template` holds inert
/// markup that is not rendered, so it is skipped too.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "template"];

/// Finds the `href` of the first anchor whose trimmed text is exactly `module`.
///
/// Anchors without an `href` are not candidates. Matching is case-sensitive
/// and the first hit in document order wins.
pub fn find_module_href(html: &str, module: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").ok()?;

    document
        .select(&selector)
        .find(|anchor| anchor.text().collect::<String>().trim() == module)
        .and_then(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
}

/// Reduces a documentation page to compact, line-based plain text.
///
/// Every text node becomes its own line; lines are trimmed and empty ones
/// dropped, keeping document order.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut pieces = Vec::new();
    collect_text(&document.root_element(), &mut pieces);

    pieces
        .join("\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: &ElementRef<'_>, pieces: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => pieces.push(String::from(&**text)),
            Node::Element(el) if NON_CONTENT_TAGS.contains(&el.name()) => {}
            // With scripting enabled the parser keeps noscript bodies as raw
            // markup text; parse it again so only its text survives.
            Node::Element(el) if el.name() == "noscript" => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    let raw = child_ref.text().collect::<String>();
                    let fragment = Html::parse_fragment(&raw);
                    collect_text(&fragment.root_element(), pieces);
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, pieces);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_PAGE: &str = r#"<!DOCTYPE html><html><body>
        <div id="module-list">
            <ul>
                <li><a href="/package/lens-5.0.0/docs/Control-Lens-At.html">Control.Lens.At</a></li>
                <li><a href="/package/lens-5.0.0/docs/Control-Lens.html"> Control.Lens </a></li>
                <li><a href="/package/lens-5.0.0/docs/Control-Lens-Iso.html">Control.Lens.Iso</a></li>
            </ul>
        </div>
        </body></html>"#;

    #[test]
    fn test_find_module_href_exact_match() {
        let href = find_module_href(INDEX_PAGE, "Control.Lens");
        assert_eq!(href.as_deref(), Some("/package/lens-5.0.0/docs/Control-Lens.html"));
    }

    #[test]
    fn test_find_module_href_rejects_prefix_and_case() {
        assert!(find_module_href(INDEX_PAGE, "Control").is_none());
        assert!(find_module_href(INDEX_PAGE, "control.lens").is_none());
        assert!(find_module_href(INDEX_PAGE, "Control.Lens.A").is_none());
    }

    #[test]
    fn test_find_module_href_extra_text_does_not_match() {
        let html = r#"<a href="a.html">Control.Lens (deprecated)</a>"#;
        assert!(find_module_href(html, "Control.Lens").is_none());
    }

    #[test]
    fn test_find_module_href_first_occurrence_wins() {
        let html = r#"<body>
            <a href="first.html">Data.Map</a>
            <a href="second.html">Data.Map</a>
        </body>"#;
        assert_eq!(find_module_href(html, "Data.Map").as_deref(), Some("first.html"));
    }

    #[test]
    fn test_find_module_href_skips_anchor_without_href() {
        let html = r#"<body>
            <a name="Data.Map">Data.Map</a>
            <a href="Data-Map.html">Data.Map</a>
        </body>"#;
        assert_eq!(find_module_href(html, "Data.Map").as_deref(), Some("Data-Map.html"));

        let only_named = r#"<a name="Data.Map">Data.Map</a>"#;
        assert!(find_module_href(only_named, "Data.Map").is_none());
    }

    #[test]
    fn test_find_module_href_nested_markup() {
        let html = r#"<a href="Data-Text.html"><span class="module">Data.Text</span></a>"#;
        assert_eq!(find_module_href(html, "Data.Text").as_deref(), Some("Data-Text.html"));
    }

    #[test]
    fn test_extract_text_strips_script_and_style() {
        let html = r#"<!DOCTYPE html><html>
            <head>
                <title>Control.Lens</title>
                <style>body { color: red; }</style>
                <script>var tracking = "secret";</script>
            </head>
            <body>
                <h1>Control.Lens</h1>
                <script type="text/javascript">
                    window.onload = function() {};
                </script>
                <p>Usage: <code>view</code> and <code>over</code>.</p>
            </body></html>"#;

        let text = extract_text(html);

        assert!(!text.contains("color: red"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("onload"));
        assert_eq!(text, "Control.Lens\nControl.Lens\nUsage:\nview\nand\nover\n.");
    }

    #[test]
    fn test_extract_text_has_no_blank_or_padded_lines() {
        let html = "<html><body>\n\n  <div>  first  </div>\n\n\n<pre>  line one\n\n   line two  </pre></body></html>";

        let text = extract_text(html);

        assert_eq!(text, "first\nline one\nline two");
        assert!(text.lines().all(|line| !line.is_empty() && line.trim() == line));
    }

    #[test]
    fn test_extract_text_noscript_yields_inner_text() {
        let html = "<html><body><noscript><p>Enable JS</p><script>x()</script></noscript><p>Doc</p></body></html>";

        assert_eq!(extract_text(html), "Enable JS\nDoc");
    }

    #[test]
    fn test_extract_text_skips_template_contents() {
        let html = "<html><body><template><p>Row stub</p></template><p>Doc</p></body></html>";

        assert_eq!(extract_text(html), "Doc");
    }

    #[test]
    fn test_extract_text_empty_document() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<script>only()</script>"), "");
    }
}
