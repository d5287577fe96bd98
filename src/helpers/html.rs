//! HTML helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in a single relative URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Simple HTML escaping
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Relative link to the page generated for `slug`
///
/// # Examples
/// ```ignore
/// page_href("my post") // -> my%20post.html
/// ```
pub fn page_href(slug: &str) -> String {
    format!("{}.html", utf8_percent_encode(slug, PATH_SEGMENT))
}

/// Generate an anchor tag. `text` is inserted as-is.
pub fn link_to(href: &str, text: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!(r#"<a class="{}" href="{}">{}</a>"#, class, href, text),
        None => format!(r#"<a href="{}">{}</a>"#, href, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_href() {
        assert_eq!(page_href("post"), "post.html");
        assert_eq!(page_href("my post"), "my%20post.html");
        assert_eq!(page_href("50%-off?"), "50%25-off%3F.html");
        assert_eq!(page_href("café"), "caf%C3%A9.html");
    }

    #[test]
    fn test_link_to() {
        assert_eq!(link_to("a.html", "A", None), r#"<a href="a.html">A</a>"#);
        assert_eq!(
            link_to("a.html", "A", Some("more")),
            r#"<a class="more" href="a.html">A</a>"#
        );
    }
}
