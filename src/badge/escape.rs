/// Escapes the five XML special characters.
///
/// Every upstream string goes through this before it is placed in badge markup, both in text
/// nodes and in attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_xml_plain_text_unchanged() {
        assert_eq!(escape_xml("Sigur Rós: Hoppípolla"), "Sigur Rós: Hoppípolla");
        assert_eq!(escape_xml(""), "");
    }

    #[test]
    fn test_escape_xml_does_not_double_decode() {
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    }
}
