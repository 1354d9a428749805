//! Small string helpers

/// Escape the XML special characters in a text value
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("CM <10> & \"CM 11\""), "CM &lt;10&gt; &amp; &quot;CM 11&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
