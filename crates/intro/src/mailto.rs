//! `mailto:` link rendering.

/// Render a `mailto:` URL with percent-encoded subject and body.
///
/// The recipient may be empty; email clients open a draft without a
/// recipient in that case.
pub fn mailto_link(to: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        to,
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_subject_and_body() {
        let link = mailto_link("partner@fund.example", "Hello & welcome", "Line one\nLine two");
        assert!(link.starts_with("mailto:partner@fund.example?subject="));
        assert!(link.contains("Hello%20%26%20welcome"));
        assert!(link.contains("Line%20one%0ALine%20two"));
    }

    #[test]
    fn empty_recipient_is_allowed() {
        let link = mailto_link("", "s", "b");
        assert!(link.starts_with("mailto:?subject="));
    }
}
