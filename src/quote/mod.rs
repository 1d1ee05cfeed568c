//! Quote dispatch
//!
//! Turns a `QuoteSnapshot` into the plain-text inquiry the shop receives
//! and the messaging deep link that carries it.

use crate::core::monetary::conversions::format_currency;
use crate::core::QuoteSnapshot;
use crate::error::{BuilderError, Result};
use url::form_urlencoded::byte_serialize;
use url::Url;

const MESSAGE_HEADER: &str = "*New Custom PC Inquiry from Website Builder*";
const MESSAGE_FOOTER: &str = "Please confirm availability and final pricing.";
const DEEP_LINK_BASE: &str = "https://wa.me";

/// Render the inquiry text for a snapshot
pub fn render_message(snapshot: &QuoteSnapshot) -> String {
    let mut message = format!("{MESSAGE_HEADER}\n\n");
    for line in &snapshot.lines {
        message.push_str(&format!(
            "*{}:* {} (x{}) - {}\n",
            line.category_label,
            line.part_name,
            line.quantity,
            format_currency(line.line_total)
        ));
    }
    message.push_str(&format!(
        "\n*Total Estimated Cost:* {}\n",
        format_currency(snapshot.total_price)
    ));
    message.push_str(&format!(
        "*Estimated Power:* {}W\n\n{MESSAGE_FOOTER}",
        snapshot.total_power
    ));
    message
}

/// Marks left unescaped in a URI component beyond what `byte_serialize` keeps
const COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%7E", "~"),
];

/// Percent-encode a URI component the way `encodeURIComponent` does:
/// spaces as %20, `- _ . ! ~ * ' ( )` left as they are
fn encode_component(text: &str) -> String {
    // byte_serialize already turns a literal '+' into %2B, so every '+' left
    // is a space
    let mut encoded = byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    for (escape, mark) in COMPONENT_MARKS {
        encoded = encoded.replace(escape, mark);
    }
    encoded
}

/// Deep link that opens a chat with `phone_number` prefilled with `message`
pub fn deep_link(phone_number: &str, message: &str) -> Result<Url> {
    let digits: String = phone_number
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '-'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(BuilderError::Quote(format!(
            "Invalid phone number: {phone_number}"
        )));
    }

    let mut url = Url::parse(&format!("{DEEP_LINK_BASE}/{digits}"))?;
    url.set_query(Some(&format!("text={}", encode_component(message))));
    Ok(url)
}

/// Sends finished builds to one phone number
#[derive(Debug, Clone)]
pub struct QuoteDispatcher {
    phone_number: String,
}

impl QuoteDispatcher {
    pub fn new(phone_number: &str) -> QuoteDispatcher {
        QuoteDispatcher {
            phone_number: phone_number.to_string(),
        }
    }

    /// Message and link for `snapshot`. An empty build has nothing to quote.
    pub fn dispatch(&self, snapshot: &QuoteSnapshot) -> Result<(String, Url)> {
        if snapshot.is_empty() {
            return Err(BuilderError::Quote("Build is empty".to_string()));
        }
        let message = render_message(snapshot);
        let link = deep_link(&self.phone_number, &message)?;
        log::info!(
            "Prepared quote for session {} ({} lines, {})",
            snapshot.session_id,
            snapshot.lines.len(),
            format_currency(snapshot.total_price)
        );
        Ok((message, link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuildEngine, Category, Part};

    fn engine() -> BuildEngine {
        let mut engine = BuildEngine::new();
        engine
            .place(
                Part::new("c4", Category::Cpu, "AMD Ryzen 5 7600X", 19500).with_power_draw(105),
                Category::Cpu,
            )
            .unwrap();
        engine
            .place(
                Part::new("s1", Category::Storage, "WD Blue SN580 1TB", 5600).with_power_draw(5),
                Category::Storage,
            )
            .unwrap();
        engine.set_quantity(Category::Storage, 1);
        engine
    }

    #[test]
    fn test_render_message() {
        let message = render_message(&engine().quote());
        assert_eq!(
            message,
            "*New Custom PC Inquiry from Website Builder*\n\n\
             *Processors:* AMD Ryzen 5 7600X (x1) - ₹19,500\n\
             *Storage:* WD Blue SN580 1TB (x2) - ₹11,200\n\
             \n*Total Estimated Cost:* ₹30,700\n\
             *Estimated Power:* 215W\n\n\
             Please confirm availability and final pricing."
        );
    }

    #[test]
    fn test_deep_link_encoding() {
        let url = deep_link("+91 99999-00000", "Hi there (x1) + ₹").unwrap();
        assert_eq!(
            url.as_str(),
            "https://wa.me/919999900000?text=Hi%20there%20(x1)%20%2B%20%E2%82%B9"
        );
    }

    #[test]
    fn test_component_encoding_keeps_uri_marks() {
        assert_eq!(encode_component("a-b_c.d!e~f*g'h"), "a-b_c.d!e~f*g'h");
        assert_eq!(encode_component("50% off & more"), "50%25%20off%20%26%20more");
        // an escaped percent sign is not mistaken for an escaped mark
        assert_eq!(encode_component("%28"), "%2528");
        assert_eq!(encode_component("a+b=c"), "a%2Bb%3Dc");
    }

    #[test]
    fn test_deep_link_rejects_bad_number() {
        assert!(deep_link("call me", "hi").is_err());
        assert!(deep_link("", "hi").is_err());
    }

    #[test]
    fn test_dispatch_empty_build() {
        let dispatcher = QuoteDispatcher::new("910000000000");
        let err = dispatcher.dispatch(&BuildEngine::new().quote()).unwrap_err();
        assert!(matches!(err, BuilderError::Quote(_)));
    }

    #[test]
    fn test_dispatch_round_trip() {
        let dispatcher = QuoteDispatcher::new("910000000000");
        let (message, link) = dispatcher.dispatch(&engine().quote()).unwrap();
        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(text, message);
    }
}
