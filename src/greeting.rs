//! Greeting text and shareable links.
//!
//! A link carries the sender's name in its `from` query parameter; whoever
//! opens it sees the greeting "from" that person and can send their own.

pub const HEADLINE: &str = "దీపావళి శుభాకాంక్షలు!";
const FROM_SUFFIX: &str = "నుండి";
const WISHES_FROM: &str = "నుండి మీకు శుభాకాంక్షలు!";
const SEE_GREETING: &str = "ఈ శుభాకాంక్షలు చూడండి:";
const WHATSAPP_BASE: &str = "https://wa.me/?text=";
const SENDER_PARAM: &str = "from";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Greeting {
    sender: Option<String>,
}

impl Greeting {
    pub fn new(sender: Option<String>) -> Self {
        let sender = sender
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Greeting { sender }
    }

    /// Greeting for someone who opened `url`.
    pub fn from_url(url: &str) -> Self {
        Greeting::new(sender_from_url(url))
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// "<name> నుండి", when the sender is known.
    pub fn from_line(&self) -> Option<String> {
        self.sender.as_ref().map(|s| format!("{} {}", s, FROM_SUFFIX))
    }

    /// One-line banner for the status bar.
    pub fn banner(&self) -> String {
        match self.from_line() {
            Some(from) => format!("{} {}", HEADLINE, from),
            None => HEADLINE.to_string(),
        }
    }
}

/// The decoded `from` query parameter of `url`, if present and non-empty.
pub fn sender_from_url(url: &str) -> Option<String> {
    let url = url.split('#').next().unwrap_or_default();
    let (_, query) = url.split_once('?')?;
    let raw = query
        .split('&')
        .find_map(|pair| pair.strip_prefix(SENDER_PARAM)?.strip_prefix('='))?;
    let name = decode_component(&raw.replace('+', " "))?;
    (!name.is_empty()).then_some(name)
}

/// `url` without its query string or fragment.
pub fn base_url(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Link that opens the card greeting from `name`.
pub fn share_link(url: &str, name: &str) -> String {
    let base = base_url(url);
    let name = name.trim();
    if name.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}={}", base, SENDER_PARAM, encode_component(name))
    }
}

/// Message text sent along with a share link.
pub fn share_message(name: &str, link: &str) -> String {
    let name = name.trim();
    let wishes = if name.is_empty() {
        String::new()
    } else {
        format!("{} {}", name, WISHES_FROM)
    };
    format!("{} {} {} {}", HEADLINE, wishes, SEE_GREETING, link)
}

/// WhatsApp deep link that pre-fills `message`.
pub fn whatsapp_link(message: &str) -> String {
    format!("{}{}", WHATSAPP_BASE, encode_component(message))
}

/// Characters `encode_component` passes through untouched.
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&b)
}

/// Percent-encode every byte outside the unreserved set, uppercase hex.
pub fn encode_component(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len() * 3);
    for &b in s.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0f) as usize] as char);
        }
    }
    out
}

/// Reverse of `encode_component`. `None` on a bad escape or invalid UTF-8.
pub fn decode_component(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hi = (hex[0] as char).to_digit(16)?;
            let lo = (hex[1] as char).to_digit(16)?;
            out.push((hi * 16 + lo) as u8);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_from_query() {
        assert_eq!(
            sender_from_url("https://example.org/card/?from=Ravi"),
            Some("Ravi".to_string())
        );
        assert_eq!(
            sender_from_url("https://example.org/?lang=te&from=Sita+Devi#top"),
            Some("Sita Devi".to_string())
        );
        assert_eq!(
            sender_from_url("/?from=%E0%B0%B0%E0%B0%B5%E0%B0%BF"),
            Some("రవి".to_string())
        );
    }

    #[test]
    fn test_sender_missing_or_empty() {
        assert_eq!(sender_from_url("https://example.org/"), None);
        assert_eq!(sender_from_url("https://example.org/?from="), None);
        assert_eq!(sender_from_url("https://example.org/?fromage=brie"), None);
        assert_eq!(sender_from_url("https://example.org/#?from=x"), None);
    }

    #[test]
    fn test_sender_bad_escape() {
        assert_eq!(sender_from_url("/?from=%E0%B0"), None);
        assert_eq!(sender_from_url("/?from=100%"), None);
        assert_eq!(sender_from_url("/?from=%zz"), None);
    }

    #[test]
    fn test_encode_component_matches_uri_rules() {
        assert_eq!(encode_component("Sita Devi"), "Sita%20Devi");
        assert_eq!(encode_component("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(encode_component("it's (ok)!~*"), "it's%20(ok)!~*");
        assert_eq!(encode_component("రవి"), "%E0%B0%B0%E0%B0%B5%E0%B0%BF");
    }

    #[test]
    fn test_share_link() {
        let page = "https://example.org/card/index.html?from=Old#x";
        assert_eq!(share_link(page, "  "), "https://example.org/card/index.html");
        assert_eq!(
            share_link(page, " Ravi Kumar "),
            "https://example.org/card/index.html?from=Ravi%20Kumar"
        );
        let link = share_link(page, "Ravi Kumar");
        assert_eq!(sender_from_url(&link), Some("Ravi Kumar".to_string()));
    }

    #[test]
    fn test_share_message() {
        assert_eq!(
            share_message("Ravi", "L"),
            "దీపావళి శుభాకాంక్షలు! Ravi నుండి మీకు శుభాకాంక్షలు! ఈ శుభాకాంక్షలు చూడండి: L"
        );
        assert_eq!(
            share_message("", "L"),
            "దీపావళి శుభాకాంక్షలు!  ఈ శుభాకాంక్షలు చూడండి: L"
        );
    }

    #[test]
    fn test_whatsapp_link() {
        assert_eq!(whatsapp_link("hi there"), "https://wa.me/?text=hi%20there");
    }

    #[test]
    fn test_banner() {
        assert_eq!(Greeting::new(None).banner(), HEADLINE);
        assert_eq!(Greeting::new(Some("   ".into())), Greeting::default());
        let g = Greeting::from_url("/?from=Ravi");
        assert_eq!(g.sender(), Some("Ravi"));
        assert_eq!(g.banner(), "దీపావళి శుభాకాంక్షలు! Ravi నుండి");
    }
}
