//! GSM 03.38 character set
//!
//! Basic table plus the escape-prefixed extension table. Anything else forces
//! the whole message into Unicode (UCS-2) encoding.

/// Non-ASCII characters of the GSM-7 basic table
const GSM7_BASIC_NON_ASCII: &str = "£¥èéùìòÇØøÅåΔΦΓΛΩΠΨΣΘΞÆæßÉ¤¡ÄÖÑÜ§¿äöñüà";

/// Characters reachable through the GSM-7 escape (extension) table
const GSM7_EXTENSION: &str = "^{}\\[~]|€\u{000C}";

/// Whether `c` can be encoded in GSM-7 (basic or extension table)
pub fn is_gsm7_char(c: char) -> bool {
    match c {
        'A'..='Z' | 'a'..='z' | '0'..='9' => true,
        ' ' | '\n' | '\r' => true,
        '@' | '$' | '_' | '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | '+' | ','
        | '-' | '.' | '/' | ':' | ';' | '<' | '=' | '>' | '?' => true,
        _ => GSM7_BASIC_NON_ASCII.contains(c) || GSM7_EXTENSION.contains(c),
    }
}

/// Whether every character of `text` is GSM-7 encodable
pub fn is_gsm7(text: &str) -> bool {
    text.chars().all(is_gsm7_char)
}
