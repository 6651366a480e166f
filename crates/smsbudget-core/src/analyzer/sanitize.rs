//! Lossy normalization of message text into GSM-7
//!
//! Pipeline (order matters):
//!
//! 1. NFKD-decompose characters outside GSM-7 (`ê` → `e` + combining mark).
//!    Look-alike table keys are exempt so `™` stays `™` rather than `TM`.
//! 2. Replace typographic look-alikes with their ASCII counterparts, in the
//!    input and in decomposition output (`™` → `(TM)`, `½` → `1/2`)
//! 3. Drop zero-width and invisible characters
//! 4. Drop anything still outside GSM-7 (emoji, non-Latin scripts, combining marks)
//! 5. Collapse runs of spaces
//! 6. Trim
//!
//! Scripts with no ASCII equivalent are deleted, not transliterated.

use super::charset::is_gsm7_char;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Look-alike replacements. Keys are never GSM-7 and values always are.
static SUBSTITUTIONS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Quotes and primes
    for c in ['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{2032}', '\u{2039}', '\u{203A}'] {
        m.insert(c, "'");
    }
    for c in ['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', '\u{2033}', '\u{00AB}', '\u{00BB}'] {
        m.insert(c, "\"");
    }
    m.insert('`', "'");
    m.insert('\u{00B4}', "'");

    // Dashes and minus signs
    for c in [
        '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}',
        '\u{FE58}', '\u{FE63}', '\u{FF0D}',
    ] {
        m.insert(c, "-");
    }

    // Space variants
    for c in [
        '\t', '\u{00A0}', '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}',
        '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{202F}',
        '\u{205F}', '\u{3000}',
    ] {
        m.insert(c, " ");
    }
    m.insert('\u{2028}', "\n");
    m.insert('\u{2029}', "\n");

    m.insert('\u{2026}', "...");

    // Bullets
    for c in ['\u{2022}', '\u{25E6}', '\u{2023}', '\u{2043}', '\u{2219}', '\u{00B7}', '\u{25AA}'] {
        m.insert(c, "*");
    }

    // Symbols
    m.insert('\u{00A9}', "(c)");
    m.insert('\u{00AE}', "(R)");
    m.insert('\u{2122}', "(TM)");
    m.insert('\u{2192}', "->");
    m.insert('\u{2190}', "<-");
    m.insert('\u{2191}', "^");
    m.insert('\u{21D2}', "=>");
    m.insert('\u{00D7}', "x");
    m.insert('\u{00F7}', "/");
    m.insert('\u{2044}', "/");
    m.insert('\u{2264}', "<=");
    m.insert('\u{2265}', ">=");
    m.insert('\u{2260}', "!=");

    // Currency
    m.insert('\u{00A2}', "c");
    m.insert('\u{20B9}', "Rs");
    m.insert('\u{20A9}', "W");
    m.insert('\u{20BD}', "RUB");
    m.insert('\u{20B1}', "P");

    m
});

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(" {2,}").expect("valid space regex"));

fn is_zero_width(c: char) -> bool {
    matches!(
        c,
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}'
    )
}

/// Rewrite `text` so that it is fully GSM-7 encodable
///
/// Idempotent. GSM-7 input comes back unchanged apart from space collapsing
/// and trimming.
pub fn sanitize(text: &str) -> String {
    let mut substituted = String::with_capacity(text.len());
    for c in text.chars() {
        if is_gsm7_char(c) {
            substituted.push(c);
        } else if let Some(replacement) = SUBSTITUTIONS.get(&c) {
            substituted.push_str(replacement);
        } else {
            for d in std::iter::once(c).nfkd() {
                match SUBSTITUTIONS.get(&d) {
                    Some(replacement) => substituted.push_str(replacement),
                    None => substituted.push(d),
                }
            }
        }
    }

    let cleaned: String = substituted
        .chars()
        .filter(|c| !is_zero_width(*c))
        .filter(|c| is_gsm7_char(*c))
        .collect();

    MULTI_SPACE.replace_all(&cleaned, " ").trim().to_string()
}
