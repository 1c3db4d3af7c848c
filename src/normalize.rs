//! Text cleanup for listing content: markup delimiters, HTML entities, URLs and whitespace.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref STRIKETHROUGH: Regex = Regex::new(r"~~(.*?)~~").unwrap();
    static ref SUPERSCRIPT: Regex = Regex::new(r"\^(.*?)\^").unwrap();
    static ref SPOILER: Regex = Regex::new(r"&gt;!(.+?)!&lt;").unwrap();
    // An escaped pair hugging its text, as in `&gt;quoted&lt;`. Spaced
    // comparisons such as `5 &gt; 3 and 2 &lt; 4` are left to entity decoding.
    static ref ESCAPED_PAIR: Regex = Regex::new(r"&gt;(\S(?:.*?\S)?)&lt;").unwrap();
    static ref URL: Regex =
        Regex::new(r"https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Cleans raw listing text
///
/// Collapses whitespace, strips `**`, `*`, `~~` and `^` delimiters, unwraps
/// spoilers, decodes `&gt;`, `&lt;` and `&amp;` and masks absolute URLs as
/// `[URL]`. Empty input yields an empty string.
///
/// Delimiters are matched on the single-line text, so a pair split across
/// lines is stripped on the first pass.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = WHITESPACE.replace_all(text, " ");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = STRIKETHROUGH.replace_all(&text, "$1");
    let text = SUPERSCRIPT.replace_all(&text, "$1");
    let text = SPOILER.replace_all(&text, "$1");
    let text = ESCAPED_PAIR.replace_all(&text, "$1");
    let text = text.replace("&gt;", ">").replace("&lt;", "<").replace("&amp;", "&");
    let text = URL.replace_all(&text, "[URL]");

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
