//! HTML entity escaping and unescaping.
//!
//! Escaping follows the text-context table of Go's `html/template`, which
//! is what directive templates were originally written against. Unescaping
//! covers numeric references and the HTML5 named entity table.

/// Escape a value for substitution into template text.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '+' => out.push_str("&#43;"),
            '\0' => out.push('\u{FFFD}'),
            _ => out.push(c),
        }
    }
    out
}

/// Replace entity references with the characters they stand for.
///
/// Single pass: `&amp;lt;` becomes `&lt;`, not `<`. Unknown references are
/// left untouched.
pub fn unescape(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}
