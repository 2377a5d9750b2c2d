//! HTML escaping for attribute-embedded diagram text.
//!
//! Pending spans carry the raw diagram text in a `data-raw` attribute, so
//! escaping must be attribute-safe and exactly reversible by
//! [`unescape_html`]; the export step depends on the round trip.

/// Escape HTML special characters for safe embedding in an attribute value.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Decode the entities produced by [`escape_attr`] (plus the common `&#39;`
/// apostrophe spelling). Unknown entities are left untouched.
#[must_use]
pub fn unescape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let Some((decoded, consumed)) = decode_entity(rest) else {
            result.push('&');
            rest = &rest[1..];
            continue;
        };
        result.push(decoded);
        rest = &rest[consumed..];
    }

    result.push_str(rest);
    result
}

/// Try to decode one entity at the start of `s`; returns the character and
/// the number of bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    const ENTITIES: [(&str, char); 6] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#x27;", '\''),
        ("&#39;", '\''),
    ];

    ENTITIES
        .iter()
        .find(|(entity, _)| s.starts_with(entity))
        .map(|(entity, c)| (*c, entity.len()))
}
