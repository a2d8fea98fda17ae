//! Paragraph markup
//!
//! Paragraph text may carry `<br/>` tags plus the usual character entities.
//! Anything else that looks like a tag is an error, so user content must be
//! escaped before it gets here.

/// Stands in for `<br/>` in decoded text, distinct from a literal newline
pub const LINE_BREAK: char = '\u{2028}';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("unterminated tag at byte {0}")]
    UnterminatedTag(usize),
    #[error("unsupported tag <{0}>")]
    UnknownTag(String),
}

/// Decode paragraph markup into plain text. `<br/>` becomes [`LINE_BREAK`].
pub fn parse(markup: &str) -> Result<String, MarkupError> {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;
    let mut offset = 0;

    while let Some(pos) = rest.find(['<', '&']) {
        text.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let consumed = if tail.starts_with('<') {
            let end = tail.find('>').ok_or(MarkupError::UnterminatedTag(offset + pos))?;
            let tag = tail[1..end].trim();
            match tag.to_ascii_lowercase().as_str() {
                "br/" | "br /" | "br" => text.push(LINE_BREAK),
                _ => return Err(MarkupError::UnknownTag(tag.to_string())),
            }
            end + 1
        } else {
            let (decoded, len) = decode_entity(tail);
            text.push(decoded);
            len
        };

        offset += pos + consumed;
        rest = &tail[consumed..];
    }

    text.push_str(rest);
    Ok(text)
}

/// Decode the entity at the start of `s` (which begins with `&`).
///
/// Returns the character and the number of bytes consumed. A lone `&` is
/// taken literally.
fn decode_entity(s: &str) -> (char, usize) {
    let Some((end, _)) = s.char_indices().take(12).find(|&(_, c)| c == ';') else {
        return ('&', 1);
    };
    let name = &s[1..end];
    let decoded = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => numeric_entity(name),
    };
    match decoded {
        Some(c) => (c, end + 1),
        None => ('&', 1),
    }
}

fn numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}
