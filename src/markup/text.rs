//! Text cleaning: tag stripping, entity decoding, whitespace collapsing.

use std::borrow::Cow;

/// Clean a markup slice into plain text.
///
/// Strips tag-like substrings, decodes entities, collapses whitespace runs
/// to single spaces and trims both ends.
pub fn clean_text(markup: &str) -> String {
    let stripped = strip_tags(markup);
    let decoded = decode_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Remove every `<...>` that looks like a tag, comment or declaration.
///
/// A `<` that cannot start a tag (`a < b`) or that is never closed is kept
/// as literal text.
pub fn strip_tags(markup: &str) -> Cow<'_, str> {
    let bytes = markup.as_bytes();
    let Some(first) = memchr::memchr(b'<', bytes) else {
        return Cow::Borrowed(markup);
    };

    let mut out = String::with_capacity(markup.len());
    let mut copied = 0;
    let mut pos = first;
    while pos < bytes.len() {
        let Some(offset) = memchr::memchr(b'<', &bytes[pos..]) else {
            break;
        };
        let lt = pos + offset;
        let starts_tag = bytes
            .get(lt + 1)
            .is_some_and(|&b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'));
        if !starts_tag {
            pos = lt + 1;
            continue;
        }
        let end = if markup[lt..].starts_with("<!--") {
            // Comments may hold `>`; an unterminated one runs to the end
            markup[lt + 4..]
                .find("-->")
                .map_or(markup.len(), |i| lt + 4 + i + 3)
        } else {
            let Some(gt) = memchr::memchr(b'>', &bytes[lt..]) else {
                break;
            };
            lt + gt + 1
        };
        out.push_str(&markup[copied..lt]);
        copied = end;
        pos = copied;
    }
    out.push_str(&markup[copied..]);
    Cow::Owned(out)
}

/// Decode named, decimal and hexadecimal character references.
///
/// Unknown names and invalid code points are left as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 32)
            .and_then(|semi| decode_reference(&after[..semi]).map(|d| (d, semi)));
        match decoded {
            Some((replacement, semi)) => {
                out.push_str(replacement.as_ref());
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(reference: &str) -> Option<Cow<'static, str>> {
    if let Some(numeric) = reference.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }

    let named = match reference {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" | "ensp" | "emsp" | "thinsp" => " ",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "laquo" => "\u{00AB}",
        "raquo" => "\u{00BB}",
        "bull" => "\u{2022}",
        "middot" => "\u{00B7}",
        "copy" => "\u{00A9}",
        "reg" => "\u{00AE}",
        "trade" => "\u{2122}",
        "deg" => "\u{00B0}",
        "shy" | "zwnj" | "zwj" => "",
        _ => return None,
    };
    Some(Cow::Borrowed(named))
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
