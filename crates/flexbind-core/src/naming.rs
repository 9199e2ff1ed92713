//! Native-to-host identifier conversion

/// Upper-case the first character and lower-case the rest
///
/// `"align_items"` becomes `"Align_items"`, `"ALIGN"` becomes `"Align"`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Convert a native snake-case identifier to a host PascalCase name
///
/// Each `_` followed by another character is dropped and that character
/// upper-cased; a trailing `_` is kept.
pub fn host_name(name: &str) -> String {
    let capitalized = capitalize(name);
    let mut out = String::with_capacity(capitalized.len());
    let mut chars = capitalized.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('_', Some(&next)) if next != '\n' => {
                out.extend(next.to_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}
