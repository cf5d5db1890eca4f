/// Break a display name into label lines.
///
/// A new line starts before every ASCII capital that is followed by a
/// character other than an ASCII capital, so runs of capitals stay with
/// the word they prefix ("USARocket" -> "USA", "Rocket"). Pieces are never
/// empty and concatenate back to the input.
pub fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut chars = name.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let Some(&(_, next)) = chars.peek() else {
            break;
        };
        if i > start && c.is_ascii_uppercase() && !next.is_ascii_uppercase() {
            words.push(&name[start..i]);
            start = i;
        }
    }

    if start < name.len() {
        words.push(&name[start..]);
    }
    words
}

/// Integer with thousands separators, e.g. `20338986` -> `"20,338,986"`.
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Plain value as written in data attributes and the tooltip.
pub fn format_value(value: f64) -> String {
    format!("{value}")
}
