//! Cleanup of generated text before it is parsed.

const FENCE: &str = "```";

/// Strips fenced-code markers from both ends of `text` and trims the
/// surrounding whitespace.
///
/// The rest of the opening fence line goes along with the fence when it
/// holds nothing but a language tag. Fences are stripped until neither end
/// carries one, so stacked fences are all removed and applying this twice
/// is the same as applying it once. Text without fences is only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    loop {
        let before = text.len();
        if let Some(rest) = text.strip_prefix(FENCE) {
            text = skip_tag_line(rest).trim();
        }
        if let Some(rest) = text.strip_suffix(FENCE) {
            text = rest.trim();
        }
        if text.len() == before {
            return text;
        }
    }
}

fn skip_tag_line(text: &str) -> &str {
    match text.split_once('\n') {
        Some((line, rest)) if is_tag(line.trim()) => rest,
        _ => text,
    }
}

fn is_tag(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}
