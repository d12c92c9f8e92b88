//! Text splitting for the TTS endpoint.
//!
//! The endpoint refuses long inputs, so text is cut into parts of at most
//! [`MAX_CHARS`] characters. Cuts prefer sentence and clause punctuation,
//! then whitespace, and fall back to a hard cut for unbroken runs.

/// Maximum number of characters the endpoint accepts per request.
pub const MAX_CHARS: usize = 100;

/// Punctuation that always ends a clause.
const CLAUSE_MARKS: &[char] = &['。', '，', '、', '！', '？', '；', '：', '…', '‥', '—', '–'];

/// ASCII punctuation that ends a clause only when followed by whitespace,
/// so that `3.14` or `10:30` stay intact.
const SPACED_MARKS: &[char] = &['.', ',', ':', ';', '!', '?'];

/// Splits `text` into speakable parts of at most `max_chars` characters.
///
/// Parts without any alphanumeric character are dropped.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let cleaned = pre_clean(text);

    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();
    for clause in split_clauses(&cleaned) {
        for piece in minimize(&clause, max_chars) {
            if current.is_empty() {
                current = piece;
            } else if char_len(&current) + 1 + char_len(&piece) <= max_chars {
                current.push(' ');
                current.push_str(&piece);
            } else {
                parts.push(std::mem::replace(&mut current, piece));
            }
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts.retain(|p| p.chars().any(char::is_alphanumeric));
    parts
}

/// Rejoins words hyphenated across line breaks and collapses whitespace.
fn pre_clean(text: &str) -> String {
    let joined = text.replace("-\r\n", "").replace("-\n", "");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn split_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let ends_clause = CLAUSE_MARKS.contains(&c)
            || (SPACED_MARKS.contains(&c) && chars.peek().is_none_or(|n| n.is_whitespace()));
        if ends_clause {
            let clause = current.trim().to_string();
            if !clause.is_empty() {
                clauses.push(clause);
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        clauses.push(rest.to_string());
    }
    clauses
}

/// Cuts a clause at whitespace so that no piece exceeds `max_chars`.
fn minimize(clause: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = clause.trim_start();

    while char_len(rest) > max_chars {
        // Byte offset of the first character past the limit.
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(i, _)| i);
        let cut = match rest[..limit].rfind(char::is_whitespace) {
            Some(i) if i > 0 => i,
            _ => limit,
        };
        pieces.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_part() {
        assert_eq!(split_text("Hello, world!", MAX_CHARS), vec!["Hello, world!"]);
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(split_text("  Hello\n\n  there\t", MAX_CHARS), vec!["Hello there"]);
        assert_eq!(split_text("inter-\nnational", MAX_CHARS), vec!["international"]);
    }

    #[test]
    fn test_punctuation_only_dropped() {
        assert!(split_text("...!?", MAX_CHARS).is_empty());
        assert!(split_text("   ", MAX_CHARS).is_empty());
        assert_eq!(split_text("Hi. ... Bye.", MAX_CHARS), vec!["Hi. ... Bye."]);
    }

    #[test]
    fn test_parts_bounded() {
        let sentence = "The quick brown fox jumps over the lazy dog. ";
        let text = sentence.repeat(10);
        let parts = split_text(&text, MAX_CHARS);
        assert!(parts.len() > 1);
        for part in &parts {
            assert!(char_len(part) <= MAX_CHARS, "part too long: {part:?}");
            assert!(part.ends_with('.'), "cut inside sentence: {part:?}");
        }
        assert_eq!(parts.join(" "), text.trim());
    }

    #[test]
    fn test_long_word_hard_cut() {
        let text = "a".repeat(250);
        let parts = split_text(&text, MAX_CHARS);
        assert_eq!(parts.len(), 3);
        assert_eq!(char_len(&parts[0]), 100);
        assert_eq!(char_len(&parts[2]), 50);
    }

    #[test]
    fn test_decimal_not_split() {
        let clauses = split_clauses("Pi is 3.14 roughly. Next");
        assert_eq!(clauses, vec!["Pi is 3.14 roughly.", "Next"]);
    }

    #[test]
    fn test_multibyte_counts_chars() {
        let text = "안녕하세요 ".repeat(40);
        let parts = split_text(&text, MAX_CHARS);
        for part in &parts {
            assert!(char_len(part) <= MAX_CHARS);
        }
        assert_eq!(parts.join(" "), text.trim());
    }

    #[test]
    fn test_cjk_clause_marks() {
        let clauses = split_clauses("你好。世界！");
        assert_eq!(clauses, vec!["你好。", "世界！"]);
    }
}
