//! Sentence splitting ahead of synthesis.

const SENTENCE_MARKS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Splits text into sentences of at most `max_chars` characters.
///
/// A sentence ends at a terminal mark followed by whitespace (or at the end
/// of the text) and at every line break. Sentences longer than `max_chars`
/// are cut at whitespace, or hard-cut when a run has none. Fragments with
/// nothing alphanumeric in them are dropped.
pub fn split_sentences(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut sentences = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            current.push(c);
            if SENTENCE_MARKS.contains(&c) && chars.peek().is_none_or(|n| n.is_whitespace()) {
                push_bounded(&mut sentences, &current, max_chars);
                current.clear();
            }
        }
        push_bounded(&mut sentences, &current, max_chars);
    }

    sentences.retain(|s| s.chars().any(char::is_alphanumeric));
    sentences
}

fn push_bounded(out: &mut Vec<String>, sentence: &str, max_chars: usize) {
    let collapsed = collapse_whitespace(sentence);
    let mut rest = collapsed.as_str();

    while rest.chars().count() > max_chars {
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(i, _)| i);
        let cut = match rest[..limit].rfind(' ') {
            Some(i) if i > 0 => i,
            _ => limit,
        };
        out.push(rest[..cut].trim_end().to_string());
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        out.push(rest.to_string());
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
