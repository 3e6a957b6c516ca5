use once_cell::sync::Lazy;
use regex::Regex;

// Hangul syllables, ASCII alphanumerics, and whitespace survive; everything
// else (punctuation, emoji, jamo, other scripts) is dropped.
static NON_SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^가-힣a-zA-Z0-9\s]").expect("invalid script filter regex"));

/// Collapse runs of the same character down to at most `max_repeat`
/// occurrences ("미쳤다ㅏㅏㅏㅏ" style keyboard mashing, stretched laughter,
/// exclamation runs).
pub fn collapse_repeats(input: &str, max_repeat: usize) -> String {
    if max_repeat == 0 {
        return String::new();
    }

    let mut buf = String::with_capacity(input.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    for ch in input.chars() {
        if prev == Some(ch) {
            run += 1;
        } else {
            prev = Some(ch);
            run = 1;
        }
        if run <= max_repeat {
            buf.push(ch);
        }
    }

    buf
}

/// Canonical form of an incoming message, applied before classification and
/// before the message enters the tweet pool.
///
/// Stripping happens before repeat collapsing so the function is idempotent:
/// removing punctuation can join two character runs into one, and collapsing
/// afterwards settles that in a single pass.
pub fn normalize_message(input: &str) -> String {
    let stripped = NON_SCRIPT_RE.replace_all(input, "");
    collapse_repeats(&stripped, 2).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_limits_runs() {
        assert_eq!(collapse_repeats("heyyyy", 2), "heyy");
        assert_eq!(collapse_repeats("miss", 2), "miss");
        assert_eq!(collapse_repeats("", 2), "");
    }

    #[test]
    fn collapse_with_zero_limit_is_empty() {
        assert_eq!(collapse_repeats("abc", 0), "");
    }

    #[test]
    fn strips_punctuation_and_keeps_hangul() {
        assert_eq!(normalize_message("대박!!! 이건 진짜 최고"), "대박 이건 진짜 최고");
        assert_eq!(normalize_message("buy now!!! at http://spam.example"), "buy now at httpspamexample");
    }

    #[test]
    fn jamo_laughter_is_dropped() {
        // ㅋ/ㅎ are jamo, outside the 가-힣 syllable range
        assert_eq!(normalize_message("진짜 웃기다 ㅋㅋㅋㅋ"), "진짜 웃기다");
    }

    #[test]
    fn idempotent_even_when_stripping_joins_runs() {
        let samples = [
            "aa!aa",
            "  spaced   out  ",
            "커피!!!가 너무너무 맛있다ㅏㅏㅏ",
            "",
            "plain text",
        ];
        for sample in samples {
            let once = normalize_message(sample);
            assert_eq!(normalize_message(&once), once, "not idempotent for {sample:?}");
        }
    }
}
