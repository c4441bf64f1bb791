//! Cleanup for raw model output.
//!
//! Generator models sometimes wrap their answer in `<think>` reasoning
//! blocks or markdown code fences; guessers add punctuation and filler.
//! These helpers strip all of that down to the text the UI actually
//! shows and compares.

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";
const FENCE: &str = "```";

/// Remove every `<think>...</think>` block. An unterminated block is
/// dropped through to the end of the input.
pub fn strip_reasoning(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(THINK_OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + THINK_OPEN.len()..];
        match after_open.find(THINK_CLOSE) {
            Some(end) => rest = &after_open[end + THINK_CLOSE.len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// If the text contains a fenced code block, return the inner content of
/// the first one (skipping the fence header line, e.g. "```text").
/// Otherwise the input is returned unchanged.
pub fn unwrap_code_fence(input: &str) -> String {
    let Some(open) = input.find(FENCE) else {
        return input.to_string();
    };
    let after_open = &input[open + FENCE.len()..];
    // The fence header runs to the end of the opening line.
    let body_start = match after_open.find('\n') {
        Some(nl) => nl + 1,
        None => return input.to_string(),
    };
    let body = &after_open[body_start..];
    match body.find(FENCE) {
        Some(close) => body[..close].trim().to_string(),
        None => input.to_string(),
    }
}

/// Full cleanup for the generator's art: strip reasoning, unwrap a code
/// fence, trim.
pub fn clean_art(input: &str) -> String {
    let stripped = strip_reasoning(input);
    let trimmed = stripped.trim();
    unwrap_code_fence(trimmed).trim().to_string()
}

/// Normalize the guesser's reply to a single comparable token: strip
/// reasoning, then keep only ASCII letters, lowercased. Words are NOT
/// split out; "It's a RABBIT." becomes "itsarabbit".
pub fn normalize_guess(input: &str) -> String {
    strip_reasoning(input)
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Loose match: the cleaned guess contains the animal name or the animal
/// name contains the guess. Handles pluralization ("rabbit"/"rabbits")
/// and filler words without demanding exact equality.
pub fn guess_matches(animal: &str, guess: &str) -> bool {
    if animal.is_empty() || guess.is_empty() {
        return false;
    }
    guess.contains(animal) || animal.contains(guess)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_reasoning_block() {
        let out = strip_reasoning("before<think>hidden</think>after");
        assert_eq!(out.trim(), "beforeafter");
    }

    #[test]
    fn strips_multiple_reasoning_blocks() {
        let out = strip_reasoning("a<think>x</think>b<think>y</think>c");
        assert_eq!(out, "abc");
    }

    #[test]
    fn strips_unterminated_reasoning_block() {
        let out = strip_reasoning("art<think>never closed");
        assert_eq!(out, "art");
    }

    #[test]
    fn passes_through_plain_text() {
        assert_eq!(strip_reasoning("( o.o )"), "( o.o )");
    }

    #[test]
    fn unwraps_fenced_block() {
        let input = "```\n  /\\_/\\\n( o.o )\n> ^ <\n```";
        assert_eq!(unwrap_code_fence(input), "/\\_/\\\n( o.o )\n> ^ <");
    }

    #[test]
    fn unwraps_fence_with_language_tag() {
        let input = "```text\n(\\__/)\n( . .)\n```";
        assert_eq!(unwrap_code_fence(input), "(\\__/)\n( . .)");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(unwrap_code_fence("> ^ <"), "> ^ <");
    }

    #[test]
    fn leaves_unclosed_fence_alone() {
        let input = "```\nno closing fence";
        assert_eq!(unwrap_code_fence(input), input);
    }

    #[test]
    fn clean_art_combines_both_passes() {
        let input = "<think>planning the cat</think>\n```\n  /\\_/\\\n( o.o )\n> ^ <\n```\n";
        assert_eq!(clean_art(input), "/\\_/\\\n( o.o )\n> ^ <");
    }

    #[test]
    fn normalizes_simple_guess() {
        assert_eq!(normalize_guess("Cat!"), "cat");
    }

    #[test]
    fn normalizes_keeps_all_letters() {
        assert_eq!(normalize_guess("It's a RABBIT."), "itsarabbit");
    }

    #[test]
    fn normalizes_through_reasoning() {
        assert_eq!(normalize_guess("<think>ears, whiskers</think>rabbit"), "rabbit");
    }

    #[test]
    fn matches_plural_guess() {
        assert!(guess_matches("rabbit", "rabbits"));
    }

    #[test]
    fn matches_guess_embedded_in_filler() {
        assert!(guess_matches("rabbit", "itsarabbit"));
    }

    #[test]
    fn matches_exact() {
        assert!(guess_matches("owl", "owl"));
    }

    #[test]
    fn rejects_wrong_animal() {
        assert!(!guess_matches("owl", "cat"));
    }

    #[test]
    fn rejects_empty_guess() {
        assert!(!guess_matches("owl", ""));
    }
}
