use artduel_core::Animal;

/// Build the phase-2 prompt asking the guesser to identify the art.
/// The candidate list names the contest set but not which was drawn.
pub fn prompt(art: &str) -> String {
    let candidates: Vec<&str> = Animal::ALL.iter().map(|a| a.as_str()).collect();
    let mut out = String::new();
    out.push_str("Look at this ASCII art and identify what animal it is.\n");
    out.push_str(
        "Reply with ONLY the animal name (one word, no punctuation) that you think it is.\n",
    );
    out.push_str(&format!("It could be a {}.\n\n", candidates.join(", a ")));
    out.push_str(art);
    out.push('\n');
    out
}
