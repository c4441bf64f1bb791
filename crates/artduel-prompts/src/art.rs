use artduel_core::Animal;

/// Reference art shown to the generator for each contest animal.
pub fn reference_art(animal: Animal) -> &'static str {
    match animal {
        Animal::Cat => "  /\\_/\\\n ( o.o )\n > ^ <",
        Animal::Owl => " ( o.o )\n ( / \\ )",
        Animal::Rabbit => " (\\__/)\n ( . .)\n (> <)",
    }
}

/// Build the phase-1 prompt asking the generator to draw the animal.
pub fn prompt(animal: Animal) -> String {
    let mut out = String::new();
    out.push_str("You are an expert ASCII artist.\n");
    out.push_str(&format!(
        "Generate a simple, minimal ASCII art of a {animal}.\n"
    ));
    out.push_str("Output ONLY ASCII art, nothing else.\n");
    out.push_str(
        "Do NOT include explanations, reasoning, <think> tags, markdown, or extra text.\n",
    );
    out.push_str("If the animal is one of these, use exactly this ASCII:\n\n");

    for candidate in Animal::ALL {
        out.push_str(&format!("{candidate}:\n"));
        out.push_str(reference_art(*candidate));
        out.push_str("\n\n");
    }

    out.push_str("Keep the art clear and recognizable.\n");
    out.push_str("Output ONLY the ASCII art.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_requested_animal() {
        let out = prompt(Animal::Rabbit);
        assert!(out.contains("ASCII art of a rabbit"));
    }

    #[test]
    fn bans_reasoning_and_markdown() {
        let out = prompt(Animal::Cat);
        assert!(out.contains("<think>"));
        assert!(out.contains("Output ONLY"));
    }

    #[test]
    fn embeds_reference_art_for_every_animal() {
        let out = prompt(Animal::Owl);
        for candidate in Animal::ALL {
            assert!(out.contains(reference_art(*candidate)));
        }
    }
}
