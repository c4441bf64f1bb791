use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The fixed contest set. One animal is drawn per run and the guesser
/// never learns which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Cat,
    Owl,
    Rabbit,
}

impl Animal {
    pub const ALL: &[Animal] = &[Animal::Cat, Animal::Owl, Animal::Rabbit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Animal::Cat => "cat",
            Animal::Owl => "owl",
            Animal::Rabbit => "rabbit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Animal::Cat => "Cat",
            Animal::Owl => "Owl",
            Animal::Rabbit => "Rabbit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cat" => Some(Animal::Cat),
            "owl" => Some(Animal::Owl),
            "rabbit" => Some(Animal::Rabbit),
            _ => None,
        }
    }

    /// Draw one animal uniformly at random from the contest set.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Animal {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for animal in Animal::ALL {
            assert_eq!(Animal::from_str(animal.as_str()), Some(*animal));
        }
        assert_eq!(Animal::from_str("dog"), None);
    }

    #[test]
    fn pick_is_roughly_uniform() {
        let mut rng = rand::thread_rng();
        let mut counts = [0usize; 3];
        let draws = 30_000;
        for _ in 0..draws {
            match Animal::pick(&mut rng) {
                Animal::Cat => counts[0] += 1,
                Animal::Owl => counts[1] += 1,
                Animal::Rabbit => counts[2] += 1,
            }
        }
        // Each animal should land well within sampling noise of draws/3.
        for count in counts {
            assert!(count > draws / 4, "count {count} too far below uniform");
            assert!(count < draws / 2, "count {count} too far above uniform");
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Animal::Rabbit).unwrap();
        assert_eq!(json, "\"rabbit\"");
    }
}
