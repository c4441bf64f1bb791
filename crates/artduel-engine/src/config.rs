use clap::Args;

pub const DEFAULT_MODEL: &str = "nvidia/llama-3.3-nemotron-super-49b-v1.5";

/// Models and sampling parameters for the two competition phases.
#[derive(Debug, Clone, Args)]
pub struct EngineConfig {
    /// Model that draws the ASCII art
    #[arg(long, env = "ARTDUEL_GENERATOR_MODEL", default_value = DEFAULT_MODEL)]
    pub generator_model: String,

    /// Model that guesses the animal
    #[arg(long, env = "ARTDUEL_GUESSER_MODEL", default_value = DEFAULT_MODEL)]
    pub guesser_model: String,

    /// Sampling temperature for both calls
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f64,

    /// Completion token cap for both calls
    #[arg(long, default_value_t = 1024)]
    pub max_tokens: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generator_model: DEFAULT_MODEL.into(),
            guesser_model: DEFAULT_MODEL.into(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}
