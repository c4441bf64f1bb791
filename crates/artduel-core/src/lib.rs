pub mod animal;
pub mod run;
pub mod sanitize;
pub mod stage;

pub use animal::Animal;
pub use run::RunState;
pub use stage::Stage;
