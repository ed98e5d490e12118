pub mod contact;
pub mod controls;
pub mod entity_location;
pub mod input;
pub mod math;
mod settings;

pub use config::ConfigError;
pub use settings::Settings;

pub type PlayerID = usize;
