mod fish;
mod health;
mod pollution;
mod sources;

pub use fish::FishSystem;
pub use health::HealthSystem;
pub use pollution::PollutionSystem;
pub use sources::SourceSystem;
