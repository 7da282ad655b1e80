pub mod badge;
pub mod mission;
pub mod record;
pub mod score;
pub mod settings;
