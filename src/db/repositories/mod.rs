pub mod badge_repository;
pub mod record_repository;
pub mod settings_repository;
