pub mod aggregation_service;
pub mod badge_service;
pub mod mission_service;
pub mod score_service;
pub mod settings_service;
pub mod streak_service;
