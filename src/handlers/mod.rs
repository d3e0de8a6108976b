pub mod activities;
pub mod auth;
pub mod favorites;
pub mod health;
pub mod history;
pub mod mood_stats;
