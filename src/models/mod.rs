pub mod activity;
pub mod favorite;
pub mod history;
pub mod mood_stat;
pub mod user;
