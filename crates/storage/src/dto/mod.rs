pub mod admin;
pub mod consent;
pub mod leaderboard;
pub mod result;
pub mod submission;
