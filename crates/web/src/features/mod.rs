pub mod admin;
pub mod consent;
pub mod leaderboard;
pub mod results;
pub mod submissions;
