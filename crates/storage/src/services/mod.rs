pub mod leaderboard;
pub mod promotion;
pub mod publication;
pub mod report;
pub mod submission;
