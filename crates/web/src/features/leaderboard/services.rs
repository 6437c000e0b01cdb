use sqlx::SqlitePool;
use storage::dto::leaderboard::LeaderboardResponse;
use storage::error::Result;
use storage::services::leaderboard::{self, LeaderboardConfig};

/// Single-tier view for the bucket the viewer competes in.
pub async fn personal_view(
    pool: &SqlitePool,
    config: &LeaderboardConfig,
    participant_id: i64,
) -> Result<LeaderboardResponse> {
    let tier = leaderboard::viewer_tier(pool, participant_id).await?;
    let view = leaderboard::load_and_rank(pool, config, Some(tier)).await?;

    Ok(LeaderboardResponse::from(&view))
}

/// All tier buckets.
pub async fn full_view(
    pool: &SqlitePool,
    config: &LeaderboardConfig,
) -> Result<LeaderboardResponse> {
    let view = leaderboard::load_and_rank(pool, config, None).await?;

    Ok(LeaderboardResponse::from(&view))
}
