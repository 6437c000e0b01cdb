use storage::Database;
use storage::services::leaderboard::{LeaderboardConfig, MinorPolicy};
use storage::services::promotion::PromotionPolicy;

use crate::config::Config;
use crate::gates::MembershipRoster;
use crate::middleware::auth::ApiKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub roster: MembershipRoster,
    pub api_keys: ApiKeys,
    pub promotion: PromotionPolicy,
    pub leaderboard: LeaderboardConfig,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            roster: MembershipRoster::from_comma_separated(&config.member_ids),
            api_keys: ApiKeys::from_comma_separated(&config.api_keys),
            promotion: PromotionPolicy {
                promote_on_first: config.promote_on_first,
            },
            leaderboard: LeaderboardConfig {
                top_n: config.leaderboard_top_n,
                minor_policy: if config.minor_bucket {
                    MinorPolicy::OwnBucket
                } else {
                    MinorPolicy::Exclude
                },
            },
        }
    }
}
