use std::collections::HashSet;

use sqlx::SqlitePool;
use storage::repository::consent::ConsentRepository;

use crate::error::{WebError, WebResult};

pub const CONSENT_REQUIRED: &str =
    "Please grant data-processing consent before submitting or viewing results.";

const NOT_A_MEMBER: &str =
    "You are not a member of the community group. Please join the group to use the scoreboard.";

/// Group membership, built once from configuration at startup.
#[derive(Debug, Clone)]
pub struct MembershipRoster {
    members: HashSet<i64>,
}

impl MembershipRoster {
    pub fn from_comma_separated(ids: &str) -> Self {
        let members = ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();

        Self { members }
    }

    /// An empty roster means membership is not enforced.
    pub fn is_member(&self, participant_id: i64) -> (bool, &'static str) {
        if self.members.is_empty() || self.members.contains(&participant_id) {
            (true, "")
        } else {
            (false, NOT_A_MEMBER)
        }
    }

    pub fn check(&self, participant_id: i64) -> WebResult<()> {
        match self.is_member(participant_id) {
            (true, _) => Ok(()),
            (false, reason) => {
                tracing::info!(participant_id, "submission blocked: not a member");
                Err(WebError::Forbidden(reason.to_string()))
            }
        }
    }
}

/// Block participants without a positive consent record.
pub async fn ensure_consent(pool: &SqlitePool, participant_id: i64) -> WebResult<()> {
    let consented = ConsentRepository::new(pool)
        .has_consent(participant_id)
        .await?;

    if consented {
        Ok(())
    } else {
        tracing::info!(participant_id, "request blocked: no consent on record");
        Err(WebError::Forbidden(CONSENT_REQUIRED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_parses_comma_separated_ids() {
        let roster = MembershipRoster::from_comma_separated("1, 2,3,,junk");
        assert!(roster.is_member(1).0);
        assert!(roster.is_member(3).0);

        let (ok, reason) = roster.is_member(99);
        assert!(!ok);
        assert!(!reason.is_empty());
    }

    #[test]
    fn empty_roster_admits_everyone() {
        let roster = MembershipRoster::from_comma_separated("");
        assert!(roster.is_member(42).0);
    }
}
