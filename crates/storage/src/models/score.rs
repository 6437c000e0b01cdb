use thiserror::Error;

use crate::models::tier::PROFESSIONAL_MIN;

/// Why a submitted score was refused. These are user-correctable
/// outcomes of the submission flow, never system faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("best series must be between 0 and 100, got {0}")]
    SeriesOutOfRange(i64),

    #[error("ten count must be between 0 and 10, got {0}")]
    TensOutOfRange(i64),

    #[error("a series of {series} cannot contain {tens} tens")]
    TooManyTens { series: i64, tens: i64 },

    #[error("a series of {series} is not reachable with {tens} tens when the remaining shots score at most 9")]
    SeriesExceedsCap { series: i64, tens: i64 },
}

/// Validate a raw `(best_series, accessory_tens)` pair.
///
/// Rules are checked in order and the first failure wins. The internal
/// consistency pair only applies below the central-ten threshold: from
/// 93 up every shot is assumed to be a ten and `accessory_tens` counts
/// central tens instead, which the series value does not constrain.
pub fn validate_score(best_series: i64, accessory_tens: i64) -> Result<(), ScoreError> {
    if !(0..=100).contains(&best_series) {
        return Err(ScoreError::SeriesOutOfRange(best_series));
    }

    if !(0..=10).contains(&accessory_tens) {
        return Err(ScoreError::TensOutOfRange(accessory_tens));
    }

    if best_series < PROFESSIONAL_MIN {
        if best_series < accessory_tens * 10 {
            return Err(ScoreError::TooManyTens {
                series: best_series,
                tens: accessory_tens,
            });
        }

        if best_series > accessory_tens * 10 + (10 - accessory_tens) * 9 {
            return Err(ScoreError::SeriesExceedsCap {
                series: best_series,
                tens: accessory_tens,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_scores() {
        assert_eq!(validate_score(92, 3), Ok(()));
        assert_eq!(validate_score(0, 0), Ok(()));
        assert_eq!(validate_score(90, 0), Ok(()));
    }

    #[test]
    fn rejects_series_out_of_range() {
        assert_eq!(validate_score(101, 0), Err(ScoreError::SeriesOutOfRange(101)));
        assert_eq!(validate_score(-1, 0), Err(ScoreError::SeriesOutOfRange(-1)));
    }

    #[test]
    fn rejects_tens_out_of_range() {
        assert_eq!(validate_score(50, 11), Err(ScoreError::TensOutOfRange(11)));
        assert_eq!(validate_score(50, -1), Err(ScoreError::TensOutOfRange(-1)));
    }

    #[test]
    fn series_must_support_ten_count() {
        assert_eq!(
            validate_score(29, 3),
            Err(ScoreError::TooManyTens { series: 29, tens: 3 })
        );
        // 30 is exactly 3 tens and 7 zeroes
        assert_eq!(validate_score(30, 3), Ok(()));
    }

    #[test]
    fn non_ten_shots_cap_at_nine() {
        // 2 tens + 8 nines = 92 is the maximum for two tens
        assert_eq!(validate_score(92, 2), Ok(()));
        // 0 tens caps the series at 90
        assert_eq!(
            validate_score(91, 0),
            Err(ScoreError::SeriesExceedsCap { series: 91, tens: 0 })
        );
    }

    #[test]
    fn consistency_check_skipped_at_central_ten_level() {
        // 93+ counts central tens, which the series does not bound
        assert_eq!(validate_score(93, 0), Ok(()));
        assert_eq!(validate_score(100, 3), Ok(()));
        assert_eq!(validate_score(95, 10), Ok(()));
    }

    #[test]
    fn range_checks_take_precedence() {
        // out-of-range tens reported before the consistency pair
        assert_eq!(validate_score(20, 11), Err(ScoreError::TensOutOfRange(11)));
    }

    #[test]
    fn matches_closed_form_predicate() {
        for s in -2..=102 {
            for t in -2..=12 {
                let expected = (0..=100).contains(&s)
                    && (0..=10).contains(&t)
                    && (s >= PROFESSIONAL_MIN || (s >= 10 * t && s <= 10 * t + (10 - t) * 9));
                assert_eq!(validate_score(s, t).is_ok(), expected, "s={s} t={t}");
            }
        }
    }
}
