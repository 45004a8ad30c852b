use time::OffsetDateTime;

/// GitHub's aggregate review decision for a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approved,
    ChangesRequested,
    ReviewRequired,
}

#[derive(Debug, Clone)]
pub struct PullRequest {
    pub number: i64,
    pub created_at: OffsetDateTime,
    pub review_decision: Option<ReviewDecision>,
    /// Earliest draft-to-ready transition, present only if the pull
    /// request ever was a draft.
    pub ready_for_review_at: Option<OffsetDateTime>,
}

impl PullRequest {
    /// Timestamp the review wait is measured from: the first
    /// ready-for-review event when there is one, otherwise creation.
    pub fn review_started_at(&self) -> OffsetDateTime {
        self.ready_for_review_at.unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn review_starts_at_creation_without_ready_event() {
        let pr = PullRequest {
            number: 1,
            created_at: datetime!(2022-01-08 00:00 UTC),
            review_decision: None,
            ready_for_review_at: None,
        };
        assert_eq!(pr.review_started_at(), datetime!(2022-01-08 00:00 UTC));
    }

    #[test]
    fn ready_event_overrides_creation_time() {
        let pr = PullRequest {
            number: 1,
            created_at: datetime!(2022-01-08 00:00 UTC),
            review_decision: None,
            ready_for_review_at: Some(datetime!(2022-01-08 04:00 UTC)),
        };
        assert_eq!(pr.review_started_at(), datetime!(2022-01-08 04:00 UTC));
    }
}
