use time::{OffsetDateTime, Weekday};

use crate::domain::pr::{PullRequest, ReviewDecision};

/// Extra hour granted to pull requests that become reviewable on a
/// Thursday or Friday, so the weekend lull does not flag them early.
const WEEKEND_MARGIN_HOURS: i64 = 1;

/// Keep the pull requests that have been waiting for review at least
/// `hours_before_label` whole hours as of `now`. The margin above is
/// added to the threshold per pull request, never to the shared
/// configured value. Input order is preserved.
pub fn target_pull_requests(
    pull_requests: Vec<PullRequest>,
    hours_before_label: i64,
    skip_approved: bool,
    now: OffsetDateTime,
) -> Vec<PullRequest> {
    pull_requests
        .into_iter()
        .filter(|pr| {
            let started = pr.review_started_at();
            let waiting_hours = (now - started).whole_hours();

            let mut threshold = hours_before_label;
            if matches!(started.weekday(), Weekday::Thursday | Weekday::Friday) {
                threshold += WEEKEND_MARGIN_HOURS;
            }

            if waiting_hours < threshold {
                return false;
            }
            !(skip_approved && pr.review_decision == Some(ReviewDecision::Approved))
        })
        .collect()
}
