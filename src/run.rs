use anyhow::{Result, anyhow};
use octocrab::Octocrab;
use time::OffsetDateTime;

use crate::config::Config;
use crate::domain::pr::PullRequest;
use crate::repo::github;
use crate::usecase::overdue;

/// One labeling pass: fetch, select, label each target in order.
pub async fn run(cfg: &Config) -> Result<()> {
    let octo = Octocrab::builder()
        .personal_token(cfg.token.clone())
        .build()
        .map_err(|e| anyhow!("failed to init GitHub client: {e}"))?;

    let pull_requests = github::fetch_open_pull_requests(&octo, &cfg.repo, cfg.page_size).await?;
    debug(&format!(
        "fetched {} open pull requests from {}",
        pull_requests.len(),
        cfg.repo.full_name()
    ));

    let targets = label_targets(cfg, pull_requests, OffsetDateTime::now_utc());
    if targets.is_empty() {
        debug("no pull requests past the review threshold");
        return Ok(());
    }

    // Strictly sequential; the first failure aborts the loop and labels
    // already applied stay applied.
    for pr in &targets {
        debug(&format!("adding label {:?} to #{}", cfg.label, pr.number));
        github::add_label(&octo, &cfg.repo, pr.number, &cfg.label).await?;
    }
    Ok(())
}

/// Pure half of the run: which pull requests get the label. A threshold
/// that does not parse as an integer selects nothing at all.
fn label_targets(
    cfg: &Config,
    pull_requests: Vec<PullRequest>,
    now: OffsetDateTime,
) -> Vec<PullRequest> {
    if pull_requests.is_empty() {
        return Vec::new();
    }
    let Ok(hours) = cfg.hours_before_label.trim().parse::<i64>() else {
        return Vec::new();
    };
    overdue::target_pull_requests(pull_requests, hours, cfg.skip_approved, now)
}

// Workflow-command debug line; the Actions runner shows these only when
// step debugging is on, plain terminals just print them.
fn debug(msg: &str) {
    println!("::debug::{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoId;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2022-01-08 06:00 UTC);

    fn config(hours: &str, skip_approved: bool) -> Config {
        Config {
            token: "token".to_string(),
            repo: RepoId::parse("kentaro-m/nudge").unwrap(),
            hours_before_label: hours.to_string(),
            label: "waiting for review".to_string(),
            skip_approved,
            page_size: 20,
        }
    }

    fn pr(number: i64, created_at: OffsetDateTime) -> PullRequest {
        PullRequest {
            number,
            created_at,
            review_decision: None,
            ready_for_review_at: None,
        }
    }

    #[test]
    fn selects_pull_requests_past_threshold() {
        let targets = label_targets(
            &config("3", false),
            vec![
                pr(1, datetime!(2022-01-08 00:00 UTC)),
                pr(2, datetime!(2022-01-08 05:00 UTC)),
            ],
            NOW,
        );
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].number, 1);
    }

    #[test]
    fn non_numeric_threshold_selects_nothing() {
        let targets = label_targets(
            &config("foo", false),
            vec![pr(1, datetime!(2022-01-08 00:00 UTC))],
            NOW,
        );
        assert!(targets.is_empty());
    }

    #[test]
    fn empty_fetch_selects_nothing() {
        assert!(label_targets(&config("3", false), Vec::new(), NOW).is_empty());
    }

    #[test]
    fn threshold_string_is_trimmed() {
        let targets = label_targets(
            &config(" 3 ", false),
            vec![pr(1, datetime!(2022-01-08 00:00 UTC))],
            NOW,
        );
        assert_eq!(targets.len(), 1);
    }
}
