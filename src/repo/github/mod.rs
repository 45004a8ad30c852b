use anyhow::{Result, anyhow};
use octocrab::Octocrab;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::RepoId;
use crate::domain::pr::{PullRequest, ReviewDecision};

#[derive(Debug, serde::Serialize)]
struct SearchVars {
    q: String,
    limit: i32,
}

#[derive(Debug, serde::Serialize)]
struct GraphQlPayload<V> {
    query: &'static str,
    variables: V,
}

#[derive(Debug, serde::Deserialize)]
struct GraphQlResponse<T> {
    data: T,
}

#[derive(Debug, serde::Deserialize)]
struct SearchData {
    search: SearchResult,
}

#[derive(Debug, serde::Deserialize)]
struct SearchResult {
    nodes: Option<Vec<SearchNode>>,
}

// Search nodes are issues or pull requests; all fields stay optional and
// anything that does not map to a full pull request is dropped.
#[derive(Debug, serde::Deserialize)]
struct SearchNode {
    number: Option<i64>,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
    #[serde(rename = "reviewDecision")]
    review_decision: Option<String>,
    #[serde(rename = "timelineItems")]
    timeline_items: Option<TimelineItems>,
}

#[derive(Debug, serde::Deserialize)]
struct TimelineItems {
    nodes: Option<Vec<TimelineNode>>,
}

#[derive(Debug, serde::Deserialize)]
struct TimelineNode {
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
}

const SEARCH_QUERY: &str = r#"
query ($q: String!, $limit: Int = 20) {
  search(first: $limit, type: ISSUE, query: $q) {
    nodes {
      ... on PullRequest {
        number
        createdAt
        reviewDecision
        timelineItems(itemTypes: READY_FOR_REVIEW_EVENT, first: 1) {
          nodes {
            ... on ReadyForReviewEvent {
              createdAt
            }
          }
        }
      }
    }
  }
}
"#;

impl SearchNode {
    fn into_pull_request(self) -> Option<PullRequest> {
        let created_at = parse_datetime(&self.created_at?)?;
        let ready_for_review_at = self
            .timeline_items
            .and_then(|t| t.nodes)
            .and_then(|nodes| nodes.into_iter().next())
            .and_then(|n| n.created_at)
            .and_then(|s| parse_datetime(&s));
        Some(PullRequest {
            number: self.number?,
            created_at,
            review_decision: self.review_decision.as_deref().and_then(review_decision),
            ready_for_review_at,
        })
    }
}

fn review_decision(s: &str) -> Option<ReviewDecision> {
    match s {
        "APPROVED" => Some(ReviewDecision::Approved),
        "CHANGES_REQUESTED" => Some(ReviewDecision::ChangesRequested),
        "REVIEW_REQUIRED" => Some(ReviewDecision::ReviewRequired),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339).ok()
}

fn search_string(repo: &RepoId) -> String {
    format!("is:pr is:open draft:false repo:{}", repo.full_name())
}

/// Fetch one page of open, non-draft pull requests for the repository.
pub async fn fetch_open_pull_requests(
    octo: &Octocrab,
    repo: &RepoId,
    limit: i32,
) -> Result<Vec<PullRequest>> {
    let payload = GraphQlPayload {
        query: SEARCH_QUERY,
        variables: SearchVars {
            q: search_string(repo),
            limit,
        },
    };
    let resp: GraphQlResponse<SearchData> = octo
        .graphql(&payload)
        .await
        .map_err(|e| anyhow!("GitHub GraphQL pull request search failed: {e:?}"))?;

    let nodes = resp.data.search.nodes.unwrap_or_default();
    Ok(nodes
        .into_iter()
        .filter_map(SearchNode::into_pull_request)
        .collect())
}

/// Attach one label to a pull request via the issues API.
pub async fn add_label(octo: &Octocrab, repo: &RepoId, number: i64, label: &str) -> Result<()> {
    octo.issues(repo.owner.clone(), repo.name.clone())
        .add_labels(number as u64, &[label.to_string()])
        .await
        .map_err(|e| anyhow!("failed to label pull request #{number}: {e:?}"))?;
    Ok(())
}
