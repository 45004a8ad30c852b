use std::process::Command;

use anyhow::{Result, anyhow};

/// Target repository, `owner/name`.
#[derive(Debug, Clone)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn parse(s: &str) -> Result<Self> {
        let (owner, name) = s
            .split_once('/')
            .ok_or_else(|| anyhow!("repository must be owner/name, got {s:?}"))?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(anyhow!("repository must be owner/name, got {s:?}"));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Default to the repository the Actions runner exposes.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("GITHUB_REPOSITORY")
            .map_err(|_| anyhow!("pass --repo or set GITHUB_REPOSITORY"))?;
        Self::parse(raw.trim())
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Everything a run needs, resolved once at the entry point.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub repo: RepoId,
    /// Kept as the raw configured string; parsed right before filtering
    /// so a bad value degrades to a no-op instead of an error.
    pub hours_before_label: String,
    pub label: String,
    pub skip_approved: bool,
    pub page_size: i32,
}

/// Resolve a GitHub token: `GITHUB_TOKEN` first, then `gh auth token`.
pub fn github_token() -> Result<String> {
    if let Ok(raw) = std::env::var("GITHUB_TOKEN") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
    token_from_gh_cli()
}

fn token_from_gh_cli() -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .map_err(|e| anyhow!("failed to execute `gh auth token`: {e}"))?;
    if !output.status.success() {
        return Err(anyhow!(
            "GitHub token is required (set GITHUB_TOKEN or run `gh auth login`)"
        ));
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(anyhow!("`gh auth token` returned empty stdout"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let repo = RepoId::parse("kentaro-m/nudge").unwrap();
        assert_eq!(repo.owner, "kentaro-m");
        assert_eq!(repo.name, "nudge");
        assert_eq!(repo.full_name(), "kentaro-m/nudge");
    }

    #[test]
    fn rejects_malformed_repo() {
        assert!(RepoId::parse("no-slash").is_err());
        assert!(RepoId::parse("/name").is_err());
        assert!(RepoId::parse("owner/").is_err());
        assert!(RepoId::parse("a/b/c").is_err());
    }
}
