mod config;
mod domain;
mod repo;
mod run;
mod usecase;

use anyhow::{Result, anyhow};
use clap::Parser;

use config::{Config, RepoId};

#[derive(Parser, Debug)]
#[command(author, version, about = "nudge — labels pull requests waiting too long for review", long_about = None)]
struct Args {
    /// Hours a pull request may wait for review before it is labeled
    #[arg(long)]
    hours_before_label: String,

    /// Label applied to overdue pull requests
    #[arg(long, default_value = "waiting for review")]
    label: String,

    /// Leave approved pull requests alone ("true" to enable)
    #[arg(long, default_value = "")]
    skip_approved: String,

    /// Repository as owner/name (default: env GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// Maximum pull requests fetched in one run
    #[arg(long, default_value_t = 20)]
    limit: i32,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = try_main(args) {
        // One failure line in workflow-command form, then a non-zero
        // exit without a panic backtrace.
        println!("::error::{err:#}");
        std::process::exit(1);
    }
}

fn try_main(args: Args) -> Result<()> {
    let cfg = build_config(&args)?;
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to build tokio runtime: {e}"))?;
    rt.block_on(run::run(&cfg))
}

fn build_config(args: &Args) -> Result<Config> {
    let repo = match args.repo.as_deref() {
        Some(raw) => RepoId::parse(raw)?,
        None => RepoId::from_env()?,
    };
    Ok(Config {
        token: config::github_token()?,
        repo,
        hours_before_label: args.hours_before_label.clone(),
        label: args.label.clone(),
        skip_approved: args.skip_approved == "true",
        page_size: args.limit,
    })
}
