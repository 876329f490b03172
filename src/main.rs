//! `trustrank` command-line ranking tool.
//!
//! Reads a ranking request from a JSON file (or `-` for stdin), ranks the
//! candidates and prints the ranked rows as JSON on stdout.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use trustrank::config::EngineConfig;
use trustrank::profile::Profile;
use trustrank::ranking::RawCandidate;

const LOG_ENV: &str = "TRUSTRANK_LOG";

#[derive(Debug, Deserialize)]
struct RankRequest {
    requester: Profile,
    #[serde(default)]
    candidates: Vec<RequestCandidate>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RequestCandidate {
    profile: Profile,
    /// Persisted credibility record, validated by the store codec.
    #[serde(default)]
    credibility: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(input) = std::env::args().nth(1) else {
        anyhow::bail!("usage: trustrank <request.json | ->");
    };

    let raw = read_input(&input).await?;
    let request: RankRequest =
        serde_json::from_str(&raw).with_context(|| format!("malformed ranking request in {input}"))?;

    let mut config = EngineConfig::from_env()?;
    if let Some(limit) = request.limit {
        config = config.with_ranking_limit(limit);
        config.validate()?;
    }
    let orchestrator = config.orchestrator()?;

    let candidates = request
        .candidates
        .into_iter()
        .map(|c| {
            let record = c.credibility.map(|v| serde_json::to_vec(&v)).transpose()?;
            Ok(RawCandidate {
                profile: c.profile,
                record,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    tracing::info!(
        requester = %request.requester.id,
        candidates = candidates.len(),
        limit = config.ranking_limit,
        "Ranking request loaded"
    );

    let ranked = orchestrator.rank_records(
        &request.requester,
        candidates,
        request.query.as_deref(),
        Utc::now(),
    );

    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

async fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read request from stdin")?;
        return Ok(buf);
    }

    let path = PathBuf::from(input);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}
