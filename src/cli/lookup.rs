// src/cli/lookup.rs — One-shot lookup and offline classification

use crate::core::classifier;
use crate::infra::config::Config;

use super::serve::build_service;

pub async fn run_lookup(country: &str, config: &Config) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let answer = service.lookup(country).await?;
    println!("{}: {}", answer.country.trim(), answer.capital);
    Ok(())
}

pub fn run_classify(text: &str) {
    let verdict = classifier::classify(text);
    println!("{text:?}: {verdict}");
}
