//! LLM-backed relevance filter for raw search hits.
//!
//! Search results for a product query are noisy: parts-only and broken
//! units, accessories, and neighbouring models all show up. The filter asks
//! an LLM which listings are the product itself and keeps only those.
//!
//! The filter fails open. Any LLM, transport, or parse failure is logged
//! and the listings are returned unchanged.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::Listing;
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

const RULES: &str = "\
1. Remove \"Parts Only\", \"Broken\", \"Box Only\", \"Replica\" listings.
2. Remove accessories (batteries, cables, skins) unless the query asks for them.
3. Remove distinct models (e.g. if the query is 'Xbox Controller', remove 'Elite Controller').";

/// Filters listings down to the ones relevant to a query.
#[derive(Clone)]
pub struct RelevanceFilter {
    llm: Arc<dyn Llm>,
    constraints: Option<String>,
}

impl RelevanceFilter {
    #[must_use]
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            constraints: None,
        }
    }

    /// Add user-supplied relevance rules to the prompt.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Option<String>) -> Self {
        self.constraints = constraints.filter(|c| !c.trim().is_empty());
        self
    }

    /// Keep only listings the LLM marks relevant to `query`.
    ///
    /// Never fails: on error the input comes back untouched.
    pub async fn apply(&self, listings: Vec<Listing>, query: &str) -> Vec<Listing> {
        if listings.is_empty() {
            return listings;
        }

        let total = listings.len();
        debug!(provider = self.llm.name(), total, "Filtering listings for relevance");

        let valid = match self.valid_ids(&listings, query).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!(
                    provider = self.llm.name(),
                    error = %e,
                    "Relevance filter failed, keeping all listings"
                );
                return listings;
            }
        };

        let kept: Vec<Listing> = listings
            .into_iter()
            .enumerate()
            .filter(|(index, listing)| valid.contains(&listing_key(listing, *index)))
            .map(|(_, listing)| listing)
            .collect();

        info!(kept = kept.len(), total, "Relevance filter applied");
        kept
    }

    async fn valid_ids(&self, listings: &[Listing], query: &str) -> Result<HashSet<String>> {
        let prompt = self.prompt(listings, query);
        let response = self.llm.complete(&prompt).await?;
        parse_valid_ids(&response)
    }

    fn prompt(&self, listings: &[Listing], query: &str) -> String {
        let compact: Vec<serde_json::Value> = listings
            .iter()
            .enumerate()
            .map(|(index, listing)| {
                json!({
                    "id": listing_key(listing, index),
                    "title": listing.title,
                    "price": listing.item_price().map(|p| p.to_string()),
                })
            })
            .collect();

        let mut rules = RULES.to_string();
        if let Some(constraints) = &self.constraints {
            rules.push_str(&format!("\n4. Also apply these seller constraints: {constraints}"));
        }

        format!(
            "I am a pricing algorithm. I have a list of marketplace search results for: \"{query}\".\n\
             \n\
             TASK: Return a JSON object containing the IDs of items that are strictly relevant.\n\
             RULES:\n\
             {rules}\n\
             \n\
             INPUT DATA:\n\
             {input}\n\
             \n\
             OUTPUT FORMAT (JSON ONLY):\n\
             {{ \"valid_ids\": [\"id1\", \"id2\"] }}",
            input = serde_json::Value::Array(compact),
        )
    }
}

/// Identifier used to match a listing against the LLM's answer.
fn listing_key(listing: &Listing, index: usize) -> String {
    listing.id.clone().unwrap_or_else(|| format!("#{index}"))
}

#[derive(Deserialize)]
struct ValidIds {
    valid_ids: Vec<serde_json::Value>,
}

fn parse_valid_ids(response: &str) -> Result<HashSet<String>> {
    let body = strip_code_fence(response);
    let parsed: ValidIds = serde_json::from_str(body).map_err(|e| {
        Error::Parse(format!("relevance filter response is not valid_ids JSON: {e}"))
    })?;

    Ok(parsed
        .valid_ids
        .into_iter()
        .map(|id| match id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

/// Models sometimes wrap JSON in a markdown fence despite JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::llm::{FailingLlm, MockLlm};
    use rust_decimal_macros::dec;

    fn listings() -> Vec<Listing> {
        vec![
            Listing::new(dec!(40)).with_id("a").with_title("Xbox Series X Controller"),
            Listing::new(dec!(12)).with_id("b").with_title("Controller PARTS ONLY"),
            Listing::new(dec!(150)).with_id("c").with_title("Xbox Elite Controller Series 2"),
        ]
    }

    #[tokio::test]
    async fn keeps_only_returned_ids() {
        let filter = RelevanceFilter::new(Arc::new(MockLlm::new(r#"{"valid_ids": ["a"]}"#)));
        let kept = filter.apply(listings(), "Xbox Series X Controller").await;
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn llm_failure_keeps_everything() {
        let filter = RelevanceFilter::new(Arc::new(FailingLlm));
        let kept = filter.apply(listings(), "controller").await;
        assert_eq!(kept.len(), 3);
    }

    #[tokio::test]
    async fn unparseable_answer_keeps_everything() {
        let filter = RelevanceFilter::new(Arc::new(MockLlm::new("Sure! Items a and c.")));
        let kept = filter.apply(listings(), "controller").await;
        assert_eq!(kept.len(), 3);
    }

    #[tokio::test]
    async fn empty_input_skips_the_llm() {
        let llm = Arc::new(MockLlm::new(r#"{"valid_ids": []}"#));
        let filter = RelevanceFilter::new(llm.clone());
        let kept = filter.apply(Vec::new(), "controller").await;
        assert!(kept.is_empty());
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn listings_without_ids_match_by_position() {
        let filter = RelevanceFilter::new(Arc::new(MockLlm::new(r##"{"valid_ids": ["#1"]}"##)));
        let input = vec![Listing::new(dec!(10)), Listing::new(dec!(20))];
        let kept = filter.apply(input, "thing").await;
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].item_price(), Some(dec!(20)));
    }

    #[test]
    fn prompt_carries_query_rules_and_constraints() {
        let filter = RelevanceFilter::new(Arc::new(MockLlm::new("")))
            .with_constraints(Some("black only".into()));
        let prompt = filter.prompt(&listings(), "Xbox Series X Controller");
        assert!(prompt.contains("\"Xbox Series X Controller\""));
        assert!(prompt.contains("Parts Only"));
        assert!(prompt.contains("black only"));
        assert!(prompt.contains(r#""id":"b""#));
        assert!(prompt.contains(r#""price":"40""#));
    }

    #[test]
    fn blank_constraints_are_ignored() {
        let filter = RelevanceFilter::new(Arc::new(MockLlm::new("")))
            .with_constraints(Some("   ".into()));
        assert!(!filter.prompt(&listings(), "q").contains("seller constraints"));
    }

    #[test]
    fn parses_fenced_and_numeric_ids() {
        let ids = parse_valid_ids("```json\n{\"valid_ids\": [\"x\", 42]}\n```").unwrap();
        assert!(ids.contains("x"));
        assert!(ids.contains("42"));
    }
}
