//! End-to-end appraisal: fetch, filter, price.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use super::filter::RelevanceFilter;
use crate::domain::{evaluate, Listing, PriceReport, Strategy};
use crate::error::Result;
use crate::port::outbound::marketplace::{ListingKind, Marketplace, SearchQuery};

/// Outcome of one appraisal run.
#[derive(Debug, Clone, Serialize)]
pub struct Appraisal {
    pub query: String,
    pub strategy: Strategy,
    pub fetched_active: usize,
    pub fetched_sold: usize,
    pub kept_active: usize,
    pub kept_sold: usize,
    pub report: PriceReport,
}

/// Wires a marketplace and an optional relevance filter to the pricing
/// model.
pub struct Scout {
    marketplace: Arc<dyn Marketplace>,
    filter: Option<RelevanceFilter>,
}

impl Scout {
    #[must_use]
    pub fn new(marketplace: Arc<dyn Marketplace>) -> Self {
        Self {
            marketplace,
            filter: None,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: RelevanceFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Price `query` under `strategy`.
    ///
    /// Active and sold listings are fetched concurrently and filtered
    /// independently before the pricing model runs once on both.
    ///
    /// # Errors
    ///
    /// Fails when either search fails or when no usable listing remains.
    #[instrument(skip(self), fields(marketplace = self.marketplace.name()))]
    pub async fn appraise(&self, query: &str, strategy: Strategy) -> Result<Appraisal> {
        let search = SearchQuery::new(query);

        let (active, sold) = tokio::try_join!(
            self.marketplace.search(&search, ListingKind::Active),
            self.marketplace.search(&search, ListingKind::Sold),
        )?;
        let (fetched_active, fetched_sold) = (active.len(), sold.len());
        info!(active = fetched_active, sold = fetched_sold, "Fetched listings");

        let (active, sold) = self.filter_both(active, sold, query).await;

        let report = evaluate(&active, &sold, strategy)?;
        info!(
            recommended = %report.recommended_price,
            health = %report.market_health,
            probability = report.sell_probability,
            "Appraisal complete"
        );

        Ok(Appraisal {
            query: query.to_string(),
            strategy,
            fetched_active,
            fetched_sold,
            kept_active: active.len(),
            kept_sold: sold.len(),
            report,
        })
    }

    async fn filter_both(
        &self,
        active: Vec<Listing>,
        sold: Vec<Listing>,
        query: &str,
    ) -> (Vec<Listing>, Vec<Listing>) {
        match &self.filter {
            Some(filter) => tokio::join!(filter.apply(active, query), filter.apply(sold, query)),
            None => (active, sold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketHealth, PricingError};
    use crate::error::Error;
    use crate::testkit::listing::priced;
    use crate::testkit::llm::MockLlm;
    use crate::testkit::marketplace::ScriptedMarketplace;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn appraises_without_filter() {
        let market = ScriptedMarketplace::new()
            .with_active(priced(&[dec!(24), dec!(26), dec!(27), dec!(29), dec!(31)]))
            .with_sold(priced(&[dec!(20), dec!(25), dec!(30), dec!(22), dec!(28)]));
        let scout = Scout::new(Arc::new(market));

        let appraisal = scout.appraise("controller", Strategy::MaxProfit).await.unwrap();
        assert_eq!(appraisal.strategy, Strategy::MaxProfit);
        assert_eq!(appraisal.fetched_active, 5);
        assert_eq!(appraisal.kept_sold, 5);
        assert_eq!(appraisal.report.recommended_price, dec!(25));
    }

    #[tokio::test]
    async fn filter_runs_on_both_sides() {
        let market = ScriptedMarketplace::new()
            .with_active(priced(&[dec!(100), dec!(5)]))
            .with_sold(priced(&[dec!(90), dec!(3)]));
        // l0 survives on both sides, l1 (the accessory-priced hit) does not.
        let llm = Arc::new(MockLlm::new(r#"{"valid_ids": ["l0"]}"#));
        let scout = Scout::new(Arc::new(market)).with_filter(RelevanceFilter::new(llm.clone()));

        let appraisal = scout.appraise("console", Strategy::FastFlip).await.unwrap();
        assert_eq!(llm.calls(), 2);
        assert_eq!(appraisal.kept_active, 1);
        assert_eq!(appraisal.kept_sold, 1);
        assert_eq!(appraisal.report.stats.lowest_active_total, Some(dec!(100)));
        assert_eq!(appraisal.report.stats.median_sold_total, Some(dec!(90)));
    }

    #[tokio::test]
    async fn empty_marketplace_is_insufficient_data() {
        let scout = Scout::new(Arc::new(ScriptedMarketplace::new()));
        let err = scout.appraise("nothing", Strategy::FastFlip).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Pricing(PricingError::InsufficientData { active: 0, sold: 0 })
        ));
    }

    #[tokio::test]
    async fn no_sales_is_dead_not_an_error() {
        let market = ScriptedMarketplace::new().with_active(priced(&[dec!(100)]));
        let scout = Scout::new(Arc::new(market));
        let appraisal = scout.appraise("rare", Strategy::FastFlip).await.unwrap();
        assert_eq!(appraisal.report.market_health, MarketHealth::Dead);
        assert_eq!(appraisal.report.recommended_price, dec!(90));
    }

    #[tokio::test]
    async fn marketplace_failure_propagates() {
        let market = Arc::new(ScriptedMarketplace::new().failing_auth());
        let scout = Scout::new(market);
        let err = scout.appraise("x", Strategy::FastFlip).await.unwrap_err();
        assert!(matches!(err, Error::Marketplace(_)));
    }
}
