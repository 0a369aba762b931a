//! Heuristic resale pricing model.
//!
//! Turns the landed totals of live competitors (active) and recent sales
//! (sold) into a recommended total price, a sell probability, and a
//! market-health label. The model is a pure function: no I/O, no state,
//! same input gives the same report.
//!
//! All comparisons use the landed total (price plus shipping) because that
//! is what buyers compare.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::PricingError;
use super::listing::Listing;
use super::money::round_money;
use super::observation::ObservationSet;
use super::report::{MarketHealth, MarketStats, PriceBand, PriceReport};
use super::strategy::Strategy;

/// Share of the cheapest competitor asked when nothing has sold.
const DEAD_MARKET_FACTOR: Decimal = dec!(0.90);
/// Fast-flip undercut against the cheapest competitor.
const UNDERCUT_FACTOR: Decimal = dec!(0.98);
/// Sell-through ratio at which the probability saturates.
const STR_CAP: Decimal = dec!(1.5);
const HOT_STR: Decimal = dec!(1.0);
const STEADY_STR: Decimal = dec!(0.4);
/// Sold count above which the sample-size bonus applies.
const HISTORY_BONUS_MIN_SOLD: usize = 10;
const HISTORY_BONUS: Decimal = dec!(10);
const MIN_PROBABILITY: Decimal = dec!(5);
const MAX_PROBABILITY: Decimal = dec!(99);
/// Competitor rank (zero-based) used as the max-profit ceiling.
const CEILING_RANK: usize = 2;

const FAST_FLIP_PERCENTILE: Decimal = dec!(20);
const HOT_PERCENTILE: Decimal = dec!(75);
const BAND_LOW_PERCENTILE: Decimal = dec!(25);
const BAND_HIGH_PERCENTILE: Decimal = dec!(75);

/// Price a product from raw active and sold listings.
///
/// Listings without a usable landed total are dropped first.
///
/// # Errors
///
/// Returns [`PricingError::InsufficientData`] when neither side has a
/// usable listing after cleaning.
pub fn evaluate(
    active: &[Listing],
    sold: &[Listing],
    strategy: Strategy,
) -> Result<PriceReport, PricingError> {
    let active_set = ObservationSet::from_listings(active);
    let sold_set = ObservationSet::from_listings(sold);

    evaluate_observations(&active_set, &sold_set, strategy).map_err(|_| {
        PricingError::InsufficientData {
            active: active.len(),
            sold: sold.len(),
        }
    })
}

/// Price a product from already-normalized observation sets.
///
/// # Errors
///
/// Returns [`PricingError::InsufficientData`] when both sets are empty.
pub fn evaluate_observations(
    active: &ObservationSet,
    sold: &ObservationSet,
    strategy: Strategy,
) -> Result<PriceReport, PricingError> {
    let lowest_active = active.lowest();

    let (Some(median_sold), Some(p20), Some(p75), Some(band_low), Some(band_high)) = (
        sold.median(),
        sold.percentile(FAST_FLIP_PERCENTILE),
        sold.percentile(HOT_PERCENTILE),
        sold.percentile(BAND_LOW_PERCENTILE),
        sold.percentile(BAND_HIGH_PERCENTILE),
    ) else {
        // Nothing sold: either there is no data at all, or the market is dead.
        let lowest = lowest_active.ok_or(PricingError::InsufficientData {
            active: active.len(),
            sold: sold.len(),
        })?;
        return Ok(dead_market(active, lowest, strategy));
    };

    let str_ratio = sell_through(sold.len(), active.len());

    let recommended = match strategy {
        Strategy::FastFlip => {
            let undercut = lowest_active.map_or(median_sold, |low| low * UNDERCUT_FACTOR);
            undercut.min(p20)
        }
        Strategy::MaxProfit => {
            let target = if str_ratio > HOT_STR { p75 } else { median_sold };
            match active.nth_lowest(CEILING_RANK) {
                Some(ceiling) => target.min(ceiling),
                None => target,
            }
        }
    };

    Ok(PriceReport {
        strategy,
        recommended_price: round_money(recommended),
        sell_probability: sell_probability(str_ratio, sold.len()),
        market_health: health(str_ratio),
        stats: MarketStats {
            active_count: active.len(),
            sold_count: sold.len(),
            sell_through_rate: str_ratio.round_dp(2),
            saturation: saturation(active.len(), sold.len()),
            lowest_active_total: lowest_active.map(round_money),
            median_sold_total: Some(round_money(median_sold)),
            price_band: Some(PriceBand {
                low: round_money(band_low),
                high: round_money(band_high),
            }),
        },
    })
}

fn dead_market(active: &ObservationSet, lowest: Decimal, strategy: Strategy) -> PriceReport {
    PriceReport {
        strategy,
        recommended_price: round_money(lowest * DEAD_MARKET_FACTOR),
        sell_probability: to_probability(MIN_PROBABILITY),
        market_health: MarketHealth::Dead,
        stats: MarketStats {
            active_count: active.len(),
            sold_count: 0,
            sell_through_rate: Decimal::ZERO,
            saturation: saturation(active.len(), 0),
            lowest_active_total: Some(round_money(lowest)),
            median_sold_total: None,
            price_band: None,
        },
    }
}

/// Sold count over active count, with at least one competitor assumed.
fn sell_through(sold: usize, active: usize) -> Decimal {
    Decimal::from(sold) / Decimal::from(active.max(1))
}

fn saturation(active: usize, sold: usize) -> Decimal {
    (Decimal::from(active) / Decimal::from(sold.max(1))).round_dp(2)
}

fn sell_probability(str_ratio: Decimal, sold: usize) -> u8 {
    let mut score = str_ratio.min(STR_CAP) / STR_CAP * Decimal::ONE_HUNDRED;
    if sold > HISTORY_BONUS_MIN_SOLD {
        score += HISTORY_BONUS;
    }
    to_probability(score.clamp(MIN_PROBABILITY, MAX_PROBABILITY))
}

fn to_probability(score: Decimal) -> u8 {
    // Bounded to [5, 99] by the callers.
    score.round().to_u8().unwrap_or(u8::MAX)
}

fn health(str_ratio: Decimal) -> MarketHealth {
    if str_ratio > HOT_STR {
        MarketHealth::Hot
    } else if str_ratio > STEADY_STR {
        MarketHealth::Steady
    } else {
        MarketHealth::Slow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings(prices: &[Decimal]) -> Vec<Listing> {
        prices.iter().map(|p| Listing::new(*p)).collect()
    }

    fn sold_five() -> Vec<Listing> {
        listings(&[dec!(20), dec!(25), dec!(30), dec!(22), dec!(28)])
    }

    fn active_five() -> Vec<Listing> {
        listings(&[dec!(24), dec!(26), dec!(27), dec!(29), dec!(31)])
    }

    #[test]
    fn both_empty_is_insufficient() {
        let err = evaluate(&[], &[], Strategy::FastFlip).unwrap_err();
        assert_eq!(err, PricingError::InsufficientData { active: 0, sold: 0 });
    }

    #[test]
    fn all_invalid_is_insufficient_with_raw_counts() {
        let active = listings(&[dec!(0)]);
        let sold = listings(&[dec!(-1), dec!(0)]);
        let err = evaluate(&active, &sold, Strategy::MaxProfit).unwrap_err();
        assert_eq!(err, PricingError::InsufficientData { active: 1, sold: 2 });
    }

    #[test]
    fn no_sales_is_dead_market() {
        let report = evaluate(&listings(&[dec!(100)]), &[], Strategy::FastFlip).unwrap();
        assert_eq!(report.market_health, MarketHealth::Dead);
        assert_eq!(report.recommended_price, dec!(90.00));
        assert_eq!(report.sell_probability, 5);
        assert_eq!(report.stats.sold_count, 0);
        assert_eq!(report.stats.sell_through_rate, Decimal::ZERO);
        assert_eq!(report.stats.median_sold_total, None);
        assert_eq!(report.stats.lowest_active_total, Some(dec!(100)));
    }

    #[test]
    fn dead_market_ignores_strategy() {
        let active = listings(&[dec!(55), dec!(40)]);
        let fast = evaluate(&active, &[], Strategy::FastFlip).unwrap();
        let max = evaluate(&active, &[], Strategy::MaxProfit).unwrap();
        assert_eq!(fast.recommended_price, dec!(36.00));
        assert_eq!(max.recommended_price, dec!(36.00));
    }

    #[test]
    fn fast_flip_takes_lower_of_undercut_and_p20() {
        let report = evaluate(&active_five(), &sold_five(), Strategy::FastFlip).unwrap();
        assert_eq!(report.stats.sell_through_rate, dec!(1.00));
        assert_eq!(report.recommended_price, dec!(21.60));
        assert_eq!(report.market_health, MarketHealth::Steady);
        assert_eq!(report.sell_probability, 67);
        assert_eq!(report.stats.median_sold_total, Some(dec!(25)));
        assert_eq!(report.stats.lowest_active_total, Some(dec!(24)));
    }

    #[test]
    fn fast_flip_undercuts_cheap_competitor() {
        let active = listings(&[dec!(20)]);
        let report = evaluate(&active, &sold_five(), Strategy::FastFlip).unwrap();
        // 20 * 0.98 = 19.60 < p20 = 21.6
        assert_eq!(report.recommended_price, dec!(19.60));
    }

    #[test]
    fn fast_flip_without_competitors_uses_median_fallback() {
        // Undercut candidate falls back to the sold median (25); p20 (21.6) still wins.
        let report = evaluate(&[], &sold_five(), Strategy::FastFlip).unwrap();
        assert_eq!(report.recommended_price, dec!(21.60));
        assert_eq!(report.stats.lowest_active_total, None);
        assert_eq!(report.market_health, MarketHealth::Hot);
    }

    #[test]
    fn max_profit_targets_median_under_ceiling() {
        let report = evaluate(&active_five(), &sold_five(), Strategy::MaxProfit).unwrap();
        assert_eq!(report.recommended_price, dec!(25));
        assert_eq!(report.market_health, MarketHealth::Steady);
    }

    #[test]
    fn max_profit_hot_market_targets_p75_capped_by_third_cheapest() {
        let active = listings(&[dec!(24), dec!(26), dec!(27)]);
        // str = 5/3 > 1 so target = p75 = 28, capped at 27
        let report = evaluate(&active, &sold_five(), Strategy::MaxProfit).unwrap();
        assert_eq!(report.market_health, MarketHealth::Hot);
        assert_eq!(report.recommended_price, dec!(27));
    }

    #[test]
    fn max_profit_without_three_competitors_is_uncapped() {
        let active = listings(&[dec!(10), dec!(11)]);
        // str = 2.5 so target = p75 = 28 with no ceiling
        let report = evaluate(&active, &sold_five(), Strategy::MaxProfit).unwrap();
        assert_eq!(report.recommended_price, dec!(28));
    }

    #[test]
    fn slow_market_below_threshold() {
        let active = listings(&[dec!(30); 20]);
        let sold = listings(&[dec!(25), dec!(26)]);
        let report = evaluate(&active, &sold, Strategy::MaxProfit).unwrap();
        // str = 0.1
        assert_eq!(report.market_health, MarketHealth::Slow);
        assert_eq!(report.sell_probability, 7);
        assert_eq!(report.stats.saturation, dec!(10));
    }

    #[test]
    fn history_bonus_is_additive() {
        let active = listings(&[dec!(30); 20]);
        let sold = listings(&[dec!(25); 11]);
        // str = 0.55 -> base 36.67, +10 -> 46.67
        let report = evaluate(&active, &sold, Strategy::FastFlip).unwrap();
        assert_eq!(report.sell_probability, 47);
    }

    #[test]
    fn probability_caps_at_99() {
        let sold = listings(&[dec!(25); 30]);
        let report = evaluate(&[], &sold, Strategy::FastFlip).unwrap();
        assert_eq!(report.sell_probability, 99);
    }

    #[test]
    fn shipping_counts_toward_totals() {
        let active: Vec<Listing> = vec![serde_json::from_value(
            serde_json::json!({"price": 20, "shipping_cost": 5}),
        )
        .unwrap()];
        let report = evaluate(&active, &[], Strategy::FastFlip).unwrap();
        assert_eq!(report.stats.lowest_active_total, Some(dec!(25)));
        assert_eq!(report.recommended_price, dec!(22.50));
    }

    #[test]
    fn price_band_is_sold_interquartile_range() {
        let report = evaluate(&active_five(), &sold_five(), Strategy::FastFlip).unwrap();
        assert_eq!(
            report.stats.price_band,
            Some(PriceBand {
                low: dec!(22),
                high: dec!(28)
            })
        );
    }
}
