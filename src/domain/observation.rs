//! Sorted sets of landed totals and the order statistics over them.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::listing::Listing;
use super::money::TotalCost;

/// Ascending-sorted landed totals of one side of the market.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationSet {
    totals: Vec<Decimal>,
}

impl ObservationSet {
    /// Build a set from totals, sorting them ascending.
    #[must_use]
    pub fn new(totals: impl IntoIterator<Item = TotalCost>) -> Self {
        let mut totals: Vec<Decimal> = totals.into_iter().map(TotalCost::value).collect();
        totals.sort_unstable();
        Self { totals }
    }

    /// Normalize listings, dropping those without a valid total.
    #[must_use]
    pub fn from_listings(listings: &[Listing]) -> Self {
        Self::new(listings.iter().filter_map(Listing::total_cost))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Decimal] {
        &self.totals
    }

    #[must_use]
    pub fn lowest(&self) -> Option<Decimal> {
        self.totals.first().copied()
    }

    /// The `index`-th cheapest total, zero-based.
    #[must_use]
    pub fn nth_lowest(&self, index: usize) -> Option<Decimal> {
        self.totals.get(index).copied()
    }

    #[must_use]
    pub fn median(&self) -> Option<Decimal> {
        self.percentile(Decimal::from(50))
    }

    /// Percentile `p` in `[0, 100]` by linear interpolation between the
    /// closest ranks (`rank = p / 100 * (n - 1)`).
    ///
    /// Returns `None` for an empty set. `p` outside the range is clamped.
    #[must_use]
    pub fn percentile(&self, p: Decimal) -> Option<Decimal> {
        let last = self.totals.len().checked_sub(1)?;
        let p = p.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        let rank = p / Decimal::ONE_HUNDRED * Decimal::from(last);

        let lower = rank.floor();
        let lo = lower.to_usize()?.min(last);
        let hi = (lo + 1).min(last);
        let fraction = rank - lower;

        let low = self.totals[lo];
        let high = self.totals[hi];
        Some(low + (high - low) * fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn set(values: &[Decimal]) -> ObservationSet {
        ObservationSet::new(values.iter().filter_map(|v| TotalCost::new(*v)))
    }

    #[test]
    fn new_sorts_ascending() {
        let s = set(&[dec!(30), dec!(20), dec!(25)]);
        assert_eq!(s.as_slice(), &[dec!(20), dec!(25), dec!(30)]);
        assert_eq!(s.lowest(), Some(dec!(20)));
        assert_eq!(s.nth_lowest(2), Some(dec!(30)));
        assert_eq!(s.nth_lowest(3), None);
    }

    #[test]
    fn from_listings_drops_invalid_totals() {
        let listings = vec![
            Listing::new(dec!(10)),
            Listing::new(dec!(0)),
            Listing::new(dec!(-1)),
            Listing::new(dec!(5)),
        ];
        let s = ObservationSet::from_listings(&listings);
        assert_eq!(s.as_slice(), &[dec!(5), dec!(10)]);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let s = set(&[dec!(20), dec!(22), dec!(25), dec!(28), dec!(30)]);
        assert_eq!(s.percentile(dec!(20)), Some(dec!(21.6)));
        assert_eq!(s.percentile(dec!(25)), Some(dec!(22)));
        assert_eq!(s.percentile(dec!(75)), Some(dec!(28)));
        assert_eq!(s.percentile(dec!(0)), Some(dec!(20)));
        assert_eq!(s.percentile(dec!(100)), Some(dec!(30)));
    }

    #[test]
    fn median_of_even_set_averages_middle_pair() {
        let s = set(&[dec!(10), dec!(20), dec!(30), dec!(40)]);
        assert_eq!(s.median(), Some(dec!(25)));
    }

    #[test]
    fn single_value_is_every_percentile() {
        let s = set(&[dec!(42)]);
        assert_eq!(s.percentile(dec!(20)), Some(dec!(42)));
        assert_eq!(s.median(), Some(dec!(42)));
    }

    #[test]
    fn empty_set_has_no_statistics() {
        let s = ObservationSet::default();
        assert!(s.is_empty());
        assert_eq!(s.median(), None);
        assert_eq!(s.lowest(), None);
    }
}
