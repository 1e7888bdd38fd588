//! Price data access port trait.

use crate::domain::error::TaEventsError;
use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily bars for `osid` within `[start_date, end_date]`, ascending by date.
    fn fetch_prices(
        &self,
        osid: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TaEventsError>;

    fn list_osids(&self) -> Result<Vec<String>, TaEventsError>;

    /// Cumulative split factor per bar. Sources without corporate-action data report 1.0
    /// throughout. Prices are never adjusted by it.
    fn cum_split_factor(&self, prices: &[PriceBar]) -> Vec<f64> {
        vec![1.0; prices.len()]
    }
}
