//! Breakout-bullish trend strategy.
//!
//! Entry is one boolean for the whole series:
//! `close[first] > opening_range_high[last]`
//! `&& close[first] > fractal_upper_band[first]`
//! `&& period_condition[last] > 0`
//! where the opening range is a 1-bar rolling max/min of high/low, the fractal bands are
//! P-bar rolling max/min, and `period_condition = min(5, SMA(P) - SMA(P-1))`.
//!
//! With P > 1 the upper band is still in warm-up at the first bar, so entry is false for
//! every real configuration.
//!
//! When entry holds, every bar in the series is a buy (no reference price) and the
//! stop-loss/target tracker produces the sells.

use chrono::NaiveDate;
use log::debug;

use crate::domain::config_validation::{read_int, validate_min};
use crate::domain::error::TaEventsError;
use crate::domain::event::{build_events, concat_events, Event, EventInfo, Signal};
use crate::domain::indicator::{
    calculate_rolling_max, calculate_rolling_min, calculate_sma, IndicatorSeries,
};
use crate::domain::ohlcv::PriceBar;
use crate::domain::position::exit_events;
use crate::domain::strategy::{has_prices, EventGenerator};
use crate::ports::config_port::ConfigPort;

pub const EVENT_NAME: &str = "breakout_bullish_trend_events";
pub const CATEGORY_ID: i64 = 140;
const PERIOD_CONDITION_CAP: f64 = 5.0;
const OPENING_RANGE_BARS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakoutBullish {
    pub period: usize,
}

impl BreakoutBullish {
    pub fn from_config(
        config: &dyn ConfigPort,
        section: &str,
        defaults: Self,
    ) -> Result<Self, TaEventsError> {
        let period = read_int(config, section, "period", defaults.period as i64)?;
        // SMA(period - 1) needs a window of at least two bars
        let period = validate_min(section, "period", period, 3)?;
        Ok(Self { period })
    }

    pub fn opening_range(&self, bars: &[PriceBar]) -> (IndicatorSeries, IndicatorSeries) {
        (
            calculate_rolling_max(bars, OPENING_RANGE_BARS),
            calculate_rolling_min(bars, OPENING_RANGE_BARS),
        )
    }

    pub fn fractal_chaos_bands(&self, bars: &[PriceBar]) -> (IndicatorSeries, IndicatorSeries) {
        (
            calculate_rolling_max(bars, self.period),
            calculate_rolling_min(bars, self.period),
        )
    }

    /// `min(5, SMA(P) - SMA(P-1))` per bar; NaN while either average is in warm-up.
    pub fn period_condition(&self, bars: &[PriceBar]) -> Vec<f64> {
        let current = calculate_sma(bars, self.period);
        let previous = calculate_sma(bars, self.period.saturating_sub(1));
        (0..bars.len())
            .map(|i| {
                let diff = current.value_at(i) - previous.value_at(i);
                if diff.is_nan() {
                    f64::NAN
                } else {
                    diff.min(PERIOD_CONDITION_CAP)
                }
            })
            .collect()
    }

    pub fn entry_condition(&self, bars: &[PriceBar]) -> bool {
        let Some(first) = bars.first() else {
            return false;
        };
        let last = bars.len() - 1;

        let (opening_range_high, _) = self.opening_range(bars);
        let (upper_band, _) = self.fractal_chaos_bands(bars);
        let period_condition = self.period_condition(bars);

        first.close > opening_range_high.value_at(last)
            && first.close > upper_band.value_at(0)
            && period_condition[last] > 0.0
    }
}

impl EventGenerator for BreakoutBullish {
    fn event_name(&self) -> &'static str {
        EVENT_NAME
    }

    fn category_id(&self) -> i64 {
        CATEGORY_ID
    }

    fn cache_key(&self) -> String {
        format!("period={}", self.period)
    }

    fn events_by_osid(
        &self,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
        info: &EventInfo,
        osid: &str,
        prices: &[PriceBar],
    ) -> Option<Vec<Event>> {
        if !has_prices(osid, prices) {
            return None;
        }

        let entry = self.entry_condition(prices);
        debug!("{osid}: breakout entry condition {entry} over {} bars", prices.len());

        let buys = if entry {
            build_events(info, osid, Signal::Buy, prices.iter().map(|b| (b.date, None)))
        } else {
            Vec::new()
        };
        let sells = exit_events(info, osid, prices, entry);

        Some(concat_events(buys, sells))
    }
}
