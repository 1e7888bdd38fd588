//! Heikin-Ashi transform.
//!
//! HA_close[t] = (O + H + L + C) / 4
//! HA_open[t]  = (O[t-1] + C[t-1]) / 2, undefined at t = 0
//! HA_high[t]  = max(H, O, C)
//! HA_low[t]   = min(L, O, C)
//!
//! This is the non-recursive variant: open/high/low are derived from the raw bar rather than
//! from the previous Heikin-Ashi candle. Across price gaps HA_open can fall outside
//! [HA_low, HA_high].

use crate::domain::ohlcv::{Candle, PriceBar};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct HeikinAshiBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle for HeikinAshiBar {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }
}

pub fn heikin_ashi(bars: &[PriceBar]) -> Vec<HeikinAshiBar> {
    let mut out = Vec::with_capacity(bars.len());
    let mut prev: Option<&PriceBar> = None;

    for bar in bars {
        out.push(HeikinAshiBar {
            date: bar.date,
            open: prev.map(|p| (p.open + p.close) / 2.0),
            high: bar.high.max(bar.open).max(bar.close),
            low: bar.low.min(bar.open).min(bar.close),
            close: (bar.open + bar.high + bar.low + bar.close) / 4.0,
        });
        prev = Some(bar);
    }

    out
}
