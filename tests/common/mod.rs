#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::Cell;
use std::collections::HashMap;
use taevents::domain::error::TaEventsError;
pub use taevents::domain::ohlcv::PriceBar;
use taevents::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
    pub fetches: Cell<usize>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            fetches: Cell::new(0),
        }
    }

    pub fn with_bars(mut self, osid: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(osid.to_string(), bars);
        self
    }

    pub fn with_error(mut self, osid: &str, reason: &str) -> Self {
        self.errors.insert(osid.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        osid: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TaEventsError> {
        self.fetches.set(self.fetches.get() + 1);
        if let Some(reason) = self.errors.get(osid) {
            return Err(TaEventsError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(osid)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_osids(&self) -> Result<Vec<String>, TaEventsError> {
        let mut osids: Vec<String> = self.data.keys().cloned().collect();
        osids.sort();
        Ok(osids)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Flat bars (open = high = low = close) on consecutive days from 2024-01-01.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        })
        .collect()
}

pub fn constant_bars(count: usize, price: f64) -> Vec<PriceBar> {
    bars_from_closes(&vec![price; count])
}

/// Steady rally with a one-point range around each close.
pub fn generate_bars(start_date: &str, count: usize, start_price: f64) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| PriceBar {
            date: start + chrono::Duration::days(i as i64),
            open: start_price + i as f64 - 0.5,
            high: start_price + i as f64 + 1.0,
            low: start_price + i as f64 - 1.0,
            close: start_price + i as f64,
            volume: 1000.0,
        })
        .collect()
}

/// Accelerating rally over 40 bars followed by a three-bar drop.
pub fn rally_then_drop() -> Vec<PriceBar> {
    let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + 0.05 * (i * i) as f64).collect();
    closes.extend([100.0, 95.0, 90.0]);
    bars_from_closes(&closes)
}

pub fn prices_csv(bars: &[PriceBar]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.date, b.open, b.high, b.low, b.close, b.volume
        ));
    }
    out
}
