//! Price bar representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for one instrument. The instrument id travels with the series, not the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// The fields indicators read. Implemented by raw bars and Heikin-Ashi bars alike.
pub trait Candle {
    fn date(&self) -> NaiveDate;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high() - self.low();
        let hc = (self.high() - prev_close).abs();
        let lc = (self.low() - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

impl Candle for PriceBar {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000.0,
        }
    }

    #[test]
    fn candle_reads_raw_fields() {
        let bar = sample_bar();
        assert_eq!(Candle::date(&bar), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(Candle::high(&bar), 110.0);
        assert_eq!(Candle::low(&bar), 90.0);
        assert_eq!(Candle::close(&bar), 105.0);
    }

    #[test]
    fn true_range_hl_dominates() {
        let bar = sample_bar();
        // high-low=20, |high-100|=10, |low-100|=10 → 20
        assert!((bar.true_range(100.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let bar = sample_bar();
        // high-low=20, |110-70|=40, |90-70|=20 → 40
        assert!((bar.true_range(70.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_down() {
        let bar = sample_bar();
        // high-low=20, |110-130|=20, |90-130|=40 → 40
        assert!((bar.true_range(130.0) - 40.0).abs() < f64::EPSILON);
    }
}
