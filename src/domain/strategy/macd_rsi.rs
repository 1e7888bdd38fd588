//! MACD-RSI strategy on Heikin-Ashi bars.
//!
//! Entry: MACD(7,13,9) line above its signal line, RSI above the upper threshold, and the
//! next bar's RSI below it. The look-ahead means the last bar never fires.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::config_validation::{read_int, validate_min, validate_threshold};
use crate::domain::error::TaEventsError;
use crate::domain::event::{build_events, masked_rows, Event, EventInfo, Signal};
use crate::domain::heikin_ashi::{heikin_ashi, HeikinAshiBar};
use crate::domain::indicator::{
    calculate_macd, calculate_rsi, IndicatorField, IndicatorSeries, IndicatorType,
};
use crate::domain::ohlcv::PriceBar;
use crate::domain::rule::{Operand, Rule};
use crate::domain::rule_eval::{evaluate_series, RuleContext};
use crate::domain::strategy::{has_prices, EventGenerator};
use crate::ports::config_port::ConfigPort;

pub const EVENT_NAME: &str = "macd_rsi_strategy_events";
pub const CATEGORY_ID: i64 = 151;
pub const MACD_FAST: usize = 7;
pub const MACD_SLOW: usize = 13;
pub const MACD_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdRsi {
    pub rsi_period: usize,
    pub rsi_upper_threshold: i64,
}

impl Default for MacdRsi {
    fn default() -> Self {
        Self {
            rsi_period: 25,
            rsi_upper_threshold: 35,
        }
    }
}

const MACD: IndicatorType = IndicatorType::Macd {
    fast: MACD_FAST,
    slow: MACD_SLOW,
    signal: MACD_SIGNAL,
};

impl MacdRsi {
    pub fn from_config(
        config: &dyn ConfigPort,
        section: &str,
        defaults: Self,
    ) -> Result<Self, TaEventsError> {
        let rsi_period = read_int(config, section, "rsi_period", defaults.rsi_period as i64)?;
        let rsi_upper_threshold = read_int(
            config,
            section,
            "rsi_upper_threshold",
            defaults.rsi_upper_threshold,
        )?;
        Ok(Self {
            rsi_period: validate_min(section, "rsi_period", rsi_period, 2)?,
            rsi_upper_threshold: validate_threshold(
                section,
                "rsi_upper_threshold",
                rsi_upper_threshold,
            )?,
        })
    }

    pub fn entry_rule(&self) -> Rule {
        let rsi = Operand::indicator(IndicatorType::Rsi(self.rsi_period));
        let threshold = Operand::Constant(self.rsi_upper_threshold as f64);
        Rule::And(vec![
            Rule::Above {
                left: Operand::indicator_field(MACD, IndicatorField::MacdLine),
                right: Operand::indicator_field(MACD, IndicatorField::MacdSignal),
            },
            Rule::Above {
                left: rsi.clone(),
                right: threshold.clone(),
            },
            Rule::Below {
                left: rsi.shifted(-1),
                right: threshold,
            },
        ])
    }

    pub fn entry_signals(&self, ha: &[HeikinAshiBar]) -> Vec<bool> {
        let indicators: HashMap<IndicatorType, IndicatorSeries> = [
            calculate_macd(ha, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
            calculate_rsi(ha, self.rsi_period),
        ]
        .into_iter()
        .map(|s| (s.indicator_type.clone(), s))
        .collect();

        let closes: Vec<f64> = ha.iter().map(|b| b.close).collect();
        let ctx = RuleContext {
            closes: &closes,
            indicators: &indicators,
        };
        evaluate_series(&self.entry_rule(), &ctx)
    }
}

impl EventGenerator for MacdRsi {
    fn event_name(&self) -> &'static str {
        EVENT_NAME
    }

    fn category_id(&self) -> i64 {
        CATEGORY_ID
    }

    fn cache_key(&self) -> String {
        format!(
            "rsi_period={},rsi_upper_threshold={}",
            self.rsi_period, self.rsi_upper_threshold
        )
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

        let ha = heikin_ashi(prices);
        let entry = self.entry_signals(&ha);

        let ha_row = |b: &HeikinAshiBar| (b.date, Some(b.close));
        Some(build_events(
            info,
            osid,
            Signal::Buy,
            masked_rows(&ha, &entry, ha_row),
        ))
    }
}
