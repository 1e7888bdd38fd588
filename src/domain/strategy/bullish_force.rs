//! Bullish-force strategy on Heikin-Ashi bars.
//!
//! Entry: HA close above SMA(P), ADX(P) above the threshold, +DI(P) above -DI(P).
//! Exit:  HA close below SMA(P), same ADX/DI conditions, and the previous raw bar closed at
//! least 0.5% below its high.
//!
//! Only sell records are returned. Entry signals are evaluated and counted in the debug log
//! but never emitted.

use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use crate::domain::config_validation::{read_int, validate_min, validate_threshold};
use crate::domain::error::TaEventsError;
use crate::domain::event::{build_events, masked_rows, Event, EventInfo, Signal};
use crate::domain::heikin_ashi::{heikin_ashi, HeikinAshiBar};
use crate::domain::indicator::{
    calculate_adx, calculate_close_to_high_pct, calculate_minus_di, calculate_plus_di,
    calculate_sma, IndicatorSeries, IndicatorType,
};
use crate::domain::ohlcv::PriceBar;
use crate::domain::rule::{Operand, Rule};
use crate::domain::rule_eval::{evaluate_series, RuleContext};
use crate::domain::strategy::{has_prices, EventGenerator};
use crate::ports::config_port::ConfigPort;

pub const EVENT_NAME: &str = "bullish_force_strategy_events";
pub const CATEGORY_ID: i64 = 150;
const EXIT_PCT_CHANGE: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BullishForce {
    pub period: usize,
    pub adx_threshold: i64,
}

/// Entry and exit signal series, aligned with the input bars.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceSignals {
    pub entry: Vec<bool>,
    pub exit: Vec<bool>,
}

impl BullishForce {
    pub fn from_config(
        config: &dyn ConfigPort,
        section: &str,
        defaults: Self,
    ) -> Result<Self, TaEventsError> {
        let period = read_int(config, section, "period", defaults.period as i64)?;
        let adx_threshold = read_int(config, section, "adx_threshold", defaults.adx_threshold)?;
        Ok(Self {
            period: validate_min(section, "period", period, 2)?,
            adx_threshold: validate_threshold(section, "adx_threshold", adx_threshold)?,
        })
    }

    fn trend_filters(&self) -> Vec<Rule> {
        vec![
            Rule::Above {
                left: Operand::indicator(IndicatorType::Adx(self.period)),
                right: Operand::Constant(self.adx_threshold as f64),
            },
            Rule::Above {
                left: Operand::indicator(IndicatorType::PlusDi(self.period)),
                right: Operand::indicator(IndicatorType::MinusDi(self.period)),
            },
        ]
    }

    pub fn entry_rule(&self) -> Rule {
        let mut rules = vec![Rule::Above {
            left: Operand::Close,
            right: Operand::indicator(IndicatorType::Sma(self.period)),
        }];
        rules.extend(self.trend_filters());
        Rule::And(rules)
    }

    pub fn exit_rule(&self) -> Rule {
        let mut rules = vec![Rule::Below {
            left: Operand::Close,
            right: Operand::indicator(IndicatorType::Sma(self.period)),
        }];
        rules.extend(self.trend_filters());
        rules.push(Rule::AtMost {
            left: Operand::indicator(IndicatorType::CloseToHighPct).shifted(1),
            right: Operand::Constant(EXIT_PCT_CHANGE),
        });
        Rule::And(rules)
    }

    fn indicators(
        &self,
        bars: &[PriceBar],
        ha: &[HeikinAshiBar],
    ) -> HashMap<IndicatorType, IndicatorSeries> {
        [
            calculate_sma(ha, self.period),
            calculate_adx(ha, self.period),
            calculate_plus_di(ha, self.period),
            calculate_minus_di(ha, self.period),
            calculate_close_to_high_pct(bars),
        ]
        .into_iter()
        .map(|s| (s.indicator_type.clone(), s))
        .collect()
    }

    pub fn signals(&self, bars: &[PriceBar], ha: &[HeikinAshiBar]) -> ForceSignals {
        let indicators = self.indicators(bars, ha);
        let closes: Vec<f64> = ha.iter().map(|b| b.close).collect();
        let ctx = RuleContext {
            closes: &closes,
            indicators: &indicators,
        };
        ForceSignals {
            entry: evaluate_series(&self.entry_rule(), &ctx),
            exit: evaluate_series(&self.exit_rule(), &ctx),
        }
    }
}

impl EventGenerator for BullishForce {
    fn event_name(&self) -> &'static str {
        EVENT_NAME
    }

    fn category_id(&self) -> i64 {
        CATEGORY_ID
    }

    fn cache_key(&self) -> String {
        format!(
            "adx_threshold={},period={}",
            self.adx_threshold, self.period
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
        let signals = self.signals(prices, &ha);

        let entries = signals.entry.iter().filter(|fired| **fired).count();
        debug!("{osid}: {entries} bullish-force entry signals not emitted");

        let ha_row = |b: &HeikinAshiBar| (b.date, Some(b.close));
        Some(build_events(
            info,
            osid,
            Signal::Sell,
            masked_rows(&ha, &signals.exit, ha_row),
        ))
    }
}
