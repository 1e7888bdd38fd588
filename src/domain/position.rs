//! Stop-loss / target-profit position tracking.
//!
//! A single ordered pass over the price series. One position may be open at a time; it is
//! opened at the bar close while flat and the entry condition holds, and closed (emitting a
//! sell) on the first later bar whose close reaches either threshold. Positions still open at
//! the end of the series emit nothing.

use crate::domain::event::{build_events, Event, EventInfo, Signal};
use crate::domain::ohlcv::PriceBar;

pub const STOP_LOSS_PCT: f64 = 2.0;
pub const TARGET_PROFIT_PCT: f64 = 4.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionState {
    pub holding_price: Option<f64>,
}

impl PositionState {
    pub fn is_open(&self) -> bool {
        self.holding_price.is_some()
    }

    pub fn stop_loss_price(&self) -> Option<f64> {
        self.holding_price
            .map(|p| p * (1.0 - STOP_LOSS_PCT / 100.0))
    }

    pub fn target_profit_price(&self) -> Option<f64> {
        self.holding_price
            .map(|p| p * (1.0 + TARGET_PROFIT_PCT / 100.0))
    }

    /// True when `price` crosses either threshold of the open position.
    pub fn should_exit(&self, price: f64) -> bool {
        match (self.stop_loss_price(), self.target_profit_price()) {
            (Some(stop), Some(target)) => price <= stop || price >= target,
            _ => false,
        }
    }
}

/// Bars on which a held position is closed.
///
/// `entry` is a single whole-series condition: once flat, every bar is an entry opportunity
/// when it is true.
pub fn track_exits(bars: &[PriceBar], entry: bool) -> Vec<&PriceBar> {
    let (_, exits) = bars.iter().fold(
        (PositionState::default(), Vec::new()),
        |(mut state, mut exits), bar| {
            if !state.is_open() {
                if entry {
                    state.holding_price = Some(bar.close);
                }
            } else if state.should_exit(bar.close) {
                exits.push(bar);
                state.holding_price = None;
            }
            (state, exits)
        },
    );
    exits
}

/// Sell events for every closed position, priced at the exit bar's close.
pub fn exit_events(info: &EventInfo, osid: &str, bars: &[PriceBar], entry: bool) -> Vec<Event> {
    build_events(
        info,
        osid,
        Signal::Sell,
        track_exits(bars, entry)
            .into_iter()
            .map(|bar| (bar.date, Some(bar.close))),
    )
}
