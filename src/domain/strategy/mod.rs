//! Strategy families, the event generator interface, and configured instances.
//!
//! Each family is an immutable parameter struct implementing [`EventGenerator`]. A
//! [`StrategyInstance`] pairs one of them with a name and event id, either from the built-in
//! preset table or from an INI section.

pub mod breakout_bullish;
pub mod bullish_force;
pub mod macd_rsi;

use chrono::NaiveDate;
use log::warn;
use std::fmt;
use std::str::FromStr;

use crate::domain::config_validation::read_int;
use crate::domain::error::TaEventsError;
use crate::domain::event::{Event, EventInfo};
use crate::domain::ohlcv::PriceBar;
use crate::ports::config_port::ConfigPort;

pub use breakout_bullish::BreakoutBullish;
pub use bullish_force::BullishForce;
pub use macd_rsi::MacdRsi;

/// Interface the generator harness drives.
pub trait EventGenerator {
    /// Stable name of the output table/stream for this family.
    fn event_name(&self) -> &'static str;

    fn category_id(&self) -> i64;

    /// Encodes the effective configuration; equal keys produce equal events for equal input.
    fn cache_key(&self) -> String;

    /// Events for one instrument over `prices`. `None` when there is no price history,
    /// `Some(vec![])` when the rules simply never fired.
    fn events_by_osid(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        info: &EventInfo,
        osid: &str,
        prices: &[PriceBar],
    ) -> Option<Vec<Event>>;
}

pub(crate) fn has_prices(osid: &str, prices: &[PriceBar]) -> bool {
    if prices.is_empty() {
        warn!("{osid} has no prices");
        return false;
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    BreakoutBullish,
    BullishForce,
    MacdRsi,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakout_bullish" => Ok(StrategyKind::BreakoutBullish),
            "bullish_force" => Ok(StrategyKind::BullishForce),
            "macd_rsi" => Ok(StrategyKind::MacdRsi),
            other => Err(format!(
                "unknown kind '{other}', expected breakout_bullish, bullish_force or macd_rsi"
            )),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::BreakoutBullish => write!(f, "breakout_bullish"),
            StrategyKind::BullishForce => write!(f, "bullish_force"),
            StrategyKind::MacdRsi => write!(f, "macd_rsi"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreakoutBullish(BreakoutBullish),
    BullishForce(BullishForce),
    MacdRsi(MacdRsi),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::BreakoutBullish(_) => StrategyKind::BreakoutBullish,
            Strategy::BullishForce(_) => StrategyKind::BullishForce,
            Strategy::MacdRsi(_) => StrategyKind::MacdRsi,
        }
    }

    pub fn generator(&self) -> &dyn EventGenerator {
        match self {
            Strategy::BreakoutBullish(s) => s,
            Strategy::BullishForce(s) => s,
            Strategy::MacdRsi(s) => s,
        }
    }

    /// Family defaults for sections that name a kind but no preset. Zero periods fail
    /// validation, so breakout and force sections must set `period` themselves.
    pub fn defaults(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::BreakoutBullish => Strategy::BreakoutBullish(BreakoutBullish { period: 0 }),
            StrategyKind::BullishForce => Strategy::BullishForce(BullishForce {
                period: 0,
                adx_threshold: 0,
            }),
            StrategyKind::MacdRsi => Strategy::MacdRsi(MacdRsi::default()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub event_id: i64,
    pub strategy: Strategy,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "breakout_and_bullish_22100",
        event_id: 100,
        strategy: Strategy::BreakoutBullish(BreakoutBullish { period: 20 }),
    },
    Preset {
        name: "breakout_and_bullish_22101",
        event_id: 101,
        strategy: Strategy::BreakoutBullish(BreakoutBullish { period: 14 }),
    },
    Preset {
        name: "breakout_and_bullish_22102",
        event_id: 102,
        strategy: Strategy::BreakoutBullish(BreakoutBullish { period: 50 }),
    },
    Preset {
        name: "bullishforce_20001",
        event_id: 147,
        strategy: Strategy::BullishForce(BullishForce {
            period: 14,
            adx_threshold: 24,
        }),
    },
    Preset {
        name: "bullishforce_20002",
        event_id: 147,
        strategy: Strategy::BullishForce(BullishForce {
            period: 20,
            adx_threshold: 24,
        }),
    },
    Preset {
        name: "bullishforce_20003",
        event_id: 147,
        strategy: Strategy::BullishForce(BullishForce {
            period: 20,
            adx_threshold: 14,
        }),
    },
    Preset {
        name: "bullishforce_20004",
        event_id: 147,
        strategy: Strategy::BullishForce(BullishForce {
            period: 50,
            adx_threshold: 20,
        }),
    },
    Preset {
        name: "macdrsi_21001",
        event_id: 148,
        strategy: Strategy::MacdRsi(MacdRsi {
            rsi_period: 25,
            rsi_upper_threshold: 35,
        }),
    },
];

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let name = name.trim().to_lowercase();
    PRESETS.iter().find(|p| p.name == name)
}

/// A named strategy configuration plus the event id stamped on its records.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyInstance {
    pub name: String,
    pub event_id: i64,
    pub strategy: Strategy,
}

impl StrategyInstance {
    pub fn info(&self) -> EventInfo {
        EventInfo {
            event_id: self.event_id,
        }
    }

    pub fn generator(&self) -> &dyn EventGenerator {
        self.strategy.generator()
    }
}

impl From<&Preset> for StrategyInstance {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name.to_string(),
            event_id: preset.event_id,
            strategy: preset.strategy,
        }
    }
}

/// Build the instance configured in section `name`.
///
/// A section named after a preset starts from that preset; any option present overrides it.
/// Other sections must carry `kind`. A missing section is fine for preset names.
pub fn build_instance(config: &dyn ConfigPort, name: &str) -> Result<StrategyInstance, TaEventsError> {
    let section = name.trim().to_lowercase();
    let preset = find_preset(&section);

    let kind = match config.get_string(&section, "kind") {
        Some(raw) => raw.parse::<StrategyKind>().map_err(|reason| TaEventsError::ConfigInvalid {
            section: section.clone(),
            key: "kind".into(),
            reason,
        })?,
        None => preset
            .map(|p| p.strategy.kind())
            .ok_or_else(|| TaEventsError::UnknownStrategy {
                name: section.clone(),
            })?,
    };

    let defaults = match preset {
        Some(p) if p.strategy.kind() == kind => p.strategy,
        _ => Strategy::defaults(kind),
    };
    let default_event_id = preset.map(|p| p.event_id).unwrap_or(-1);

    let strategy = match defaults {
        Strategy::BreakoutBullish(d) => {
            Strategy::BreakoutBullish(BreakoutBullish::from_config(config, &section, d)?)
        }
        Strategy::BullishForce(d) => {
            Strategy::BullishForce(BullishForce::from_config(config, &section, d)?)
        }
        Strategy::MacdRsi(d) => Strategy::MacdRsi(MacdRsi::from_config(config, &section, d)?),
    };

    Ok(StrategyInstance {
        event_id: read_int(config, &section, "event_id", default_event_id)?,
        name: section,
        strategy,
    })
}
