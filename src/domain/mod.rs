//! Domain logic: price bars, indicators, rules, strategies and event generation.

pub mod ohlcv;
pub mod heikin_ashi;
pub mod indicator;
pub mod rule;
pub mod rule_eval;
pub mod event;
pub mod position;
pub mod strategy;
pub mod config_validation;
pub mod generator;
pub mod error;
