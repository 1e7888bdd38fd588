//! Rule evaluation engine.
//!
//! Evaluates rules against a close series and pre-computed indicator values.
//!
//! # Evaluation Semantics
//!
//! - Comparison rules: Evaluate at the given bar index
//! - Undefined operands (indicator warm-up, shifts past either end of the series, missing
//!   indicators) resolve to NaN, so every comparison involving them is `false`
//! - `AND`: Short-circuits on first `false`

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::rule::{Operand, Rule};
use std::collections::HashMap;

/// Inputs a rule can reference.
pub struct RuleContext<'a> {
    pub closes: &'a [f64],
    pub indicators: &'a HashMap<IndicatorType, IndicatorSeries>,
}

impl RuleContext<'_> {
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

pub fn evaluate(rule: &Rule, ctx: &RuleContext<'_>, bar_index: usize) -> bool {
    let i = bar_index as isize;
    match rule {
        Rule::Above { left, right } => {
            resolve_operand(left, ctx, i) > resolve_operand(right, ctx, i)
        }
        Rule::Below { left, right } => {
            resolve_operand(left, ctx, i) < resolve_operand(right, ctx, i)
        }
        Rule::AtMost { left, right } => {
            resolve_operand(left, ctx, i) <= resolve_operand(right, ctx, i)
        }
        Rule::And(rules) => rules.iter().all(|r| evaluate(r, ctx, bar_index)),
    }
}

/// Evaluate `rule` at every bar, producing a signal series aligned with the input.
pub fn evaluate_series(rule: &Rule, ctx: &RuleContext<'_>) -> Vec<bool> {
    (0..ctx.len()).map(|i| evaluate(rule, ctx, i)).collect()
}

fn resolve_operand(operand: &Operand, ctx: &RuleContext<'_>, bar_index: isize) -> f64 {
    if bar_index < 0 || bar_index as usize >= ctx.len() {
        return f64::NAN;
    }
    let index = bar_index as usize;

    match operand {
        Operand::Close => ctx.closes[index],
        Operand::Constant(v) => *v,
        Operand::Indicator(ind_ref) => match ctx.indicators.get(&ind_ref.indicator_type) {
            Some(series) => series.get(index, ind_ref.field),
            None => f64::NAN,
        },
        Operand::Shifted { operand, offset } => resolve_operand(operand, ctx, bar_index - offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::{IndicatorPoint, IndicatorValue};
    use chrono::NaiveDate;

    fn series(indicator_type: IndicatorType, values: &[Option<f64>]) -> IndicatorSeries {
        IndicatorSeries {
            indicator_type,
            values: values
                .iter()
                .enumerate()
                .map(|(i, v)| IndicatorPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                    valid: v.is_some(),
                    value: IndicatorValue::Simple(v.unwrap_or(0.0)),
                })
                .collect(),
        }
    }

    fn indicators(entries: Vec<IndicatorSeries>) -> HashMap<IndicatorType, IndicatorSeries> {
        entries
            .into_iter()
            .map(|s| (s.indicator_type.clone(), s))
            .collect()
    }

    #[test]
    fn above_and_below() {
        let closes = [10.0, 20.0];
        let map = indicators(vec![series(IndicatorType::Sma(2), &[None, Some(15.0)])]);
        let ctx = RuleContext {
            closes: &closes,
            indicators: &map,
        };
        let above = Rule::Above {
            left: Operand::Close,
            right: Operand::indicator(IndicatorType::Sma(2)),
        };
        let below = Rule::Below {
            left: Operand::Close,
            right: Operand::indicator(IndicatorType::Sma(2)),
        };

        assert_eq!(evaluate_series(&above, &ctx), vec![false, true]);
        assert_eq!(evaluate_series(&below, &ctx), vec![false, false]);
    }

    #[test]
    fn at_most_is_inclusive() {
        let closes = [-0.5, -0.4, -0.6];
        let map = HashMap::new();
        let ctx = RuleContext {
            closes: &closes,
            indicators: &map,
        };
        let rule = Rule::AtMost {
            left: Operand::Close,
            right: Operand::Constant(-0.5),
        };
        assert_eq!(evaluate_series(&rule, &ctx), vec![true, false, true]);
    }

    #[test]
    fn missing_indicator_is_false() {
        let closes = [10.0];
        let map = HashMap::new();
        let ctx = RuleContext {
            closes: &closes,
            indicators: &map,
        };
        let rule = Rule::Above {
            left: Operand::Close,
            right: Operand::indicator(IndicatorType::Sma(5)),
        };
        assert!(!evaluate(&rule, &ctx, 0));
    }

    #[test]
    fn shift_back_reads_previous_bar() {
        let closes = [1.0, 5.0, 3.0];
        let map = HashMap::new();
        let ctx = RuleContext {
            closes: &closes,
            indicators: &map,
        };
        let rule = Rule::Above {
            left: Operand::Close.shifted(1),
            right: Operand::Constant(2.0),
        };
        // bar 0 has no previous bar
        assert_eq!(evaluate_series(&rule, &ctx), vec![false, false, true]);
    }

    #[test]
    fn shift_ahead_is_false_on_last_bar() {
        let closes = [1.0, 5.0, 3.0];
        let map = HashMap::new();
        let ctx = RuleContext {
            closes: &closes,
            indicators: &map,
        };
        let rule = Rule::Above {
            left: Operand::Close.shifted(-1),
            right: Operand::Constant(0.0),
        };
        assert_eq!(evaluate_series(&rule, &ctx), vec![true, true, false]);
    }

    #[test]
    fn and_requires_all() {
        let closes = [1.0, 2.0, 3.0];
        let map = HashMap::new();
        let ctx = RuleContext {
            closes: &closes,
            indicators: &map,
        };
        let rule = Rule::And(vec![
            Rule::Above {
                left: Operand::Close,
                right: Operand::Constant(1.5),
            },
            Rule::Below {
                left: Operand::Close,
                right: Operand::Constant(2.5),
            },
        ]);
        assert_eq!(evaluate_series(&rule, &ctx), vec![false, true, false]);
    }
}
