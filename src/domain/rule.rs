//! Rule AST data structures.
//!
//! Strategy entry/exit conditions are expressed as small rule trees:
//! - `Operand`: What can be compared (the substrate close, constants, indicators)
//! - `IndicatorRef`: Reference to an indicator with a specific field
//! - `Rule`: Comparison and conjunction variants

use crate::domain::indicator::{IndicatorField, IndicatorType};

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Close of the bars the rule runs on (Heikin-Ashi close for HA strategies).
    Close,
    Constant(f64),
    Indicator(IndicatorRef),
    /// Value of `operand` `offset` bars away: positive looks back, negative looks ahead.
    Shifted { operand: Box<Operand>, offset: isize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRef {
    pub indicator_type: IndicatorType,
    pub field: IndicatorField,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Above { left: Operand, right: Operand },
    Below { left: Operand, right: Operand },
    AtMost { left: Operand, right: Operand },
    And(Vec<Rule>),
}

impl Operand {
    pub fn indicator(indicator_type: IndicatorType) -> Self {
        Operand::Indicator(IndicatorRef {
            indicator_type,
            field: IndicatorField::Value,
        })
    }

    pub fn indicator_field(indicator_type: IndicatorType, field: IndicatorField) -> Self {
        Operand::Indicator(IndicatorRef {
            indicator_type,
            field,
        })
    }

    pub fn shifted(self, offset: isize) -> Self {
        Operand::Shifted {
            operand: Box::new(self),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_constant() {
        let c = Operand::Constant(100.5);
        assert_eq!(c, Operand::Constant(100.5));
        assert_ne!(c, Operand::Constant(99.0));
    }

    #[test]
    fn operand_indicator_defaults_to_value_field() {
        let op = Operand::indicator(IndicatorType::Sma(20));
        assert_eq!(
            op,
            Operand::Indicator(IndicatorRef {
                indicator_type: IndicatorType::Sma(20),
                field: IndicatorField::Value,
            })
        );
    }

    #[test]
    fn shifted_wraps_operand() {
        let op = Operand::indicator(IndicatorType::Rsi(25)).shifted(-1);
        match op {
            Operand::Shifted { operand, offset } => {
                assert_eq!(offset, -1);
                assert!(matches!(*operand, Operand::Indicator(_)));
            }
            _ => panic!("expected Shifted"),
        }
    }

    #[test]
    fn and_rule_holds_children() {
        let rule = Rule::And(vec![
            Rule::Above {
                left: Operand::Close,
                right: Operand::Constant(1.0),
            },
            Rule::Below {
                left: Operand::Close,
                right: Operand::Constant(2.0),
            },
        ]);
        match rule {
            Rule::And(children) => assert_eq!(children.len(), 2),
            _ => panic!("expected And"),
        }
    }
}
