//! Event records and their assembly.
//!
//! An event is one (event_id, osid, signal, date, price) row. Buy and sell record sets are
//! built independently from signal-filtered bars and concatenated buys first.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "buy"),
            Signal::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub event_id: i64,
    pub osid: String,
    pub signal: Signal,
    pub event_date: NaiveDate,
    pub price: Option<f64>,
}

/// Metadata the harness supplies per run. Its `event_id` stamps every emitted record,
/// regardless of the strategy instance's own preset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInfo {
    pub event_id: i64,
}

/// Build one record per `(date, price)` pair.
pub fn build_events<I>(info: &EventInfo, osid: &str, signal: Signal, rows: I) -> Vec<Event>
where
    I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
{
    rows.into_iter()
        .map(|(event_date, price)| Event {
            event_id: info.event_id,
            osid: osid.to_string(),
            signal,
            event_date,
            price,
        })
        .collect()
}

/// Rows at the positions where `mask` is true.
pub fn masked_rows<'a, T, F>(
    items: &'a [T],
    mask: &'a [bool],
    row: F,
) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + 'a
where
    F: Fn(&T) -> (NaiveDate, Option<f64>) + 'a,
{
    items
        .iter()
        .zip(mask)
        .filter(|(_, fired)| **fired)
        .map(move |(item, _)| row(item))
}

pub fn concat_events(mut buys: Vec<Event>, sells: Vec<Event>) -> Vec<Event> {
    buys.extend(sells);
    buys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn build_events_stamps_info_and_osid() {
        let info = EventInfo { event_id: 147 };
        let events = build_events(&info, "AAPL", Signal::Sell, vec![(d(1), Some(10.0))]);
        assert_eq!(
            events,
            vec![Event {
                event_id: 147,
                osid: "AAPL".into(),
                signal: Signal::Sell,
                event_date: d(1),
                price: Some(10.0),
            }]
        );
    }

    #[test]
    fn masked_rows_filters_by_signal() {
        let items = [(d(1), 1.0), (d(2), 2.0), (d(3), 3.0)];
        let mask = [true, false, true];
        let rows: Vec<_> = masked_rows(&items, &mask, |&(date, p)| (date, Some(p))).collect();
        assert_eq!(rows, vec![(d(1), Some(1.0)), (d(3), Some(3.0))]);
    }

    #[test]
    fn concat_puts_buys_first() {
        let info = EventInfo { event_id: 1 };
        let buys = build_events(&info, "X", Signal::Buy, vec![(d(2), None)]);
        let sells = build_events(&info, "X", Signal::Sell, vec![(d(1), Some(5.0))]);
        let all = concat_events(buys, sells);
        assert_eq!(all[0].signal, Signal::Buy);
        assert_eq!(all[1].signal, Signal::Sell);
    }

    #[test]
    fn signal_display() {
        assert_eq!(Signal::Buy.to_string(), "buy");
        assert_eq!(Signal::Sell.to_string(), "sell");
    }
}
