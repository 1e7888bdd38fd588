//! Runs strategy instances over a set of instruments.
//!
//! Prices are fetched once per instrument and shared by every instance. Results are memoized
//! per (event name, cache key, osid, start, end); because the key leaves out the event id, a
//! cached result is re-stamped with the requesting instance's id before it is returned.

use crate::domain::error::TaEventsError;
use crate::domain::event::{Event, EventInfo};
use crate::domain::ohlcv::PriceBar;
use crate::domain::strategy::{EventGenerator, StrategyInstance};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    event_name: &'static str,
    config: String,
    osid: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Default)]
pub struct EventCache {
    entries: HashMap<CacheKey, Option<Vec<Event>>>,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events for one run, computed on a miss. The flag is true on a cache hit.
    pub fn get_or_compute(
        &mut self,
        generator: &dyn EventGenerator,
        start_date: NaiveDate,
        end_date: NaiveDate,
        info: &EventInfo,
        osid: &str,
        prices: &[PriceBar],
    ) -> (Option<Vec<Event>>, bool) {
        let key = CacheKey {
            event_name: generator.event_name(),
            config: generator.cache_key(),
            osid: osid.to_string(),
            start_date,
            end_date,
        };

        if let Some(cached) = self.entries.get(&key) {
            debug!(
                "cache hit: {} [{}] {osid}",
                key.event_name, key.config
            );
            return (cached.as_ref().map(|events| restamp(events, info)), true);
        }

        let events = generator.events_by_osid(start_date, end_date, info, osid, prices);
        self.entries.insert(key, events.clone());
        (events, false)
    }
}

fn restamp(events: &[Event], info: &EventInfo) -> Vec<Event> {
    events
        .iter()
        .map(|e| Event {
            event_id: info.event_id,
            ..e.clone()
        })
        .collect()
}

/// Output of one generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub events: Vec<Event>,
    /// (instance, osid) pairs evaluated, cached or not.
    pub runs: usize,
    pub cache_hits: usize,
    /// Instruments the data source returned no bars for.
    pub empty_histories: Vec<String>,
    /// Instruments whose prices could not be read.
    pub skipped: Vec<String>,
    counts: HashMap<String, usize>,
}

impl GenerationReport {
    /// Events emitted by the named instance.
    pub fn count_for(&self, instance: &str) -> usize {
        self.counts.get(instance).copied().unwrap_or(0)
    }
}

pub fn generate_events(
    data: &dyn DataPort,
    instances: &[StrategyInstance],
    osids: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> GenerationReport {
    generate_events_with_cache(
        data,
        instances,
        osids,
        start_date,
        end_date,
        &mut EventCache::new(),
    )
}

pub fn generate_events_with_cache(
    data: &dyn DataPort,
    instances: &[StrategyInstance],
    osids: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
    cache: &mut EventCache,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    for osid in osids {
        let prices = match data.fetch_prices(osid, start_date, end_date) {
            Ok(prices) => prices,
            Err(e) => {
                warn!("skipping {osid} ({e})");
                report.skipped.push(osid.clone());
                continue;
            }
        };

        if prices.is_empty() {
            report.empty_histories.push(osid.clone());
        } else if data
            .cum_split_factor(&prices)
            .iter()
            .any(|f| (f - 1.0).abs() > f64::EPSILON)
        {
            debug!("{osid}: split factors present, prices used unadjusted");
        }

        for instance in instances {
            let (events, hit) = cache.get_or_compute(
                instance.generator(),
                start_date,
                end_date,
                &instance.info(),
                osid,
                &prices,
            );
            report.runs += 1;
            if hit {
                report.cache_hits += 1;
            }
            if let Some(events) = events {
                debug!("{}: {osid} -> {} events", instance.name, events.len());
                *report.counts.entry(instance.name.clone()).or_default() += events.len();
                report.events.extend(events);
            }
        }
    }

    info!(
        "{} runs over {} osids, {} cache hits, {} events",
        report.runs,
        osids.len(),
        report.cache_hits,
        report.events.len()
    );
    report
}

/// Resolve the instrument list: explicit ids win, otherwise everything the source lists.
pub fn resolve_osids(data: &dyn DataPort, requested: &[String]) -> Result<Vec<String>, TaEventsError> {
    if !requested.is_empty() {
        return Ok(requested.to_vec());
    }
    let osids = data.list_osids()?;
    if osids.is_empty() {
        return Err(TaEventsError::Data {
            reason: "data source lists no instruments".to_string(),
        });
    }
    Ok(osids)
}
