//! CSV price data adapter. One file per instrument: `{base}/{osid}.csv` with header
//! `date,open,high,low,close,volume`.

use crate::domain::error::TaEventsError;
use crate::domain::ohlcv::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const EXTENSION: &str = "csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, osid: &str) -> PathBuf {
        self.base_path.join(format!("{osid}.{EXTENSION}"))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        osid: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TaEventsError> {
        let path = self.csv_path(osid);
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| TaEventsError::Data {
                reason: format!("failed to read {}: {}", path.display(), e),
            })?;

        let mut bars = Vec::new();
        for (line, result) in rdr.deserialize::<PriceBar>().enumerate() {
            let bar = result.map_err(|e| TaEventsError::Data {
                reason: format!("{} row {}: {}", path.display(), line + 1, e),
            })?;
            if bar.date >= start_date && bar.date <= end_date {
                bars.push(bar);
            }
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_osids(&self) -> Result<Vec<String>, TaEventsError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TaEventsError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut osids = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| TaEventsError::Data {
                    reason: format!("directory entry error: {}", e),
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                osids.push(stem.to_string());
            }
        }

        osids.sort();
        Ok(osids)
    }
}
