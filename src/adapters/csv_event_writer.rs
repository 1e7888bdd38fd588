//! CSV event output adapter implementing EventPort.
//!
//! Columns: `event_id,osid,signal,event_date,price`. A missing price is an empty field. The
//! header is written even when no events are.

use crate::domain::error::TaEventsError;
use crate::domain::event::Event;
use crate::ports::event_port::EventPort;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const HEADER: [&str; 5] = ["event_id", "osid", "signal", "event_date", "price"];

pub struct CsvEventWriter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    written: usize,
}

impl CsvEventWriter<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, TaEventsError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TaEventsError::Output {
            reason: format!("failed to create {}: {}", path.display(), e),
        })?;
        Ok(Self::new(file))
    }
}

impl CsvEventWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CsvEventWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(inner),
            header_written: false,
            written: 0,
        }
    }

    fn ensure_header(&mut self) -> Result<(), TaEventsError> {
        if !self.header_written {
            self.writer
                .write_record(HEADER)
                .map_err(|e| TaEventsError::Output {
                    reason: e.to_string(),
                })?;
            self.header_written = true;
        }
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, TaEventsError> {
        self.writer.into_inner().map_err(|e| TaEventsError::Output {
            reason: e.to_string(),
        })
    }
}

impl<W: Write> EventPort for CsvEventWriter<W> {
    fn write_events(&mut self, events: &[Event]) -> Result<(), TaEventsError> {
        self.ensure_header()?;
        for event in events {
            self.writer
                .serialize(event)
                .map_err(|e| TaEventsError::Output {
                    reason: e.to_string(),
                })?;
        }
        self.written += events.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TaEventsError> {
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
