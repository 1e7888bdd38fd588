//! Event output port trait.

use crate::domain::error::TaEventsError;
use crate::domain::event::Event;

pub trait EventPort {
    fn write_events(&mut self, events: &[Event]) -> Result<(), TaEventsError>;

    /// Flush anything buffered. Called once after the last batch.
    fn finish(&mut self) -> Result<(), TaEventsError> {
        Ok(())
    }
}
