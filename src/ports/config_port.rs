//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Integer option; `Ok(None)` when absent, `Err` when present but not an integer.
    fn try_get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String>;

    fn sections(&self) -> Vec<String>;
}
