use std::io::Read;
use std::path::Path;

use tadtool_core::utils::get_dynamic_reader;
use tadtool_core::{TadError, TadResult};

///
/// Window sizes (in bp) to sweep an index over, sorted ascending and
/// without duplicates.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSizes(Vec<u64>);

impl WindowSizes {
    ///
    /// Use an explicit list of window sizes.
    ///
    pub fn from_values(values: &[u64]) -> TadResult<Self> {
        if values.is_empty() {
            return Err(TadError::Format("No window sizes given".to_string()));
        }
        let mut values = values.to_vec();
        values.sort_unstable();
        values.dedup();
        Ok(WindowSizes(values))
    }

    ///
    /// `start, start + step, ...` up to but excluding `stop`.
    ///
    pub fn from_range(start: u64, stop: u64, step: u64) -> TadResult<Self> {
        if step == 0 {
            return Err(TadError::Format(
                "Window size range needs a positive step".to_string(),
            ));
        }
        let values: Vec<u64> = (start..stop).step_by(step as usize).collect();
        if values.is_empty() {
            return Err(TadError::Format(format!(
                "Window size range ({}, {}, {}) is empty",
                start, stop, step
            )));
        }
        WindowSizes::from_values(&values)
    }

    ///
    /// Read whitespace-separated integers from a file.
    ///
    pub fn from_file(path: &Path) -> TadResult<Self> {
        WindowSizes::from_values(&read_window_list(path)?)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

///
/// Whitespace-separated window sizes in file order, neither sorted nor
/// de-duplicated.
///
pub fn read_window_list(path: &Path) -> TadResult<Vec<u64>> {
    let mut content = String::new();
    get_dynamic_reader(path)?.read_to_string(&mut content)?;

    content
        .split_whitespace()
        .map(|field| {
            field.parse::<u64>().map_err(|_| {
                TadError::Format(format!("Invalid window size '{}' in {:?}", field, path))
            })
        })
        .collect()
}

impl From<WindowSizes> for Vec<u64> {
    fn from(value: WindowSizes) -> Self {
        value.0
    }
}
