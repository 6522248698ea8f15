//! Profile Setup: availability grid and step wizard
//!
//! The profile form asks for weekly availability as a grid of two-hour blocks.
//! The grid's state is kept in a hidden input as JSON, e.g.
//! `{"monday": ["8-10", "14-16"]}`.

use std::collections::BTreeMap;

/// Row labels, Monday through Saturday
pub const GRID_DAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Start hour of each two-hour column
pub const BLOCK_HOURS: [u32; 6] = [8, 10, 12, 14, 16, 18];

/// Column header, e.g. "2 PM"
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = if hour > 12 { hour - 12 } else { hour };
    format!("{} {}", display, suffix)
}

/// Block key stored in the JSON, e.g. "14-16"
pub fn block_key(hour: u32) -> String {
    format!("{}-{}", hour, hour + 2)
}

/// Cell tooltip, e.g. "Monday 8:00 - 10:00"
pub fn cell_title(day: &str, hour: u32) -> String {
    format!("{} {}:00 - {}:00", day, hour, hour + 2)
}

/// Busy blocks per lowercase day name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    busy: BTreeMap<String, Vec<String>>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the hidden input. Blank or malformed input gives an empty
    /// schedule.
    pub fn from_json(json: &str) -> Self {
        let json = json.trim();
        if json.is_empty() {
            return Self::new();
        }
        match serde_json::from_str::<BTreeMap<String, Vec<String>>>(json) {
            Ok(busy) => Self { busy },
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed schedule");
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.busy).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_busy(&self, day: &str, hour: u32) -> bool {
        let key = block_key(hour);
        self.busy
            .get(&day.to_lowercase())
            .is_some_and(|blocks| blocks.contains(&key))
    }

    /// Flip a cell; returns whether it is busy afterwards
    pub fn toggle(&mut self, day: &str, hour: u32) -> bool {
        let day = day.to_lowercase();
        let key = block_key(hour);
        let blocks = self.busy.entry(day.clone()).or_default();

        let now_busy = if let Some(i) = blocks.iter().position(|b| *b == key) {
            blocks.remove(i);
            false
        } else {
            blocks.push(key);
            true
        };

        if blocks.is_empty() {
            self.busy.remove(&day);
        }
        now_busy
    }

    /// (day, start hour) of every busy block, for preloading the grid
    pub fn busy_cells(&self) -> Vec<(String, u32)> {
        self.busy
            .iter()
            .flat_map(|(day, blocks)| {
                blocks.iter().filter_map(move |block| {
                    let start = block.split('-').next()?.parse().ok()?;
                    Some((day.clone(), start))
                })
            })
            .collect()
    }
}

/// Multi-step profile form position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard {
    current: usize,
    total: usize,
}

impl Wizard {
    /// Starts on step 1
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1).min(self.total);
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = self.current.saturating_sub(1).max(1);
        self.current
    }
}
