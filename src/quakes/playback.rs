//! Playback clock over the catalog's timeline.

use bevy::prelude::*;
use chrono::{DateTime, Duration, Utc};

use super::catalog::{QuakeCatalog, QuakeRecord};

/// Simulated seconds since the first catalog record, plus a release cursor.
#[derive(Resource, Debug, Clone)]
pub struct PlaybackClock {
    pub elapsed_secs: f64,
    pub time_scale: f64,
    cursor: usize,
}

impl PlaybackClock {
    pub fn new(time_scale: f64) -> Self {
        Self {
            elapsed_secs: 0.0,
            time_scale,
            cursor: 0,
        }
    }

    pub fn advance(&mut self, real_delta_secs: f64) {
        self.elapsed_secs += (real_delta_secs * self.time_scale).max(0.0);
    }

    /// Records reached since the previous call, in date order.
    pub fn release<'a>(&mut self, catalog: &'a QuakeCatalog) -> &'a [QuakeRecord] {
        let Some(start) = catalog.first_date() else {
            return &[];
        };
        let records = catalog.records();
        let from = self.cursor.min(records.len());
        let reached = records[from..]
            .iter()
            .take_while(|r| offset_secs(start, r.date) <= self.elapsed_secs)
            .count();
        self.cursor = from + reached;
        &records[from..self.cursor]
    }

    /// True once the last record is older than `linger_secs`.
    pub fn is_finished(&self, catalog: &QuakeCatalog, linger_secs: f64) -> bool {
        match (catalog.first_date(), catalog.last_date()) {
            (Some(first), Some(last)) => self.elapsed_secs > offset_secs(first, last) + linger_secs,
            _ => false,
        }
    }

    pub fn restart(&mut self) {
        self.elapsed_secs = 0.0;
        self.cursor = 0;
    }

    pub fn current_date(&self, catalog: &QuakeCatalog) -> Option<DateTime<Utc>> {
        let start = catalog.first_date()?;
        Some(start + Duration::milliseconds((self.elapsed_secs * 1000.0) as i64))
    }
}

fn offset_secs(start: DateTime<Utc>, date: DateTime<Utc>) -> f64 {
    (date - start).num_milliseconds() as f64 / 1000.0
}
