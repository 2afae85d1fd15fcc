//! Historical earthquake catalog
//!
//! Loads earthquake records from a JSON array on disk and normalizes their magnitudes
//! against the catalog's own range.

use anyhow::Context;
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::coordinates::GeoPoint;

/// One earthquake as recorded in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeRecord {
    pub date: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub depth_km: f64,
    pub magnitude: f64,
}

impl QuakeRecord {
    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Date-ordered earthquake records
#[derive(Resource, Debug, Clone, Default)]
pub struct QuakeCatalog {
    records: Vec<QuakeRecord>,
    min_magnitude: f64,
    max_magnitude: f64,
}

impl QuakeCatalog {
    pub fn from_records(mut records: Vec<QuakeRecord>) -> Self {
        records.sort_by(|a, b| a.date.cmp(&b.date));
        let min_magnitude = records
            .iter()
            .map(|r| r.magnitude)
            .fold(f64::INFINITY, f64::min);
        let max_magnitude = records
            .iter()
            .map(|r| r.magnitude)
            .fold(f64::NEG_INFINITY, f64::max);

        if records.is_empty() {
            return Self::default();
        }
        Self {
            records,
            min_magnitude,
            max_magnitude,
        }
    }

    pub fn parse(json: &str) -> Result<Self, anyhow::Error> {
        let records: Vec<QuakeRecord> =
            serde_json::from_str(json).context("malformed earthquake catalog")?;
        Ok(Self::from_records(records))
    }

    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn records(&self) -> &[QuakeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<DateTime<Utc>> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<DateTime<Utc>> {
        self.records.last().map(|r| r.date)
    }

    /// Magnitude mapped onto `[0, 1]` across the catalog's range.
    pub fn normalized_magnitude(&self, record: &QuakeRecord) -> f32 {
        let range = self.max_magnitude - self.min_magnitude;
        if range <= f64::EPSILON {
            return 0.0;
        }
        ((record.magnitude - self.min_magnitude) / range).clamp(0.0, 1.0) as f32
    }
}
