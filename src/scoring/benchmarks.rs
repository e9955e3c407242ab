use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::events::{Course, Stroke};

/// Reference times in seconds: course -> stroke -> distance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    records: HashMap<Course, HashMap<Stroke, HashMap<u32, f64>>>,
}

impl BenchmarkTable {
    pub fn lookup(&self, course: Course, stroke: Stroke, distance: u32) -> Option<f64> {
        self.records.get(&course)?.get(&stroke)?.get(&distance).copied()
    }

    pub fn insert(&mut self, course: Course, stroke: Stroke, distance: u32, seconds: f64) {
        self.records
            .entry(course)
            .or_default()
            .entry(stroke)
            .or_default()
            .insert(distance, seconds);
    }

    pub fn len(&self) -> usize {
        self.records
            .values()
            .flat_map(|strokes| strokes.values())
            .map(|distances| distances.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a table shaped like `{"SCY": {"FREE": {"100": 39.9}}}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse benchmark table")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read benchmark file {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Built-in world record table, built once on first use
    pub fn world_records() -> &'static BenchmarkTable {
        &WORLD_RECORD_TABLE
    }
}

static WORLD_RECORD_TABLE: LazyLock<BenchmarkTable> = LazyLock::new(|| {
    let mut table = BenchmarkTable::default();
    for &(course, stroke, distance, seconds) in WORLD_RECORDS {
        table.insert(course, stroke, distance, seconds);
    }
    table
});

use Course::{Lcm, Scm, Scy};
use Stroke::{Back, Breast, Fly, Free, Im};

const WORLD_RECORDS: &[(Course, Stroke, u32, f64)] = &[
    // Short course yards
    (Scy, Free, 50, 17.63),
    (Scy, Free, 100, 39.90),
    (Scy, Free, 200, 88.81),
    (Scy, Free, 500, 244.45),
    (Scy, Free, 1000, 513.93),
    (Scy, Free, 1650, 852.08),
    (Scy, Back, 50, 20.35),
    (Scy, Back, 100, 43.35),
    (Scy, Back, 200, 95.37),
    (Scy, Breast, 50, 22.40),
    (Scy, Breast, 100, 49.53),
    (Scy, Breast, 200, 107.91),
    (Scy, Fly, 50, 20.00),
    (Scy, Fly, 100, 42.80),
    (Scy, Fly, 200, 97.35),
    (Scy, Im, 200, 97.91),
    (Scy, Im, 400, 213.42),
    // Short course meters
    (Scm, Free, 50, 19.90),
    (Scm, Free, 100, 44.84),
    (Scm, Free, 200, 98.61),
    (Scm, Free, 400, 212.25),
    (Scm, Free, 800, 440.46),
    (Scm, Free, 1500, 846.88),
    (Scm, Back, 50, 22.11),
    (Scm, Back, 100, 48.33),
    (Scm, Back, 200, 105.63),
    (Scm, Breast, 50, 24.95),
    (Scm, Breast, 100, 55.28),
    (Scm, Breast, 200, 120.16),
    (Scm, Fly, 50, 21.32),
    (Scm, Fly, 100, 47.71),
    (Scm, Fly, 200, 106.85),
    (Scm, Im, 100, 49.28),
    (Scm, Im, 200, 108.88),
    (Scm, Im, 400, 234.81),
    // Long course meters
    (Lcm, Free, 50, 20.91),
    (Lcm, Free, 100, 46.40),
    (Lcm, Free, 200, 102.00),
    (Lcm, Free, 400, 220.07),
    (Lcm, Free, 800, 452.12),
    (Lcm, Free, 1500, 870.67),
    (Lcm, Back, 50, 23.55),
    (Lcm, Back, 100, 51.60),
    (Lcm, Back, 200, 111.92),
    (Lcm, Breast, 50, 25.95),
    (Lcm, Breast, 100, 56.88),
    (Lcm, Breast, 200, 125.48),
    (Lcm, Fly, 50, 22.27),
    (Lcm, Fly, 100, 49.45),
    (Lcm, Fly, 200, 110.34),
    (Lcm, Im, 200, 114.00),
    (Lcm, Im, 400, 242.50),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_records_cover_every_course_and_stroke() {
        let table = BenchmarkTable::world_records();
        assert_eq!(table.len(), WORLD_RECORDS.len());

        for course in [Scy, Scm, Lcm] {
            for stroke in [Free, Back, Breast, Fly, Im] {
                assert!(
                    table.lookup(course, stroke, 200).is_some(),
                    "missing 200 {:?} {:?}",
                    course,
                    stroke
                );
            }
        }
    }

    #[test]
    fn lookup_misses_uncontested_distances() {
        let table = BenchmarkTable::world_records();
        assert_eq!(table.lookup(Scy, Free, 100), Some(39.90));
        assert_eq!(table.lookup(Scy, Im, 100), None);
        assert_eq!(table.lookup(Lcm, Free, 1650), None);
    }

    #[test]
    fn loads_table_from_json() {
        let table = BenchmarkTable::from_json_str(r#"{"SCY": {"FREE": {"100": 40.5}}, "LCM": {"IM": {"200": 115.0}}}"#)
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(Scy, Free, 100), Some(40.5));
        assert_eq!(table.lookup(Lcm, Im, 200), Some(115.0));
        assert_eq!(table.lookup(Scm, Free, 100), None);
    }

    #[test]
    fn rejects_unknown_course_codes_in_json() {
        assert!(BenchmarkTable::from_json_str(r#"{"XYZ": {"FREE": {"100": 40.5}}}"#).is_err());
    }
}
