//! Workout records: one logged exercise session with derived pace/speed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic position, serialized as a `[lat, lng]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Coordinates { lat, lng }
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(c: Coordinates) -> Self {
        (c.lat, c.lng)
    }
}

/// Bare workout kind, as selected in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTag {
    Running,
    Cycling,
}

impl KindTag {
    pub fn toggled(self) -> Self {
        match self {
            KindTag::Running => KindTag::Cycling,
            KindTag::Cycling => KindTag::Running,
        }
    }
}

/// Kind-specific input supplied by the form, before derived values exist
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindInput {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

/// Workout variant with its kind-specific and derived fields.
///
/// Derived values are carried as data so the persisted form round-trips
/// without recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutKind {
    /// Human label used in descriptions and list entries
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "Running",
            WorkoutKind::Cycling { .. } => "Cycling",
        }
    }

    pub fn tag(&self) -> KindTag {
        match self {
            WorkoutKind::Running { .. } => KindTag::Running,
            WorkoutKind::Cycling { .. } => KindTag::Cycling,
        }
    }
}

/// One logged exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    #[serde(flatten)]
    pub kind: WorkoutKind,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub created_at: DateTime<Utc>,
    /// Cached display label (computed on construction)
    pub description: String,
}

impl Workout {
    /// Construct a record, computing the derived value and description.
    ///
    /// Inputs are assumed validated by the store; this only derives.
    pub fn new(
        id: String,
        kind: KindInput,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let kind = match kind {
            KindInput::Running { cadence_spm } => WorkoutKind::Running {
                cadence_spm,
                pace_min_per_km: duration_min / distance_km,
            },
            KindInput::Cycling { elevation_gain_m } => WorkoutKind::Cycling {
                elevation_gain_m,
                speed_km_per_h: distance_km / (duration_min / 60.0),
            },
        };

        let description = format!(
            "{} on {}",
            kind.label(),
            created_at.format("%B %-d")
        );

        Workout {
            id,
            kind,
            coordinates,
            distance_km,
            duration_min,
            created_at,
            description,
        }
    }

    /// The derived value for display: pace for runs, speed for rides
    pub fn derived_value(&self) -> f64 {
        match self.kind {
            WorkoutKind::Running { pace_min_per_km, .. } => pace_min_per_km,
            WorkoutKind::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }

    /// The kind-specific input field: cadence for runs, elevation for rides
    pub fn kind_field(&self) -> f64 {
        match self.kind {
            WorkoutKind::Running { cadence_spm, .. } => cadence_spm,
            WorkoutKind::Cycling { elevation_gain_m, .. } => elevation_gain_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng)
    }

    #[test]
    fn test_running_pace_formula() {
        let w = Workout::new(
            "a".into(),
            KindInput::Running { cadence_spm: 150.0 },
            at(10.0, 20.0),
            5.0,
            30.0,
            Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap(),
        );
        assert_eq!(w.derived_value(), 6.0);
        assert!(w.description.contains("Running"));
        assert!(w.description.contains("March 4"));
    }

    #[test]
    fn test_cycling_speed_formula() {
        let w = Workout::new(
            "b".into(),
            KindInput::Cycling {
                elevation_gain_m: 300.0,
            },
            at(10.0, 20.0),
            20.0,
            60.0,
            Utc::now(),
        );
        assert_eq!(w.derived_value(), 20.0);
        assert!(w.description.contains("Cycling"));
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_kind_and_derived() {
        let w = Workout::new(
            "c".into(),
            KindInput::Running { cadence_spm: 160.0 },
            at(-33.9, 18.4),
            10.0,
            55.0,
            Utc::now(),
        );
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains(r#""kind":"running""#));
        let back: Workout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn test_coordinates_serialize_as_pair() {
        let json = serde_json::to_string(&at(10.5, -20.25)).unwrap();
        assert_eq!(json, "[10.5,-20.25]");
    }
}
