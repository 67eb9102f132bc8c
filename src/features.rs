//! Feature vectors
//!
//! [`SliderValues`] holds the eight user-adjustable inputs, [`SliderField`]
//! describes each control (label, range, default, step), and [`build`] turns
//! the slider values plus one city code into the [`FeatureInput`] record the
//! price model consumes.

use serde::{Deserialize, Serialize};

use crate::catalog::CityCatalog;
use crate::error::AppError;

/// The eight apartment attributes shared by every per-city request
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SliderValues {
    pub area: f64,
    pub room_count: u32,
    pub university_distance: f64,
    pub center_distance: f64,
    pub floor_count: u32,
    pub nearby_poi: u32,
    pub has_elevator: bool,
    pub building_age: u32,
}

impl Default for SliderValues {
    fn default() -> Self {
        Self {
            area: 30.0,
            room_count: 1,
            university_distance: 2.0,
            center_distance: 10.0,
            floor_count: 2,
            nearby_poi: 3,
            has_elevator: true,
            building_age: 4,
        }
    }
}

impl SliderValues {
    /// Check every value against its declared inclusive range
    pub fn validate(&self) -> Result<(), AppError> {
        for field in SliderField::ALL {
            let spec = field.spec();
            let value = field.get(self);
            if !value.is_finite() || value < spec.min || value > spec.max {
                return Err(AppError::InvalidArgument(format!(
                    "{} must be between {} and {}, got {}",
                    spec.label, spec.min, spec.max, value
                )));
            }
        }
        Ok(())
    }
}

/// Declared range and presentation of one slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    pub integer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderField {
    Area,
    RoomCount,
    UniversityDistance,
    CenterDistance,
    FloorCount,
    NearbyPoi,
    HasElevator,
    BuildingAge,
}

impl SliderField {
    /// Display order of the controls
    pub const ALL: [SliderField; 8] = [
        SliderField::Area,
        SliderField::RoomCount,
        SliderField::UniversityDistance,
        SliderField::CenterDistance,
        SliderField::FloorCount,
        SliderField::NearbyPoi,
        SliderField::HasElevator,
        SliderField::BuildingAge,
    ];

    pub fn spec(self) -> SliderSpec {
        let (label, min, max, default, integer) = match self {
            Self::Area => ("Area (m²)", 20.0, 150.0, 30.0, false),
            Self::RoomCount => ("Number of rooms", 1.0, 6.0, 1.0, true),
            Self::UniversityDistance => ("Distance to university (km)", 0.0, 20.0, 2.0, false),
            Self::CenterDistance => ("Distance to city center (km)", 0.0, 20.0, 10.0, false),
            Self::FloorCount => ("Floors in the building", 1.0, 30.0, 2.0, true),
            Self::NearbyPoi => ("Nearby points of interest", 0.0, 10.0, 3.0, true),
            Self::HasElevator => ("Elevator", 0.0, 1.0, 1.0, true),
            Self::BuildingAge => ("Building age (years)", 0.0, 100.0, 4.0, true),
        };
        SliderSpec {
            label,
            min,
            max,
            default,
            step: 1.0,
            integer,
        }
    }

    pub fn get(self, values: &SliderValues) -> f64 {
        match self {
            Self::Area => values.area,
            Self::RoomCount => values.room_count as f64,
            Self::UniversityDistance => values.university_distance,
            Self::CenterDistance => values.center_distance,
            Self::FloorCount => values.floor_count as f64,
            Self::NearbyPoi => values.nearby_poi as f64,
            Self::HasElevator => {
                if values.has_elevator {
                    1.0
                } else {
                    0.0
                }
            }
            Self::BuildingAge => values.building_age as f64,
        }
    }

    /// Set a value, clamped into range and rounded for integer controls
    pub fn set(self, values: &mut SliderValues, value: f64) {
        let spec = self.spec();
        let mut value = value.clamp(spec.min, spec.max);
        if spec.integer {
            value = value.round();
        }
        match self {
            Self::Area => values.area = value,
            Self::RoomCount => values.room_count = value as u32,
            Self::UniversityDistance => values.university_distance = value,
            Self::CenterDistance => values.center_distance = value,
            Self::FloorCount => values.floor_count = value as u32,
            Self::NearbyPoi => values.nearby_poi = value as u32,
            Self::HasElevator => values.has_elevator = value >= 0.5,
            Self::BuildingAge => values.building_age = value as u32,
        }
    }

    /// Move the value by `steps` slider steps (negative moves down)
    pub fn nudge(self, values: &mut SliderValues, steps: i32) {
        let spec = self.spec();
        let current = self.get(values);
        self.set(values, current + spec.step * steps as f64);
    }

    /// Human readable current value
    pub fn display(self, values: &SliderValues) -> String {
        match self {
            Self::HasElevator => {
                if values.has_elevator {
                    "yes".to_string()
                } else {
                    "no".to_string()
                }
            }
            _ if self.spec().integer => format!("{}", self.get(values) as u32),
            _ => format!("{:.0}", self.get(values)),
        }
    }
}

/// One prediction request as the model expects it
///
/// Serialized field names are the column names the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureInput {
    #[serde(rename = "squareMeters")]
    pub square_meters: f64,
    pub rooms: u32,
    #[serde(rename = "collegeDistance")]
    pub college_distance: f64,
    #[serde(rename = "centreDistance")]
    pub centre_distance: f64,
    #[serde(rename = "floorCount")]
    pub floor_count: u32,
    #[serde(rename = "poiCount")]
    pub poi_count: u32,
    #[serde(rename = "hasElevator_yes")]
    pub has_elevator: bool,
    #[serde(rename = "age_of_building")]
    pub age_of_building: u32,
    #[serde(rename = "city_encoded")]
    pub city_code: u32,
}

impl FeatureInput {
    /// Column names in model order
    pub const FEATURE_NAMES: [&'static str; 9] = [
        "squareMeters",
        "rooms",
        "collegeDistance",
        "centreDistance",
        "floorCount",
        "poiCount",
        "hasElevator_yes",
        "age_of_building",
        "city_encoded",
    ];

    /// Dense row in [`Self::FEATURE_NAMES`] order
    pub fn to_row(&self) -> [f32; 9] {
        [
            self.square_meters as f32,
            self.rooms as f32,
            self.college_distance as f32,
            self.centre_distance as f32,
            self.floor_count as f32,
            self.poi_count as f32,
            if self.has_elevator { 1.0 } else { 0.0 },
            self.age_of_building as f32,
            self.city_code as f32,
        ]
    }
}

/// Assemble the feature vector for one city
pub fn build(
    values: &SliderValues,
    city_code: u32,
    catalog: &CityCatalog,
) -> Result<FeatureInput, AppError> {
    if !catalog.contains(city_code) {
        return Err(AppError::InvalidArgument(format!(
            "city code {} is not in the catalog",
            city_code
        )));
    }

    Ok(FeatureInput {
        square_meters: values.area,
        rooms: values.room_count,
        college_distance: values.university_distance,
        centre_distance: values.center_distance,
        floor_count: values.floor_count,
        poi_count: values.nearby_poi,
        has_elevator: values.has_elevator,
        age_of_building: values.building_age,
        city_code,
    })
}
