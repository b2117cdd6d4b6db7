///! Domain value types for NEO feed and APOD data
///!
///! Everything here is an immutable snapshot: built once per upstream fetch
///! and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded pass of an object near Earth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseApproach {
    /// Calendar day as sent by the feed, e.g. "2025-12-07"
    pub date: String,
    /// `None` when the upstream value was not a usable number
    pub miss_distance_km: Option<f64>,
    pub relative_velocity_km_s: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiameterRange {
    pub min_km: f64,
    pub max_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    /// Upstream `is_potentially_hazardous_asteroid` flag
    pub is_hazardous: bool,
    pub estimated_diameter: DiameterRange,
    /// Chronological, in feed order
    pub approaches: Vec<CloseApproach>,
}

impl NearEarthObject {
    pub fn first_approach(&self) -> Option<&CloseApproach> {
        self.approaches.first()
    }

    /// Smallest parsed miss distance over all approaches
    pub fn closest_miss_distance_km(&self) -> Option<f64> {
        self.approaches
            .iter()
            .filter_map(|a| a.miss_distance_km)
            .fold(None, |min, km| match min {
                Some(m) if m <= km => Some(m),
                _ => Some(km),
            })
    }
}

/// Objects keyed by ISO calendar day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub element_count: u64,
    pub near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
}

impl Feed {
    /// Objects listed under `date`, empty when the day is absent
    pub fn objects_on(&self, date: NaiveDate) -> &[NearEarthObject] {
        self.near_earth_objects
            .get(&date.format("%Y-%m-%d").to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All objects flattened in ascending day order
    pub fn into_objects(self) -> Vec<NearEarthObject> {
        // BTreeMap keys are ISO dates, so lexical order is chronological
        self.near_earth_objects.into_values().flatten().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Astronomy Picture of the Day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApodEntry {
    pub date: String,
    pub title: String,
    pub explanation: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: MediaType,
}

/// Qualitative risk derived from the hazardous share of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-object tag shown in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTag {
    Dangerous,
    Safe,
}

impl From<bool> for RiskTag {
    fn from(is_hazardous: bool) -> Self {
        if is_hazardous {
            RiskTag::Dangerous
        } else {
            RiskTag::Safe
        }
    }
}

/// Table filter on [`RiskTag`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskFilter {
    #[default]
    All,
    Dangerous,
    Safe,
}

impl RiskFilter {
    pub fn matches(&self, tag: RiskTag) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Dangerous => tag == RiskTag::Dangerous,
            RiskFilter::Safe => tag == RiskTag::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFilter::All => "all",
            RiskFilter::Dangerous => "dangerous",
            RiskFilter::Safe => "safe",
        }
    }
}

impl std::fmt::Display for RiskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(RiskFilter::All),
            "dangerous" => Ok(RiskFilter::Dangerous),
            "safe" => Ok(RiskFilter::Safe),
            _ => Err(format!("Unknown risk filter: {}", s)),
        }
    }
}

/// Table date window: today plus the previous N-1 days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum DaysWindow {
    #[default]
    One,
    Three,
    Seven,
}

impl DaysWindow {
    pub fn days(&self) -> u32 {
        match self {
            DaysWindow::One => 1,
            DaysWindow::Three => 3,
            DaysWindow::Seven => 7,
        }
    }
}

impl TryFrom<u32> for DaysWindow {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(DaysWindow::One),
            3 => Ok(DaysWindow::Three),
            7 => Ok(DaysWindow::Seven),
            _ => Err(format!("Unsupported days window: {} (expected 1, 3 or 7)", days)),
        }
    }
}

impl From<DaysWindow> for u32 {
    fn from(window: DaysWindow) -> Self {
        window.days()
    }
}
