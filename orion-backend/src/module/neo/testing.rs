//! Fixtures and in-memory sources shared by the NEO module tests

use async_trait::async_trait;
use chrono::NaiveDate;
use orion_common::{ApodEntry, CloseApproach, DiameterRange, Feed, MediaType, NearEarthObject};
use std::sync::Mutex;
use std::time::Duration;

use crate::model::nasa::schema::parse_measure;
use crate::model::nasa::{ApodSource, FeedError, NeoSource};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Object without any close approach
pub fn neo(name: &str, hazardous: bool) -> NearEarthObject {
    NearEarthObject {
        id: format!("id-{}", name),
        name: name.to_string(),
        is_hazardous: hazardous,
        estimated_diameter: DiameterRange { min_km: 0.1, max_km: 0.3 },
        approaches: Vec::new(),
    }
}

/// Object with a single approach on `day`
pub fn neo_on(name: &str, hazardous: bool, day: &str) -> NearEarthObject {
    let mut obj = neo(name, hazardous);
    obj.approaches.push(CloseApproach {
        date: day.to_string(),
        miss_distance_km: Some(1_000_000.0),
        relative_velocity_km_s: Some(12.5),
    });
    obj
}

/// Object whose approaches carry the given string-encoded distances
pub fn neo_with_distances(name: &str, hazardous: bool, distances: &[&str]) -> NearEarthObject {
    let mut obj = neo(name, hazardous);
    obj.approaches = distances
        .iter()
        .enumerate()
        .map(|(i, km)| CloseApproach {
            date: format!("2025-12-{:02}", 7 + i),
            miss_distance_km: parse_measure(km),
            relative_velocity_km_s: Some(10.0),
        })
        .collect();
    obj
}

pub fn feed_of(days: Vec<(&str, Vec<NearEarthObject>)>) -> Feed {
    let mut feed = Feed::default();
    for (day, objects) in days {
        feed.element_count += objects.len() as u64;
        feed.near_earth_objects.insert(day.to_string(), objects);
    }
    feed
}

pub fn apod() -> ApodEntry {
    ApodEntry {
        date: "2025-12-07".into(),
        title: "Orion Nebula".into(),
        explanation: "A stellar nursery.".into(),
        url: "https://apod.nasa.gov/apod/image/orion.jpg".into(),
        hdurl: None,
        media_type: MediaType::Image,
    }
}

/// Serves one feed, restricted to the requested range, and records calls
pub struct FakeSource {
    feed: Feed,
    fail: bool,
    /// Extra latency for single-day requests
    single_day_delay: Duration,
    pub calls: Mutex<Vec<(NaiveDate, NaiveDate)>>,
}

impl FakeSource {
    pub fn new(feed: Feed) -> Self {
        Self {
            feed,
            fail: false,
            single_day_delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Feed::default())
        }
    }

    pub fn with_single_day_delay(mut self, delay: Duration) -> Self {
        self.single_day_delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl NeoSource for FakeSource {
    async fn fetch_feed(&self, start: NaiveDate, end: NaiveDate) -> Result<Feed, FeedError> {
        self.calls.lock().unwrap().push((start, end));

        if start == end && !self.single_day_delay.is_zero() {
            tokio::time::sleep(self.single_day_delay).await;
        }
        if self.fail {
            return Err(FeedError::transport("fake://feed", "connection refused"));
        }

        let mut feed = Feed::default();
        for (day, objects) in &self.feed.near_earth_objects {
            let d = date(day);
            if d >= start && d <= end {
                feed.element_count += objects.len() as u64;
                feed.near_earth_objects.insert(day.clone(), objects.clone());
            }
        }
        Ok(feed)
    }
}

pub struct FakeApod(pub Option<ApodEntry>);

#[async_trait]
impl ApodSource for FakeApod {
    async fn fetch_apod(&self) -> Result<ApodEntry, FeedError> {
        self.0.clone().ok_or_else(|| FeedError::Validation {
            endpoint: "fake://apod".into(),
            message: "missing field `url`".into(),
        })
    }
}
