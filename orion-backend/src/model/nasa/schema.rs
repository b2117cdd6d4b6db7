///! Wire schema for the NASA NeoWs feed and APOD endpoints
///!
///! Decoding is strict on shape: every required field must be present with
///! its declared JSON type, otherwise the whole body is rejected. Unknown
///! fields are ignored. String-encoded measurements are parsed afterwards
///! field by field, and unusable values become `None`.

use orion_common::{ApodEntry, CloseApproach, DiameterRange, Feed, MediaType, NearEarthObject};
use reqwest::Url;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct RawFeed {
    element_count: u64,
    near_earth_objects: BTreeMap<String, Vec<RawNeo>>,
}

#[derive(Debug, Deserialize)]
struct RawNeo {
    id: String,
    name: String,
    is_potentially_hazardous_asteroid: bool,
    estimated_diameter: RawEstimatedDiameter,
    close_approach_data: Vec<RawCloseApproach>,
}

#[derive(Debug, Deserialize)]
struct RawEstimatedDiameter {
    kilometers: RawDiameterRange,
}

#[derive(Debug, Deserialize)]
struct RawDiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

#[derive(Debug, Deserialize)]
struct RawCloseApproach {
    close_approach_date: String,
    relative_velocity: RawVelocity,
    miss_distance: RawMissDistance,
}

#[derive(Debug, Deserialize)]
struct RawVelocity {
    kilometers_per_second: String,
}

#[derive(Debug, Deserialize)]
struct RawMissDistance {
    kilometers: String,
}

#[derive(Debug, Deserialize)]
struct RawApod {
    date: String,
    title: String,
    explanation: String,
    url: String,
    hdurl: Option<String>,
    media_type: MediaType,
}

/// Parse a string-encoded, non-negative measurement.
pub fn parse_measure(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

impl From<RawCloseApproach> for CloseApproach {
    fn from(raw: RawCloseApproach) -> Self {
        CloseApproach {
            date: raw.close_approach_date,
            miss_distance_km: parse_measure(&raw.miss_distance.kilometers),
            relative_velocity_km_s: parse_measure(&raw.relative_velocity.kilometers_per_second),
        }
    }
}

impl From<RawNeo> for NearEarthObject {
    fn from(raw: RawNeo) -> Self {
        NearEarthObject {
            id: raw.id,
            name: raw.name,
            is_hazardous: raw.is_potentially_hazardous_asteroid,
            estimated_diameter: DiameterRange {
                min_km: raw.estimated_diameter.kilometers.estimated_diameter_min,
                max_km: raw.estimated_diameter.kilometers.estimated_diameter_max,
            },
            approaches: raw.close_approach_data.into_iter().map(Into::into).collect(),
        }
    }
}

/// Decode a `/feed` response body.
pub fn decode_feed(body: &str) -> Result<Feed, String> {
    let raw: RawFeed = serde_json::from_str(body).map_err(|e| e.to_string())?;

    let near_earth_objects = raw
        .near_earth_objects
        .into_iter()
        .map(|(day, objects)| (day, objects.into_iter().map(Into::into).collect()))
        .collect();

    Ok(Feed {
        element_count: raw.element_count,
        near_earth_objects,
    })
}

/// Decode an APOD response body. `url` and `hdurl` must be absolute URLs.
pub fn decode_apod(body: &str) -> Result<ApodEntry, String> {
    let raw: RawApod = serde_json::from_str(body).map_err(|e| e.to_string())?;

    check_url("url", &raw.url)?;
    if let Some(hdurl) = &raw.hdurl {
        check_url("hdurl", hdurl)?;
    }

    Ok(ApodEntry {
        date: raw.date,
        title: raw.title,
        explanation: raw.explanation,
        url: raw.url,
        hdurl: raw.hdurl,
        media_type: raw.media_type,
    })
}

fn check_url(field: &str, value: &str) -> Result<(), String> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| format!("field `{}` is not a valid URL ({}): {}", field, value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn neo_json(name: &str, km: &str, velocity: &str) -> serde_json::Value {
        json!({
            "id": "3542519",
            "neo_reference_id": "3542519",
            "name": name,
            "absolute_magnitude_h": 21.3,
            "is_potentially_hazardous_asteroid": false,
            "estimated_diameter": {
                "kilometers": { "estimated_diameter_min": 0.12, "estimated_diameter_max": 0.27 },
                "meters": { "estimated_diameter_min": 120.0, "estimated_diameter_max": 270.0 }
            },
            "close_approach_data": [{
                "close_approach_date": "2025-12-07",
                "relative_velocity": { "kilometers_per_second": velocity, "kilometers_per_hour": "1" },
                "miss_distance": { "kilometers": km, "lunar": "1.2" },
                "orbiting_body": "Earth"
            }]
        })
    }

    #[test]
    fn test_decode_feed_ignores_unknown_fields() {
        let body = json!({
            "links": { "self": "http://x" },
            "element_count": 1,
            "near_earth_objects": { "2025-12-07": [neo_json("(2010 PK9)", "5000.5", "12.3")] }
        })
        .to_string();

        let feed = decode_feed(&body).unwrap();
        assert_eq!(feed.element_count, 1);
        let obj = &feed.near_earth_objects["2025-12-07"][0];
        assert_eq!(obj.name, "(2010 PK9)");
        assert_eq!(obj.estimated_diameter.max_km, 0.27);
        assert_eq!(obj.approaches[0].miss_distance_km, Some(5000.5));
        assert_eq!(obj.approaches[0].relative_velocity_km_s, Some(12.3));
    }

    #[test]
    fn test_unparsable_measurements_are_dropped_not_zeroed() {
        let body = json!({
            "element_count": 1,
            "near_earth_objects": { "2025-12-07": [neo_json("A", "n/a", "-4")] }
        })
        .to_string();

        let feed = decode_feed(&body).unwrap();
        let approach = &feed.near_earth_objects["2025-12-07"][0].approaches[0];
        assert_eq!(approach.miss_distance_km, None);
        assert_eq!(approach.relative_velocity_km_s, None);
    }

    #[test]
    fn test_decode_feed_rejects_wrong_types() {
        // Numeric miss distance where a string is declared
        let mut obj = neo_json("A", "1", "1");
        obj["close_approach_data"][0]["miss_distance"]["kilometers"] = json!(5000.5);
        let body = json!({ "element_count": 1, "near_earth_objects": { "2025-12-07": [obj] } });
        assert!(decode_feed(&body.to_string()).is_err());

        let body = json!({ "near_earth_objects": {} });
        assert!(decode_feed(&body.to_string()).is_err());

        let mut obj = neo_json("A", "1", "1");
        obj.as_object_mut().unwrap().remove("is_potentially_hazardous_asteroid");
        let body = json!({ "element_count": 1, "near_earth_objects": { "2025-12-07": [obj] } });
        assert!(decode_feed(&body.to_string()).is_err());
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure(" 3000.2 "), Some(3000.2));
        assert_eq!(parse_measure("0"), Some(0.0));
        assert_eq!(parse_measure(""), None);
        assert_eq!(parse_measure("NaN"), None);
        assert_eq!(parse_measure("inf"), None);
        assert_eq!(parse_measure("-1"), None);
    }

    #[test]
    fn test_decode_apod() {
        let body = json!({
            "date": "2025-12-07",
            "title": "Orion Nebula",
            "explanation": "A stellar nursery.",
            "url": "https://apod.nasa.gov/apod/image/orion.jpg",
            "hdurl": "https://apod.nasa.gov/apod/image/orion_big.jpg",
            "media_type": "image",
            "service_version": "v1"
        })
        .to_string();

        let apod = decode_apod(&body).unwrap();
        assert_eq!(apod.title, "Orion Nebula");
        assert_eq!(apod.media_type, MediaType::Image);
        assert!(apod.hdurl.is_some());
    }

    #[test]
    fn test_decode_apod_rejects_bad_media_type_and_urls() {
        let base = json!({
            "date": "2025-12-07",
            "title": "t",
            "explanation": "e",
            "url": "https://apod.nasa.gov/x.jpg",
            "media_type": "image"
        });
        assert!(decode_apod(&base.to_string()).unwrap().hdurl.is_none());

        let mut other = base.clone();
        other["media_type"] = json!("other");
        assert!(decode_apod(&other.to_string()).is_err());

        let mut relative = base.clone();
        relative["url"] = json!("/image/x.jpg");
        assert!(decode_apod(&relative.to_string()).unwrap_err().contains("url"));
    }
}
