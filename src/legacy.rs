//! Statistics hand-written into older route descriptions.
//!
//! Before statistics were computed from geometry, route authors typed them
//! into the placemark description, e.g. `Расстояние: 42,5 км`,
//! `Общий подъём: 640 м`. These are salvaged when nothing better exists.

use std::sync::LazyLock;

use regex::Regex;

static RE_HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid html tag regex"));
static RE_DISTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:расстояние|дистанция|протяж[её]нность)\s*:?\s*(\d+(?:[.,]\d+)?)\s*км")
        .expect("valid distance regex")
});
static RE_ELEVATION_MIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)минимальная\s+высота\s*:?\s*(-?\d+)\s*м").expect("valid min elevation regex")
});
static RE_ELEVATION_MAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)максимальная\s+высота\s*:?\s*(-?\d+)\s*м").expect("valid max elevation regex")
});
static RE_CLIMB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:общий\s+подъ[её]м|набор\s+высоты)\s*:?\s*(\d+)\s*м")
        .expect("valid climb regex")
});
static RE_DESCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:общий\s+спуск|сброс\s+высоты)\s*:?\s*(\d+)\s*м")
        .expect("valid descent regex")
});

/// Figures recovered from a description. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegacyStats {
    pub distance_km: Option<f64>,
    pub elevation_min_m: Option<f64>,
    pub elevation_max_m: Option<f64>,
    pub climb_m: Option<f64>,
    pub descent_m: Option<f64>,
}

impl LegacyStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Scan description text (HTML allowed) for labelled statistics.
pub fn extract_legacy_stats(description: &str) -> LegacyStats {
    let text = strip_markup(description);
    LegacyStats {
        distance_km: capture_number(&RE_DISTANCE, &text),
        elevation_min_m: capture_number(&RE_ELEVATION_MIN, &text),
        elevation_max_m: capture_number(&RE_ELEVATION_MAX, &text),
        climb_m: capture_number(&RE_CLIMB, &text),
        descent_m: capture_number(&RE_DESCENT, &text),
    }
}

/// Replace tags with spaces and collapse whitespace runs.
pub fn strip_markup(html: &str) -> String {
    let text = RE_HTML_TAG.replace_all(html, " ");
    text.replace("&nbsp;", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn capture_number(re: &Regex, text: &str) -> Option<f64> {
    let raw = re.captures(text)?.get(1)?.as_str();
    raw.replace(',', ".").parse().ok()
}
