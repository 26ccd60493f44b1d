//! Keyword policy: intent classification, location hints and hazard detection.
//!
//! Both checks sit behind traits ([`Classifier`], [`HazardDetector`]) so a model-backed
//! implementation can replace the keyword rules without touching the stages.

use std::sync::OnceLock;

use regex::Regex;

use crate::session::Intent;

const WEATHER_KEYWORDS: &[&str] = &["weather", "forecast", "temperature", "rain", "snow"];
const SECONDARY_KEYWORDS: &[&str] = &[
    "airbnb", "stay", "rental", "lodging", "apartment", "condo", "cabin", "hotel",
];
const HAZARD_KEYWORDS: &[&str] = &[
    "storm",
    "warning",
    "advisory",
    "hazard",
    "flood",
    "blizzard",
    "hurricane",
    "tornado",
    "heat wave",
    "dangerous",
];
const FOLLOW_UP_MARKERS: &[&str] = &["instead", "how about", "what about"];

pub const SECONDARY_NOTE: &str =
    "Policy: rental planning must include a fresh weather review before sharing listings.";
pub const WEATHER_NOTE: &str = "Policy: provide a concise weather outlook from the specialist.";

/// How the host should react to one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyClassification {
    pub need_weather: bool,
    pub need_secondary_action: bool,
    pub location_hint: Option<String>,
    /// Policy note explaining the classification; `None` when nothing is needed.
    pub note: Option<String>,
}

impl PolicyClassification {
    /// Classification for the given flags. The secondary action always implies a
    /// weather check, and the note follows from the flags.
    pub fn new(need_weather: bool, need_secondary_action: bool, location_hint: Option<String>) -> Self {
        let need_weather = need_weather || need_secondary_action;
        let note = if need_secondary_action {
            Some(SECONDARY_NOTE.to_string())
        } else if need_weather {
            Some(WEATHER_NOTE.to_string())
        } else {
            None
        };
        Self {
            need_weather,
            need_secondary_action,
            location_hint,
            note,
        }
    }

    pub fn intent(&self) -> Intent {
        Intent {
            need_weather: self.need_weather,
            need_secondary: self.need_secondary_action,
        }
    }

    /// Takes the flags of `carried` when this message has no intent of its own.
    /// The location hint always stays this message's.
    pub fn or_carried(self, carried: Option<Intent>) -> Self {
        match carried {
            Some(intent) if !self.intent().is_any() && intent.is_any() => Self::new(
                intent.need_weather,
                intent.need_secondary,
                self.location_hint,
            ),
            _ => self,
        }
    }
}

/// Turns a raw user message into a [`PolicyClassification`].
pub trait Classifier: Send + Sync {
    fn classify(&self, message: &str) -> PolicyClassification;
}

/// Decides whether a weather report blocks the secondary action.
pub trait HazardDetector: Send + Sync {
    fn is_hazardous(&self, weather_report: &str) -> bool;
}

/// Case-insensitive substring matching over fixed keyword lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, message: &str) -> PolicyClassification {
        let lowered = message.to_lowercase();
        let mentions_weather = contains_any(&lowered, WEATHER_KEYWORDS);
        let mentions_secondary = contains_any(&lowered, SECONDARY_KEYWORDS);
        PolicyClassification::new(mentions_weather, mentions_secondary, location_hint(message))
    }
}

/// Flags reports mentioning storms, warnings, floods and similar terms.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordHazardDetector;

impl HazardDetector for KeywordHazardDetector {
    fn is_hazardous(&self, weather_report: &str) -> bool {
        contains_any(&weather_report.to_lowercase(), HAZARD_KEYWORDS)
    }
}

fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lowered.contains(k))
}

fn location_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(?:in|near|around|for|to|at|about)\s+([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+){0,3})")
            .expect("location pattern is valid")
    })
}

/// Capitalized place name following "in", "near", "around", "for", "to", "at" or "about".
pub fn location_hint(message: &str) -> Option<String> {
    location_pattern()
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// True when the message reads like a follow-up to an earlier request.
pub fn is_follow_up(message: &str) -> bool {
    contains_any(&message.to_lowercase(), FOLLOW_UP_MARKERS)
}
