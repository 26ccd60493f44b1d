//! Which remote specialist serves which capability.

use serde::{Deserialize, Serialize};

use super::Capability;

const WEATHER_TERMS: &[&str] = &["weather"];
const SECONDARY_TERMS: &[&str] = &["airbnb", "rental", "hotel", "lodging"];

/// Agent card as published at `/.well-known/agent.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON-RPC endpoint; may be empty for cards that never go over HTTP.
    #[serde(default)]
    pub url: String,
}

impl AgentCard {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            url: String::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn mentions(&self, terms: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        let description = self.description.as_deref().unwrap_or("").to_lowercase();
        terms
            .iter()
            .any(|term| name.contains(term) || description.contains(term))
    }
}

/// Name and description of a registered specialist, for listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistSummary {
    pub name: String,
    pub description: String,
}

/// Registered specialist cards plus the capability assignment derived from them.
///
/// The first card mentioning "weather" (name or description, case-insensitive) serves
/// [`Capability::Weather`]; the first mentioning "airbnb", "rental", "hotel" or
/// "lodging" serves [`Capability::Secondary`]. One card may serve both.
#[derive(Clone, Debug, Default)]
pub struct SpecialistDirectory {
    cards: Vec<AgentCard>,
    weather: Option<String>,
    secondary: Option<String>,
}

impl SpecialistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory built by tracking each card in order.
    pub fn from_cards(cards: impl IntoIterator<Item = AgentCard>) -> Self {
        let mut directory = Self::new();
        for card in cards {
            directory.track(card);
        }
        directory
    }

    /// Registers `card`. A card with an already registered name replaces the old one in
    /// place; capability assignments are only ever filled, never moved.
    pub fn track(&mut self, card: AgentCard) {
        if self.weather.is_none() && card.mentions(WEATHER_TERMS) {
            self.weather = Some(card.name.clone());
        }
        if self.secondary.is_none() && card.mentions(SECONDARY_TERMS) {
            self.secondary = Some(card.name.clone());
        }
        match self.cards.iter_mut().find(|c| c.name == card.name) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
    }

    /// Specialist name serving `capability`, if any card matched.
    pub fn resolve(&self, capability: Capability) -> Option<&str> {
        match capability {
            Capability::Weather => self.weather.as_deref(),
            Capability::Secondary => self.secondary.as_deref(),
        }
    }

    pub fn card(&self, name: &str) -> Option<&AgentCard> {
        self.cards.iter().find(|c| c.name == name)
    }

    /// Registered specialists in registration order.
    pub fn list(&self) -> Vec<SpecialistSummary> {
        self.cards
            .iter()
            .map(|c| SpecialistSummary {
                name: c.name.clone(),
                description: c.description.clone().unwrap_or_default(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Capabilities are assigned from card names and descriptions, case-insensitively.
    #[test]
    fn tracks_capabilities_from_cards() {
        let dir = SpecialistDirectory::from_cards([
            AgentCard::new("Forecast Bot", "Live WEATHER reports"),
            AgentCard::new("Hotel Specialist", "Finds places to stay"),
        ]);
        assert_eq!(dir.resolve(Capability::Weather), Some("Forecast Bot"));
        assert_eq!(dir.resolve(Capability::Secondary), Some("Hotel Specialist"));
    }

    /// **Scenario**: The first matching card wins; later matches are listed but not assigned.
    #[test]
    fn first_match_wins() {
        let dir = SpecialistDirectory::from_cards([
            AgentCard::new("Weather A", ""),
            AgentCard::new("Weather B", ""),
        ]);
        assert_eq!(dir.resolve(Capability::Weather), Some("Weather A"));
        assert_eq!(dir.resolve(Capability::Secondary), None);
        let names: Vec<_> = dir.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Weather A", "Weather B"]);
    }

    /// **Scenario**: Re-tracking a card with the same name replaces it in place.
    #[test]
    fn duplicate_name_replaces_card() {
        let mut dir = SpecialistDirectory::new();
        dir.track(AgentCard::new("Airbnb Agent", "old").with_url("http://a"));
        dir.track(AgentCard::new("Airbnb Agent", "new").with_url("http://b"));
        assert_eq!(dir.list().len(), 1);
        assert_eq!(dir.card("Airbnb Agent").unwrap().url, "http://b");
        assert_eq!(dir.resolve(Capability::Secondary), Some("Airbnb Agent"));
    }

    /// **Scenario**: An empty directory resolves nothing.
    #[test]
    fn empty_directory_resolves_none() {
        let dir = SpecialistDirectory::new();
        assert!(dir.is_empty());
        assert_eq!(dir.resolve(Capability::Weather), None);
    }
}
