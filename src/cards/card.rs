//! Card records as supplied by the card registry.
//!
//! A `Card` is immutable once fetched. Its `id` identifies the printed card,
//! not the copy on the table: two copies of the same card (or two tokens)
//! share an id, which is why zones work positionally.

use serde::{Deserialize, Serialize};

use super::stats::CardStats;

/// A card record.
///
/// Field names on the wire match the registry's JSON (`imageUrl`,
/// `oracle_text`), so persisted tables stay readable by other clients.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
}

impl Card {
    /// Create a card with no image, text or stats.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: String::new(),
            oracle_text: None,
            power: None,
            toughness: None,
        }
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Set the rules text.
    #[must_use]
    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = Some(text.into());
        self
    }

    /// Set printed power and toughness.
    #[must_use]
    pub fn with_power_toughness(mut self, power: impl Into<String>, toughness: impl Into<String>) -> Self {
        self.power = Some(power.into());
        self.toughness = Some(toughness.into());
        self
    }

    /// Rules text, if the card has any.
    ///
    /// An empty `oracle_text` counts as no text.
    #[must_use]
    pub fn ability_text(&self) -> Option<&str> {
        self.oracle_text.as_deref().filter(|text| !text.is_empty())
    }

    /// Whether the card offers an "activate ability" action.
    #[must_use]
    pub fn has_ability(&self) -> bool {
        self.ability_text().is_some()
    }

    /// Printed power/toughness, when both are plain integers.
    ///
    /// `"*"`, `"1+*"`, `"1.5"` and empty strings are not numeric.
    #[must_use]
    pub fn numeric_stats(&self) -> Option<CardStats> {
        let power = parse_stat(self.power.as_deref()?)?;
        let toughness = parse_stat(self.toughness.as_deref()?)?;
        Some(CardStats::new(power, toughness))
    }
}

fn parse_stat(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
