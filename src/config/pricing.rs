//! Per-reading prices

use serde::Deserialize;

use crate::domain::reading::ReadingKind;

/// Prices of the paid readings, in credits.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Relationship topic reading
    #[serde(default = "default_topic_price")]
    pub relationship_price: u32,

    /// Career/money topic reading
    #[serde(default = "default_topic_price")]
    pub career_price: u32,

    /// Universe advice reading
    #[serde(default = "default_advice_price")]
    pub advice_price: u32,
}

fn default_topic_price() -> u32 {
    1
}

fn default_advice_price() -> u32 {
    25
}

impl PricingConfig {
    /// Price for one reading; the daily card is free.
    pub fn price_for(&self, kind: ReadingKind) -> u32 {
        match kind {
            ReadingKind::DailyCard => 0,
            ReadingKind::Relationship => self.relationship_price,
            ReadingKind::Career => self.career_price,
            ReadingKind::UniverseAdvice => self.advice_price,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            relationship_price: default_topic_price(),
            career_price: default_topic_price(),
            advice_price: default_advice_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_card_is_always_free() {
        let pricing = PricingConfig {
            relationship_price: 100,
            career_price: 100,
            advice_price: 100,
        };
        assert_eq!(pricing.price_for(ReadingKind::DailyCard), 0);
    }

    #[test]
    fn defaults_match_the_menu() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.price_for(ReadingKind::Relationship), 1);
        assert_eq!(pricing.price_for(ReadingKind::Career), 1);
        assert_eq!(pricing.price_for(ReadingKind::UniverseAdvice), 25);
    }
}
