//! The catalogue of readings the bot offers.
//!
//! Each paid feature differs only in prompt content and follow-up state;
//! the charge/refund mechanics are shared. Representing them as one tagged
//! enum lets the orchestrator treat them uniformly.

use serde::{Deserialize, Serialize};

/// System prompt for tarot readings.
const KARMA_SYSTEM_PROMPT: &str = "Role: You are Karma, a mystical tarot reader and guide. \
     Tone: Empathic, mysterious, deep, using 'You' (Ty). \
     Language: Ukrainian. Never say you are an AI. \
     Structure: 1. 🎴 Cards (Name them), 2. 👁 Interpretation, \
     3. ✨ Karma's Advice, 4. 🌌 Affirmation.";

/// System prompt for the oracle-style advice feature.
const UNIVERSE_ADVICE_SYSTEM_PROMPT: &str = "Role: Oracle. Do not use Tarot cards here. \
     Give metaphorical answers using nature symbols. \
     Structure: 1. 🌌 Image/Symbol, 2. 🗝 Wisdom, 3. ⚡️ Action.";

/// A reading the user can trigger from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingKind {
    /// The free once-per-day card.
    DailyCard,
    /// Paid topic reading about relationships; asks for context first.
    Relationship,
    /// Paid topic reading about career and money; asks for context first.
    Career,
    /// Paid single-shot advice, no context step.
    UniverseAdvice,
}

impl ReadingKind {
    /// Stable key used in session records and log fields.
    pub fn action_key(&self) -> &'static str {
        match self {
            ReadingKind::DailyCard => "daily_card",
            ReadingKind::Relationship => "relationship",
            ReadingKind::Career => "career",
            ReadingKind::UniverseAdvice => "universe_advice",
        }
    }

    /// The daily card is the only free action.
    pub fn is_free(&self) -> bool {
        matches!(self, ReadingKind::DailyCard)
    }

    /// Whether the reading needs a follow-up context message before
    /// generation can run.
    pub fn awaits_context(&self) -> bool {
        matches!(self, ReadingKind::Relationship | ReadingKind::Career)
    }

    /// System prompt steering the generation provider for this reading.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            ReadingKind::UniverseAdvice => UNIVERSE_ADVICE_SYSTEM_PROMPT,
            _ => KARMA_SYSTEM_PROMPT,
        }
    }

    /// Prompt for readings that run without user context.
    ///
    /// `None` for the two-phase topic readings.
    pub fn opening_prompt(&self) -> Option<&'static str> {
        match self {
            ReadingKind::DailyCard => Some(
                "Витягни для мене карту дня і поясни енергію цього дня. \
                 Виділи афірмацію жирним курсивом і додай смайлик ✨.",
            ),
            ReadingKind::UniverseAdvice => Some("Дай мені пораду Всесвіту на сьогодні."),
            _ => None,
        }
    }

    fn topic(&self) -> &'static str {
        match self {
            ReadingKind::Relationship => "стосунки",
            _ => "кар'єра/гроші",
        }
    }

    fn topic_focus(&self) -> &'static str {
        match self {
            ReadingKind::Relationship => {
                "Зосередься на почуттях, мотивах, прихованих страхах і чесному напрямку."
            }
            _ => "Зосередься на можливостях, ризиках, ресурсах і практичних кроках.",
        }
    }

    /// Prompt for a topic reading given the user's written context.
    pub fn context_prompt(&self, user_text: &str) -> String {
        format!(
            "Контекст користувача про {}:\n{}\n\nЗроби глибоке таро-читання. {}",
            self.topic(),
            user_text,
            self.topic_focus()
        )
    }

    /// Prompt for a topic reading delivered as a voice message; the
    /// provider transcribes the attachment itself.
    pub fn voice_prompt(&self) -> String {
        format!(
            "Користувач надіслав голосове повідомлення з контекстом про {}. \
             Спочатку зрозумій/транскрибуй зміст українською, потім зроби розклад. {}",
            self.topic(),
            self.topic_focus()
        )
    }

    /// Invoice title shown when the user needs to top up.
    pub fn invoice_title(&self) -> &'static str {
        "Поповнення балансу Karma"
    }

    /// Invoice description for a top-up of `price` credits.
    pub fn invoice_description(&self, price: u32) -> String {
        format!("Поповнення на {price} ⭐ для доступу до читання.")
    }
}

/// The topic readings, the only kinds that wait for user context.
///
/// A separate type so the two-phase flow cannot be started for a
/// single-shot reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicReading {
    Relationship,
    Career,
}

impl From<TopicReading> for ReadingKind {
    fn from(topic: TopicReading) -> Self {
        match topic {
            TopicReading::Relationship => ReadingKind::Relationship,
            TopicReading::Career => ReadingKind::Career,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_daily_card_is_free() {
        assert!(ReadingKind::DailyCard.is_free());
        assert!(!ReadingKind::Relationship.is_free());
        assert!(!ReadingKind::Career.is_free());
        assert!(!ReadingKind::UniverseAdvice.is_free());
    }

    #[test]
    fn topic_readings_await_context() {
        assert!(ReadingKind::Relationship.awaits_context());
        assert!(ReadingKind::Career.awaits_context());
        assert!(!ReadingKind::DailyCard.awaits_context());
        assert!(!ReadingKind::UniverseAdvice.awaits_context());
    }

    #[test]
    fn advice_uses_the_oracle_prompt() {
        assert_ne!(
            ReadingKind::UniverseAdvice.system_prompt(),
            ReadingKind::Career.system_prompt()
        );
    }

    #[test]
    fn context_prompt_embeds_user_text() {
        let prompt = ReadingKind::Relationship.context_prompt("ми посварилися");
        assert!(prompt.contains("ми посварилися"));
        assert!(prompt.contains("стосунки"));
    }

    #[test]
    fn every_topic_reading_awaits_context() {
        assert!(ReadingKind::from(TopicReading::Relationship).awaits_context());
        assert!(ReadingKind::from(TopicReading::Career).awaits_context());
    }

    #[test]
    fn single_shot_kinds_have_opening_prompts() {
        assert!(ReadingKind::DailyCard.opening_prompt().is_some());
        assert!(ReadingKind::UniverseAdvice.opening_prompt().is_some());
        assert!(ReadingKind::Relationship.opening_prompt().is_none());
    }
}
