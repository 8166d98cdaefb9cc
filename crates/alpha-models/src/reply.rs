//! Keyword classifier behind the chat widget.
//!
//! Incoming text is lower-cased and checked against [`RULES`] in order; the
//! first rule with a keyword contained in the text wins. Nothing is scored and
//! nothing backtracks, so reordering the table changes behaviour for inputs
//! that mention several topics.
//!
//! ```
//! use alpha_models::{reply, Topic};
//!
//! assert_eq!(reply("What does a PLAN cost?").topic, Topic::Pricing);
//! assert_eq!(reply("asdf").topic, Topic::Fallback);
//! ```

use serde::{Deserialize, Serialize};

/// What a message was classified as.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Body-mass-index questions.
    Bmi,
    /// Calories and burning.
    Calories,
    /// Prices and plans.
    Pricing,
    /// Fat-loss programme.
    FatLoss,
    /// Muscle-gain programme.
    MuscleGain,
    /// Yoga classes.
    Yoga,
    /// Trainer sessions and bookings.
    Trainer,
    /// Greetings.
    Greeting,
    /// Nothing matched.
    Fallback,
}

/// One entry of the ordered rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Topic assigned when the rule fires.
    pub topic: Topic,
    /// Lower-case substrings; any one of them triggers the rule.
    pub keywords: &'static [&'static str],
    /// Reply body, possibly with inline link markup.
    pub template: &'static str,
}

impl Rule {
    /// Whether the (already lower-cased) text triggers this rule.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// The rule table, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Bmi,
        keywords: &["bmi"],
        template: "Bot: Use our <a href=\"bmi.html\">BMI Calculator</a> to check your BMI. Want a recommendation?",
    },
    Rule {
        topic: Topic::Calories,
        keywords: &["calor", "burn", "calorie"],
        template: "Bot: Use <a href=\"calorie.html\">Calorie Counter</a>. Tell me activity & minutes and I'll estimate.",
    },
    Rule {
        topic: Topic::Pricing,
        keywords: &["price", "plan", "cost"],
        template: "Bot: Plans start from ₹2999/month. Would you like to <a href=\"contact.html\">book a trial</a>?",
    },
    Rule {
        topic: Topic::FatLoss,
        keywords: &["fat"],
        template: "Bot: For fat loss we recommend HIIT + calorie deficit. See <a href=\"services.html\">Fat Loss</a>. Want to book?",
    },
    Rule {
        topic: Topic::MuscleGain,
        keywords: &["muscle"],
        template: "Bot: Muscle plan includes progressive overload and high protein. See <a href=\"services.html\">Muscle Gain</a>.",
    },
    Rule {
        topic: Topic::Yoga,
        keywords: &["yoga"],
        template: "Bot: Yoga classes are available weekly. See <a href=\"services.html\">Yoga</a>.",
    },
    Rule {
        topic: Topic::Trainer,
        keywords: &["trainer", "book", "session"],
        template: "Bot: You can book a trainer from the <a href=\"trainer.html\">Trainers</a> page. Which trainer or time do you prefer?",
    },
    Rule {
        topic: Topic::Greeting,
        keywords: &["hello", "hi", "hey"],
        template: "Bot: Hi! I can help with plans, prices, trainers, BMI & calories. Try: \"price\", \"bmi\", \"trainer\".",
    },
];

/// Reply used when no rule matches.
pub const FALLBACK_REPLY: &str = "Bot: Sorry, I did not understand. I can help with <strong>plans</strong>, <strong>bmi</strong>, <strong>calories</strong> or <strong>trainers</strong>.";

/// A classified bot reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Which rule produced the reply.
    pub topic: Topic,
    /// Reply body (may contain markup).
    pub html: String,
}

/// Classify `text` without building the reply body.
pub fn classify(text: &str) -> Topic {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map_or(Topic::Fallback, |rule| rule.topic)
}

/// Classify `text` and return the canned reply. Total: never fails.
pub fn reply(text: &str) -> Reply {
    let lowered = text.to_lowercase();
    match RULES.iter().find(|rule| rule.matches(&lowered)) {
        Some(rule) => Reply {
            topic: rule.topic,
            html: rule.template.to_string(),
        },
        None => Reply {
            topic: Topic::Fallback,
            html: FALLBACK_REPLY.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn single_keyword_topics() {
        assert_eq!(classify("my bmi?"), Topic::Bmi);
        assert_eq!(classify("how many calories"), Topic::Calories);
        assert_eq!(classify("burn"), Topic::Calories);
        assert_eq!(classify("what's the cost"), Topic::Pricing);
        assert_eq!(classify("lose fat"), Topic::FatLoss);
        assert_eq!(classify("build muscle"), Topic::MuscleGain);
        assert_eq!(classify("yoga"), Topic::Yoga);
        assert_eq!(classify("i need a trainer"), Topic::Trainer);
        assert_eq!(classify("hey"), Topic::Greeting);
        assert_eq!(classify("zzz"), Topic::Fallback);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("BMI HELP"), Topic::Bmi);
        assert_eq!(classify("Yoga Classes"), Topic::Yoga);
    }

    #[test]
    fn earlier_rule_wins_on_mixed_keywords() {
        // "bmi" is checked before "price" / "plan".
        assert_eq!(classify("price of bmi plan"), Topic::Bmi);
        assert_eq!(classify("burn fat fast"), Topic::Calories);
        assert_eq!(classify("fat loss plan"), Topic::Pricing);
        assert_eq!(classify("muscle and yoga"), Topic::MuscleGain);
        assert_eq!(classify("book a yoga session"), Topic::Yoga);
        assert_eq!(classify("hello trainer"), Topic::Trainer);
    }

    #[test]
    fn keywords_match_as_substrings() {
        // "hi" inside another word still counts as a greeting.
        assert_eq!(classify("shipping"), Topic::Greeting);
        assert_eq!(classify("bookings"), Topic::Trainer);
    }

    #[test]
    fn empty_text_falls_back() {
        let r = reply("");
        assert_eq!(r.topic, Topic::Fallback);
        assert_eq!(r.html, FALLBACK_REPLY);
    }

    #[test]
    fn reply_uses_rule_template() {
        let r = reply("bmi help");
        assert_eq!(r.topic, Topic::Bmi);
        assert!(r.html.contains("<a href=\"bmi.html\">BMI Calculator</a>"));
        assert!(reply("price").html.contains("₹2999/month"));
    }

    #[test]
    fn every_topic_but_fallback_has_one_rule() {
        for topic in Topic::iter().filter(|t| *t != Topic::Fallback) {
            assert_eq!(RULES.iter().filter(|r| r.topic == topic).count(), 1, "{topic}");
        }
        assert!(RULES.iter().all(|r| r.template.starts_with("Bot: ")));
    }
}
