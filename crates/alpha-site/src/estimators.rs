//! BMI, calorie and trainer page bindings.
//!
//! Each form submission produces a [`ResultBox`]: the markup for the result
//! element and, for BMI, the chat preference behind the "Consult Trainer"
//! suggestion.

use alpha_models::{BmiReport, CalorieEstimate};

use crate::html::escape;
use crate::page::{Alert, SitePage};

/// Contents of a form's result element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBox {
    /// Markup to place in the result element.
    pub html: String,
    /// Preference for the "Consult Trainer" button, when one is offered.
    pub consult: Option<String>,
}

impl ResultBox {
    fn message(text: &str) -> Self {
        Self {
            html: escape(text),
            consult: None,
        }
    }
}

/// Handle a BMI form submission with raw field values.
pub fn bmi_form(weight: &str, height: &str) -> ResultBox {
    match BmiReport::from_input(weight, height) {
        Ok(report) => {
            let preference = report.category.consult_preference();
            let html = format!(
                "{}<div class=\"result-suggest\"><p>Suggestion: <button type=\"button\" data-chat-pref=\"{}\">Consult Trainer</button></p></div>",
                report.to_html(),
                escape(&preference),
            );
            ResultBox {
                html,
                consult: Some(preference),
            }
        }
        Err(e) => ResultBox::message(&e.to_string()),
    }
}

/// Handle a calorie form submission with raw field values.
pub fn calorie_form(activity: &str, minutes: &str) -> ResultBox {
    match CalorieEstimate::from_input(activity, minutes) {
        Ok(estimate) => ResultBox {
            html: estimate.to_html(),
            consult: None,
        },
        Err(e) => ResultBox::message(&e.to_string()),
    }
}

/// Chat preference sent by a trainer card's book button.
pub fn trainer_preference(trainer: &str) -> String {
    format!("Hi, I’d like to book a session with {trainer}.")
}

/// A trainer card's book button: hand the request to the chat, or alert
/// when the page has no chat.
///
/// # Errors
///
/// An [`Alert`] naming the trainer when no chat widget is mounted.
pub fn book_trainer(page: &SitePage, trainer: &str) -> Result<(), Alert> {
    page.open_chat(&trainer_preference(trainer))
        .map_err(|_| Alert(format!("Booking request for {trainer}.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_sdk::AlphaClient;

    #[test]
    fn bmi_success_offers_consult() {
        let out = bmi_form("95", "1.78");
        assert!(out.html.starts_with("<strong>BMI:</strong> 29.98<br><strong>Category:</strong> Overweight"));
        assert!(out.html.contains("Consult Trainer"));
        assert_eq!(out.consult.as_deref(), Some("overweight"));
    }

    #[test]
    fn bmi_invalid_input_has_no_category() {
        for (w, h) in [("0", "1.7"), ("-70", "1.7"), ("abc", "1.7"), ("70", "")] {
            let out = bmi_form(w, h);
            assert_eq!(out.html, "Please enter valid weight and height.");
            assert_eq!(out.consult, None);
        }
    }

    #[test]
    fn calorie_results() {
        assert_eq!(
            calorie_form("running", "30").html,
            "<strong>Estimated calories burned:</strong> 300 kcal"
        );
        assert_eq!(
            calorie_form("unknownX", "10").html,
            "<strong>Estimated calories burned:</strong> 60 kcal"
        );
        let invalid = calorie_form("running", "0");
        assert_eq!(invalid.html, "Please enter duration in minutes (greater than 0).");
        assert!(!invalid.html.contains("kcal"));
    }

    #[test]
    fn trainer_without_chat_alerts() {
        let page = SitePage::new(AlphaClient::new("http://localhost:5000").unwrap(), None);
        assert_eq!(
            book_trainer(&page, "Rahul"),
            Err(Alert("Booking request for Rahul.".into()))
        );
        assert_eq!(
            trainer_preference("Rahul"),
            "Hi, I’d like to book a session with Rahul."
        );
    }
}
