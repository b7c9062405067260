//! Payload validation shared by create and update.
//!
//! Rules run in a fixed order and the first violation short-circuits; only
//! its message is surfaced.

use serde_json::Value;

use crate::error::CoreError;
use crate::presence::Presence;
use crate::record::{RecordFields, RecordInput};

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2100;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 10;

pub const MSG_TITLE_REQUIRED: &str = "Title is required.";
pub const MSG_TYPE_REQUIRED: &str = "Type is required.";
pub const MSG_GENRE_REQUIRED: &str = "Genre is required.";
pub const MSG_YEAR_NOT_WHOLE: &str = "Year must be a whole number.";
pub const MSG_YEAR_RANGE: &str = "Year must be between 1900 and 2100.";
pub const MSG_STATUS_REQUIRED: &str = "Status is required.";
pub const MSG_RATING_NOT_WHOLE: &str = "Rating must be a whole number.";
pub const MSG_RATING_RANGE: &str = "Rating must be between 1 and 10.";
pub const MSG_IMAGE_URL_REQUIRED: &str = "Image URL is required.";

/// Deployment-dependent switches for the rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// When set, `image_url` must be a non-empty string.
    pub require_image_url: bool,
}

impl RecordInput {
    /// Validate and normalize the payload.
    ///
    /// Order: title, type, genre, year, status, rating, image_url.
    pub fn validate(&self, rules: &ValidationRules) -> Result<RecordFields, CoreError> {
        let title = required_text(&self.title, MSG_TITLE_REQUIRED)?;
        let record_type = required_text(&self.record_type, MSG_TYPE_REQUIRED)?;
        let genre = required_text(&self.genre, MSG_GENRE_REQUIRED)?;

        let year = self
            .year
            .as_value()
            .and_then(whole_number)
            .ok_or_else(|| invalid(MSG_YEAR_NOT_WHOLE))?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid(MSG_YEAR_RANGE));
        }

        let status = required_text(&self.status, MSG_STATUS_REQUIRED)?;

        let rating = match rating_value(&self.rating) {
            None => None,
            Some(raw) => {
                let rating = whole_number(raw).ok_or_else(|| invalid(MSG_RATING_NOT_WHOLE))?;
                if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                    return Err(invalid(MSG_RATING_RANGE));
                }
                Some(rating as i32)
            }
        };

        let image_url = optional_text(&self.image_url);
        if rules.require_image_url && image_url.is_none() {
            return Err(invalid(MSG_IMAGE_URL_REQUIRED));
        }

        Ok(RecordFields {
            title,
            record_type,
            genre,
            year: year as i32,
            rating,
            status,
            notes: optional_text(&self.notes).unwrap_or_default(),
            image_url,
        })
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::Validation(message.to_string())
}

/// Trimmed, non-empty string content of a field. Non-strings count as absent.
fn optional_text(field: &Presence<Value>) -> Option<String> {
    match field.as_value() {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn required_text(field: &Presence<Value>, message: &str) -> Result<String, CoreError> {
    optional_text(field).ok_or_else(|| invalid(message))
}

/// A rating that is omitted, `null` or a blank string means "no rating".
fn rating_value(field: &Presence<Value>) -> Option<&Value> {
    match field.as_value() {
        Some(Value::String(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

/// Interpret a JSON value as a whole number.
///
/// Accepts integers, floats without a fractional part, and strings holding
/// an integer literal.
fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
