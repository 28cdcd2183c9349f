//! The add/edit timer form session.
//!
//! Holds raw field values between open and submit, tracks which fields the
//! user has left, and commits to the store once the validator accepts.

use super::codec::{checked_encode, decode};
use super::validation::{MAX_TITLE_CHARS, TimerFormData, validate};
use crate::error::TimerError;
use crate::notify::Notifier;
use crate::screen::ScreenType;
use crate::store::{Timer, TimerFields, TimerStore};

pub const MAX_HOURS_INPUT: i64 = 23;
pub const MAX_MINUTES_INPUT: i64 = 59;
pub const MAX_SECONDS_INPUT: i64 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Hours,
    Minutes,
    Seconds,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub title: bool,
    pub hours: bool,
    pub minutes: bool,
    pub seconds: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(u32),
    Updated(u32),
    /// Validation failed; a notification was shown and nothing changed.
    Rejected,
    /// The form is not open.
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct TimerModal {
    open: bool,
    editing: Option<u32>,
    form: TimerFormData,
    touched: Touched,
}

/// Parse the leading integer of a numeric input. Anything unparsable is 0;
/// digit runs too long for `i64` saturate.
fn parse_leading_int(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let mut value: i64 = 0;
    for digit in digits.chars().map_while(|c| c.to_digit(10)) {
        let digit = i64::from(digit);
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

impl TimerModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for editing `timer`, or for a new timer when `None`.
    pub fn open(&mut self, timer: Option<&Timer>) {
        self.form = match timer {
            Some(timer) => {
                let (hours, minutes, seconds) = decode(timer.duration);
                TimerFormData {
                    title: timer.title.clone(),
                    description: timer.description.clone(),
                    hours,
                    minutes,
                    seconds,
                }
            }
            None => TimerFormData::default(),
        };
        self.editing = timer.map(|t| t.id);
        self.touched = Touched::default();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.touched = Touched::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    pub fn form(&self) -> &TimerFormData {
        &self.form
    }

    pub fn touched(&self) -> Touched {
        self.touched
    }

    pub fn set_title(&mut self, title: &str) {
        self.form.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.form.description = description.to_string();
    }

    pub fn input_hours(&mut self, raw: &str) {
        self.form.hours = parse_leading_int(raw).min(MAX_HOURS_INPUT);
    }

    pub fn input_minutes(&mut self, raw: &str) {
        self.form.minutes = parse_leading_int(raw).min(MAX_MINUTES_INPUT);
    }

    pub fn input_seconds(&mut self, raw: &str) {
        self.form.seconds = parse_leading_int(raw).min(MAX_SECONDS_INPUT);
    }

    pub fn blur(&mut self, field: Field) {
        match field {
            Field::Title => self.touched.title = true,
            Field::Hours => self.touched.hours = true,
            Field::Minutes => self.touched.minutes = true,
            Field::Seconds => self.touched.seconds = true,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit_mode() {
            "Edit Timer"
        } else {
            "Add New Timer"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit_mode() {
            "Save Changes"
        } else {
            "Add Timer"
        }
    }

    pub fn title_hint(&self) -> String {
        format!(
            "{}/{} characters",
            self.form.title.chars().count(),
            MAX_TITLE_CHARS
        )
    }

    fn title_valid(&self) -> bool {
        !self.form.title.trim().is_empty() && self.form.title.chars().count() <= MAX_TITLE_CHARS
    }

    fn time_valid(&self) -> bool {
        self.form.hours > 0 || self.form.minutes > 0 || self.form.seconds > 0
    }

    /// Inline hint under the title once the user has left the field.
    pub fn title_error(&self) -> Option<&'static str> {
        (self.touched.title && !self.title_valid())
            .then_some("Title is required and must be ≤ 50 characters")
    }

    /// Inline hint under the duration once every time field was visited.
    pub fn time_error(&self) -> Option<&'static str> {
        let all_touched = self.touched.hours && self.touched.minutes && self.touched.seconds;
        (all_touched && !self.time_valid()).then_some("Please set a duration greater than 0")
    }

    /// Validate and commit to the store. The modal closes on success.
    pub fn submit(
        &mut self,
        store: &mut TimerStore,
        screen: ScreenType,
        notifier: &dyn Notifier,
    ) -> Result<SubmitOutcome, TimerError> {
        if !self.open {
            return Ok(SubmitOutcome::Closed);
        }
        if !validate(&self.form, screen, notifier) {
            return Ok(SubmitOutcome::Rejected);
        }

        let duration = checked_encode(self.form.hours, self.form.minutes, self.form.seconds)
            .and_then(|total| u32::try_from(total).ok())
            .ok_or(TimerError::FormRejected)?;
        let fields = TimerFields {
            title: self.form.title.trim().to_string(),
            description: self.form.description.trim().to_string(),
            duration,
            remaining_time: duration,
            is_running: false,
        };

        let outcome = match self.editing {
            Some(id) => {
                store.edit_timer(id, fields)?;
                SubmitOutcome::Updated(id)
            }
            None => SubmitOutcome::Created(store.add_timer(fields)),
        };

        self.close();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), 12);
        assert_eq!(parse_leading_int("12abc"), 12);
        assert_eq!(parse_leading_int("1.5"), 1);
        assert_eq!(parse_leading_int("-3"), -3);
        assert_eq!(parse_leading_int(" +7"), 7);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("99999999999999999999"), i64::MAX);
        assert_eq!(parse_leading_int("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_overlong_input_clamps_to_field_max() {
        let mut modal = TimerModal::new();
        modal.open(None);
        modal.input_hours("99999999999999999999");
        modal.input_minutes("99999999999999999999");
        modal.input_seconds("99999999999999999999");
        assert_eq!(modal.form().hours, 23);
        assert_eq!(modal.form().minutes, 59);
        assert_eq!(modal.form().seconds, 59);
    }

    #[test]
    fn test_inputs_clamp_upper_bound_only() {
        let mut modal = TimerModal::new();
        modal.open(None);
        modal.input_hours("99");
        modal.input_minutes("75");
        modal.input_seconds("-4");
        assert_eq!(modal.form().hours, 23);
        assert_eq!(modal.form().minutes, 59);
        assert_eq!(modal.form().seconds, -4);
    }

    #[test]
    fn test_hints_need_touch() {
        let mut modal = TimerModal::new();
        modal.open(None);
        assert_eq!(modal.title_error(), None);
        modal.blur(Field::Title);
        assert!(modal.title_error().is_some());

        modal.blur(Field::Hours);
        modal.blur(Field::Minutes);
        assert_eq!(modal.time_error(), None);
        modal.blur(Field::Seconds);
        assert_eq!(
            modal.time_error(),
            Some("Please set a duration greater than 0")
        );
    }
}
