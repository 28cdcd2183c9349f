use super::codec::checked_encode;
use crate::notify::{CLOSE_LABEL, Notifier, Toast, ToastEffect};
use crate::screen::ScreenType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 50;
pub const MAX_DURATION_SECS: i64 = 86_400;

/// Field values of the timer form while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerFormData {
    pub title: String,
    pub description: String,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// The first rule a form violates. `Display` is the user-facing message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be less than 50 characters")]
    TitleTooLong,
    #[error("Time values cannot be negative")]
    NegativeTime,
    #[error("Minutes and seconds must be between 0 and 59")]
    FieldOutOfRange,
    #[error("Please set a time greater than 0")]
    ZeroDuration,
    #[error("Timer cannot exceed 24 hours")]
    DurationTooLong,
}

/// Evaluate the rules in order and return the encoded duration in seconds.
pub fn check(form: &TimerFormData) -> Result<u32, ValidationError> {
    let TimerFormData {
        title,
        hours,
        minutes,
        seconds,
        ..
    } = form;

    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    if *hours < 0 || *minutes < 0 || *seconds < 0 {
        return Err(ValidationError::NegativeTime);
    }
    if *minutes > 59 || *seconds > 59 {
        return Err(ValidationError::FieldOutOfRange);
    }

    // A total too large for i64 is certainly over the limit
    let total =
        checked_encode(*hours, *minutes, *seconds).ok_or(ValidationError::DurationTooLong)?;
    if total == 0 {
        return Err(ValidationError::ZeroDuration);
    }
    if total > MAX_DURATION_SECS {
        return Err(ValidationError::DurationTooLong);
    }

    u32::try_from(total).map_err(|_| ValidationError::DurationTooLong)
}

/// Validate the form, showing one dismissible error toast on failure.
pub fn validate(form: &TimerFormData, screen: ScreenType, notifier: &dyn Notifier) -> bool {
    match check(form) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(rule = ?err, "timer form rejected");
            notifier.show(
                Toast::error(err.to_string(), screen.toast_position())
                    .with_action(CLOSE_LABEL, ToastEffect::Dismiss),
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, hours: i64, minutes: i64, seconds: i64) -> TimerFormData {
        TimerFormData {
            title: title.to_string(),
            description: String::new(),
            hours,
            minutes,
            seconds,
        }
    }

    #[test]
    fn test_check_returns_duration() {
        assert_eq!(check(&form("Tea", 0, 3, 0)), Ok(180));
        assert_eq!(check(&form("Day", 24, 0, 0)), Ok(86_400));
    }

    #[test]
    fn test_whitespace_title_is_required() {
        assert_eq!(check(&form("   \t", 1, 0, 0)), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_title_length_counts_untrimmed_chars() {
        let padded = format!(" {} ", "a".repeat(49));
        assert_eq!(check(&form(&padded, 1, 0, 0)), Err(ValidationError::TitleTooLong));
        assert!(check(&form(&"é".repeat(50), 1, 0, 0)).is_ok());
    }

    #[test]
    fn test_huge_hours_do_not_wrap() {
        assert_eq!(
            check(&form("Hello", i64::MAX / 1000, 0, 0)),
            Err(ValidationError::DurationTooLong)
        );
        assert_eq!(
            check(&form("Hello", (1 << 60) + 1, 0, 0)),
            Err(ValidationError::DurationTooLong)
        );
    }

    #[test]
    fn test_hours_have_no_field_range_check() {
        assert_eq!(
            check(&form("Long", 30, 0, 0)),
            Err(ValidationError::DurationTooLong)
        );
    }
}
