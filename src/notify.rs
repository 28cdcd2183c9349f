//! Toast-style user notifications.
//!
//! A [`Toast`] carries a message, a screen placement and an optional action
//! button. Front ends implement [`Notifier`]: the terminal renders toasts on
//! stderr, tests record them in memory.

use crate::countdown::audio::AudioCue;
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Label of the action attached to every validation error.
pub const CLOSE_LABEL: &str = "Close";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToastLevel {
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopRight,
    BottomCenter,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::TopRight => "top-right",
            Position::BottomCenter => "bottom-center",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when the toast's action button is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToastEffect {
    /// Clear visible notifications.
    Dismiss,
    /// Silence the end-of-timer sound.
    StopAudio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastAction {
    pub label: String,
    pub effect: ToastEffect,
}

impl ToastAction {
    pub fn new(label: &str, effect: ToastEffect) -> Self {
        Self {
            label: label.to_string(),
            effect,
        }
    }

    /// Apply the action's effect.
    pub fn click(&self, notifier: &dyn Notifier, audio: &dyn AudioCue) {
        match self.effect {
            ToastEffect::Dismiss => notifier.dismiss(),
            ToastEffect::StopAudio => audio.stop(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub position: Position,
    pub action: Option<ToastAction>,
    /// Persistent toasts stay until dismissed instead of timing out.
    pub persistent: bool,
}

impl Toast {
    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
            position,
            action: None,
            persistent: false,
        }
    }

    pub fn success(message: impl Into<String>, position: Position) -> Self {
        Self {
            level: ToastLevel::Success,
            ..Self::error(message, position)
        }
    }

    pub fn with_action(mut self, label: &str, effect: ToastEffect) -> Self {
        self.action = Some(ToastAction::new(label, effect));
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Lay the toast out on a line `columns` wide according to its position.
    pub fn render(&self, columns: usize) -> String {
        let icon = match self.level {
            ToastLevel::Error => "❌",
            ToastLevel::Success => "✅",
        };
        let mut body = format!("{} {}", icon, self.message);
        if let Some(action) = &self.action {
            body.push_str(&format!("  [{}]", action.label));
        }

        match self.position {
            Position::TopRight => format!("{:>width$}", body, width = columns),
            Position::BottomCenter => format!("{:^width$}", body, width = columns)
                .trim_end()
                .to_string(),
        }
    }
}

pub trait Notifier {
    fn show(&self, toast: Toast);
    fn dismiss(&self);
}

/// Prints toasts to stderr, aligned to the terminal width.
pub struct TerminalNotifier {
    columns: usize,
}

impl TerminalNotifier {
    pub fn new(columns: usize) -> Self {
        Self { columns }
    }

    /// Use `COLUMNS` when the shell exports it, 80 otherwise.
    pub fn from_env() -> Self {
        let columns = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.trim().parse().ok())
            .filter(|c: &usize| *c > 0)
            .unwrap_or(80);
        Self::new(columns)
    }
}

impl Notifier for TerminalNotifier {
    fn show(&self, toast: Toast) {
        tracing::debug!(
            level = ?toast.level,
            position = %toast.position,
            "toast: {}",
            toast.message
        );
        eprintln!("{}", toast.render(self.columns));
    }

    fn dismiss(&self) {
        tracing::debug!("notifications dismissed");
    }
}

/// Keeps every toast in memory so emission can be inspected without a
/// terminal.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
    dismissals: AtomicUsize,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().pop()
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals.load(Ordering::SeqCst)
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(toast);
    }

    fn dismiss(&self) {
        self.dismissals.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_right_is_right_aligned() {
        let toast = Toast::error("Oops", Position::TopRight);
        let line = toast.render(20);
        assert!(line.ends_with("❌ Oops"));
        assert_eq!(line.chars().count(), 20);
    }

    #[test]
    fn test_bottom_center_is_centered() {
        let toast = Toast::error("Oops", Position::BottomCenter);
        let line = toast.render(20);
        assert!(line.starts_with("       "));
        assert!(line.ends_with("❌ Oops"));
    }

    #[test]
    fn test_action_label_rendered() {
        let toast =
            Toast::error("Bad", Position::TopRight).with_action(CLOSE_LABEL, ToastEffect::Dismiss);
        assert!(toast.render(0).ends_with("[Close]"));
    }

    #[test]
    fn test_long_message_is_not_truncated() {
        let toast = Toast::success("a very long message indeed", Position::BottomCenter);
        assert_eq!(toast.render(5), "✅ a very long message indeed");
    }

    #[test]
    fn test_recording_notifier_counts_dismissals() {
        let notifier = RecordingNotifier::new();
        let toast =
            Toast::error("x", Position::TopRight).with_action(CLOSE_LABEL, ToastEffect::Dismiss);
        notifier.show(toast.clone());

        let audio = crate::countdown::audio::SilentAudio::default();
        toast.action.as_ref().unwrap().click(&notifier, &audio);

        assert_eq!(notifier.toasts().len(), 1);
        assert_eq!(notifier.dismissals(), 1);
    }

    #[test]
    fn test_position_names() {
        assert_eq!(Position::TopRight.to_string(), "top-right");
        assert_eq!(Position::BottomCenter.to_string(), "bottom-center");
    }
}
