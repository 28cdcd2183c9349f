use super::audio::AudioCue;
use crate::notify::{Notifier, Position, Toast, ToastEffect};
use crate::store::Timer;

pub const DISMISS_LABEL: &str = "Dismiss";

/// Sound the cue and show a toast that stays until dismissed.
pub fn timer_ended(
    timer: &Timer,
    position: Option<Position>,
    notifier: &dyn Notifier,
    audio: &dyn AudioCue,
) {
    if let Err(err) = audio.play() {
        tracing::error!("Failed to play timer sound: {:#}", err);
    }

    tracing::info!(id = timer.id, "timer ended");
    notifier.show(
        Toast::success(
            format!("Timer \"{}\" has ended!", timer.title),
            position.unwrap_or(Position::TopRight),
        )
        .persistent()
        .with_action(DISMISS_LABEL, ToastEffect::StopAudio),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::audio::SilentAudio;
    use crate::notify::{RecordingNotifier, ToastLevel};

    fn finished_timer() -> Timer {
        Timer {
            id: 4,
            title: "Tea".to_string(),
            description: String::new(),
            duration: 180,
            remaining_time: 0,
            is_running: false,
        }
    }

    #[test]
    fn test_end_toast_defaults_to_top_right() {
        let notifier = RecordingNotifier::new();
        let audio = SilentAudio::default();

        timer_ended(&finished_timer(), None, &notifier, &audio);

        let toast = notifier.last().unwrap();
        assert_eq!(toast.level, ToastLevel::Success);
        assert_eq!(toast.message, "Timer \"Tea\" has ended!");
        assert_eq!(toast.position, Position::TopRight);
        assert!(toast.persistent);
        assert_eq!(audio.plays(), 1);
    }

    #[test]
    fn test_dismiss_stops_audio() {
        let notifier = RecordingNotifier::new();
        let audio = SilentAudio::default();

        timer_ended(
            &finished_timer(),
            Some(Position::BottomCenter),
            &notifier,
            &audio,
        );
        let toast = notifier.last().unwrap();
        assert_eq!(toast.position, Position::BottomCenter);

        let action = toast.action.unwrap();
        assert_eq!(action.label, "Dismiss");
        action.click(&notifier, &audio);
        assert!(!audio.is_playing());
        assert_eq!(notifier.dismissals(), 0);
    }
}
