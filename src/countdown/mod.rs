//! Drives running timers down one second at a time.

pub mod alert;
pub mod audio;

use crate::form::codec::format_clock;
use crate::notify::Notifier;
use crate::platform::AppPaths;
use crate::screen::ScreenType;
use crate::state::{LocalStorage, with_store_lock};
use crate::store::{Timer, TimerStore};
use anyhow::{Context, Result};
use audio::AudioCue;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

pub struct Countdown<'a> {
    storage: LocalStorage,
    lock_path: PathBuf,
    notifier: &'a dyn Notifier,
    audio: &'a dyn AudioCue,
    screen: ScreenType,
    show_progress: bool,
}

impl<'a> Countdown<'a> {
    pub fn new(
        paths: &AppPaths,
        notifier: &'a dyn Notifier,
        audio: &'a dyn AudioCue,
        screen: ScreenType,
    ) -> Self {
        Self {
            storage: LocalStorage::new(paths.storage_file()),
            lock_path: paths.lock_file(),
            notifier,
            audio,
            screen,
            show_progress: false,
        }
    }

    /// Redraw a status line on stdout after every tick.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Advance one second and alert for every timer that ended.
    ///
    /// The tick is applied to the stored timers under the lock, so edits
    /// made by other commands in the meantime survive. `store` is replaced
    /// with the saved result.
    pub fn step(&self, store: &mut TimerStore) -> Vec<Timer> {
        if !store.has_running() {
            return Vec::new();
        }

        let finished = self.update(store, TimerStore::tick);

        for timer in &finished {
            if self.show_progress {
                println!();
            }
            alert::timer_ended(
                timer,
                Some(self.screen.toast_position()),
                self.notifier,
                self.audio,
            );
        }
        finished
    }

    /// Tick until nothing is running. Ctrl-C pauses whatever is still
    /// running and saves it.
    pub async fn run(&self, store: &mut TimerStore) -> Result<Vec<Timer>> {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately
        interval.tick().await;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut finished = Vec::new();
        while store.has_running() {
            tokio::select! {
                _ = interval.tick() => {
                    finished.extend(self.step(store));
                    if self.show_progress {
                        print_progress(store);
                    }
                }
                signal = &mut ctrl_c => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    self.update(store, TimerStore::pause_all);
                    if self.show_progress {
                        println!();
                    }
                    tracing::info!("countdown interrupted, running timers paused");
                    break;
                }
            }
        }

        Ok(finished)
    }

    /// Apply `change` to the stored timers and adopt the result. When
    /// storage is unavailable the change is applied in memory only.
    fn update<R>(&self, store: &mut TimerStore, change: fn(&mut TimerStore) -> R) -> R {
        let saved = with_store_lock(&self.lock_path, &self.storage, |current| {
            let value = change(current);
            Ok((value, current.clone()))
        });
        match saved {
            Ok((value, current)) => {
                *store = current;
                value
            }
            Err(err) => {
                tracing::error!(
                    path = %self.storage.path().display(),
                    "Failed to save timers to local storage: {:#}",
                    err
                );
                change(store)
            }
        }
    }
}

fn print_progress(store: &TimerStore) {
    let line = store
        .timers()
        .iter()
        .filter(|t| t.is_running)
        .map(|t| format!("{} {}", format_clock(t.remaining_time), t.title))
        .collect::<Vec<_>>()
        .join("  |  ");
    if line.is_empty() {
        return;
    }
    let mut stdout = std::io::stdout();
    if let Err(err) = write!(stdout, "\r\x1b[2K{}", line).and_then(|_| stdout.flush()) {
        tracing::debug!("Failed to draw countdown progress: {}", err);
    }
}
