use crate::OutputFormat;
use crate::config::Config;
use crate::countdown::Countdown;
use crate::countdown::audio::{AudioCue, TimerAudio};
use crate::error::TimerError;
use crate::form::codec::format_clock;
use crate::form::{Field, SubmitOutcome, TimerModal};
use crate::notify::Notifier;
use crate::platform::AppPaths;
use crate::screen::ScreenType;
use crate::state::{LocalStorage, load_timers, with_store_lock};
use crate::store::{Timer, TimerStore};
use anyhow::{Context, Result};

/// Raw form values as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub hours: Option<String>,
    pub minutes: Option<String>,
    pub seconds: Option<String>,
}

fn paths(config: &Config) -> Result<AppPaths> {
    AppPaths::resolve(config.storage.state_dir_override.as_deref())
}

/// Run `f` against the stored timers under the storage lock.
fn locked<F, R>(config: &Config, f: F) -> Result<R>
where
    F: FnOnce(&mut TimerStore) -> Result<R>,
{
    let paths = paths(config)?;
    with_store_lock(&paths.lock_file(), &LocalStorage::new(paths.storage_file()), f)
}

fn load(config: &Config) -> Result<TimerStore> {
    load_timers(&LocalStorage::new(paths(config)?.storage_file()))
}

fn fill(modal: &mut TimerModal, input: &FormInput) {
    if let Some(title) = &input.title {
        modal.set_title(title);
        modal.blur(Field::Title);
    }
    if let Some(description) = &input.description {
        modal.set_description(description);
    }
    if let Some(hours) = &input.hours {
        modal.input_hours(hours);
        modal.blur(Field::Hours);
    }
    if let Some(minutes) = &input.minutes {
        modal.input_minutes(minutes);
        modal.blur(Field::Minutes);
    }
    if let Some(seconds) = &input.seconds {
        modal.input_seconds(seconds);
        modal.blur(Field::Seconds);
    }
}

fn status(timer: &Timer) -> &'static str {
    if timer.is_running {
        "running"
    } else if timer.is_finished() {
        "finished"
    } else if timer.remaining_time < timer.duration {
        "paused"
    } else {
        "ready"
    }
}

fn submit(
    modal: &mut TimerModal,
    store: &mut TimerStore,
    screen: ScreenType,
    notifier: &dyn Notifier,
) -> Result<u32> {
    tracing::debug!(heading = modal.heading(), action = modal.submit_label(), "submitting form");
    match modal.submit(store, screen, notifier)? {
        SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => Ok(id),
        SubmitOutcome::Rejected => Err(TimerError::FormRejected.into()),
        SubmitOutcome::Closed => anyhow::bail!("Timer form is not open"),
    }
}

pub fn add(
    config: &Config,
    screen: ScreenType,
    input: &FormInput,
    notifier: &dyn Notifier,
) -> Result<u32> {
    let id = locked(config, |store| {
        let mut modal = TimerModal::new();
        modal.open(None);
        fill(&mut modal, input);
        submit(&mut modal, store, screen, notifier)
    })?;

    println!("✓ Added timer {}", id);
    Ok(id)
}

pub fn edit(
    config: &Config,
    screen: ScreenType,
    id: u32,
    input: &FormInput,
    notifier: &dyn Notifier,
) -> Result<()> {
    locked(config, |store| {
        let timer = store.get(id).cloned().ok_or(TimerError::NotFound(id))?;
        let mut modal = TimerModal::new();
        modal.open(Some(&timer));
        fill(&mut modal, input);
        submit(&mut modal, store, screen, notifier)
    })?;

    println!("✓ Updated timer {}", id);
    Ok(())
}

pub fn delete(config: &Config, id: u32) -> Result<()> {
    let removed = locked(config, |store| Ok(store.delete_timer(id)?))?;

    println!("✓ Deleted timer {}: {}", removed.id, removed.title);
    Ok(())
}

pub fn start(config: &Config, id: u32) -> Result<()> {
    locked(config, |store| Ok(store.start_timer(id)?))?;
    println!("✓ Started timer {}. Run 'cdt run' to count down.", id);
    Ok(())
}

pub fn pause(config: &Config, id: u32) -> Result<()> {
    locked(config, |store| Ok(store.pause_timer(id)?))?;
    println!("✓ Paused timer {}", id);
    Ok(())
}

pub fn reset(config: &Config, id: u32) -> Result<()> {
    locked(config, |store| Ok(store.restart_timer(id)?))?;
    println!("✓ Reset timer {}", id);
    Ok(())
}

pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let store = load(config)?;

    if let OutputFormat::Json = format {
        let json =
            serde_json::to_string_pretty(store.timers()).context("Failed to serialize timers")?;
        println!("{}", json);
        return Ok(());
    }

    if store.timers().is_empty() {
        println!("No timers. Add one with 'cdt add --title <TITLE> --minutes <M>'.");
        return Ok(());
    }

    println!(
        "{:<5} {:<50} {:<10} {:<10} {:<8}",
        "ID", "Title", "Duration", "Remaining", "Status"
    );
    println!("{}", "-".repeat(87));
    for timer in store.timers() {
        println!(
            "{:<5} {:<50} {:<10} {:<10} {:<8}",
            timer.id,
            timer.title,
            format_clock(timer.duration),
            format_clock(timer.remaining_time),
            status(timer)
        );
    }

    Ok(())
}

pub fn show(config: &Config, id: u32) -> Result<()> {
    let store = load(config)?;
    let timer = store.get(id).ok_or(TimerError::NotFound(id))?;

    println!("Timer {}", timer.id);
    println!("  Title: {}", timer.title);
    if !timer.description.is_empty() {
        println!("  Description: {}", timer.description);
    }
    println!("  Duration: {}", format_clock(timer.duration));
    println!("  Remaining: {}", format_clock(timer.remaining_time));
    println!("  Status: {}", status(timer));
    Ok(())
}

/// Start `ids` (if any) and count down every running timer in the
/// foreground.
pub async fn run(
    config: &Config,
    screen: ScreenType,
    ids: &[u32],
    notifier: &dyn Notifier,
) -> Result<()> {
    let mut store = locked(config, |store| {
        for id in ids {
            store.start_timer(*id)?;
        }
        Ok(store.clone())
    })?;

    if !store.has_running() {
        println!("No running timers. Start one with 'cdt run <ID>'.");
        return Ok(());
    }

    let now = chrono::Local::now();
    for timer in store.timers().iter().filter(|t| t.is_running) {
        let ends_at = now + chrono::Duration::seconds(i64::from(timer.remaining_time));
        println!("⏱  {} ends at {}", timer.title, ends_at.format("%H:%M:%S"));
    }

    let audio = TimerAudio::instance();
    audio.set_enabled(config.alerts.sound);

    let countdown = Countdown::new(&paths(config)?, notifier, audio, screen).with_progress(true);
    let finished = countdown.run(&mut store).await?;
    audio.stop();

    tracing::info!(finished = finished.len(), "countdown complete");
    Ok(())
}
