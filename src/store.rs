//! The timer collection and the actions that mutate it.

use crate::error::TimerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: u32,
    pub remaining_time: u32,
    #[serde(default)]
    pub is_running: bool,
}

impl Timer {
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }
}

/// Everything about a timer except its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFields {
    pub title: String,
    pub description: String,
    pub duration: u32,
    pub remaining_time: u32,
    pub is_running: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerStore {
    timers: Vec<Timer>,
}

impl TimerStore {
    pub fn new(timers: Vec<Timer>) -> Self {
        Self { timers }
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn get(&self, id: u32) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Timer, TimerError> {
        self.timers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TimerError::NotFound(id))
    }

    pub fn has_running(&self) -> bool {
        self.timers.iter().any(|t| t.is_running)
    }

    /// Append a timer and return its id.
    pub fn add_timer(&mut self, fields: TimerFields) -> u32 {
        let id = self.timers.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.timers.push(Timer {
            id,
            title: fields.title,
            description: fields.description,
            duration: fields.duration,
            remaining_time: fields.remaining_time,
            is_running: fields.is_running,
        });
        tracing::info!(id, "timer added");
        id
    }

    pub fn edit_timer(&mut self, id: u32, fields: TimerFields) -> Result<(), TimerError> {
        let timer = self.get_mut(id)?;
        timer.title = fields.title;
        timer.description = fields.description;
        timer.duration = fields.duration;
        timer.remaining_time = fields.remaining_time;
        timer.is_running = fields.is_running;
        tracing::info!(id, "timer edited");
        Ok(())
    }

    pub fn delete_timer(&mut self, id: u32) -> Result<Timer, TimerError> {
        let index = self
            .timers
            .iter()
            .position(|t| t.id == id)
            .ok_or(TimerError::NotFound(id))?;
        tracing::info!(id, "timer deleted");
        Ok(self.timers.remove(index))
    }

    /// Start counting down. A finished timer starts over from its duration.
    pub fn start_timer(&mut self, id: u32) -> Result<(), TimerError> {
        let timer = self.get_mut(id)?;
        if timer.is_finished() {
            timer.remaining_time = timer.duration;
        }
        timer.is_running = true;
        Ok(())
    }

    pub fn pause_timer(&mut self, id: u32) -> Result<(), TimerError> {
        self.get_mut(id)?.is_running = false;
        Ok(())
    }

    pub fn pause_all(&mut self) {
        for timer in self.timers.iter_mut() {
            timer.is_running = false;
        }
    }

    /// Reset to the full duration and stop.
    pub fn restart_timer(&mut self, id: u32) -> Result<(), TimerError> {
        let timer = self.get_mut(id)?;
        timer.remaining_time = timer.duration;
        timer.is_running = false;
        Ok(())
    }

    /// Advance every running timer by one second and return the ones that
    /// reached zero.
    pub fn tick(&mut self) -> Vec<Timer> {
        let mut finished = Vec::new();
        for timer in self.timers.iter_mut().filter(|t| t.is_running) {
            timer.remaining_time = timer.remaining_time.saturating_sub(1);
            if timer.remaining_time == 0 {
                timer.is_running = false;
                finished.push(timer.clone());
            }
        }
        finished
    }
}
