//! Deferred and repeating actions
//!
//! Tasks are polled once at the end of every frame. Each carries its own exit
//! condition; nothing cancels a task from outside except replacing it.

use serde::{Deserialize, Serialize};

/// Flags a task may read and change while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskContext {
    pub paused: bool,
    pub playing: bool,
}

/// Shortest sprite interval honoured; keeps a zero interval from spinning
pub const MIN_SPRITE_INTERVAL: f32 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Task {
    /// Set the pause flag on the next poll
    DeferredPause { value: bool },
    /// Advance the sprite every `interval` seconds until play stops
    SpriteCadence { until_next: f32, interval: f32 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Set the pause flag on the next poll; replaces a pending flip
    pub fn defer_pause(&mut self, value: bool) {
        self.cancel_deferred_pause();
        self.tasks.push(Task::DeferredPause { value });
    }

    /// Drop pending pause flips (an immediate pause overrides them)
    pub fn cancel_deferred_pause(&mut self) {
        self.tasks
            .retain(|t| !matches!(t, Task::DeferredPause { .. }));
    }

    /// Start a fresh sprite cadence, replacing any running one.
    /// The first frame advances on the next poll.
    pub fn start_sprite_cadence(&mut self, interval: f32) {
        self.tasks
            .retain(|t| !matches!(t, Task::SpriteCadence { .. }));
        self.tasks.push(Task::SpriteCadence {
            until_next: 0.0,
            interval: interval.max(MIN_SPRITE_INTERVAL),
        });
    }

    pub fn has_sprite_cadence(&self) -> bool {
        self.tasks
            .iter()
            .any(|t| matches!(t, Task::SpriteCadence { .. }))
    }

    /// Run every task once, in the order they were scheduled.
    /// `dt` is real frame time; `on_sprite` fires once per sprite advance.
    pub fn poll(&mut self, ctx: &mut TaskContext, dt: f32, mut on_sprite: impl FnMut()) {
        self.tasks.retain_mut(|task| match task {
            Task::DeferredPause { value } => {
                ctx.paused = *value;
                false
            }
            Task::SpriteCadence {
                until_next,
                interval,
            } => {
                if ctx.paused || !ctx.playing {
                    return false;
                }
                while *until_next <= 0.0 {
                    on_sprite();
                    *until_next += *interval;
                }
                *until_next -= dt;
                true
            }
        });
    }
}
