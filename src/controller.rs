//! Session controller.
//!
//! Owns every piece of mutable session state (the task store, the wallpaper
//! configuration, the entitlement, the active screen and the sweep timer) and
//! applies user actions to it. The TUI only translates key presses into calls
//! on this type and renders what it exposes.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::notify::{Notification, Notifier};
use crate::preview::{self, DashboardRow, Preview};
use crate::store::TaskStore;
use crate::task::{ClockTime, Task, TaskDraft, ValidationError};
use crate::timer::SweepTimer;
use crate::wallpaper::{Entitlement, Setting, SettingError, WallpaperConfig};

/// The three top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Edit,
    Wallpaper,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Dashboard, Screen::Edit, Screen::Wallpaper];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Edit => "Edit Task",
            Screen::Wallpaper => "Wallpaper",
        }
    }
}

/// Result of submitting the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Added(Task),
    Updated(Task),
    /// The task being edited was deleted before the form was submitted.
    Vanished(u64),
}

pub struct Controller<N: Notifier> {
    store: TaskStore,
    config: WallpaperConfig,
    entitlement: Entitlement,
    screen: Screen,
    editing: Option<Task>,
    timer: SweepTimer,
    notifier: N,
}

impl<N: Notifier> Controller<N> {
    pub fn new(store: TaskStore, config: WallpaperConfig, sweep_interval: Duration, notifier: N) -> Self {
        Self {
            store,
            config,
            entitlement: Entitlement::default(),
            screen: Screen::Dashboard,
            editing: None,
            timer: SweepTimer::new(sweep_interval),
            notifier,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn config(&self) -> &WallpaperConfig {
        &self.config
    }

    pub fn entitlement(&self) -> &Entitlement {
        &self.entitlement
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The task attached to the edit screen; `None` means a new task.
    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn timer(&self) -> &SweepTimer {
        &self.timer
    }

    pub fn dashboard(&self) -> Vec<DashboardRow<'_>> {
        preview::dashboard(self.store.tasks())
    }

    pub fn preview(&self) -> Preview<'_> {
        preview::preview(self.store.tasks(), &self.config, &self.entitlement)
    }

    /// Open the edit screen with an empty form.
    pub fn begin_add(&mut self) {
        self.editing = None;
        self.screen = Screen::Edit;
    }

    /// Open the edit screen for an existing task. Returns false if it does not exist.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(task) = self.store.get(id) else {
            return false;
        };
        self.editing = Some(task.clone());
        self.screen = Screen::Edit;
        true
    }

    /// Submit the edit form and return to the dashboard.
    ///
    /// A draft that fails validation leaves everything untouched, including
    /// the active screen.
    pub fn save(&mut self, draft: &TaskDraft) -> Result<SaveOutcome, ValidationError> {
        let input = draft.validate()?;
        let outcome = match self.editing.take() {
            Some(original) => {
                let edited = Task {
                    id: original.id,
                    title: input.title,
                    time: input.time.to_string(),
                    priority: input.priority,
                    category: input.category,
                    completed: original.completed,
                };
                match self.store.update(edited) {
                    Some(task) => SaveOutcome::Updated(task.clone()),
                    None => {
                        warn!(task_id = original.id, "edited task no longer exists");
                        SaveOutcome::Vanished(original.id)
                    }
                }
            }
            None => SaveOutcome::Added(self.store.add(input)),
        };
        match &outcome {
            SaveOutcome::Added(task) => self.notifier.notify(Notification::new(
                "Task added",
                format!("Successfully added \"{}\"", task.title),
            )),
            SaveOutcome::Updated(task) => self.notifier.notify(Notification::new(
                "Task updated",
                format!("Successfully updated \"{}\"", task.title),
            )),
            SaveOutcome::Vanished(_) => {}
        }
        self.screen = Screen::Dashboard;
        Ok(outcome)
    }

    /// Leave the edit screen, discarding the form.
    pub fn cancel(&mut self) {
        self.editing = None;
        self.screen = Screen::Dashboard;
    }

    /// Jump straight to a screen.
    pub fn select_screen(&mut self, screen: Screen) {
        debug!(?screen, "screen selected");
        self.screen = screen;
    }

    pub fn toggle_complete(&mut self, id: u64) -> Option<bool> {
        self.store.toggle_complete(id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Task> {
        self.store.remove(id)
    }

    /// Change one wallpaper setting, subject to the entitlement.
    ///
    /// Turning auto-update off cancels the pending sweep immediately.
    pub fn set_setting(&mut self, setting: Setting) -> Result<(), SettingError> {
        self.config.set(setting, &self.entitlement)?;
        if !self.config.auto_update {
            self.timer.disarm();
        }
        Ok(())
    }

    /// Returns true if this call performed the upgrade.
    pub fn upgrade(&mut self) -> bool {
        let upgraded = self.entitlement.upgrade();
        if upgraded {
            self.notifier.notify(Notification::new(
                "Premium Activated",
                "You now have access to all premium features",
            ));
        }
        upgraded
    }

    pub fn apply_wallpaper(&mut self) {
        self.notifier.notify(Notification::new(
            "Wallpaper Applied",
            "Your tasks are now visible on your home screen",
        ));
    }

    /// Run one sweep now, regardless of the timer.
    pub fn sweep(&mut self, clock: ClockTime) -> Vec<u64> {
        self.store.sweep_auto_complete(clock)
    }

    /// Drive the sweep timer. Call on every pass of the event loop.
    ///
    /// Arms the timer while auto-update is on, and runs one sweep at
    /// `clock` whenever a period has elapsed. Returns the ids completed.
    pub fn tick(&mut self, now: Instant, clock: ClockTime) -> Vec<u64> {
        self.timer.sync(self.config.auto_update, now);
        if self.timer.fire_if_due(now) {
            self.sweep(clock)
        } else {
            Vec::new()
        }
    }
}
