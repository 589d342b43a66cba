//! In-memory task collection.
//!
//! `TaskStore` owns the ordered task list for a session. Insertion order is the
//! display order; ids come from a monotonic counter so an id that was removed is
//! never handed out again. Operations that name an unknown id are no-ops and
//! report that by returning `None`.

use tracing::{debug, info, warn};

use crate::fields::{Category, Priority};
use crate::task::{ClockTime, NewTask, Task};

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskStore {
    /// A store holding the four example tasks every session starts with.
    pub fn with_sample_tasks() -> Self {
        let sample = [
            (1, "Team meeting", "10:00 AM", Priority::High, Category::Work),
            (2, "Grocery shopping", "4:30 PM", Priority::Medium, Category::Personal),
            (3, "Finish project proposal", "6:00 PM", Priority::High, Category::Work),
            (4, "Call mom", "7:30 PM", Priority::Low, Category::Personal),
        ];
        let tasks = sample
            .into_iter()
            .map(|(id, title, time, priority, category)| Task {
                id,
                title: title.to_string(),
                time: time.to_string(),
                priority,
                category,
                completed: false,
            })
            .collect();
        Self::from_tasks(tasks)
    }

    /// Build a store from existing tasks, keeping their order.
    ///
    /// Later duplicates of an id are dropped so ids stay unique.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self::default();
        for task in tasks {
            if store.get(task.id).is_some() {
                warn!(task_id = task.id, "dropping task with duplicate id");
                continue;
            }
            store.next_id = store.next_id.max(task.id + 1);
            store.tasks.push(task);
        }
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a new, incomplete task with a fresh id.
    pub fn add(&mut self, input: NewTask) -> Task {
        let task = Task {
            id: self.next_id,
            title: input.title,
            time: input.time.to_string(),
            priority: input.priority,
            category: input.category,
            completed: false,
        };
        self.next_id += 1;
        info!(task_id = task.id, title = %task.title, "task added");
        self.tasks.push(task.clone());
        task
    }

    /// Replace the task with the same id in place.
    pub fn update(&mut self, task: Task) -> Option<&Task> {
        let Some(slot) = self.get_mut(task.id) else {
            debug!(task_id = task.id, "update ignored, no such task");
            return None;
        };
        *slot = task;
        info!(task_id = slot.id, "task updated");
        Some(&*slot)
    }

    /// Flip the completion flag. Returns the new value.
    pub fn toggle_complete(&mut self, id: u64) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        debug!(task_id = id, completed = task.completed, "task toggled");
        Some(task.completed)
    }

    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(idx);
        info!(task_id = id, "task removed");
        Some(task)
    }

    /// Mark incomplete tasks whose scheduled time is strictly before `now`.
    ///
    /// Comparison is on (hour, minute). Completed tasks are never touched and
    /// tasks whose time does not parse are skipped. Returns the ids completed
    /// by this pass, in store order.
    pub fn sweep_auto_complete(&mut self, now: ClockTime) -> Vec<u64> {
        let mut completed = Vec::new();
        for task in self.tasks.iter_mut().filter(|t| !t.completed) {
            match task.time.parse::<ClockTime>() {
                Ok(due) if now > due => {
                    task.completed = true;
                    completed.push(task.id);
                }
                Ok(_) => {}
                Err(e) => warn!(task_id = task.id, error = %e, "skipping task with unparseable time"),
            }
        }
        if !completed.is_empty() {
            info!(now = %now, ids = ?completed, "auto-completed tasks");
        }
        completed
    }
}
