//! Task form handling for the terminal user interface.
//!
//! Two text inputs (title and time) followed by two selectors (priority and
//! category). The form knows nothing about validation; it only produces a
//! [`TaskDraft`] for the controller to check.

use crate::{
    fields::{Category, Priority},
    task::{Task, TaskDraft},
    tui::input::InputField,
};

/// Global order constants for the edit view fields.
pub const TITLE_GLOBAL_ORDER: usize = 0;
pub const TIME_GLOBAL_ORDER: usize = 1;
pub const PRIORITY_GLOBAL_ORDER: usize = 2;
pub const CATEGORY_GLOBAL_ORDER: usize = 3;

const FIELD_COUNT: usize = 4;

/// Task form for editing fields
#[derive(Clone, Debug)]
pub struct TaskForm {
    pub title: InputField,
    pub time: InputField,
    pub priority: usize,
    pub category: usize,
    pub current_field: usize,
    editing: Option<u64>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

fn index_of<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|v| v == value).unwrap_or(0)
}

fn step(index: usize, len: usize, right: bool) -> usize {
    if right {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

impl TaskForm {
    /// Empty form with medium priority and the personal category.
    pub fn new() -> Self {
        Self::from_draft(&TaskDraft::default(), None)
    }

    /// Create a task form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self::from_draft(&TaskDraft::from_task(task), Some(task.id))
    }

    fn from_draft(draft: &TaskDraft, editing: Option<u64>) -> Self {
        Self {
            title: InputField::with_value(&draft.title),
            time: InputField::with_value(&draft.time),
            priority: index_of(&Priority::ALL, &draft.priority),
            category: index_of(&Category::ALL, &draft.category),
            current_field: TITLE_GLOBAL_ORDER,
            editing,
        }
    }

    /// True when the form edits an existing task rather than adding one.
    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn priority(&self) -> Priority {
        Priority::ALL[self.priority % Priority::ALL.len()]
    }

    pub fn category(&self) -> Category {
        Category::ALL[self.category % Category::ALL.len()]
    }

    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.value.clone(),
            time: self.time.value.clone(),
            priority: self.priority(),
            category: self.category(),
        }
    }

    /// The text input under focus, if the focus is not on a selector.
    pub fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_GLOBAL_ORDER => Some(&mut self.title),
            TIME_GLOBAL_ORDER => Some(&mut self.time),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = step(self.current_field, FIELD_COUNT, false);
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_delete();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            PRIORITY_GLOBAL_ORDER => self.priority = step(self.priority, Priority::ALL.len(), right),
            CATEGORY_GLOBAL_ORDER => self.category = step(self.category, Category::ALL.len(), right),
            _ => {
                if let Some(field) = self.active_input() {
                    if right {
                        field.move_cursor_right();
                    } else {
                        field.move_cursor_left();
                    }
                }
            }
        }
    }

    pub fn handle_home_end(&mut self, end: bool) {
        if let Some(field) = self.active_input() {
            if end {
                field.move_end();
            } else {
                field.move_home();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: 7,
            title: "Gym session".into(),
            time: "6:00 PM".into(),
            priority: Priority::Low,
            category: Category::Health,
            completed: true,
        }
    }

    #[test]
    fn test_new_form_defaults() {
        let form = TaskForm::new();
        assert!(!form.is_edit());
        let draft = form.to_draft();
        assert_eq!(draft.title, "");
        assert_eq!(draft.time, "");
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.category, Category::Personal);
    }

    #[test]
    fn test_from_task_prefills_fields() {
        let form = TaskForm::from_task(&sample_task());
        assert!(form.is_edit());
        let draft = form.to_draft();
        assert_eq!(draft.title, "Gym session");
        assert_eq!(draft.time, "6:00 PM");
        assert_eq!(draft.priority, Priority::Low);
        assert_eq!(draft.category, Category::Health);
    }

    #[test]
    fn test_typing_goes_to_focused_input() {
        let mut form = TaskForm::new();
        for c in "Read".chars() {
            form.handle_char(c);
        }
        form.next_field();
        for c in "9:00 PM".chars() {
            form.handle_char(c);
        }
        form.handle_backspace();
        form.handle_char('M');
        let draft = form.to_draft();
        assert_eq!(draft.title, "Read");
        assert_eq!(draft.time, "9:00 PM");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_selectors_wrap() {
        let mut form = TaskForm::new();
        form.current_field = PRIORITY_GLOBAL_ORDER;
        form.handle_left_right(true);
        assert_eq!(form.priority(), Priority::Low);
        form.handle_left_right(true);
        assert_eq!(form.priority(), Priority::High);
        form.handle_char('x');
        assert_eq!(form.to_draft().title, "");

        form.next_field();
        form.handle_left_right(false);
        assert_eq!(form.category(), Category::Work);
        form.handle_left_right(false);
        assert_eq!(form.category(), Category::Education);
    }

    #[test]
    fn test_field_focus_wraps() {
        let mut form = TaskForm::new();
        form.prev_field();
        assert_eq!(form.current_field, CATEGORY_GLOBAL_ORDER);
        form.next_field();
        assert_eq!(form.current_field, TITLE_GLOBAL_ORDER);
    }
}
