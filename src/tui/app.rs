//! Main application logic for the terminal user interface.
//!
//! `App` translates key presses into calls on the [`Controller`] and renders
//! the three screens (dashboard, edit form, wallpaper) from what the
//! controller exposes. It holds only view state of its own: the table
//! selection, the form buffers, the highlighted settings row, the help
//! overlay and the status message.

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::controller::{Controller, SaveOutcome, Screen};
use crate::fields::FontSize;
use crate::notify::LatestNotification;
use crate::task::ClockTime;
use crate::tui::{
    colors::{
        background_colors, blend, caption_color, card_color, emphasis_color, text_color, AMBER,
        DARK_RED, GOLD,
    },
    enums::{Overlay, SettingRow, StatusKind},
    settings_panel,
    task_form::{TaskForm, CATEGORY_GLOBAL_ORDER, PRIORITY_GLOBAL_ORDER, TIME_GLOBAL_ORDER, TITLE_GLOBAL_ORDER},
    utils::{centered_fixed, centered_rect},
};

const PHONE_WIDTH: u16 = 34;
const PHONE_HEIGHT: u16 = 24;

/// Main application state for the terminal user interface.
pub struct App {
    controller: Controller<LatestNotification>,
    task_list_state: TableState,
    task_form: TaskForm,
    setting_index: usize,
    overlay: Overlay,
    status_message: String,
    status_kind: StatusKind,
}

impl App {
    pub fn new(controller: Controller<LatestNotification>) -> Self {
        let mut task_list_state = TableState::default();
        if !controller.store().is_empty() {
            task_list_state.select(Some(0));
        }
        Self {
            controller,
            task_list_state,
            task_form: TaskForm::new(),
            setting_index: 0,
            overlay: Overlay::None,
            status_message: String::new(),
            status_kind: StatusKind::Info,
        }
    }

    pub fn controller(&self) -> &Controller<LatestNotification> {
        &self.controller
    }

    fn set_status(&mut self, msg: impl Into<String>, kind: StatusKind) {
        self.status_message = msg.into();
        self.status_kind = kind;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
        self.status_kind = StatusKind::Info;
    }

    fn selected_task_id(&self) -> Option<u64> {
        let index = self.task_list_state.selected()?;
        self.controller.store().tasks().get(index).map(|t| t.id)
    }

    /// Keep the table selection inside the task list after it shrinks or grows.
    fn clamp_selection(&mut self) {
        let len = self.controller.store().len();
        match self.task_list_state.selected() {
            _ if len == 0 => self.task_list_state.select(None),
            Some(i) if i >= len => self.task_list_state.select(Some(len - 1)),
            None => self.task_list_state.select(Some(0)),
            _ => {}
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.controller.store().len();
        if len == 0 {
            return;
        }
        let i = match self.task_list_state.selected() {
            Some(i) if down => (i + 1) % len,
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.task_list_state.select(Some(i));
    }

    fn setting_rows(&self) -> Vec<SettingRow> {
        settings_panel::rows(self.controller.config(), self.controller.entitlement())
    }

    fn selected_setting(&self) -> Option<SettingRow> {
        let rows = self.setting_rows();
        rows.get(self.setting_index.min(rows.len().saturating_sub(1))).copied()
    }

    /// Run the auto-complete timer against the wall clock.
    fn on_tick(&mut self) {
        let clock = ClockTime::from(Local::now().time());
        let completed = self.controller.tick(Instant::now(), clock);
        if !completed.is_empty() {
            info!(count = completed.len(), at = %clock, "tasks auto-completed");
            self.set_status(format!("Auto-completed {} task(s)", completed.len()), StatusKind::Info);
        }
    }

    fn open_add(&mut self) {
        self.controller.begin_add();
        self.task_form = TaskForm::new();
    }

    fn open_edit(&mut self, id: u64) {
        if self.controller.begin_edit(id) {
            if let Some(task) = self.controller.editing() {
                self.task_form = TaskForm::from_task(task);
            }
        } else {
            self.set_status(format!("Task {} not found", id), StatusKind::Error);
        }
    }

    fn save_form(&mut self) {
        match self.controller.save(&self.task_form.to_draft()) {
            Ok(outcome) => {
                self.task_form = TaskForm::new();
                match outcome {
                    SaveOutcome::Added(_) => {
                        let last = self.controller.store().len().saturating_sub(1);
                        self.task_list_state.select(Some(last));
                    }
                    SaveOutcome::Updated(_) => {}
                    SaveOutcome::Vanished(id) => {
                        self.set_status(format!("Task {} was deleted while editing", id), StatusKind::Error);
                    }
                }
                self.clamp_selection();
            }
            Err(e) => self.set_status(e.to_string(), StatusKind::Error),
        }
    }

    fn cancel_form(&mut self) {
        self.controller.cancel();
        self.task_form = TaskForm::new();
    }

    fn delete_selected_task(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.controller.remove(id) {
            self.set_status(format!("Deleted \"{}\"", task.title), StatusKind::Info);
        }
        self.clamp_selection();
    }

    fn toggle_selected_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.controller.toggle_complete(id);
        }
    }

    fn upgrade(&mut self) {
        if !self.controller.upgrade() {
            self.set_status("Premium is already active", StatusKind::Info);
        }
    }

    fn cycle_setting(&mut self, forward: bool) {
        let Some(row) = self.selected_setting() else {
            return;
        };
        let setting = settings_panel::cycle(
            row,
            forward,
            self.controller.config(),
            self.controller.entitlement(),
        );
        if let Some(setting) = setting {
            if let Err(e) = self.controller.set_setting(setting) {
                self.set_status(e.to_string(), StatusKind::Error);
            }
            // the row list may have changed, e.g. Contrast disappearing
            let len = self.setting_rows().len();
            self.setting_index = self.setting_index.min(len.saturating_sub(1));
        }
    }

    fn activate_setting(&mut self) {
        match self.selected_setting() {
            Some(SettingRow::Apply) => self.controller.apply_wallpaper(),
            Some(SettingRow::Unlock) => {
                self.upgrade();
                let len = self.setting_rows().len();
                self.setting_index = self.setting_index.min(len.saturating_sub(1));
            }
            Some(_) => self.cycle_setting(true),
            None => {}
        }
    }

    fn select_screen(&mut self, screen: Screen) {
        if screen == Screen::Edit && self.controller.screen() != Screen::Edit && self.controller.editing().is_none() {
            self.task_form = TaskForm::new();
        }
        self.controller.select_screen(screen);
    }

    /// Dispatch a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.overlay == Overlay::Help {
            self.overlay = Overlay::None;
            return false;
        }

        let screen = self.controller.screen();
        let tab = match code {
            KeyCode::F(1) => Some(Screen::Dashboard),
            KeyCode::F(2) => Some(Screen::Edit),
            KeyCode::F(3) => Some(Screen::Wallpaper),
            KeyCode::Char('1') if screen != Screen::Edit => Some(Screen::Dashboard),
            KeyCode::Char('2') if screen != Screen::Edit => Some(Screen::Edit),
            KeyCode::Char('3') if screen != Screen::Edit => Some(Screen::Wallpaper),
            _ => None,
        };
        if let Some(tab) = tab {
            self.select_screen(tab);
            return false;
        }

        match screen {
            Screen::Dashboard => self.handle_dashboard_input(code),
            Screen::Edit => {
                self.handle_form_input(code);
                false
            }
            Screen::Wallpaper => self.handle_wallpaper_input(code),
        }
    }

    fn handle_dashboard_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    self.open_edit(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected_task(),
            KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_selected_task(),
            KeyCode::Char('u') => self.upgrade(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.overlay = Overlay::Help,
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Home => self.task_form.handle_home_end(false),
            KeyCode::End => self.task_form.handle_home_end(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Enter => self.save_form(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
    }

    fn handle_wallpaper_input(&mut self, key: KeyCode) -> bool {
        let len = self.setting_rows().len();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.setting_index = if self.setting_index == 0 { len - 1 } else { self.setting_index - 1 };
            }
            KeyCode::Down | KeyCode::Char('j') => self.setting_index = (self.setting_index + 1) % len,
            KeyCode::Left => self.cycle_setting(false),
            KeyCode::Right | KeyCode::Char(' ') => self.cycle_setting(true),
            KeyCode::Enter => self.activate_setting(),
            KeyCode::Char('s') => self.controller.apply_wallpaper(),
            KeyCode::Char('u') => self.upgrade(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.overlay = Overlay::Help,
            _ => {}
        }
        false
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                self.clear_status_message();
                self.controller.notifier_mut().dismiss();
                return Ok(self.handle_key(key.code, key.modifiers));
            }
        }
        Ok(false)
    }

    /// Title line with the app name, the tabs and the premium badge.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let active = self.controller.screen();
        let mut spans = vec![
            Span::styled("PROPAPER", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
        ];
        for (i, screen) in Screen::ALL.iter().enumerate() {
            let label = format!(" F{} {} ", i + 1, screen.label());
            let style = if *screen == active {
                Style::default().fg(Color::Rgb(20, 20, 20)).bg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::raw("  "));
        if self.controller.entitlement().is_premium() {
            spans.push(Span::styled(" PREMIUM ", Style::default().fg(Color::Black).bg(AMBER)));
        } else {
            spans.push(Span::styled("u: Upgrade", Style::default().fg(Color::DarkGray)));
        }

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the task list with a priority marker per row.
    fn render_dashboard(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Your Tasks ({}) - a: add, e: edit, d: delete, space: done",
            self.controller.store().len()
        ));

        let rows = self.controller.dashboard();
        if rows.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from("No tasks yet. Add your first task to get started!"),
                Line::from(""),
                Line::from(Span::styled("Press 'a' to add a task", Style::default().fg(Color::DarkGray))),
            ])
            .block(block)
            .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let header = Row::new(["", "Done", "Time", "Title", "Priority", "Category"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(GOLD).fg(Color::Rgb(20, 20, 20)))
        .height(1);

        let table_rows: Vec<Row> = rows
            .iter()
            .map(|row| {
                let task = row.task;
                let style = if task.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    Cell::from("▌").style(Style::default().fg(emphasis_color(row.emphasis))),
                    Cell::from(if task.completed { "[x]" } else { "[ ]" }),
                    Cell::from(task.time.clone()),
                    Cell::from(task.title.clone()),
                    Cell::from(task.priority.label()),
                    Cell::from(task.category.label()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Min(20),
            Constraint::Length(9),
            Constraint::Length(10),
        ];

        let table = Table::new(table_rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let title = if self.task_form.is_edit() { "Update Task" } else { "Add Task" };
        let outer = centered_rect(60, 80, area);
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(outer);
        f.render_widget(block, outer);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Time
                Constraint::Length(3), // Priority
                Constraint::Length(3), // Category
                Constraint::Min(1),    // Instructions
            ])
            .split(inner);

        let focus = |order: usize| {
            if self.task_form.current_field == order {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };

        let title_input = Paragraph::new(self.task_form.title.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Task Title *")
                .border_style(focus(TITLE_GLOBAL_ORDER)),
        );
        f.render_widget(title_input, chunks[0]);

        let time_input = Paragraph::new(self.task_form.time.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Time * (e.g. 2:00 PM)")
                .border_style(focus(TIME_GLOBAL_ORDER)),
        );
        f.render_widget(time_input, chunks[1]);

        let priority = Paragraph::new(format!("< {} >", self.task_form.priority().label())).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Priority")
                .border_style(focus(PRIORITY_GLOBAL_ORDER)),
        );
        f.render_widget(priority, chunks[2]);

        let category = Paragraph::new(format!("< {} >", self.task_form.category().label())).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Category")
                .border_style(focus(CATEGORY_GLOBAL_ORDER)),
        );
        f.render_widget(category, chunks[3]);

        let instructions = Paragraph::new(vec![
            Line::from("Tab/↑↓ move between fields  ←→ change priority and category"),
            Line::from(format!("Enter {}  Esc cancel", title.to_lowercase())),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
        f.render_widget(instructions, chunks[4]);

        let cursor = match self.task_form.current_field {
            TITLE_GLOBAL_ORDER => Some((chunks[0], self.task_form.title.cursor)),
            TIME_GLOBAL_ORDER => Some((chunks[1], self.task_form.time.cursor)),
            _ => None,
        };
        if let Some((rect, pos)) = cursor {
            let max_x = rect.width.saturating_sub(2);
            f.set_cursor_position((rect.x + 1 + (pos as u16).min(max_x), rect.y + 1));
        }
    }

    fn render_wallpaper(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        self.render_settings(f, chunks[0]);
        self.render_phone(f, chunks[1]);
    }

    fn render_settings(&self, f: &mut Frame, area: Rect) {
        let config = self.controller.config();
        let entitlement = self.controller.entitlement();
        let rows = self.setting_rows();
        let selected = self.setting_index.min(rows.len().saturating_sub(1));

        let mut lines = vec![Line::from("")];
        for (i, row) in rows.iter().enumerate() {
            let is_selected = i == selected;
            let marker = if is_selected { ">> " } else { "   " };
            let label_style = if is_selected {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::styled(format!("{}{:<26}", marker, row.label()), label_style),
                Span::raw(settings_panel::value_text(*row, config, entitlement)),
            ];
            let locked = settings_panel::locked_count(*row, entitlement);
            if locked > 0 {
                spans.push(Span::styled(
                    format!("  (+{} premium)", locked),
                    Style::default().fg(AMBER),
                ));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "↑↓ select  ←→/space change  Enter activate  s set wallpaper",
            Style::default().fg(Color::DarkGray),
        )));

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Wallpaper Settings"))
            .wrap(Wrap { trim: false });
        f.render_widget(panel, area);
    }

    /// Simulated phone screen showing the live wallpaper preview.
    fn render_phone(&self, f: &mut Frame, area: Rect) {
        let preview = self.controller.preview();
        let style = preview.style;
        let frame_area = centered_fixed(PHONE_WIDTH, PHONE_HEIGHT, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Preview ({}, {})", style.font.label(), style.font_size.label()));
        let inner = block.inner(frame_area);
        f.render_widget(Clear, frame_area);
        f.render_widget(block, frame_area);

        let (top, bottom) = background_colors(&style.background);
        let fg = text_color(style.text);
        let caption = caption_color(style.text);
        let size_modifier = match style.font_size {
            FontSize::Large => Modifier::BOLD,
            FontSize::Medium | FontSize::Small => Modifier::empty(),
        };

        let width = inner.width as usize;
        // (text, style, drawn on a task card)
        let mut content: Vec<(String, Style, bool)> = vec![(String::new(), Style::default(), false)];
        let heading = Style::default().fg(fg).add_modifier(Modifier::BOLD);
        if style.marker {
            let pad = width.saturating_sub(" TODAY'S TASKS".len() + 2);
            content.push((format!(" TODAY'S TASKS{}●", " ".repeat(pad)), heading, false));
        } else {
            content.push((" TODAY'S TASKS".to_string(), heading, false));
        }
        content.push((String::new(), Style::default(), false));

        if preview.tasks.is_empty() {
            content.push((" No tasks to display".to_string(), Style::default().fg(caption), false));
        }
        for task in &preview.tasks {
            let task_style = Style::default().fg(fg).add_modifier(size_modifier);
            content.push((format!(" {}", task.title), task_style, true));
            content.push((format!("   {}", task.time), Style::default().fg(caption), true));
            if style.font_size != FontSize::Small {
                content.push((String::new(), Style::default(), false));
            }
        }

        let height = inner.height;
        let lines: Vec<Line> = (0..height)
            .map(|y| {
                let bg = blend(top, bottom, y, height.saturating_sub(1));
                let (text, text_style, card) = content
                    .get(y as usize)
                    .cloned()
                    .unwrap_or_else(|| (String::new(), Style::default(), false));
                let bg = if card { card_color(style.text, bg) } else { bg };
                let mut text: String = text.chars().take(width).collect();
                let pad = width.saturating_sub(text.chars().count());
                text.push_str(&" ".repeat(pad));
                Line::from(Span::styled(text, text_style.bg(bg)))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("ProPaper Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Everywhere:", bold)),
            Line::from("  F1/F2/F3     Dashboard / Edit Task / Wallpaper"),
            Line::from("  1/2/3        Same, outside the edit form"),
            Line::from("  Ctrl+C       Quit"),
            Line::from(""),
            Line::from(Span::styled("Dashboard:", bold)),
            Line::from("  ↑↓, k/j      Select a task"),
            Line::from("  a            Add a task"),
            Line::from("  e/Enter      Edit the selected task"),
            Line::from("  d/Delete     Delete the selected task"),
            Line::from("  space/c      Toggle completion"),
            Line::from("  u            Upgrade to premium"),
            Line::from("  q/Esc        Quit"),
            Line::from(""),
            Line::from(Span::styled("Edit form:", bold)),
            Line::from("  Tab/↑↓       Move between fields"),
            Line::from("  ←→           Move the cursor or change a selector"),
            Line::from("  Enter        Save"),
            Line::from("  Esc          Cancel"),
            Line::from(""),
            Line::from(Span::styled("Wallpaper:", bold)),
            Line::from("  ↑↓           Select a setting"),
            Line::from("  ←→/space     Change it"),
            Line::from("  Enter        Change, upgrade or apply"),
            Line::from("  s            Set as wallpaper"),
        ];

        let area = centered_rect(60, 80, area);
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, style) = if !self.status_message.is_empty() {
            let bg = match self.status_kind {
                StatusKind::Error => DARK_RED,
                StatusKind::Info => GOLD,
            };
            let fg = match self.status_kind {
                StatusKind::Error => Color::White,
                StatusKind::Info => Color::Rgb(20, 20, 20),
            };
            (self.status_message.clone(), Style::default().bg(bg).fg(fg))
        } else if let Some(n) = self.controller.notifier().latest() {
            (
                format!("{}: {}", n.title, n.description),
                Style::default().bg(GOLD).fg(Color::Rgb(20, 20, 20)),
            )
        } else {
            let auto = match self.controller.timer().remaining(Instant::now()) {
                Some(left) if self.controller.config().auto_update => {
                    format!("next sweep in {}s", left.as_secs())
                }
                _ => "auto-update off".to_string(),
            };
            (
                format!(
                    "{} | Tasks: {} | {} | Press 'h' for help",
                    self.controller.screen().label(),
                    self.controller.store().len(),
                    auto
                ),
                Style::default().bg(Color::Rgb(40, 40, 40)).fg(Color::White),
            )
        };

        f.render_widget(Paragraph::new(text).style(style), area);
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.controller.screen() {
            Screen::Dashboard => self.render_dashboard(f, chunks[1]),
            Screen::Edit => self.render_task_form(f, chunks[1]),
            Screen::Wallpaper => self.render_wallpaper(f, chunks[1]),
        }
        if self.overlay == Overlay::Help {
            self.render_help(f, chunks[1]);
        }
        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop: sweep timer, draw, input, until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.on_tick();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                debug!("quit requested");
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Background, Priority};
    use crate::store::TaskStore;
    use crate::wallpaper::WallpaperConfig;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(Controller::new(
            TaskStore::with_sample_tasks(),
            WallpaperConfig::default(),
            Duration::from_secs(60),
            LatestNotification::default(),
        ))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.controller().screen(), Screen::Edit);
        type_str(&mut app, "Water plants");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "8:15 am");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.controller().screen(), Screen::Dashboard);
        let task = app.controller().store().tasks().last().unwrap();
        assert_eq!(task.title, "Water plants");
        assert_eq!(task.time, "8:15 AM");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(app.controller().notifier().latest().unwrap().title, "Task added");
        assert_eq!(app.task_list_state.selected(), Some(4));
    }

    #[test]
    fn test_invalid_form_stays_on_edit_screen() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "No time");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller().screen(), Screen::Edit);
        assert_eq!(app.status_kind, StatusKind::Error);
        assert_eq!(app.controller().store().len(), 4);
    }

    #[test]
    fn test_edit_keeps_id_and_cancel_discards() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.task_form.is_edit());
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller().screen(), Screen::Dashboard);
        assert!(app.controller().editing().is_none());
        assert_eq!(app.controller().store().tasks()[0].title, "Team meeting");

        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Enter);
        let first = &app.controller().store().tasks()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.title, "Team meeting!");
    }

    #[test]
    fn test_delete_and_toggle_selected() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller().store().tasks()[1].completed);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.controller().store().len(), 3);
        assert!(app.controller().store().get(2).is_none());
        assert_eq!(app.task_list_state.selected(), Some(1));
    }

    #[test]
    fn test_tabs_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.controller().screen(), Screen::Wallpaper);
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.controller().screen(), Screen::Dashboard);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.controller().screen(), Screen::Edit);
        // digits are text inside the form
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.controller().screen(), Screen::Edit);
        assert_eq!(app.task_form.title.value, "1");
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        press(&mut app, KeyCode::F(1));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_wallpaper_settings_respect_premium() {
        let mut app = app();
        press(&mut app, KeyCode::F(3));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.controller().config().background, Background::SolidWhite);

        let unlock = app.setting_rows().iter().position(|r| *r == SettingRow::Unlock).unwrap();
        app.setting_index = unlock;
        press(&mut app, KeyCode::Enter);
        assert!(app.controller().entitlement().is_premium());
        assert!(!app.setting_rows().contains(&SettingRow::Unlock));

        app.setting_index = 0;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.controller().config().background, Background::GradientPurple);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.controller().notifier().latest().unwrap().title, "Wallpaper Applied");
    }

    #[test]
    fn test_auto_update_toggle_disarms_timer() {
        let mut app = app();
        app.controller.tick(Instant::now(), ClockTime::new(8, 0).unwrap());
        assert!(app.controller().timer().is_armed());
        press(&mut app, KeyCode::F(3));
        let auto = app.setting_rows().iter().position(|r| *r == SettingRow::AutoUpdate).unwrap();
        app.setting_index = auto;
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.controller().config().auto_update);
        assert!(!app.controller().timer().is_armed());
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.overlay, Overlay::Help);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_render_screens() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        for screen in Screen::ALL {
            app.select_screen(screen);
            terminal.draw(|f| app.render(f)).unwrap();
        }
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("TODAY'S TASKS"));
        assert!(text.contains("Team meeting"));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let mut app = App::new(Controller::new(
            TaskStore::default(),
            WallpaperConfig::default(),
            Duration::from_secs(60),
            LatestNotification::default(),
        ));
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No tasks yet"));
    }

    fn find_cell(buffer: &ratatui::buffer::Buffer, needle: &str) -> Option<(u16, u16)> {
        let area = buffer.area;
        (0..area.height).find_map(|y| {
            let row: String = (0..area.width)
                .map(|x| buffer[(x, y)].symbol().chars().next().unwrap_or(' '))
                .collect();
            row.find(needle).map(|i| (row[..i].chars().count() as u16, y))
        })
    }

    #[test]
    fn test_phone_tasks_sit_on_tinted_cards() {
        let config = WallpaperConfig {
            background: Background::SolidBlack,
            ..WallpaperConfig::default()
        };
        let mut app = App::new(Controller::new(
            TaskStore::with_sample_tasks(),
            config,
            Duration::from_secs(60),
            LatestNotification::default(),
        ));
        app.select_screen(Screen::Wallpaper);
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();

        let heading = find_cell(buffer, "TODAY'S TASKS").unwrap();
        assert_eq!(buffer[heading].bg, Color::Black);
        let title = find_cell(buffer, "Team meeting").unwrap();
        assert_eq!(buffer[title].bg, Color::Rgb(25, 25, 25));
        assert_eq!(buffer[(title.0, title.1 + 1)].bg, Color::Rgb(25, 25, 25));
    }
}
