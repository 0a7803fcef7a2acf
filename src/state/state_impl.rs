use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::monday::{BoardColumn, BoardSchema, ColumnType, CreatedItem, FieldValue, MondayError};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use super::form::{FormStore, ITEM_NAME_KEY};
use super::navigation::{FormField, View};
use super::status::{AppStatus, NotificationKind, TOAST_DURATION};
use super::submit::{success_message, PendingSubmission, CREATE_ITEM_FALLBACK_ERROR};
use super::validation::{validate, validate_form};
use super::StateError;

/// Board name shown before the board has been loaded.
///
pub const DEFAULT_BOARD_TITLE: &str = "Monday Board";

/// Progress of loading the target board.
///
#[derive(Debug, Clone, PartialEq)]
pub enum BoardLoad {
    Pending,
    Loaded(Arc<BoardSchema>),
    Failed(String),
}

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    board_id: Option<String>,
    config_notice: Option<String>,
    board: BoardLoad,
    input_columns: Vec<BoardColumn>,
    form: FormStore,
    form_generation: u64,
    field_feedback: HashMap<String, String>,
    focus: FormField,
    status: AppStatus,
    log_buffer: Arc<LogBuffer>,
    show_log: bool,
    terminal_size: Rect,
    spinner_index: usize,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            board_id: None,
            config_notice: None,
            board: BoardLoad::Pending,
            input_columns: vec![],
            form: FormStore::new(),
            form_generation: 0,
            field_feedback: HashMap::new(),
            focus: FormField::ItemName,
            status: AppStatus::new(),
            log_buffer: Arc::new(LogBuffer::default()),
            show_log: false,
            terminal_size: Rect::default(),
            spinner_index: 0,
            theme: Theme::default(),
        }
    }
}

impl State {
    /// Returns new state. A configuration notice puts the application in the
    /// configuration-required view.
    ///
    pub fn new(
        net_sender: Option<NetworkEventSender>,
        board_id: Option<String>,
        config_notice: Option<String>,
        theme: Theme,
        log_buffer: Arc<LogBuffer>,
    ) -> State {
        State {
            net_sender,
            board_id,
            config_notice,
            theme,
            log_buffer,
            ..State::default()
        }
    }

    /// Returns the view to render.
    ///
    pub fn current_view(&self) -> View {
        if self.config_notice.is_some() {
            return View::ConfigurationRequired;
        }
        match self.board {
            BoardLoad::Pending => View::Loading,
            BoardLoad::Loaded(_) => View::Form,
            BoardLoad::Failed(_) => View::LoadFailed,
        }
    }

    pub fn get_config_notice(&self) -> Option<&str> {
        self.config_notice.as_deref()
    }

    pub fn get_board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    pub fn get_board(&self) -> &BoardLoad {
        &self.board
    }

    /// Returns the name of the loaded board, or a generic title before the
    /// board is known.
    ///
    pub fn board_title(&self) -> &str {
        match &self.board {
            BoardLoad::Loaded(schema) => &schema.board_name,
            _ => DEFAULT_BOARD_TITLE,
        }
    }

    /// Returns the columns shown as form inputs.
    ///
    pub fn get_input_columns(&self) -> &[BoardColumn] {
        &self.input_columns
    }

    /// Start loading the board and show the loading view.
    ///
    pub fn start_loading(&mut self, force: bool) -> &mut Self {
        let Some(board_id) = self.board_id.clone() else {
            warn!("Skipping board load for unset board id.");
            return self;
        };
        self.board = BoardLoad::Pending;
        self.status.set_loading(true);
        self.dispatch(NetworkEvent::LoadBoard { board_id, force });
        self
    }

    /// Show the form for the given board schema.
    ///
    pub fn set_board_schema(&mut self, schema: Arc<BoardSchema>) -> &mut Self {
        self.input_columns = schema.input_columns();
        self.board = BoardLoad::Loaded(schema);
        self.status.set_loading(false);
        if let FormField::Column(i) = self.focus {
            if i >= self.input_columns.len() {
                self.focus = FormField::ItemName;
            }
        }
        self
    }

    /// Show the load failure view with the given message.
    ///
    pub fn set_board_failed(&mut self, message: String) -> &mut Self {
        self.board = BoardLoad::Failed(message);
        self.status.set_loading(false);
        self
    }

    /// Throw away the mounted form, clear all status and load the board
    /// again bypassing the cache. Results of submissions started from the
    /// old form no longer touch the new one.
    ///
    pub fn reload(&mut self) -> &mut Self {
        info!("Reloading item form...");
        self.form_generation += 1;
        self.form.reset_form(None);
        self.field_feedback.clear();
        self.focus = FormField::ItemName;
        self.status.reset_state();
        self.start_loading(true)
    }

    pub fn get_form(&self) -> &FormStore {
        &self.form
    }

    pub fn get_form_generation(&self) -> u64 {
        self.form_generation
    }

    /// Returns true if the submit button is enabled.
    ///
    pub fn can_submit(&self) -> bool {
        self.current_view() == View::Form && self.form.can_submit()
    }

    /// Returns the error to show below a field: the last submit error if
    /// any, otherwise the live feedback for the current value.
    ///
    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.form
            .errors()
            .get(key)
            .or_else(|| self.field_feedback.get(key).map(String::as_str))
    }

    /// Returns the text shown in a field.
    ///
    pub fn field_text(&self, key: &str) -> String {
        self.form
            .form_data()
            .get(key)
            .map(FieldValue::to_string)
            .unwrap_or_default()
    }

    /// Store a field value and refresh its live feedback.
    ///
    pub fn set_field_value(&mut self, key: &str, column_type: &ColumnType, value: FieldValue) -> &mut Self {
        if key != ITEM_NAME_KEY {
            match validate(Some(&value), column_type) {
                Some(message) => {
                    self.field_feedback.insert(key.to_owned(), message);
                }
                None => {
                    self.field_feedback.remove(key);
                }
            }
        }
        self.form.set_field(key, value);
        self
    }

    pub fn get_focus(&self) -> FormField {
        self.focus
    }

    pub fn next_field(&mut self) -> &mut Self {
        self.focus = self.focus.next(self.input_columns.len());
        self
    }

    pub fn previous_field(&mut self) -> &mut Self {
        self.focus = self.focus.previous(self.input_columns.len());
        self
    }

    /// Returns the column under focus, if the focus is on a column.
    ///
    pub fn focused_column(&self) -> Option<&BoardColumn> {
        match self.focus {
            FormField::Column(i) => self.input_columns.get(i),
            _ => None,
        }
    }

    /// Append a character to the focused text input.
    ///
    pub fn input_char(&mut self, c: char) -> &mut Self {
        let (key, column_type) = match self.focus {
            FormField::ItemName => (ITEM_NAME_KEY.to_owned(), ColumnType::Name),
            FormField::Column(_) => match self.focused_column() {
                Some(column) if column.column_type != ColumnType::Status => {
                    (column.id.clone(), column.column_type.clone())
                }
                _ => return self,
            },
            FormField::Submit => return self,
        };
        let mut text = self.field_text(&key);
        text.push(c);
        self.set_field_value(&key, &column_type, FieldValue::from(text))
    }

    /// Remove the last character of the focused input. Clears the selection
    /// of a status dropdown.
    ///
    pub fn delete_char(&mut self) -> &mut Self {
        let (key, column_type) = match self.focus {
            FormField::ItemName => (ITEM_NAME_KEY.to_owned(), ColumnType::Name),
            FormField::Column(_) => match self.focused_column() {
                Some(column) => (column.id.clone(), column.column_type.clone()),
                None => return self,
            },
            FormField::Submit => return self,
        };
        let mut text = self.field_text(&key);
        if column_type == ColumnType::Status {
            text.clear();
        } else if text.pop().is_none() {
            return self;
        }
        self.set_field_value(&key, &column_type, FieldValue::from(text))
    }

    /// Select the next or previous option of the focused status dropdown.
    /// Nothing selected moves to the first or last option.
    ///
    pub fn cycle_status_option(&mut self, forward: bool) -> &mut Self {
        let Some(column) = self
            .focused_column()
            .filter(|column| column.column_type == ColumnType::Status)
            .cloned()
        else {
            return self;
        };
        let options = column.status_options();
        if options.is_empty() {
            return self;
        }
        let current = self.field_text(&column.id);
        let position = options.iter().position(|option| option.label == current);
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        let label = options[next].label.clone();
        self.set_field_value(&column.id, &column.column_type, FieldValue::from(label))
    }

    /// Fill the focused date input with today's date.
    ///
    pub fn fill_today(&mut self) -> &mut Self {
        let Some(column) = self
            .focused_column()
            .filter(|column| column.column_type == ColumnType::Date)
            .cloned()
        else {
            return self;
        };
        let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
        self.set_field_value(&column.id, &column.column_type, FieldValue::from(today))
    }

    /// Validate the form and, if it is valid, mark it submitting and return
    /// the submission to send. Validation errors are stored on the form.
    ///
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, StateError> {
        if self.form.is_submitting() {
            return Err(StateError::AlreadySubmitting);
        }
        let board_id = self
            .board_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(StateError::BoardNotConfigured)?;

        let errors = validate_form(self.form.form_data(), &self.input_columns);
        let count = errors.len();
        self.form.set_errors(errors);
        if count > 0 {
            debug!("Rejected submission with {} invalid field(s).", count);
            return Err(StateError::ValidationFailed { count });
        }

        self.form.set_submitting(true)?;
        self.status.set_error(None);
        Ok(PendingSubmission::new(
            board_id,
            self.form.form_data(),
            &self.input_columns,
            self.form_generation,
        ))
    }

    /// Apply the outcome of a submission. Returns false if the form it came
    /// from has since been replaced.
    ///
    pub fn finish_submit(
        &mut self,
        pending: &PendingSubmission,
        outcome: Result<CreatedItem, MondayError>,
    ) -> bool {
        if pending.generation != self.form_generation {
            warn!(
                "Ignoring result for '{}' from a previous form.",
                pending.item_name
            );
            return false;
        }
        match outcome {
            Ok(created) => {
                info!("Created item '{}' (id {}).", pending.item_name, created.id);
                self.status
                    .show_toast(success_message(&pending.item_name), NotificationKind::Success);
                self.form.reset_form(Some(pending.reset_data.clone()));
                self.field_feedback.clear();
                self.focus = FormField::ItemName;
            }
            Err(e) => {
                let mut message = e.to_string();
                if message.trim().is_empty() {
                    message = CREATE_ITEM_FALLBACK_ERROR.to_owned();
                }
                error!("Failed to create item '{}': {}", pending.item_name, message);
                self.status
                    .set_error(Some(message.clone()))
                    .show_toast(message, NotificationKind::Error);
            }
        }
        self.form.clear_submitting();
        true
    }

    pub fn get_status(&self) -> &AppStatus {
        &self.status
    }

    /// Hide the toast. Returns true if one was visible.
    ///
    pub fn dismiss_toast(&mut self) -> bool {
        let visible = self.status.toast().is_some();
        self.status.hide_toast();
        visible
    }

    /// Advance animations and expire the toast.
    ///
    pub fn tick(&mut self) -> &mut Self {
        self.status.expire_toast(Instant::now(), TOAST_DURATION);
        self.advance_spinner_index()
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    /// Returns the most recent log lines, oldest first.
    ///
    pub fn get_log_entries(&self) -> Vec<String> {
        self.log_buffer.entries()
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Send a network event if a network thread is running.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}
