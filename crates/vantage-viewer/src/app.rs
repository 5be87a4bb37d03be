//! Application shell: event loop, key handling, and screen transitions.

use crate::ui;
use crate::viewport::{DisplayState, TuiViewport};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use vantage_application::session::SessionController;
use vantage_application::DeepLinkProcessor;
use vantage_core::VantageError;
use vantage_core::services::ViewportControl;
use vantage_core::session::Screen;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Results of background work, delivered back into the event loop.
enum AppMessage {
    SignInFinished(Result<(), VantageError>),
    OpenFinished(Result<(), VantageError>),
}

/// Which open-model input field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Project,
    Model,
}

impl InputFocus {
    fn toggled(self) -> Self {
        match self {
            Self::Project => Self::Model,
            Self::Model => Self::Project,
        }
    }
}

/// Everything the draw pass needs, gathered once per frame.
pub struct UiModel {
    pub screen: Screen,
    pub spinner: char,
    pub project_input: String,
    pub model_input: String,
    pub focus: InputFocus,
    pub alert: Option<String>,
    pub busy_open: bool,
    pub display: DisplayState,
}

pub struct App {
    controller: Arc<SessionController>,
    viewport: Arc<TuiViewport>,
    lifecycle: CancellationToken,
    messages_tx: mpsc::UnboundedSender<AppMessage>,
    messages_rx: mpsc::UnboundedReceiver<AppMessage>,
    project_input: String,
    model_input: String,
    focus: InputFocus,
    alert: Option<String>,
    busy_sign_in: bool,
    busy_open: bool,
    /// Deep-link names to open automatically once the session allows it.
    pending_auto_open: Option<(String, String)>,
    spinner: usize,
    should_quit: bool,
}

impl App {
    pub fn new(
        controller: Arc<SessionController>,
        viewport: Arc<TuiViewport>,
        deeplink: Arc<DeepLinkProcessor>,
        lifecycle: CancellationToken,
        project_input: String,
        model_input: String,
        auto_open: bool,
    ) -> Self {
        // The one-shot focus subscription must exist before any view opens.
        deeplink.spawn_on_view_opened(viewport.clone(), lifecycle.child_token());

        let pending_auto_open = auto_open
            .then(|| (project_input.clone(), model_input.clone()))
            .filter(|(project, model)| !project.is_empty() && !model.is_empty());

        let (messages_tx, messages_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            viewport,
            lifecycle,
            messages_tx,
            messages_rx,
            project_input,
            model_input,
            focus: InputFocus::Project,
            alert: None,
            busy_sign_in: false,
            busy_open: false,
            pending_auto_open,
            spinner: 0,
            should_quit: false,
        }
    }

    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_INTERVAL);

        while !self.should_quit {
            self.sync_viewport().await;
            self.maybe_auto_open().await;

            let model = self.ui_model().await;
            terminal.draw(|frame| ui::draw(frame, &model))?;

            tokio::select! {
                _ = ticker.tick() => {
                    self.spinner = self.spinner.wrapping_add(1);
                }
                Some(message) = self.messages_rx.recv() => {
                    self.handle_message(message);
                }
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(model.screen, key).await;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }
        }

        self.lifecycle.cancel();
        self.controller.shutdown();
        Ok(())
    }

    async fn ui_model(&self) -> UiModel {
        UiModel {
            screen: self.controller.screen().await,
            spinner: SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()],
            project_input: self.project_input.clone(),
            model_input: self.model_input.clone(),
            focus: self.focus,
            alert: self.alert.clone(),
            busy_open: self.busy_open,
            display: self.viewport.snapshot(),
        }
    }

    /// Keeps the terminal viewport mounted on whatever view the session
    /// holds open; unmounts when the model closes.
    async fn sync_viewport(&self) {
        let state = self.controller.current_state().await;
        match state.open {
            Some(open) => self.viewport.mount_view(open.view_id.clone()),
            None => {
                if self.viewport.snapshot().mounted_view.is_some() {
                    self.viewport.unmount();
                }
            }
        }
    }

    /// Fires the deep link's automatic open once the open-model screen is
    /// reached. One attempt only; failures surface like a manual attempt.
    async fn maybe_auto_open(&mut self) {
        if self.pending_auto_open.is_none() || self.busy_open {
            return;
        }
        if self.controller.screen().await != Screen::NoModelOpen {
            return;
        }
        if let Some((project, model)) = self.pending_auto_open.take() {
            self.begin_open(project, model);
        }
    }

    fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::SignInFinished(result) => {
                self.busy_sign_in = false;
                self.surface(result);
            }
            AppMessage::OpenFinished(result) => {
                self.busy_open = false;
                self.surface(result);
            }
        }
    }

    /// Converts a failed operation into the blocking alert line; cancelled
    /// work is dropped silently.
    fn surface(&mut self, result: Result<(), VantageError>) {
        match result {
            Ok(()) | Err(VantageError::Cancelled) => {}
            Err(e) => self.alert = Some(e.to_string()),
        }
    }

    fn begin_open(&mut self, project: String, model: String) {
        if self.busy_open {
            return;
        }
        self.busy_open = true;
        self.alert = None;

        let controller = self.controller.clone();
        let tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let result = controller
                .open_model(Some(project.as_str()), Some(model.as_str()))
                .await;
            let _ = tx.send(AppMessage::OpenFinished(result));
        });
    }

    fn begin_sign_in(&mut self) {
        if self.busy_sign_in {
            return;
        }
        self.busy_sign_in = true;
        self.alert = None;

        let controller = self.controller.clone();
        let tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let result = controller.start_sign_in().await;
            let _ = tx.send(AppMessage::SignInFinished(result));
        });
    }

    async fn handle_key(&mut self, screen: Screen, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match screen {
            Screen::Unauthenticated => self.handle_sign_in_prompt_key(key),
            Screen::SigningIn => {}
            Screen::NoModelOpen => self.handle_open_form_key(key),
            Screen::ModelOpen => self.handle_viewport_key(key).await,
        }
    }

    fn handle_sign_in_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') => self.begin_sign_in(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_open_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.focus = self.focus.toggled(),
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Enter => {
                if self.busy_open {
                    return;
                }
                let project = self.project_input.clone();
                let model = self.model_input.clone();
                self.begin_open(project, model);
            }
            KeyCode::Esc => self.alert = None,
            KeyCode::Char(c) => {
                self.focused_input().push(c);
            }
            _ => {}
        }
    }

    async fn handle_viewport_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.viewport.move_cursor(-1),
            KeyCode::Down => self.viewport.move_cursor(1),
            KeyCode::Enter => self.viewport.select_at_cursor(),
            KeyCode::Char('a') => self.viewport.select_all(),
            KeyCode::Esc => self.viewport.clear_selection(),
            KeyCode::Char('f') => self.viewport.fit_view(),
            KeyCode::Char('e') => self.viewport.clear_emphasis(),
            KeyCode::Char('c') => {
                if let Err(e) = self.controller.close_model().await {
                    self.alert = Some(e.to_string());
                }
            }
            KeyCode::Char('x') => {
                if let Err(e) = self.controller.sign_out().await {
                    self.alert = Some(e.to_string());
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            InputFocus::Project => &mut self.project_input,
            InputFocus::Model => &mut self.model_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_toggles_between_the_two_fields() {
        assert_eq!(InputFocus::Project.toggled(), InputFocus::Model);
        assert_eq!(InputFocus::Model.toggled(), InputFocus::Project);
    }
}
