//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! terminal event ─► InputBox / MessageList ─► Action::Submit ─► update()
//!                                                                 │
//!                                        Effect::SpawnRequest ◄───┘
//!                                                 │
//!                          tokio task: ReplyResolver::resolve
//!                                                 │
//!       mpsc channel ◄── Action::ReplyResolved ◄──┘ ─► update() ─► redraw
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending): draws every ~120ms so the dots move.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{ChatCompletionsProvider, CompletionProvider, ReplyResolver};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(120);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the event loop should do after a terminal event.
#[derive(Debug, PartialEq, Eq)]
enum Dispatch {
    Continue,
    Spawn(String),
    Quit,
}

/// Route one terminal event through the components and the reducer.
fn dispatch_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Dispatch {
    match event {
        TuiEvent::Quit => {
            return match update(app, Action::Quit) {
                Effect::Quit => Dispatch::Quit,
                _ => Dispatch::Continue,
            };
        }
        TuiEvent::Resize => return Dispatch::Continue,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(event);
            return Dispatch::Continue;
        }
        _ => {}
    }

    let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(event) else {
        return Dispatch::Continue;
    };

    match update(app, Action::Submit(text)) {
        Effect::SpawnRequest(user_text) => {
            // Accepted: the message now lives in the conversation
            tui.input_box.clear();
            tui.message_list.follow_latest();
            Dispatch::Spawn(user_text)
        }
        Effect::Quit => Dispatch::Quit,
        // Rejected while a reply is pending; the typed text stays put
        Effect::None => {
            debug!("Submit not accepted, input keeps {} bytes", tui.input_box.text().len());
            Dispatch::Continue
        }
    }
}

/// Apply an action that arrived from a background task.
fn apply_background_action(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    debug!("Event loop received: {:?}", action);
    let before = app.conversation.len();
    let effect = update(app, action);
    if app.conversation.len() != before {
        tui.message_list.follow_latest();
    }
    effect
}

/// Owns the terminal from `ratatui::init` until drop. Leaves raw mode and the
/// alternate screen on every exit path, including `?` returns.
struct TerminalModeGuard {
    restore: fn(),
}

impl TerminalModeGuard {
    fn enable() -> std::io::Result<Self> {
        Self::with_restore(restore_terminal)
    }

    fn with_restore(restore: fn()) -> std::io::Result<Self> {
        let guard = Self { restore };
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(guard)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = execute!(
        stdout(),
        DisableMouseCapture,
        DisableBracketedPaste,
        SetCursorStyle::DefaultUserShape
    );
    ratatui::restore();
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider: Arc<dyn CompletionProvider> = Arc::new(ChatCompletionsProvider::from_config(&config));
    info!(
        "Using provider '{}' at {} with model {}",
        provider.name(),
        config.base_url,
        config.model_name
    );
    let resolver = Arc::new(ReplyResolver::new(provider, config.resolver_settings()));

    let mut app = App::new(config.model_name.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_guard = TerminalModeGuard::enable()?;

    // Actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'event_loop: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / ANIMATION_TICK.as_millis()) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match dispatch_event(&mut app, &mut tui, &event) {
                Dispatch::Continue => {}
                Dispatch::Spawn(user_text) => spawn_request(&resolver, user_text, tx.clone()),
                Dispatch::Quit => break 'event_loop,
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if apply_background_action(&mut app, &mut tui, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    info!("Shutting down ({} messages)", app.conversation.len());
    Ok(())
}

/// Resolve a reply on the runtime and post it back to the event loop.
fn spawn_request(resolver: &Arc<ReplyResolver>, user_text: String, tx: mpsc::Sender<Action>) {
    info!("Spawning reply request");
    let resolver = Arc::clone(resolver);
    tokio::spawn(async move {
        let reply = resolver.resolve(&user_text).await;
        if tx.send(Action::ReplyResolved(reply)).is_err() {
            warn!("Reply dropped: event loop already exited");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{Reply, Sender};
    use crate::test_support::test_app;

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            assert_eq!(dispatch_event(app, tui, &TuiEvent::InputChar(c)), Dispatch::Continue);
        }
    }

    #[test]
    fn test_enter_submits_trimmed_text_and_clears_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "  hi there  ");

        let dispatch = dispatch_event(&mut app, &mut tui, &TuiEvent::Submit);

        assert_eq!(dispatch, Dispatch::Spawn("hi there".to_string()));
        assert!(tui.input_box.text().is_empty());
        assert_eq!(app.conversation.len(), 1);
        assert!(app.is_loading());
    }

    #[test]
    fn test_blank_enter_does_nothing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "   ");

        assert_eq!(dispatch_event(&mut app, &mut tui, &TuiEvent::Submit), Dispatch::Continue);
        assert!(app.conversation.is_empty());
        assert!(!app.has_started());
    }

    #[test]
    fn test_enter_while_loading_keeps_typed_text() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "first");
        dispatch_event(&mut app, &mut tui, &TuiEvent::Submit);

        type_text(&mut app, &mut tui, "second");
        let dispatch = dispatch_event(&mut app, &mut tui, &TuiEvent::Submit);

        assert_eq!(dispatch, Dispatch::Continue);
        assert_eq!(tui.input_box.text(), "second");
        assert_eq!(app.conversation.len(), 1);
        assert!(app.status_message.contains("wait"));
    }

    #[test]
    fn test_quit_event_quits() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(dispatch_event(&mut app, &mut tui, &TuiEvent::Quit), Dispatch::Quit);
    }

    #[test]
    fn test_reply_repins_message_list() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "hello");
        dispatch_event(&mut app, &mut tui, &TuiEvent::Submit);

        dispatch_event(&mut app, &mut tui, &TuiEvent::ScrollUp);
        assert!(!tui.message_list.stick_to_bottom);

        let effect = apply_background_action(
            &mut app,
            &mut tui,
            Action::ReplyResolved(Reply::model("Hi!")),
        );

        assert_eq!(effect, Effect::None);
        assert!(tui.message_list.stick_to_bottom);
        assert_eq!(app.conversation.last().map(|m| m.sender()), Some(Sender::Bot));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_stale_reply_does_not_touch_scroll() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        dispatch_event(&mut app, &mut tui, &TuiEvent::ScrollUp);

        apply_background_action(&mut app, &mut tui, Action::ReplyResolved(Reply::model("late")));

        assert!(app.conversation.is_empty());
        assert!(!tui.message_list.stick_to_bottom);
    }

    #[test]
    fn test_terminal_is_restored_on_early_error_return() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static RESTORES: AtomicUsize = AtomicUsize::new(0);
        fn count_restore() {
            RESTORES.fetch_add(1, Ordering::SeqCst);
        }

        fn failing_session() -> std::io::Result<()> {
            let _guard = TerminalModeGuard::with_restore(count_restore)?;
            Err::<(), _>(std::io::Error::other("draw failed"))?;
            Ok(())
        }

        assert!(failing_session().is_err());
        assert_eq!(RESTORES.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_spawned_request_posts_reply_back() {
        use crate::inference::ResolverSettings;
        use crate::test_support::ScriptedProvider;

        let resolver = Arc::new(ReplyResolver::new(
            Arc::new(ScriptedProvider::ok("Hi from the model")),
            ResolverSettings::default(),
        ));
        let (tx, rx) = mpsc::channel();

        spawn_request(&resolver, "hello".to_string(), tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(action, Action::ReplyResolved(Reply::model("Hi from the model")));
    }
}
