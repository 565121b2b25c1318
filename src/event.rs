use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::{InputMode, Overlay};

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Forwards terminal key presses and periodic ticks from a background task.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        let forwarded = match event {
                            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                                tx.send(AppEvent::Key(key))
                            }
                            Some(Ok(Event::Resize(_, _))) => tx.send(AppEvent::Resize),
                            Some(Ok(_)) => Ok(()),
                            Some(Err(_)) | None => break,
                        };
                        if forwarded.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on current app state
pub fn key_to_action(key: KeyEvent, input_mode: &InputMode, overlay: &Overlay) -> Option<Action> {
    if *overlay == Overlay::Help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    if *input_mode == InputMode::PendingG {
        return match key.code {
            KeyCode::Char('g') => Some(Action::NavigateTop),
            _ => Some(Action::CloseOverlay), // Cancel the pending chord
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('d') => Some(Action::PageDown),
            KeyCode::Char('u') => Some(Action::PageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateUp),
        KeyCode::Char('g') => Some(Action::EnterPendingG),
        KeyCode::Char('G') | KeyCode::End => Some(Action::NavigateBottom),
        KeyCode::Home => Some(Action::NavigateTop),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Esc => Some(Action::CloseOverlay),
        _ => None,
    }
}
