use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use diamonds_core::{ClipboardSink, Key, Navigator, Outcome, ProjectStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{render, theme::Theme};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

enum AppEvent {
    Input(Event),
    InputError(io::Error),
}

/// Terminal front end around a [`Navigator`].
pub struct DiamondsApp<S, C> {
    navigator: Navigator<S, C>,
    theme: Theme,
}

impl<S: ProjectStore, C: ClipboardSink> DiamondsApp<S, C> {
    pub fn new(navigator: Navigator<S, C>, theme: Theme) -> Self {
        Self { navigator, theme }
    }

    /// Take over the terminal until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let result = self.event_loop(&mut terminal, &mut event_rx).await;
        restore_terminal(&mut terminal)?;
        info!("exiting");
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| {
                render::draw(
                    frame,
                    &self.theme,
                    self.navigator.state(),
                    self.navigator.projects(),
                )
            })?;
            self.navigator.acknowledge_status();

            match events.recv().await {
                Some(AppEvent::Input(event)) => {
                    if self.handle_input(event) == Outcome::Quit {
                        return Ok(());
                    }
                }
                Some(AppEvent::InputError(err)) => {
                    return Err(err).context("failed to read terminal input");
                }
                None => return Ok(()),
            }
        }
    }

    fn handle_input(&mut self, event: Event) -> Outcome {
        match event {
            Event::Key(key) => match map_key(key) {
                Some(key) => {
                    debug!(?key, view = %self.navigator.view(), "key");
                    self.navigator.handle_key(key)
                }
                None => Outcome::Continue,
            },
            Event::Resize(_, _) => Outcome::Continue,
            Event::Mouse(_) => Outcome::Continue,
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => Outcome::Continue,
        }
    }
}

/// Translate a crossterm key press into the navigator's vocabulary.
fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Key::Interrupt);
    }
    match key.code {
        KeyCode::Char(ch) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            Some(Key::Char(ch))
        }
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        if sender.is_closed() {
            break;
        }
        match event::poll(POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = sender.blocking_send(AppEvent::InputError(err));
                    break;
                }
            },
            Ok(false) => {}
            Err(err) => {
                let _ = sender.blocking_send(AppEvent::InputError(err));
                break;
            }
        }
    });
}
