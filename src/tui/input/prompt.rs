use std::collections::VecDeque;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;

use crate::model::ActionError;
use crate::tui::render::prompt_box;
use crate::tui::theme::Theme;
use crate::util::unicode::pop_grapheme;

/// Line-input service used by actions that need text from the user.
pub trait Prompt {
    /// Read one line of input. `None` means the user cancelled.
    fn read_line(&mut self, label: &str) -> Option<String>;

    /// Read a line, rejecting an empty reply with `EmptyInput` unless
    /// `allow_empty` is set.
    fn ask(&mut self, label: &str, allow_empty: bool) -> Result<Option<String>, ActionError> {
        match self.read_line(label) {
            Some(text) if text.is_empty() && !allow_empty => Err(ActionError::EmptyInput),
            reply => Ok(reply),
        }
    }
}

/// A prompt that answers from a queue of canned replies. Once the queue is
/// empty every further question is cancelled.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    replies: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        ScriptedPrompt::default()
    }

    /// Queue a typed reply
    pub fn reply(mut self, text: &str) -> Self {
        self.replies.push_back(Some(text.to_string()));
        self
    }

    /// Queue a cancellation
    pub fn cancel(mut self) -> Self {
        self.replies.push_back(None);
        self
    }

    /// Labels of every question asked so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, label: &str) -> Option<String> {
        self.asked.push(label.to_string());
        self.replies.pop_front().flatten()
    }
}

/// Reads a line in the terminal, drawing the input box over the last frame.
pub struct TerminalPrompt<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    backdrop: &'a Buffer,
    theme: &'a Theme,
}

impl<'a, B: Backend> TerminalPrompt<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, backdrop: &'a Buffer, theme: &'a Theme) -> Self {
        TerminalPrompt {
            terminal,
            backdrop,
            theme,
        }
    }

    fn draw(&mut self, label: &str, input: &str) -> std::io::Result<()> {
        let backdrop = self.backdrop;
        let theme = self.theme;
        self.terminal.draw(|frame| {
            frame.buffer_mut().merge(backdrop);
            let area = frame.area();
            prompt_box::render_prompt_box(frame, area, label, input, theme);
        })?;
        Ok(())
    }
}

impl<B: Backend> Prompt for TerminalPrompt<'_, B> {
    fn read_line(&mut self, label: &str) -> Option<String> {
        let mut input = String::new();
        loop {
            if let Err(e) = self.draw(label, &input) {
                tracing::warn!(error = %e, "prompt draw failed");
                return None;
            }
            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "prompt read failed");
                    return None;
                }
            };
            match key.code {
                KeyCode::Enter => return Some(input),
                KeyCode::Esc => return None,
                KeyCode::Backspace => {
                    pop_grapheme(&mut input);
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c);
                }
                _ => {}
            }
        }
    }
}
