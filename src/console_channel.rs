//! Local stdin/stdout channel for driving a conversation by hand.
//!
//! Input grammar, one event per line:
//! - `/name` is a command
//! - `:tag` selects an option by tag, `:N` by its 1-based position in the last prompt
//! - anything else is text

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

use crate::communication_channel::{Choice, CommunicationChannel, Prompt};
use crate::error::ChannelError;
use crate::event::Event;


#[derive(Default)]
pub struct ConsoleChannel {
    last_options: Mutex<Vec<Choice>>,
}


impl ConsoleChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns one input line into an event against the last rendered options.
    pub fn parse_line(&self, line: &str) -> Option<Event> {
        let options = self.last_options.lock().unwrap_or_else(PoisonError::into_inner);
        parse_line(line, &options)
    }

    async fn write(&self, text: &str) -> Result<(), ChannelError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}


#[async_trait]
impl CommunicationChannel for ConsoleChannel {
    async fn send_prompt(&self, _recipient: &str, prompt: &Prompt) -> Result<(), ChannelError> {
        // Text prompts keep the previous options selectable.
        if !prompt.options.is_empty() {
            let mut options = self.last_options.lock().unwrap_or_else(PoisonError::into_inner);
            *options = prompt.options.clone();
        }

        self.write(&render_prompt(prompt)).await
    }

    async fn acknowledge(&self, _recipient: &str, tag: &str) -> Result<(), ChannelError> {
        self.write(&format!("  (selected {tag})\n")).await
    }
}


pub fn render_prompt(prompt: &Prompt) -> String {
    let mut out = format!("{}\n", prompt.text);
    for (index, choice) in prompt.options.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", index + 1, choice.label));
    }
    out
}


pub fn parse_line(line: &str, options: &[Choice]) -> Option<Event> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    if let Some(name) = line.strip_prefix('/') {
        let name = name.split_whitespace().next()?;
        return Some(Event::command(name));
    }

    if let Some(selected) = line.strip_prefix(':') {
        let selected = selected.trim();
        let by_position = selected
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| options.get(index));

        return Some(match by_position {
            Some(choice) => Event::selection(choice.tag.clone()),
            None => Event::selection(selected),
        });
    }

    Some(Event::text(line))
}


/// Line reader over stdin.
pub struct ConsoleInput {
    lines: tokio::io::Lines<BufReader<Stdin>>,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `Ok(None)` at end of input.
    pub async fn next_line(&mut self) -> Result<Option<String>, ChannelError> {
        Ok(self.lines.next_line().await?)
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}
