//! Interactive terminal session.
//!
//! Each line is a command. Commands that change the city or page, or press a
//! button, re-evaluate the shell the way a page rerun would.

use std::io;
use std::ops::ControlFlow;
use std::str::FromStr;

use greenguide_services::Clients;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::chatbot::QUESTION_LABEL;
use crate::shell::{Action, Page, Shell, ShellInput};
use crate::surface::Surface;

const HELP: &[&str] = &[
    "Commands:",
    "  city <name>        set the city (empty hides the pages)",
    "  page guide|chatbot select a page",
    "  find               Find Planting Options (Guide page)",
    "  ask <question>     Send Question (Chatbot page)",
    "  help               show this help",
    "  quit               leave",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    UnknownCommand(String),

    #[error("Unknown page '{0}'. Pages are 'guide' and 'chatbot'.")]
    UnknownPage(String),

    #[error("'{0}' needs an argument.")]
    MissingArgument(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    City(String),
    Page(Page),
    Find,
    Ask(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "city" => Ok(Command::City(rest.to_string())),
            "page" if rest.is_empty() => Err(CommandError::MissingArgument("page")),
            "page" => rest.parse().map(Command::Page),
            "find" => Ok(Command::Find),
            "ask" => Ok(Command::Ask(rest.to_string())),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct Session<'a> {
    shell: Shell<'a>,
    input: ShellInput,
}

impl<'a> Session<'a> {
    pub fn new(clients: &'a Clients, city: impl Into<String>) -> Self {
        Self {
            shell: Shell::new(clients),
            input: ShellInput::new(city),
        }
    }

    /// Current city and page.
    pub fn input(&self) -> &ShellInput {
        &self.input
    }

    /// Render the current page, then execute commands from `reader` until
    /// `quit` or end of input.
    pub async fn run<R>(&mut self, surface: &mut dyn Surface, reader: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.shell.evaluate(surface, &self.input).await;

        let mut lines = reader.lines();
        loop {
            surface.prompt(&format!("{}/{}> ", self.input.city, self.input.page));
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    if self.apply(surface, command).await.is_break() {
                        break;
                    }
                }
                Err(e) => surface.warning(&e.to_string()),
            }
        }

        Ok(())
    }

    /// Execute one command.
    pub async fn apply(&mut self, surface: &mut dyn Surface, command: Command) -> ControlFlow<()> {
        match command {
            Command::City(city) => {
                self.input.city = city;
                self.rerun(surface, Action::None).await;
            }
            Command::Page(page) => {
                self.input.page = page;
                self.rerun(surface, Action::None).await;
            }
            Command::Find if self.input.page != Page::Guide => {
                surface.warning("Find Planting Options is on the Guide page. Try 'page guide'.");
            }
            Command::Find => self.rerun(surface, Action::FindPlantingOptions).await,
            Command::Ask(_) if self.input.page != Page::Chatbot => {
                surface.warning("Send Question is on the Chatbot page. Try 'page chatbot'.");
            }
            Command::Ask(question) => self.rerun(surface, Action::SendQuestion(question)).await,
            Command::Help => {
                for line in HELP {
                    surface.write(line);
                }
                surface.write(&format!("On the Chatbot page: {}", QUESTION_LABEL));
            }
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    // Buttons only count for the run they were pressed in.
    async fn rerun(&mut self, surface: &mut dyn Surface, action: Action) {
        self.input.action = action;
        self.shell.evaluate(surface, &self.input).await;
        self.input.action = Action::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "city  New Delhi ".parse::<Command>().unwrap(),
            Command::City("New Delhi".into())
        );
        assert_eq!("city".parse::<Command>().unwrap(), Command::City(String::new()));
        assert_eq!(
            "page chatbot".parse::<Command>().unwrap(),
            Command::Page(Page::Chatbot)
        );
        assert_eq!("FIND".parse::<Command>().unwrap(), Command::Find);
        assert_eq!(
            "ask How often should I water a cactus?"
                .parse::<Command>()
                .unwrap(),
            Command::Ask("How often should I water a cactus?".into())
        );
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "page".parse::<Command>(),
            Err(CommandError::MissingArgument("page"))
        );
        assert_eq!(
            "page settings".parse::<Command>(),
            Err(CommandError::UnknownPage("settings".into()))
        );
        assert_eq!(
            "plant neem".parse::<Command>(),
            Err(CommandError::UnknownCommand("plant".into()))
        );
    }
}
