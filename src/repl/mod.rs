//! Interactive demo REPL
//!
//! A reedline session wired to an [`Agent`] through [`AgentCompleter`].
//! The loop itself is deliberately thin: it exists to exercise completion
//! (Tab opens the menu) and the `spy`/`methods` diagnostics, not to be a
//! real shell. Hosts embed the agent in their own line editor instead.

mod completer;
pub mod demo;

pub use completer::AgentCompleter;

use std::sync::Arc;

use nu_ansi_term::Color;
use reedline::{
    ColumnarMenu, DefaultPrompt, DefaultPromptSegment, Emacs, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};

use crate::agent::Agent;
use crate::error::Result;

const MENU_NAME: &str = "completion_menu";

/// Interactive session around one agent.
pub struct ReplSession {
    line_editor: Reedline,
    prompt: DefaultPrompt,
    agent: Arc<Agent>,
    color_enabled: bool,
}

impl ReplSession {
    /// Wire a reedline editor to `agent` with Tab-triggered completion.
    pub fn new(agent: Arc<Agent>, color_enabled: bool) -> Self {
        let completer = Box::new(AgentCompleter::new(agent.clone()));
        let completion_menu = Box::new(ColumnarMenu::default().with_name(MENU_NAME));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(MENU_NAME.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let line_editor = Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("ruleline".to_string()),
            DefaultPromptSegment::Empty,
        );

        Self {
            line_editor,
            prompt,
            agent,
            color_enabled,
        }
    }

    /// Run the loop until EOF, interrupt, or `exit`.
    pub fn run(&mut self) -> Result<()> {
        self.print_banner();
        loop {
            match self.line_editor.read_line(&self.prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if !self.dispatch(line)? {
                        break;
                    }
                }
                Signal::CtrlC | Signal::CtrlD => break,
            }
        }
        Ok(())
    }

    /// Handle one submitted line; false ends the session.
    fn dispatch(&self, line: &str) -> Result<bool> {
        match line {
            "exit" | "quit" => return Ok(false),
            "methods" => {
                for method in self.agent.list_methods() {
                    println!("{method}");
                }
            }
            _ if line.starts_with("spy ") => {
                let report = self.agent.spy(line.trim_start_matches("spy ").trim_start())?;
                println!("{report}");
            }
            _ => {
                let note = format!("(nothing executes in the demo, Tab completes) {line}");
                if self.color_enabled {
                    println!("{}", Color::DarkGray.paint(note));
                } else {
                    println!("{note}");
                }
            }
        }
        Ok(true)
    }

    fn print_banner(&self) {
        let banner = "ruleline demo shell - try `play `, `open `, `session.`, `set `, `spy <line>`, `methods`, `exit`";
        if self.color_enabled {
            println!("{}", Color::Cyan.paint(banner));
        } else {
            println!("{banner}");
        }
    }
}
