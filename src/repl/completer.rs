//! Completer adapter for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::agent::Agent;

/// Characters that end the word being completed.
///
/// Quotes and dots are deliberately not breaks: completions carrying a
/// re-attached prefix (a leading quote, a `receiver.`) must replace a
/// word that still contains that prefix for the splice to line up.
const WORD_BREAK_CHARS: &[char] = &[
    ' ', '\t', '\n', '`', '>', '<', '=', ';', '|', '&', '{', '(',
];

/// Adapts an [`Agent`] to the reedline `Completer` trait.
pub struct AgentCompleter {
    agent: Arc<Agent>,
}

impl AgentCompleter {
    pub fn new(agent: Arc<Agent>) -> Self {
        Self { agent }
    }

    /// Start of the word being completed (byte offset).
    fn word_start(line: &str, pos: usize) -> usize {
        let mut pos = pos.min(line.len());
        while !line.is_char_boundary(pos) {
            pos -= 1;
        }
        line[..pos]
            .rfind(WORD_BREAK_CHARS)
            .map(|i| i + 1) // break chars are all single-byte
            .unwrap_or(0)
    }
}

impl Completer for AgentCompleter {
    /// Complete the input at the given cursor position
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        // non-debug agents never error; a debug agent's diagnostics have
        // no channel here, so fall back to no suggestions
        let completions = self.agent.complete(line, pos).unwrap_or_default();
        let start = Self::word_start(line, pos);

        completions
            .into_iter()
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::MissionSpec;
    use crate::eval::StaticEvaluator;

    fn test_agent() -> Arc<Agent> {
        let mut evaluator = StaticEvaluator::new();
        evaluator.bind("self", ());
        let mut agent = Agent::new(Box::new(evaluator));
        agent
            .register(
                MissionSpec::method("shoot")
                    .action(|_| Ok(vec!["octopussy".into(), "goldfinger".into()])),
            )
            .unwrap();
        Arc::new(agent)
    }

    #[test]
    fn test_suggestions_with_span() {
        let mut completer = AgentCompleter::new(test_agent());
        let suggestions = completer.complete("shoot oct", 9);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "octopussy");
        assert_eq!(suggestions[0].span.start, 6); // start of "oct"
        assert_eq!(suggestions[0].span.end, 9);
    }

    #[test]
    fn test_word_start_breaks_on_paren() {
        assert_eq!(AgentCompleter::word_start("open(\"fi", 8), 5);
        assert_eq!(AgentCompleter::word_start("shoot oct", 9), 6);
        assert_eq!(AgentCompleter::word_start("session.sa", 10), 0);
    }

    #[test]
    fn test_no_match_yields_no_suggestions() {
        let mut completer = AgentCompleter::new(test_agent());
        assert!(completer.complete("unrelated", 9).is_empty());
    }
}
