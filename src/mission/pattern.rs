//! Pattern mission — a regular-expression condition on the full line

use std::any::Any;

use regex::Regex;

use super::{Action, EngineContext, Mission, MissionKind, Outcome, capture_groups, finish, run_action};
use crate::error::Result;
use crate::input::Input;
use crate::search::SearchStrategy;

/// Completion rule recognized by a host-supplied regular expression.
///
/// Capture groups from the condition are exposed to the action through
/// [`Input::matched`](crate::input::Input::matched); the token stays the
/// trailing word of the line.
pub struct PatternMission {
    pattern: Regex,
    action: Action,
    search: Option<SearchStrategy>,
}

impl PatternMission {
    pub fn new(pattern: Regex, action: Action, search: Option<SearchStrategy>) -> Self {
        Self {
            pattern,
            action,
            search,
        }
    }
}

impl Mission for PatternMission {
    fn kind(&self) -> MissionKind {
        MissionKind::Pattern
    }

    fn describe(&self) -> String {
        format!("pattern /{}/", self.pattern.as_str())
    }

    fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    fn execute(&self, input: &mut Input, ctx: &EngineContext<'_>) -> Result<Outcome> {
        let Some(caps) = self.pattern.captures(input.line_to_cursor()) else {
            return Ok(Outcome::NoMatch);
        };
        input.set_matched(capture_groups(&caps));

        let raw = run_action(self.kind(), &self.action, input, ctx)?;
        Ok(Outcome::Completed(finish(self.search, input, raw, ctx)))
    }

    fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    fn set_search(&mut self, search: Option<SearchStrategy>) {
        self.search = search;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
