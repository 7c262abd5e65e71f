//! Object mission — matches when the receiver is of a configured type

use std::any::Any;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{
    Action, EngineContext, Mission, MissionKind, Outcome, capture_groups, finish,
    resolve_receiver, run_action,
};
use crate::error::Result;
use crate::input::Input;
use crate::search::SearchStrategy;

/// Trailing `receiver.partial` shape shared by every object mission.
static CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s+)([^.\s]+(?:\.[^.\s]+)*)\.(\w*)$").unwrap()
});

/// Completion rule gated on the runtime type of the receiver expression.
///
/// The condition recognizes a trailing `expr.partial`; the expression is
/// evaluated and the mission matches only when the resolved value is an
/// instance of the configured type (per the host's [`TypeDesc`]
/// predicate, which may model subtyping). The receiver text plus `.` is
/// re-attached to every completion so the host can splice whole
/// `expr.method` replacements.
///
/// [`TypeDesc`]: crate::eval::TypeDesc
pub struct ObjectMission {
    type_name: String,
    action: Action,
    search: Option<SearchStrategy>,
}

impl ObjectMission {
    pub fn new(type_name: impl Into<String>, action: Action, search: Option<SearchStrategy>) -> Self {
        Self {
            type_name: type_name.into(),
            action,
            search,
        }
    }
}

impl Mission for ObjectMission {
    fn kind(&self) -> MissionKind {
        MissionKind::Object
    }

    fn describe(&self) -> String {
        format!("object of type {}", self.type_name)
    }

    fn matches(&self, line: &str) -> bool {
        CONDITION.is_match(line)
    }

    fn execute(&self, input: &mut Input, ctx: &EngineContext<'_>) -> Result<Outcome> {
        let Some(caps) = CONDITION.captures(input.line_to_cursor()) else {
            return Ok(Outcome::NoMatch);
        };
        let receiver = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let partial = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let Some(desc) = ctx.types.get(&self.type_name) else {
            // unregistered type names never match, by policy
            debug!(type_name = %self.type_name, "type not in registry, mission cannot match");
            return Ok(Outcome::NoMatch);
        };
        let Some(value) = resolve_receiver(Some(receiver), ctx)? else {
            return Ok(Outcome::NoMatch);
        };
        if !desc.is_instance(&value) {
            return Ok(Outcome::NoMatch);
        }

        let matched = capture_groups(&caps);
        let completion_prefix = format!("{receiver}.");
        let token = partial.to_string();

        input.set_object(value);
        input.set_matched(matched);
        input.set_completion_prefix(completion_prefix);
        input.set_token(token);

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
