//! Method mission — completes arguments of registered method calls

use std::any::Any;
use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::error;

use super::{
    Action, EngineContext, Mission, MissionKind, Outcome, capture_groups, finish,
    method_alternation, resolve_receiver, run_action,
};
use crate::error::Result;
use crate::input::Input;
use crate::search::SearchStrategy;

/// Per-method registration: the action plus an optional search override.
pub struct MethodAction {
    pub action: Action,
    pub search: Option<SearchStrategy>,
}

/// Completion rule matching a registered method name as the last call on
/// the line, optionally preceded by a receiver expression and a dot.
///
/// One instance per agent holds every plain-method registration. The
/// condition is generated from the live set of method names — an
/// alternation rebuilt lazily on the next request after the set changes,
/// never per request. The captured remainder after the method becomes the
/// token, and a captured leading quote/colon is re-attached to results.
pub struct MethodMission {
    actions: BTreeMap<String, MethodAction>,
    condition: OnceCell<Regex>,
}

impl MethodMission {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
            condition: OnceCell::new(),
        }
    }

    /// Register (or overwrite) the action for a method name.
    pub fn add(&mut self, method: impl Into<String>, action: Action, search: Option<SearchStrategy>) {
        let method = method.into();
        let fresh = self
            .actions
            .insert(method, MethodAction { action, search })
            .is_none();
        if fresh {
            // name set changed, regenerate the condition on next use
            self.condition.take();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered method names, sorted.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    fn condition(&self) -> Option<&Regex> {
        if self.actions.is_empty() {
            return None;
        }
        self.condition
            .get_or_try_init(|| {
                let alts = method_alternation(self.actions.keys().map(String::as_str));
                let pattern = format!(r#"(?:^|\s+)([^\s.]+)?\.?({alts})(?:\s+|\()(['":])?(.*)$"#);
                Regex::new(&pattern)
            })
            .map_err(|e| error!(error = %e, "generated method condition failed to compile"))
            .ok()
    }
}

impl Default for MethodMission {
    fn default() -> Self {
        Self::new()
    }
}

impl Mission for MethodMission {
    fn kind(&self) -> MissionKind {
        MissionKind::Method
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.method_names().collect();
        format!("method matching [{}]", names.join(", "))
    }

    fn matches(&self, line: &str) -> bool {
        self.condition().is_some_and(|re| re.is_match(line))
    }

    fn execute(&self, input: &mut Input, ctx: &EngineContext<'_>) -> Result<Outcome> {
        let Some(re) = self.condition() else {
            return Ok(Outcome::NoMatch);
        };
        let Some(caps) = re.captures(input.line_to_cursor()) else {
            return Ok(Outcome::NoMatch);
        };

        // re-validate against the live table; the cached alternation may
        // lag a registration by one request
        let method = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let Some(entry) = self.actions.get(method) else {
            return Ok(Outcome::NoMatch);
        };

        let receiver = caps.get(1).map(|m| m.as_str());
        let Some(value) = resolve_receiver(receiver, ctx)? else {
            return Ok(Outcome::NoMatch);
        };
        let quote = caps.get(3).map(|m| m.as_str().to_string());
        let token = caps.get(4).map(|m| m.as_str()).unwrap_or("").to_string();
        let matched = capture_groups(&caps);

        input.set_object(value);
        if let Some(quote) = quote {
            input.set_completion_prefix(quote);
        }
        input.set_token(token);
        input.set_matched(matched);

        let raw = run_action(self.kind(), &entry.action, input, ctx)?;
        Ok(Outcome::Completed(finish(entry.search, input, raw, ctx)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
