//! Object-method mission — per-(type, method) argument completion

use std::any::Any;
use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::{debug, error};

use super::{
    Action, EngineContext, Mission, MissionKind, Outcome, capture_groups, finish,
    method_alternation, resolve_receiver, run_action,
};
use crate::error::Result;
use crate::input::Input;
use crate::search::SearchStrategy;

struct TypeAction {
    type_name: String,
    action: Action,
    search: Option<SearchStrategy>,
}

/// Completion rule keyed first by method name, then by receiver type.
///
/// Registrations are written `Type#method`. On a syntactic method match
/// the receiver expression is evaluated and the method's type table is
/// scanned in registration order; the first type whose descriptor accepts
/// the value supplies the action. First structural match wins — no
/// most-specific-type resolution. A type name missing from the agent's
/// registry is skipped, so such an entry never matches.
pub struct ObjectMethodMission {
    actions: BTreeMap<String, Vec<TypeAction>>,
    condition: OnceCell<Regex>,
}

impl ObjectMethodMission {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
            condition: OnceCell::new(),
        }
    }

    /// Register an action for `method` on receivers of `type_name`.
    ///
    /// Re-registering the same `(type, method)` pair replaces the action
    /// in place, keeping the entry's position in the scan order.
    pub fn add(
        &mut self,
        type_name: impl Into<String>,
        method: impl Into<String>,
        action: Action,
        search: Option<SearchStrategy>,
    ) {
        let type_name = type_name.into();
        let method = method.into();
        let fresh = !self.actions.contains_key(&method);
        let entries = self.actions.entry(method).or_default();
        match entries.iter_mut().find(|e| e.type_name == type_name) {
            Some(entry) => {
                entry.action = action;
                entry.search = search;
            }
            None => entries.push(TypeAction {
                type_name,
                action,
                search,
            }),
        }
        if fresh {
            self.condition.take();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered pairs rendered `Type#method`, sorted by method name.
    pub fn method_names(&self) -> Vec<String> {
        self.actions
            .iter()
            .flat_map(|(method, entries)| {
                entries
                    .iter()
                    .map(move |e| format!("{}#{}", e.type_name, method))
            })
            .collect()
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
            .map_err(|e| error!(error = %e, "generated object-method condition failed to compile"))
            .ok()
    }
}

impl Default for ObjectMethodMission {
    fn default() -> Self {
        Self::new()
    }
}

impl Mission for ObjectMethodMission {
    fn kind(&self) -> MissionKind {
        MissionKind::ObjectMethod
    }

    fn describe(&self) -> String {
        format!("object method matching [{}]", self.method_names().join(", "))
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

        let method = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let Some(entries) = self.actions.get(method) else {
            return Ok(Outcome::NoMatch);
        };

        let receiver = caps.get(1).map(|m| m.as_str());
        let Some(value) = resolve_receiver(receiver, ctx)? else {
            return Ok(Outcome::NoMatch);
        };

        // first registered type accepting the receiver wins
        let Some(entry) = entries.iter().find(|e| {
            ctx.types
                .get(&e.type_name)
                .is_some_and(|desc| desc.is_instance(&value))
        }) else {
            debug!(method, "receiver matches no registered type");
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
