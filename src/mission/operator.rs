//! Operator-method mission — argument completion for operator calls

use std::any::Any;
use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::error;

use super::method::MethodAction;
use super::{
    Action, EngineContext, Mission, MissionKind, Outcome, capture_groups, finish,
    resolve_receiver, run_action,
};
use crate::error::Result;
use crate::input::Input;
use crate::search::SearchStrategy;

/// Whether a method name is an operator (no word characters).
pub(crate) fn is_operator(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// The method-mission specialization for operator-call syntax, e.g.
/// `tracks << fo` or `tracks[3`.
///
/// Same per-agent table and lazily regenerated condition as
/// [`MethodMission`](super::MethodMission), but the condition requires an
/// explicit receiver and tolerates the bare-operator spelling. An index
/// operator registered as `[]` matches on its opening bracket.
pub struct OperatorMethodMission {
    actions: BTreeMap<String, MethodAction>,
    condition: OnceCell<Regex>,
}

impl OperatorMethodMission {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
            condition: OnceCell::new(),
        }
    }

    /// Register (or overwrite) the action for an operator.
    pub fn add(
        &mut self,
        operator: impl Into<String>,
        action: Action,
        search: Option<SearchStrategy>,
    ) {
        let operator = operator.into();
        let fresh = self
            .actions
            .insert(operator, MethodAction { action, search })
            .is_none();
        if fresh {
            self.condition.take();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered operator names, sorted.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// The table key for a matched operator spelling.
    fn key_for(&self, matched: &str) -> String {
        if matched == "[" {
            "[]".to_string()
        } else {
            matched.to_string()
        }
    }

    fn condition(&self) -> Option<&Regex> {
        if self.actions.is_empty() {
            return None;
        }
        self.condition
            .get_or_try_init(|| {
                let mut alts: Vec<String> = self
                    .actions
                    .keys()
                    .map(|op| {
                        if op == "[]" {
                            r"\[".to_string()
                        } else {
                            regex::escape(op)
                        }
                    })
                    .collect();
                alts.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
                let alts = alts.join("|");
                let pattern = format!(r#"(?:^|\s+)(\S+)\s*({alts})\s*\(?(['":])?(\S*)$"#);
                Regex::new(&pattern)
            })
            .map_err(|e| error!(error = %e, "generated operator condition failed to compile"))
            .ok()
    }
}

impl Default for OperatorMethodMission {
    fn default() -> Self {
        Self::new()
    }
}

impl Mission for OperatorMethodMission {
    fn kind(&self) -> MissionKind {
        MissionKind::OperatorMethod
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.method_names().collect();
        format!("operator matching [{}]", names.join(", "))
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

        let key = self.key_for(caps.get(2).map(|m| m.as_str()).unwrap_or(""));
        let Some(entry) = self.actions.get(&key) else {
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
