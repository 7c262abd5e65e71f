//! Completion rules ("missions")
//!
//! A mission is one completion rule: a condition that recognizes when the
//! rule applies to the line being edited, an action that produces raw
//! candidates, and a search strategy that filters them against the
//! partial token. Variants differ only in condition-matching logic:
//!
//! - **pattern**: a regular expression tested against the line
//! - **method**: a registered method name as the last call on the line
//! - **operator**: the method variant for operator-call syntax
//! - **object**: the receiver expression evaluates to a configured type
//! - **object-method**: per-(type, method) actions picked by receiver type
//! - **anywhere**: a pattern allowed to start anywhere in the line
//! - **default**: always matches; the final fallback
//!
//! Dispatch is first-match-wins: the agent walks its ordered mission list
//! and the first mission whose condition holds owns the request.

mod anywhere;
mod default;
mod method;
mod object;
mod object_method;
mod operator;
mod pattern;

pub use anywhere::AnywhereMission;
pub use default::DefaultMission;
pub use method::{MethodAction, MethodMission};
pub use object::ObjectMission;
pub use object_method::ObjectMethodMission;
pub use operator::OperatorMethodMission;
pub(crate) use operator::is_operator;
pub use pattern::PatternMission;

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ActionError, Result};
use crate::eval::{Evaluator, TypeRegistry, Value};
use crate::input::Input;
use crate::search::SearchStrategy;

/// A completion action: turns a populated [`Input`] into raw candidates.
///
/// Actions live behind `Arc` so registrations stay cloneable and a
/// replace can swap them without touching the rest of the mission.
pub type Action =
    Arc<dyn Fn(&Input) -> std::result::Result<Vec<String>, ActionError> + Send + Sync>;

/// Wrap a closure as an [`Action`].
pub fn action<F>(f: F) -> Action
where
    F: Fn(&Input) -> std::result::Result<Vec<String>, ActionError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure that cannot fail as an [`Action`].
pub fn action_ok<F>(f: F) -> Action
where
    F: Fn(&Input) -> Vec<String> + Send + Sync + 'static,
{
    Arc::new(move |input| Ok(f(input)))
}

/// Mission variant discriminator, used by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    Pattern,
    Method,
    OperatorMethod,
    Object,
    ObjectMethod,
    Anywhere,
    Default,
}

impl std::fmt::Display for MissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MissionKind::Pattern => "pattern",
            MissionKind::Method => "method",
            MissionKind::OperatorMethod => "operator method",
            MissionKind::Object => "object",
            MissionKind::ObjectMethod => "object method",
            MissionKind::Anywhere => "anywhere",
            MissionKind::Default => "default",
        };
        f.write_str(name)
    }
}

/// Result of asking a mission to handle a request.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The condition did not hold after re-validation (including receiver
    /// evaluation failure outside eval-debug). Dispatch moves on.
    NoMatch,

    /// The mission owned the request; these are the final completions.
    Completed(Vec<String>),
}

/// Engine state handed to a mission while it handles a request.
pub struct EngineContext<'a> {
    /// Host-supplied expression evaluator.
    pub evaluator: &'a dyn Evaluator,

    /// Host-populated type registry for type-name resolution.
    pub types: &'a TypeRegistry,

    /// Search strategy applied when a mission does not carry its own.
    pub default_search: SearchStrategy,

    /// Surface action failures instead of returning empty completions.
    pub debug: bool,

    /// Surface evaluation failures instead of treating them as non-match.
    pub eval_debug: bool,
}

/// One completion rule.
///
/// `matches` is a cheap pattern pretest; `execute` is the full
/// per-request lifecycle (re-validate against the live condition,
/// populate the input, resolve the receiver where needed, run the action,
/// filter, re-attach the completion prefix).
pub trait Mission: Send + Sync {
    fn kind(&self) -> MissionKind;

    /// Human-readable condition summary for diagnostics.
    fn describe(&self) -> String;

    /// Cheap condition test against the line up to the cursor.
    fn matches(&self, line: &str) -> bool;

    /// Handle a request. Returns [`Outcome::NoMatch`] when re-validation
    /// fails; errors escape only in debug/eval-debug mode.
    fn execute(&self, input: &mut Input, ctx: &EngineContext<'_>) -> Result<Outcome>;

    /// Replace the action in place (named-replace path). Table-based
    /// missions are re-registered through their specs instead.
    fn set_action(&mut self, _action: Action) {
        warn!(kind = %self.kind(), "mission kind does not support in-place action replacement");
    }

    /// Replace the search strategy in place (named-replace path).
    fn set_search(&mut self, _search: Option<SearchStrategy>) {
        warn!(kind = %self.kind(), "mission kind does not support in-place search replacement");
    }

    /// Downcast support for read-only table inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast support for the agent's method-table routing.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/* ========================= shared mission plumbing ========================= */

/// Resolve a captured receiver expression through the host evaluator.
///
/// An absent or empty capture defaults to the current context (`self`).
/// Evaluation failure is a non-match (`Ok(None)`) unless eval-debug is
/// enabled, in which case it surfaces with the triggering expression.
pub(crate) fn resolve_receiver(
    expression: Option<&str>,
    ctx: &EngineContext<'_>,
) -> Result<Option<Value>> {
    let expression = match expression {
        Some(e) if !e.is_empty() => e,
        _ => "self",
    };
    match ctx.evaluator.evaluate(expression) {
        Ok(value) => Ok(Some(value)),
        Err(e) if ctx.eval_debug => Err(e.into()),
        Err(e) => {
            debug!(expression, error = %e.message, "receiver evaluation failed, falling through");
            Ok(None)
        }
    }
}

/// Run an action, converting failure into an empty candidate list unless
/// debug is enabled. Once a condition matched, the mission owns the
/// request, so a failed action never falls through to other missions.
pub(crate) fn run_action(
    kind: MissionKind,
    act: &Action,
    input: &Input,
    ctx: &EngineContext<'_>,
) -> Result<Vec<String>> {
    match act(input) {
        Ok(candidates) => Ok(candidates),
        Err(e) if ctx.debug => Err(e.into()),
        Err(e) => {
            warn!(mission = %kind, error = %e.message, "completion action failed");
            Ok(Vec::new())
        }
    }
}

/// Filter raw candidates with the effective search strategy and re-attach
/// the completion prefix.
pub(crate) fn finish(
    search: Option<SearchStrategy>,
    input: &Input,
    raw: Vec<String>,
    ctx: &EngineContext<'_>,
) -> Vec<String> {
    let strategy = search.unwrap_or(ctx.default_search);
    let filtered = strategy.filter(input.token(), &raw);
    match input.completion_prefix() {
        Some(prefix) => filtered
            .into_iter()
            .map(|c| format!("{prefix}{c}"))
            .collect(),
        None => filtered,
    }
}

/// Collect a regex match's capture groups into owned strings.
pub(crate) fn capture_groups(caps: &regex::Captures<'_>) -> Vec<Option<String>> {
    caps.iter()
        .map(|g| g.map(|m| m.as_str().to_string()))
        .collect()
}

/// Build a regex alternation from method names, longest first so that
/// e.g. `findOne` wins over `find` inside the generated condition.
pub(crate) fn method_alternation<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut escaped: Vec<String> = names.map(regex::escape).collect();
    escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    escaped.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::StaticEvaluator;

    fn ctx<'a>(evaluator: &'a StaticEvaluator, types: &'a TypeRegistry) -> EngineContext<'a> {
        EngineContext {
            evaluator,
            types,
            default_search: SearchStrategy::Underscore,
            debug: false,
            eval_debug: false,
        }
    }

    #[test]
    fn test_resolve_receiver_defaults_to_self() {
        let mut evaluator = StaticEvaluator::new();
        evaluator.bind("self", 42u8);
        let types = TypeRegistry::new();
        let ctx = ctx(&evaluator, &types);

        let value = resolve_receiver(None, &ctx).unwrap().unwrap();
        assert!(value.is::<u8>());
        let value = resolve_receiver(Some(""), &ctx).unwrap().unwrap();
        assert!(value.is::<u8>());
    }

    #[test]
    fn test_resolve_receiver_failure_is_non_match() {
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let ctx = ctx(&evaluator, &types);

        assert!(resolve_receiver(Some("nope"), &ctx).unwrap().is_none());
    }

    #[test]
    fn test_resolve_receiver_failure_surfaces_in_eval_debug() {
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let mut ctx = ctx(&evaluator, &types);
        ctx.eval_debug = true;

        assert!(resolve_receiver(Some("nope"), &ctx).is_err());
    }

    #[test]
    fn test_run_action_failure_yields_empty_outside_debug() {
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let ctx = ctx(&evaluator, &types);
        let failing = action(|_| Err(ActionError::new("boom")));
        let input = Input::new("x", 1);

        let out = run_action(MissionKind::Pattern, &failing, &input, &ctx).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_action_failure_surfaces_in_debug() {
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let mut ctx = ctx(&evaluator, &types);
        ctx.debug = true;
        let failing = action(|_| Err(ActionError::new("boom")));
        let input = Input::new("x", 1);

        assert!(run_action(MissionKind::Pattern, &failing, &input, &ctx).is_err());
    }

    #[test]
    fn test_finish_reattaches_prefix() {
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let ctx = ctx(&evaluator, &types);
        let mut input = Input::new("say \"he", 7);
        input.set_token("he");
        input.set_completion_prefix("\"");

        let out = finish(
            Some(SearchStrategy::Normal),
            &input,
            vec!["hello".into(), "bye".into()],
            &ctx,
        );
        assert_eq!(out, vec!["\"hello".to_string()]);
    }

    #[test]
    fn test_method_alternation_prefers_longest() {
        let names = ["find", "findOne"];
        let alt = method_alternation(names.iter().copied());
        assert_eq!(alt, "findOne|find");
    }
}
