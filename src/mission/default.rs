//! Default mission — the always-matching fallback

use std::any::Any;

use super::{Action, EngineContext, Mission, MissionKind, Outcome, finish, run_action};
use crate::error::Result;
use crate::input::Input;
use crate::search::SearchStrategy;

/// The fallback rule tried when no other mission matched.
///
/// Its action typically delegates to the host's baseline symbol-table
/// completion. Without an action it completes nothing, which is still a
/// handled request — dispatch never falls past the default mission.
pub struct DefaultMission {
    action: Option<Action>,
    search: Option<SearchStrategy>,
}

impl DefaultMission {
    pub fn new() -> Self {
        Self {
            action: None,
            search: None,
        }
    }

    pub fn with_action(action: Action, search: Option<SearchStrategy>) -> Self {
        Self {
            action: Some(action),
            search,
        }
    }
}

impl Default for DefaultMission {
    fn default() -> Self {
        Self::new()
    }
}

impl Mission for DefaultMission {
    fn kind(&self) -> MissionKind {
        MissionKind::Default
    }

    fn describe(&self) -> String {
        "default".to_string()
    }

    fn matches(&self, _line: &str) -> bool {
        true
    }

    fn execute(&self, input: &mut Input, ctx: &EngineContext<'_>) -> Result<Outcome> {
        let Some(act) = &self.action else {
            return Ok(Outcome::Completed(Vec::new()));
        };
        let raw = run_action(self.kind(), act, input, ctx)?;
        Ok(Outcome::Completed(finish(self.search, input, raw, ctx)))
    }

    fn set_action(&mut self, action: Action) {
        self.action = Some(action);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{StaticEvaluator, TypeRegistry};
    use crate::mission::action_ok;

    fn ctx<'a>(evaluator: &'a StaticEvaluator, types: &'a TypeRegistry) -> EngineContext<'a> {
        EngineContext {
            evaluator,
            types,
            default_search: SearchStrategy::Normal,
            debug: false,
            eval_debug: false,
        }
    }

    #[test]
    fn test_always_matches() {
        let mission = DefaultMission::new();
        assert!(mission.matches(""));
        assert!(mission.matches("anything at all"));
    }

    #[test]
    fn test_without_action_completes_nothing() {
        let mission = DefaultMission::new();
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let mut input = Input::new("x", 1);
        let out = mission.execute(&mut input, &ctx(&evaluator, &types)).unwrap();
        assert_eq!(out, Outcome::Completed(Vec::new()));
    }

    #[test]
    fn test_baseline_symbols_filtered_by_token() {
        let mission = DefaultMission::with_action(
            action_ok(|_| vec!["print".into(), "proc".into(), "exit".into()]),
            None,
        );
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let mut input = Input::new("pr", 2);
        let out = mission.execute(&mut input, &ctx(&evaluator, &types)).unwrap();
        assert_eq!(
            out,
            Outcome::Completed(vec!["print".to_string(), "proc".to_string()])
        );
    }
}
