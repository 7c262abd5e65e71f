//! Anywhere mission — a token pattern allowed to start mid-line

use std::any::Any;

use regex::Regex;

use super::{Action, EngineContext, Mission, MissionKind, Outcome, capture_groups, finish, run_action};
use crate::error::{RegistrationError, Result};
use crate::input::Input;
use crate::search::SearchStrategy;

/// Completion rule whose pattern may occur anywhere in the line, not only
/// as the whole trailing expression.
///
/// The configured pattern is anchored at the cursor end of the line; an
/// optional literal prefix must immediately precede it. Whatever the
/// pattern matched becomes the token, so e.g. pattern `\$[\w]*` completes
/// shell-style variables inside a larger expression.
pub struct AnywhereMission {
    condition: Regex,
    action: Action,
    search: Option<SearchStrategy>,
}

impl AnywhereMission {
    /// Build from the user's token pattern and optional literal prefix.
    pub fn new(
        anywhere: &str,
        prefix: Option<&str>,
        action: Action,
        search: Option<SearchStrategy>,
    ) -> Result<Self> {
        let pattern = match prefix {
            Some(p) => format!("(?:{})({})$", regex::escape(p), anywhere),
            None => format!("({anywhere})$"),
        };
        let condition = Regex::new(&pattern).map_err(|e| RegistrationError::InvalidPattern {
            pattern,
            message: e.to_string(),
        })?;
        Ok(Self {
            condition,
            action,
            search,
        })
    }
}

impl Mission for AnywhereMission {
    fn kind(&self) -> MissionKind {
        MissionKind::Anywhere
    }

    fn describe(&self) -> String {
        format!("anywhere /{}/", self.condition.as_str())
    }

    fn matches(&self, line: &str) -> bool {
        self.condition.is_match(line)
    }

    fn execute(&self, input: &mut Input, ctx: &EngineContext<'_>) -> Result<Outcome> {
        let Some(caps) = self.condition.captures(input.line_to_cursor()) else {
            return Ok(Outcome::NoMatch);
        };
        let token = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
        input.set_matched(capture_groups(&caps));
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
    fn test_matches_mid_line() {
        let mission = AnywhereMission::new(
            r"\$\w*",
            None,
            action_ok(|_| vec!["$HOME".into(), "$PATH".into()]),
            None,
        )
        .unwrap();
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();

        assert!(mission.matches("echo $H"));
        let mut input = Input::new("echo $H", 7);
        let out = mission.execute(&mut input, &ctx(&evaluator, &types)).unwrap();
        assert_eq!(out, Outcome::Completed(vec!["$HOME".to_string()]));
        assert_eq!(input.token(), "$H");
    }

    #[test]
    fn test_prefix_is_literal() {
        // the prefix is escaped, so `(` cannot break the condition
        let mission = AnywhereMission::new(
            r"\w*",
            Some("("),
            action_ok(|_| vec!["width".into(), "height".into()]),
            None,
        )
        .unwrap();
        assert!(mission.matches("area(wi"));
        let evaluator = StaticEvaluator::new();
        let types = TypeRegistry::new();
        let mut input = Input::new("area(wi", 7);
        let out = mission.execute(&mut input, &ctx(&evaluator, &types)).unwrap();
        assert_eq!(out, Outcome::Completed(vec!["width".to_string()]));
    }

    #[test]
    fn test_invalid_pattern_fails_registration() {
        let result = AnywhereMission::new("[", None, action_ok(|_| Vec::new()), None);
        assert!(result.is_err());
    }
}
