//! The agent — ordered mission registry and dispatch
//!
//! An [`Agent`] owns everything one completion engine needs: the ordered
//! mission list, the host evaluator, the type registry, and the per-agent
//! Method/OperatorMethod/ObjectMethod action tables. Nothing here is
//! process-global; independent agents coexist freely (which is also what
//! makes them easy to test).
//!
//! Dispatch is first-match-wins over the list: missions registered
//! without a placement run in registration order, `last`-placed missions
//! form a trailing block in their own registration order, and the default
//! mission is always the final fallback.

use std::fmt;

use regex::Regex;
use tracing::{debug, info};

use crate::config::CompletionConfig;
use crate::error::{RegistrationError, Result};
use crate::eval::{Evaluator, TypeRegistry};
use crate::input::Input;
use crate::mission::{
    Action, AnywhereMission, DefaultMission, EngineContext, MethodMission, Mission, MissionKind,
    ObjectMethodMission, ObjectMission, OperatorMethodMission, Outcome, PatternMission, action,
    is_operator,
};
use crate::search::SearchStrategy;

/// Where a mission is inserted among the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// After the currently registered non-last missions.
    #[default]
    Ordered,

    /// At this 0-based index in the list.
    Index(usize),

    /// In the trailing block evaluated after all other missions,
    /// ordered among themselves by registration order.
    Last,
}

/// The condition half of a registration; the variant decides which
/// mission kind handles it.
pub enum Condition {
    /// Regular expression tested against the line up to the cursor.
    On(Regex),

    /// Method names whose call arguments get completion. Entries of the
    /// form `Type#method` go to the per-type object-method table;
    /// all-symbol entries (`<<`, `[]`) to the operator table.
    Methods(Vec<String>),

    /// Receiver type name for an object mission.
    Object(String),

    /// Token pattern allowed to start anywhere in the line, with an
    /// optional literal prefix that must immediately precede it.
    Anywhere {
        pattern: String,
        prefix: Option<String>,
    },

    /// The always-matching fallback.
    Default,
}

impl Condition {
    fn describe(&self) -> String {
        match self {
            Condition::On(re) => format!("/{re}/"),
            Condition::Methods(names) => format!("methods {names:?}"),
            Condition::Object(ty) => format!("object {ty}"),
            Condition::Anywhere { pattern, .. } => format!("anywhere /{pattern}/"),
            Condition::Default => "default".to_string(),
        }
    }
}

/// One completion-rule registration.
///
/// Built with the constructor matching the condition kind, then refined
/// with the builder methods:
///
/// ```no_run
/// use ruleline::{MissionSpec, Placement, SearchStrategy};
///
/// let spec = MissionSpec::methods(["shoot"])
///     .action(|_input| Ok(vec!["octopussy".into(), "goldfinger".into()]))
///     .search(SearchStrategy::IgnoreCase)
///     .place(Placement::Last);
/// ```
pub struct MissionSpec {
    condition: Option<Condition>,
    action: Option<Action>,
    search: Option<SearchStrategy>,
    place: Placement,
    name: Option<String>,
}

impl MissionSpec {
    fn with_condition(condition: Condition) -> Self {
        Self {
            condition: Some(condition),
            action: None,
            search: None,
            place: Placement::Ordered,
            name: None,
        }
    }

    /// Rule recognized by a regular expression on the line.
    pub fn on(pattern: Regex) -> Self {
        Self::with_condition(Condition::On(pattern))
    }

    /// Rule completing the arguments of one method.
    pub fn method(name: impl Into<String>) -> Self {
        Self::with_condition(Condition::Methods(vec![name.into()]))
    }

    /// Rule completing the arguments of several methods at once.
    pub fn methods<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_condition(Condition::Methods(
            names.into_iter().map(Into::into).collect(),
        ))
    }

    /// Rule gated on the receiver being an instance of `type_name`.
    pub fn object(type_name: impl Into<String>) -> Self {
        Self::with_condition(Condition::Object(type_name.into()))
    }

    /// Rule whose token pattern may start anywhere in the line.
    pub fn anywhere(pattern: impl Into<String>) -> Self {
        Self::with_condition(Condition::Anywhere {
            pattern: pattern.into(),
            prefix: None,
        })
    }

    /// Like [`anywhere`](Self::anywhere) with a literal prefix that must
    /// immediately precede the token.
    pub fn anywhere_prefixed(pattern: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::with_condition(Condition::Anywhere {
            pattern: pattern.into(),
            prefix: Some(prefix.into()),
        })
    }

    /// The fallback rule used when nothing else matches.
    pub fn fallback() -> Self {
        Self::with_condition(Condition::Default)
    }

    /// Replace-only spec: no condition, targets an existing named
    /// mission through [`Agent::recomplete`].
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            condition: None,
            action: None,
            search: None,
            place: Placement::Ordered,
            name: Some(name.into()),
        }
    }

    /// The action producing raw candidates once the condition matches.
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(&Input) -> std::result::Result<Vec<String>, crate::error::ActionError>
            + Send
            + Sync
            + 'static,
    {
        self.action = Some(action(f));
        self
    }

    /// A pre-wrapped [`Action`], e.g. one shared between specs.
    pub fn raw_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Search strategy override for this rule (`Off` disables filtering).
    pub fn search(mut self, search: SearchStrategy) -> Self {
        self.search = Some(search);
        self
    }

    pub fn place(mut self, place: Placement) -> Self {
        self.place = place;
        self
    }

    /// Unique name, enabling in-place replacement via
    /// [`Agent::recomplete`]. Ignored for method-family specs, whose
    /// replacement goes through the method tables instead.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

struct MissionEntry {
    mission: Box<dyn Mission>,
    name: Option<String>,
    last: bool,
}

/// Diagnostic result of [`Agent::spy`].
#[derive(Debug)]
pub struct SpyReport {
    /// Kind of the mission that matched.
    pub kind: MissionKind,

    /// Condition summary of the matching mission.
    pub mission: String,

    /// The completions the mission produced.
    pub completions: Vec<String>,
}

impl fmt::Display for SpyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matches completion mission: {}", self.mission)?;
        write!(f, "Possible completions: {:?}", self.completions)
    }
}

/// One completion engine: registered missions plus dispatch.
pub struct Agent {
    missions: Vec<MissionEntry>,
    default_mission: DefaultMission,
    evaluator: Box<dyn Evaluator>,
    types: TypeRegistry,
    default_search: SearchStrategy,
    debug: bool,
    eval_debug: bool,
}

impl Agent {
    /// Agent with default engine configuration.
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self::with_config(&CompletionConfig::default(), evaluator)
    }

    /// Agent configured from the `[completion]` config table.
    pub fn with_config(config: &CompletionConfig, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            missions: Vec::new(),
            default_mission: DefaultMission::new(),
            evaluator,
            types: TypeRegistry::new(),
            default_search: config.default_search,
            debug: config.debug,
            eval_debug: config.eval_debug,
        }
    }

    /// The type registry backing Object/ObjectMethod type-name lookups.
    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    pub fn set_default_search(&mut self, search: SearchStrategy) {
        self.default_search = search;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_eval_debug(&mut self, eval_debug: bool) {
        self.eval_debug = eval_debug;
    }

    /// Register a completion rule.
    ///
    /// Fails fast on conflicts (duplicate name, missing condition or
    /// action, invalid pattern) without touching the mission list.
    pub fn register(&mut self, spec: MissionSpec) -> Result<()> {
        let condition = spec.condition.ok_or(RegistrationError::MissingCondition)?;
        let act = spec.action.ok_or(RegistrationError::MissingAction)?;
        info!(condition = %condition.describe(), "registering completion mission");

        match condition {
            Condition::Methods(names) => self.register_methods(names, act, spec.search, spec.place),
            Condition::Default => {
                self.default_mission.set_action(act);
                self.default_mission.set_search(spec.search);
                Ok(())
            }
            single => {
                let mission = Self::build_single(single, act, spec.search)?;
                self.insert_named(mission, spec.name, spec.place)
            }
        }
    }

    /// Replace an existing rule.
    ///
    /// With a name and no condition, the named mission's action/search
    /// are updated in place; with a condition too, the mission is rebuilt
    /// and swapped at the same position. A condition for an unknown name
    /// registers the rule fresh; no condition for an unknown name is an
    /// error. Method-family and fallback specs re-route to their tables,
    /// where re-registration already replaces.
    pub fn recomplete(&mut self, spec: MissionSpec) -> Result<()> {
        if matches!(
            spec.condition,
            Some(Condition::Methods(_)) | Some(Condition::Default)
        ) {
            return self.register(spec);
        }
        let Some(name) = spec.name.clone() else {
            return Err(RegistrationError::UnknownName("(unnamed)".to_string()).into());
        };
        let Some(index) = self
            .missions
            .iter()
            .position(|e| e.name.as_deref() == Some(name.as_str()))
        else {
            return match spec.condition {
                Some(_) => self.register(spec),
                None => Err(RegistrationError::UnknownName(name).into()),
            };
        };
        let act = spec.action.ok_or(RegistrationError::MissingAction)?;
        match spec.condition {
            Some(condition) => {
                // swap in place, keeping name and dispatch position
                self.missions[index].mission = Self::build_single(condition, act, spec.search)?;
            }
            None => {
                let entry = &mut self.missions[index];
                entry.mission.set_action(act);
                entry.mission.set_search(spec.search);
            }
        }
        Ok(())
    }

    /// Produce completions for `line` with the cursor at byte `cursor`.
    ///
    /// First-match-wins: the first mission whose condition holds owns the
    /// request. Internal failures yield an empty list unless the debug
    /// flags are set, in which case they surface as errors.
    pub fn complete(&self, line: &str, cursor: usize) -> Result<Vec<String>> {
        let ctx = self.context();
        for entry in &self.missions {
            let mut input = Input::new(line, cursor);
            if !entry.mission.matches(input.line_to_cursor()) {
                continue;
            }
            match entry.mission.execute(&mut input, &ctx)? {
                Outcome::NoMatch => continue,
                Outcome::Completed(completions) => {
                    debug!(
                        mission = %entry.mission.describe(),
                        count = completions.len(),
                        "mission handled completion"
                    );
                    return Ok(completions);
                }
            }
        }
        let mut input = Input::new(line, cursor);
        match self.default_mission.execute(&mut input, &ctx)? {
            Outcome::Completed(completions) => Ok(completions),
            Outcome::NoMatch => Ok(Vec::new()),
        }
    }

    /// Run the dispatch a completion for `line` would run, reporting
    /// which mission matched and what it returned.
    pub fn spy(&self, line: &str) -> Result<SpyReport> {
        let ctx = self.context();
        for entry in &self.missions {
            let mut input = Input::new(line, line.len());
            if !entry.mission.matches(input.line_to_cursor()) {
                continue;
            }
            if let Outcome::Completed(completions) = entry.mission.execute(&mut input, &ctx)? {
                return Ok(SpyReport {
                    kind: entry.mission.kind(),
                    mission: entry.mission.describe(),
                    completions,
                });
            }
        }
        let mut input = Input::new(line, line.len());
        let completions = match self.default_mission.execute(&mut input, &ctx)? {
            Outcome::Completed(completions) => completions,
            Outcome::NoMatch => Vec::new(),
        };
        Ok(SpyReport {
            kind: MissionKind::Default,
            mission: self.default_mission.describe(),
            completions,
        })
    }

    /// Every method name with argument completion registered, sorted;
    /// object-qualified entries render as `Type#method`.
    pub fn list_methods(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        for entry in &self.missions {
            let mission = entry.mission.as_any();
            if let Some(m) = mission.downcast_ref::<MethodMission>() {
                all.extend(m.method_names().map(String::from));
            } else if let Some(m) = mission.downcast_ref::<OperatorMethodMission>() {
                all.extend(m.method_names().map(String::from));
            } else if let Some(m) = mission.downcast_ref::<ObjectMethodMission>() {
                all.extend(m.method_names());
            }
        }
        all.sort();
        all
    }

    /* ===================== registration internals ===================== */

    fn build_single(
        condition: Condition,
        act: Action,
        search: Option<SearchStrategy>,
    ) -> Result<Box<dyn Mission>> {
        match condition {
            Condition::On(pattern) => Ok(Box::new(PatternMission::new(pattern, act, search))),
            Condition::Object(type_name) => {
                Ok(Box::new(ObjectMission::new(type_name, act, search)))
            }
            Condition::Anywhere { pattern, prefix } => Ok(Box::new(AnywhereMission::new(
                &pattern,
                prefix.as_deref(),
                act,
                search,
            )?)),
            Condition::Methods(_) | Condition::Default => {
                Err(RegistrationError::MissingCondition.into())
            }
        }
    }

    fn register_methods(
        &mut self,
        names: Vec<String>,
        act: Action,
        search: Option<SearchStrategy>,
        place: Placement,
    ) -> Result<()> {
        for name in names {
            if let Some((type_name, method)) = name.split_once('#') {
                if type_name.is_empty() || method.is_empty() {
                    return Err(RegistrationError::InvalidMethodSpec(name).into());
                }
                let index = self.table_index(MissionKind::ObjectMethod, place);
                if let Some(m) = self.missions[index]
                    .mission
                    .as_any_mut()
                    .downcast_mut::<ObjectMethodMission>()
                {
                    m.add(type_name, method, act.clone(), search);
                }
            } else if is_operator(&name) {
                let index = self.table_index(MissionKind::OperatorMethod, place);
                if let Some(m) = self.missions[index]
                    .mission
                    .as_any_mut()
                    .downcast_mut::<OperatorMethodMission>()
                {
                    m.add(name, act.clone(), search);
                }
            } else if !name.is_empty() {
                let index = self.table_index(MissionKind::Method, place);
                if let Some(m) = self.missions[index]
                    .mission
                    .as_any_mut()
                    .downcast_mut::<MethodMission>()
                {
                    m.add(name, act.clone(), search);
                }
            } else {
                return Err(RegistrationError::InvalidMethodSpec(name).into());
            }
        }
        Ok(())
    }

    /// Index of the per-agent table mission of `kind`, creating it at
    /// `place` on first use.
    fn table_index(&mut self, kind: MissionKind, place: Placement) -> usize {
        if let Some(index) = self.missions.iter().position(|e| e.mission.kind() == kind) {
            return index;
        }
        let mission: Box<dyn Mission> = match kind {
            MissionKind::OperatorMethod => Box::new(OperatorMethodMission::new()),
            MissionKind::ObjectMethod => Box::new(ObjectMethodMission::new()),
            _ => Box::new(MethodMission::new()),
        };
        self.insert(MissionEntry {
            mission,
            name: None,
            last: matches!(place, Placement::Last),
        }, place);
        self.missions
            .iter()
            .position(|e| e.mission.kind() == kind)
            .expect("mission inserted above")
    }

    fn insert_named(
        &mut self,
        mission: Box<dyn Mission>,
        name: Option<String>,
        place: Placement,
    ) -> Result<()> {
        if let Some(name) = &name {
            if self.missions.iter().any(|e| e.name.as_deref() == Some(name)) {
                return Err(RegistrationError::DuplicateName(name.clone()).into());
            }
        }
        self.insert(
            MissionEntry {
                mission,
                name,
                last: matches!(place, Placement::Last),
            },
            place,
        );
        Ok(())
    }

    fn insert(&mut self, entry: MissionEntry, place: Placement) {
        match place {
            Placement::Index(index) => {
                let index = index.min(self.missions.len());
                self.missions.insert(index, entry);
            }
            _ => self.missions.push(entry),
        }
        // stable partition: non-last missions keep their order, last
        // missions trail in registration order
        self.missions.sort_by_key(|e| e.last);
    }

    fn context(&self) -> EngineContext<'_> {
        EngineContext {
            evaluator: self.evaluator.as_ref(),
            types: &self.types,
            default_search: self.default_search,
            debug: self.debug,
            eval_debug: self.eval_debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::StaticEvaluator;

    struct Session;

    fn agent() -> Agent {
        let mut evaluator = StaticEvaluator::new();
        evaluator.bind("self", ());
        evaluator.bind("session", Session);
        Agent::new(Box::new(evaluator))
    }

    fn pattern(p: &str) -> Regex {
        Regex::new(p).unwrap()
    }

    #[test]
    fn test_first_registered_mission_wins() {
        let mut agent = agent();
        agent
            .register(MissionSpec::on(pattern("^git")).action(|_| Ok(vec!["first".into()])))
            .unwrap();
        agent
            .register(MissionSpec::on(pattern("^git")).action(|_| Ok(vec!["second".into()])))
            .unwrap();

        assert_eq!(agent.complete("git ", 4).unwrap(), vec!["first".to_string()]);
    }

    #[test]
    fn test_last_missions_trail_registration_order() {
        let mut agent = agent();
        agent
            .register(
                MissionSpec::on(pattern("^x"))
                    .action(|_| Ok(vec!["late-a".into()]))
                    .place(Placement::Last),
            )
            .unwrap();
        agent
            .register(
                MissionSpec::on(pattern("^x"))
                    .action(|_| Ok(vec!["late-b".into()]))
                    .place(Placement::Last),
            )
            .unwrap();
        agent
            .register(MissionSpec::on(pattern("^x")).action(|_| Ok(vec!["early".into()])))
            .unwrap();

        // the non-last mission registered after still runs first
        assert_eq!(agent.complete("x", 1).unwrap(), vec!["early".to_string()]);

        // among last missions, registration order decides
        let mut agent2 = self::agent();
        agent2
            .register(
                MissionSpec::on(pattern("^x"))
                    .action(|_| Ok(vec!["late-a".into()]))
                    .place(Placement::Last),
            )
            .unwrap();
        agent2
            .register(
                MissionSpec::on(pattern("^x"))
                    .action(|_| Ok(vec!["late-b".into()]))
                    .place(Placement::Last),
            )
            .unwrap();
        assert_eq!(agent2.complete("x", 1).unwrap(), vec!["late-a".to_string()]);
    }

    #[test]
    fn test_index_placement() {
        let mut agent = agent();
        agent
            .register(MissionSpec::on(pattern("^x")).action(|_| Ok(vec!["a".into()])))
            .unwrap();
        agent
            .register(
                MissionSpec::on(pattern("^x"))
                    .action(|_| Ok(vec!["b".into()]))
                    .place(Placement::Index(0)),
            )
            .unwrap();

        assert_eq!(agent.complete("x", 1).unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_recomplete_keeps_position() {
        let mut agent = agent();
        agent
            .register(
                MissionSpec::on(pattern("^a"))
                    .action(|_| Ok(vec!["shadowing".into()]))
                    .name("top"),
            )
            .unwrap();
        agent
            .register(
                MissionSpec::on(pattern("^ab"))
                    .action(|_| Ok(vec!["shadowed".into()]))
                    .name("bottom"),
            )
            .unwrap();

        // replace the first mission, with a new condition; it must stay
        // ahead of "bottom" in dispatch order
        agent
            .recomplete(
                MissionSpec::on(pattern("^ab"))
                    .action(|_| Ok(vec!["replaced".into()]))
                    .name("top"),
            )
            .unwrap();
        assert_eq!(agent.complete("ab", 2).unwrap(), vec!["replaced".to_string()]);
    }

    #[test]
    fn test_recomplete_action_only() {
        let mut agent = agent();
        agent
            .register(
                MissionSpec::on(pattern("^man"))
                    .action(|_| Ok(vec!["1".into(), "2".into()]))
                    .name("count"),
            )
            .unwrap();
        agent
            .recomplete(MissionSpec::named("count").action(|_| Ok(vec!["4".into(), "5".into()])))
            .unwrap();

        assert_eq!(
            agent.complete("man ", 4).unwrap(),
            vec!["4".to_string(), "5".to_string()]
        );
    }

    #[test]
    fn test_duplicate_name_conflicts() {
        let mut agent = agent();
        agent
            .register(
                MissionSpec::on(pattern("^a"))
                    .action(|_| Ok(Vec::new()))
                    .name("dup"),
            )
            .unwrap();
        let err = agent
            .register(
                MissionSpec::on(pattern("^b"))
                    .action(|_| Ok(Vec::new()))
                    .name("dup"),
            )
            .unwrap_err();
        assert!(err.to_string().contains("'dup'"));
    }

    #[test]
    fn test_recomplete_unknown_name_without_condition_fails() {
        let mut agent = agent();
        let err = agent
            .recomplete(MissionSpec::named("ghost").action(|_| Ok(Vec::new())))
            .unwrap_err();
        assert!(err.to_string().contains("'ghost'"));
    }

    #[test]
    fn test_recomplete_unknown_name_with_condition_registers_fresh() {
        let mut agent = agent();
        agent
            .recomplete(
                MissionSpec::on(pattern("^fresh"))
                    .action(|_| Ok(vec!["made".into()]))
                    .name("ghost"),
            )
            .unwrap();
        assert_eq!(agent.complete("fresh", 5).unwrap(), vec!["made".to_string()]);
    }

    #[test]
    fn test_eval_failure_falls_through_to_default() {
        // an evaluator with nothing bound cannot resolve "self"
        let mut agent = Agent::new(Box::new(StaticEvaluator::new()));
        agent
            .register(MissionSpec::method("shoot").action(|_| Ok(vec!["never".into()])))
            .unwrap();
        agent
            .register(MissionSpec::fallback().action(|_| Ok(vec!["baseline".into()])))
            .unwrap();

        assert_eq!(
            agent.complete("shoot ", 6).unwrap(),
            vec!["baseline".to_string()]
        );
    }

    #[test]
    fn test_eval_debug_surfaces_failure() {
        let mut agent = Agent::new(Box::new(StaticEvaluator::new()));
        agent.set_eval_debug(true);
        agent
            .register(MissionSpec::method("shoot").action(|_| Ok(vec!["x".into()])))
            .unwrap();

        assert!(agent.complete("shoot ", 6).is_err());
    }

    #[test]
    fn test_action_failure_owns_request() {
        let mut agent = agent();
        agent
            .register(MissionSpec::on(pattern("^boom")).action(|_| Err("broken".into())))
            .unwrap();
        agent
            .register(MissionSpec::on(pattern("^boom")).action(|_| Ok(vec!["other".into()])))
            .unwrap();

        // failed action means empty completions, not fallthrough
        assert!(agent.complete("boom", 4).unwrap().is_empty());
    }

    #[test]
    fn test_spy_reports_default_when_nothing_matches() {
        let mut agent = agent();
        agent
            .register(MissionSpec::on(pattern("^git")).action(|_| Ok(Vec::new())))
            .unwrap();

        let report = agent.spy("unrelated line").unwrap();
        assert_eq!(report.kind, MissionKind::Default);
    }

    #[test]
    fn test_spy_reports_matching_mission() {
        let mut agent = agent();
        agent
            .register(MissionSpec::method("shoot").action(|_| Ok(vec!["octopussy".into()])))
            .unwrap();

        let report = agent.spy("shoot oct").unwrap();
        assert_eq!(report.kind, MissionKind::Method);
        assert_eq!(report.completions, vec!["octopussy".to_string()]);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut agent = agent();
        agent
            .register(MissionSpec::method("shoot").action(|_| Ok(vec!["octopussy".into()])))
            .unwrap();

        let first = agent.complete("shoot oct", 9).unwrap();
        let second = agent.complete("shoot oct", 9).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_registration_between_requests_rebuilds_condition() {
        let mut agent = agent();
        agent
            .register(MissionSpec::method("open").action(|_| Ok(vec!["a.txt".into()])))
            .unwrap();
        assert_eq!(agent.complete("open a", 6).unwrap(), vec!["a.txt".to_string()]);

        agent
            .register(MissionSpec::method("close").action(|_| Ok(vec!["b.txt".into()])))
            .unwrap();
        assert_eq!(agent.complete("close b", 7).unwrap(), vec!["b.txt".to_string()]);
        assert_eq!(agent.complete("open a", 6).unwrap(), vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_list_methods_union() {
        let mut agent = agent();
        agent
            .register(
                MissionSpec::methods(["shoot", "open"]).action(|_| Ok(Vec::new())),
            )
            .unwrap();
        agent
            .register(MissionSpec::method("<<").action(|_| Ok(Vec::new())))
            .unwrap();
        agent
            .register(MissionSpec::method("Session#save").action(|_| Ok(Vec::new())))
            .unwrap();

        assert_eq!(
            agent.list_methods(),
            vec![
                "<<".to_string(),
                "Session#save".to_string(),
                "open".to_string(),
                "shoot".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_action_fails_registration() {
        let mut agent = agent();
        let err = agent.register(MissionSpec::on(pattern("^a"))).unwrap_err();
        assert!(err.to_string().contains("action"));
    }

    #[test]
    fn test_object_mission_routes_through_registry() {
        let mut agent = agent();
        agent.types_mut().register_type::<Session>("Session");
        agent
            .register(
                MissionSpec::object("Session")
                    .action(|_| Ok(vec!["save".into(), "solo".into()])),
            )
            .unwrap();

        assert_eq!(
            agent.complete("session.sa", 10).unwrap(),
            vec!["session.save".to_string()]
        );
    }
}
