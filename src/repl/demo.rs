//! Bundled sample rule set
//!
//! A small "recording studio" shell wired with one rule of every kind, so
//! the `spy`, `methods`, and `demo` subcommands have something real to
//! dispatch against. Hosts embedding the library register their own rules
//! instead; this module doubles as a worked example.

use crate::agent::{Agent, MissionSpec};
use crate::error::Result;
use crate::eval::StaticEvaluator;
use crate::search::SearchStrategy;

/// A recording session with named tracks.
pub struct Session {
    pub tracks: Vec<String>,
}

/// A single mixer bus.
pub struct Bus {
    pub inputs: Vec<String>,
}

fn demo_session() -> Session {
    Session {
        tracks: ["drums", "drums_room", "bass", "vocals_lead", "vocals_back"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn demo_bus() -> Bus {
    Bus {
        inputs: vec!["drums".to_string(), "bass".to_string()],
    }
}

/// Build the demo agent.
pub fn demo_agent() -> Result<Agent> {
    let mut evaluator = StaticEvaluator::new();
    // the current context is the open session
    evaluator.bind("self", demo_session());
    evaluator.bind("session", demo_session());
    evaluator.bind("bus", demo_bus());

    let mut agent = Agent::new(Box::new(evaluator));
    agent.types_mut().register_type::<Session>("Session");
    agent.types_mut().register_type::<Bus>("Bus");

    // `play vo` -> track names, underscore shorthand works on demo data
    agent.register(
        MissionSpec::method("play").action(|input| {
            let tracks = input
                .object_as::<Session>()
                .map(|s| s.tracks.clone())
                .unwrap_or_default();
            Ok(tracks)
        }),
    )?;

    // `open src/ma` -> project files, path-aware search
    agent.register(
        MissionSpec::method("open")
            .action(|_| {
                Ok([
                    "takes/monday.flac",
                    "takes/tuesday.flac",
                    "mixes/rough.wav",
                    ".studio.toml",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect())
            })
            .search(SearchStrategy::Files),
    )?;

    // `Session#export` only applies when the receiver is a Session
    agent.register(MissionSpec::method("Session#export").action(|_| {
        Ok(vec!["master.wav".to_string(), "stems/".to_string()])
    }))?;

    // `bus << dr` pushes a track onto a mixer bus
    agent.register(
        MissionSpec::method("<<").action(|input| {
            let tracks = input
                .object_as::<Session>()
                .map(|s| s.tracks.clone())
                .unwrap_or_else(|| demo_session().tracks);
            Ok(tracks)
        }),
    )?;

    // `session.` completes what a Session can do
    agent.register(MissionSpec::object("Session").action(|input| {
        let session = input.object_as::<Session>();
        let mut methods = vec!["export".to_string(), "bounce".to_string()];
        if let Some(s) = session {
            methods.extend(s.tracks.clone());
        }
        Ok(methods)
    }))?;

    // `$`-variables anywhere in the line
    agent.register(
        MissionSpec::anywhere(r"\$\w*")
            .action(|_| {
                Ok(vec![
                    "$TEMPO".to_string(),
                    "$TIME_SIGNATURE".to_string(),
                    "$TAKE".to_string(),
                ])
            })
            .name("dollar_vars"),
    )?;

    // `set <knob>` with ignore-case search
    agent.register(
        MissionSpec::on(regex::Regex::new(r"^set\s+\S*$").map_err(|e| e.to_string())?)
            .action(|_| {
                Ok(vec![
                    "gain".to_string(),
                    "pan".to_string(),
                    "reverb_send".to_string(),
                ])
            })
            .search(SearchStrategy::IgnoreCase)
            .name("set_knobs"),
    )?;

    // baseline command completion, tried when nothing else matches
    agent.register(MissionSpec::fallback().action(|_| {
        Ok(vec![
            "play".to_string(),
            "open".to_string(),
            "set".to_string(),
            "status".to_string(),
        ])
    }))?;

    Ok(agent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_agent_builds() {
        let agent = demo_agent().unwrap();
        assert!(!agent.list_methods().is_empty());
    }

    #[test]
    fn test_demo_track_completion() {
        let agent = demo_agent().unwrap();
        let got = agent.complete("play vo_le", 10).unwrap();
        assert_eq!(got, vec!["vocals_lead".to_string()]);
    }

    #[test]
    fn test_demo_file_completion_hides_dotfiles() {
        let agent = demo_agent().unwrap();
        let got = agent.complete("open ", 5).unwrap();
        assert!(got.contains(&"takes/monday.flac".to_string()));
        assert!(!got.contains(&".studio.toml".to_string()));
    }

    #[test]
    fn test_demo_object_completion() {
        let agent = demo_agent().unwrap();
        let got = agent.complete("session.ex", 10).unwrap();
        assert_eq!(got, vec!["session.export".to_string()]);
    }

    #[test]
    fn test_demo_fallback_commands() {
        let agent = demo_agent().unwrap();
        let got = agent.complete("pl", 2).unwrap();
        assert_eq!(got, vec!["play".to_string()]);
    }
}
