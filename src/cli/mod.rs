//! Command-line interface for ruleline
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and CLI-override merging
//! - Subcommand dispatch (spy, methods, completion, config)
//!
//! The binary fronts the bundled demo rule set; the library behind it is
//! what hosts embed.

pub mod completion;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use nu_ansi_term::Color;

use crate::agent::Agent;
use crate::config::{Config, LogLevel};
use crate::error::Result;
use crate::repl::demo;

/// Rule-based line completion for interactive shells
#[derive(Parser, Debug)]
#[command(
    name = "ruleline",
    version,
    about = "Rule-based line-completion engine",
    long_about = "An extensible line-completion engine: ordered completion rules with
pattern, method, object and anywhere conditions, pluggable search
strategies, and first-match-wins dispatch. The bundled demo rule set
backs the spy/methods/demo commands."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Default search strategy
    /// (normal, ignore_case, underscore, anywhere, files, modules, off)
    #[arg(long, value_name = "STRATEGY")]
    pub search: Option<String>,

    /// Surface completion-action failures instead of completing nothing
    #[arg(long)]
    pub debug: bool,

    /// Surface receiver-evaluation failures instead of falling through
    #[arg(long = "eval-debug")]
    pub eval_debug: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for ruleline
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report which completion rule matches a line
    Spy {
        /// The input line to dispatch (quoting optional)
        #[arg(value_name = "LINE", num_args = 1.., required = true)]
        line: Vec<String>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all method names that have argument completion
    Methods,

    /// Run the interactive demo shell (also the default)
    Demo,

    /// Generate shell completion script for this CLI
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Print the effective configuration as TOML
        #[arg(long)]
        show: bool,

        /// Print the default configuration file path
        #[arg(long)]
        path: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Parse arguments and load configuration.
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        Self::apply_args_to_config(&mut config, args)?;
        Ok(config)
    }

    /// Apply CLI arguments on top of the loaded configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) -> Result<()> {
        if let Some(search) = &args.search {
            config.completion.default_search = search.parse()?;
        }
        if args.debug {
            config.completion.debug = true;
        }
        if args.eval_debug {
            config.completion.eval_debug = true;
        }
        if args.quiet {
            config.logging.level = LogLevel::Error;
        }
        Ok(())
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the demo agent with the effective engine configuration.
    pub fn build_agent(&self) -> Result<Agent> {
        let mut agent = demo::demo_agent()?;
        agent.set_default_search(self.config.completion.default_search);
        agent.set_debug(self.config.completion.debug);
        agent.set_eval_debug(self.config.completion.eval_debug);
        Ok(agent)
    }

    /// Handle subcommands; returns true when one ran.
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Spy { line, json }) => {
                self.run_spy(&line.join(" "), *json)?;
                Ok(true)
            }
            Some(Commands::Methods) => {
                let agent = self.build_agent()?;
                for method in agent.list_methods() {
                    println!("{method}");
                }
                Ok(true)
            }
            Some(Commands::Demo) => {
                self.run_demo()?;
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, path }) => {
                self.run_config(*show, *path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The demo REPL session entry point used when no subcommand is given.
    pub fn run_demo(&self) -> Result<()> {
        let agent = Arc::new(self.build_agent()?);
        let mut session = crate::repl::ReplSession::new(agent, !self.args.no_color);
        session.run()
    }

    fn run_spy(&self, line: &str, json: bool) -> Result<()> {
        let agent = self.build_agent()?;
        let report = agent.spy(line)?;

        if json {
            let rendered = serde_json::json!({
                "kind": report.kind.to_string(),
                "mission": report.mission,
                "completions": report.completions,
            });
            println!("{rendered:#}");
        } else if self.args.no_color {
            println!("{report}");
        } else {
            println!(
                "Matches completion mission: {}",
                Color::Green.paint(&report.mission)
            );
            println!(
                "Possible completions: {}",
                Color::Cyan.paint(format!("{:?}", report.completions))
            );
        }
        Ok(())
    }

    fn run_config(&self, show: bool, path: bool) -> Result<()> {
        if path {
            println!("{}", Config::default_path().display());
        }
        if show || !path {
            let rendered = toml::to_string_pretty(&self.config)
                .map_err(|e| crate::error::ConfigError::InvalidFormat(e.to_string()))?;
            print!("{rendered}");
        }
        Ok(())
    }
}
