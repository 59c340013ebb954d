use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vigil_types::AppMode;

/// vigil: security posture dashboard for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "vigil",
    version,
    about = "Security posture scans, policy checks, and activity simulation"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity level (use -v or -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print machine-readable JSON instead of tables
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the latest posture score
    Score,

    /// Work with posture scans
    Scans {
        #[command(subcommand)]
        command: ScansCommand,
    },

    /// Validate IAM policy documents
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },

    /// Replay a canned activity scenario (`cleanup` restores the seed log)
    Simulate {
        /// Scenario name: iam-user, s3-public-acl, admin-attach-attempt, or cleanup
        #[arg(value_name = "SCENARIO")]
        scenario: String,
    },

    /// Show the simulated activity timeline
    Timeline {
        /// Only show events at or after this RFC 3339 timestamp
        #[arg(long = "since", value_name = "ISO8601")]
        since: Option<String>,
    },

    /// Inspect or change the backend mode
    Mode {
        #[command(subcommand)]
        command: ModeCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScansCommand {
    /// List recent scans, newest first
    List {
        /// Maximum rows to return (1-100)
        #[arg(long = "limit", value_name = "N")]
        limit: Option<usize>,
    },

    /// Show one scan in full
    Show {
        #[arg(value_name = "SCAN_ID")]
        scan_id: String,
    },

    /// Run a new scan
    Run,

    /// Show check-status changes between two scans
    Diff {
        #[arg(value_name = "OLD_ID")]
        old_id: String,
        #[arg(value_name = "NEW_ID")]
        new_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// Validate a policy document from a file or stdin
    Validate {
        /// Path to the policy JSON; `-` or absent reads stdin
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Treat the document as a resource policy (bucket policy etc.)
        #[arg(long = "resource-policy")]
        resource_policy: bool,
    },

    /// Print the bundled example policies
    Examples,
}

#[derive(Subcommand, Debug)]
pub enum ModeCommand {
    /// Show the active mode and API base URL
    Show,

    /// Choose a mode: demo, local, or custom
    Set {
        #[arg(value_name = "MODE")]
        mode: AppMode,

        /// API base URL used by local/custom modes
        #[arg(long = "api-url", value_name = "URL")]
        api_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn scan_list_takes_a_limit() {
        let args = Args::parse_from(["vigil", "scans", "list", "--limit", "5"]);
        match args.command {
            Command::Scans {
                command: ScansCommand::List { limit },
            } => assert_eq!(limit, Some(5)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let args = Args::parse_from(["vigil", "score", "--json"]);
        assert!(args.json);

        let args = Args::parse_from(["vigil", "--json", "timeline"]);
        assert!(args.json);
    }

    #[test]
    fn mode_set_parses_known_modes_only() {
        let args = Args::parse_from([
            "vigil",
            "mode",
            "set",
            "custom",
            "--api-url",
            "https://api.example.com",
        ]);
        match args.command {
            Command::Mode {
                command: ModeCommand::Set { mode, api_url },
            } => {
                assert_eq!(mode, AppMode::Custom);
                assert_eq!(api_url.as_deref(), Some("https://api.example.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Args::try_parse_from(["vigil", "mode", "set", "prod"]).is_err());
    }

    #[test]
    fn policy_validate_defaults_to_stdin() {
        let args = Args::parse_from(["vigil", "policy", "validate"]);
        match args.command {
            Command::Policy {
                command:
                    PolicyCommand::Validate {
                        file,
                        resource_policy,
                    },
            } => {
                assert!(file.is_none());
                assert!(!resource_policy);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
