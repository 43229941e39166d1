//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Exit status table shown in the long help and the man page
const EXIT_STATUS: &str = "Exit status: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN";

/// Check the health of an HP ProCurve switch over SNMP
#[derive(Parser)]
#[command(name = "switchprobe")]
#[command(author, version, about = "Monitoring plugin for HP ProCurve switches")]
#[command(propagate_version = true)]
#[command(after_long_help = EXIT_STATUS)]
pub struct Cli {
    #[command(flatten)]
    pub options: ProbeOptions,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to find the device and how to talk to it
///
/// Every value falls back to its environment variable, then to the settings
/// file, then to the built-in default.
#[derive(Args, Debug, Clone, Default)]
pub struct ProbeOptions {
    /// Switch address
    #[arg(short = 'H', long = "snmp-host", env = "SNMP_HOST", global = true)]
    pub host: Option<String>,

    /// SNMP version: 1, 2c or 3 [default: 2c]
    #[arg(short = 'P', long = "snmp-version", env = "SNMP_VERSION", global = true)]
    pub snmp_version: Option<String>,

    /// Community string for v1/v2c [default: public]
    #[arg(
        short = 'C',
        long = "snmp-community",
        env = "SNMP_COMMUNITY",
        hide_env_values = true,
        global = true
    )]
    pub community: Option<String>,

    /// SNMPv3 context name
    #[arg(short = 'N', long = "snmp-context", env = "SNMP_CONTEXT", global = true)]
    pub context: Option<String>,

    /// SNMPv3 security level: noAuthNoPriv, authNoPriv or authPriv [default: noAuthNoPriv]
    #[arg(
        short = 'L',
        long = "snmp-security-level",
        env = "SNMP_SECURITY_LEVEL",
        global = true
    )]
    pub security_level: Option<String>,

    /// SNMPv3 authentication protocol: MD5 or SHA [default: MD5]
    #[arg(
        short = 'a',
        long = "snmp-auth-protocol",
        env = "SNMP_AUTH_PROTOCOL",
        global = true
    )]
    pub auth_protocol: Option<String>,

    /// SNMPv3 privacy protocol: DES or AES [default: DES]
    #[arg(
        short = 'x',
        long = "snmp-priv-protocol",
        env = "SNMP_PRIV_PROTOCOL",
        global = true
    )]
    pub priv_protocol: Option<String>,

    /// SNMPv3 security name
    #[arg(short = 'U', long = "snmp-sec-name", env = "SNMP_SEC_NAME", global = true)]
    pub sec_name: Option<String>,

    /// SNMPv3 authentication passphrase
    #[arg(
        short = 'A',
        long = "snmp-auth-password",
        env = "SNMP_AUTH_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub auth_password: Option<String>,

    /// SNMPv3 privacy passphrase
    #[arg(
        short = 'X',
        long = "snmp-priv-password",
        env = "SNMP_PRIV_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub priv_password: Option<String>,

    /// Settings file (TOML) with [connection] and [transport] tables
    #[arg(long, value_name = "FILE", env = "SWITCHPROBE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Read values from a recorded JSON snapshot instead of querying the device
    #[arg(long, value_name = "FILE", global = true)]
    pub replay: Option<PathBuf>,
}

/// Available checks and utilities
#[derive(Subcommand)]
pub enum Commands {
    /// Check the CPU usage
    #[command(about = "Retrieve the CPU load and check it against the thresholds")]
    Cpu(ThresholdArgs),

    /// Check the memory usage
    #[command(about = "Retrieve the memory allocation and check it against the thresholds")]
    Memory(ThresholdArgs),

    /// Check the sensors
    #[command(about = "Retrieve fan, power supply and temperature states")]
    Sensor,

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate a man page
    #[command(about = "Generate a man page")]
    Manpage,
}

/// Warning and critical ranges for threshold checks
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Warning threshold range (required)
    #[arg(short, long, allow_hyphen_values = true)]
    pub warning: Option<String>,

    /// Critical threshold range (required)
    #[arg(short, long, allow_hyphen_values = true)]
    pub critical: Option<String>,
}
