//! Clap derive structures for the `edgectl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use edgectl_core::models::{InterfaceDriver, InterfaceType};
use edgectl_core::{OrchestrationMode, SchemaKind};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// edgectl -- manage edge nodes, apps, and 5G traffic steering
#[derive(Debug, Parser)]
#[command(
    name = "edgectl",
    version,
    about = "Manage edge controller, CUPS, and CNCA consoles from the command line",
    long_about = "Administer edge nodes, the application catalog, and traffic policies\n\
        on an edge controller, plus userplanes (CUPS) and AF subscriptions and\n\
        PFD transactions (CNCA).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Deployment profile to use
    #[arg(long, short = 'p', env = "EDGECTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "EDGECTL_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EDGECTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "EDGECTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "EDGECTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Controller orchestration mode (native, kubernetes, kubernetes-ovn)
    #[arg(long, env = "EDGECTL_ORCHESTRATION", global = true)]
    pub orchestration: Option<OrchestrationMode>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in to the controller and store the session token
    Login(LoginArgs),

    /// Clear the stored session token
    Logout,

    /// Show the active profile and session state
    Status,

    /// Manage edge nodes
    #[command(alias = "node", alias = "n")]
    Nodes(NodesArgs),

    /// Inspect and update a node's network interfaces
    #[command(alias = "ifaces")]
    Interfaces(InterfacesArgs),

    /// Deploy and control apps on a node
    NodeApps(NodeAppsArgs),

    /// Manage a node's DNS configuration
    Dns(DnsArgs),

    /// List a node's feature discovery tags
    Nfd(NfdArgs),

    /// Manage the application catalog
    #[command(alias = "app")]
    Apps(AppsArgs),

    /// Manage traffic policies
    #[command(alias = "policy")]
    Policies(PoliciesArgs),

    /// Manage CUPS userplanes
    #[command(alias = "up")]
    Userplanes(UserplanesArgs),

    /// Manage CNCA traffic influence subscriptions
    #[command(alias = "subs")]
    Subscriptions(SubscriptionsArgs),

    /// Manage CNCA PFD transactions
    Pfd(PfdArgs),

    /// Inspect form schemas and validate payloads offline
    Schema(SchemaArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Path to a JSON payload.
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// JSON file holding the resource body
    #[arg(long = "from-file", short = 'F', value_name = "PATH")]
    pub from_file: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's username)
    #[arg(long, short = 'u', env = "EDGECTL_USERNAME")]
    pub username: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NODES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NodesArgs {
    #[command(subcommand)]
    pub command: NodesCommand,
}

#[derive(Debug, Subcommand)]
pub enum NodesCommand {
    /// List edge nodes
    #[command(alias = "ls")]
    List,

    /// Get edge node details
    Get {
        /// Node ID
        node: String,
    },

    /// Register a new edge node
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        /// Hardware serial number
        #[arg(long)]
        serial: String,
    },

    /// Update an edge node's name, location, or serial
    Update {
        /// Node ID
        node: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        serial: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INTERFACES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    #[command(subcommand)]
    pub command: InterfacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfacesCommand {
    /// List a node's interfaces
    #[command(alias = "ls")]
    List {
        /// Node ID
        node: String,
    },

    /// Change one interface and commit the node's interface list
    Update {
        /// Node ID
        node: String,
        /// Interface ID (PCI address)
        interface: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        driver: Option<InterfaceDriver>,
        /// Interface role (none, upstream, downstream, bidirectional, breakout)
        #[arg(long = "type")]
        kind: Option<InterfaceType>,
        /// Comma-separated zones
        #[arg(long, value_delimiter = ',')]
        zones: Option<Vec<String>>,
        /// Fallback interface ID
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Traffic policy assigned to an interface
    Policy(ResourcePolicyArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NODE APPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NodeAppsArgs {
    #[command(subcommand)]
    pub command: NodeAppsCommand,
}

#[derive(Debug, Subcommand)]
pub enum NodeAppsCommand {
    /// List apps deployed on a node, with live status
    #[command(alias = "ls")]
    List {
        /// Node ID
        node: String,
    },

    /// Deploy a catalog app to a node
    Deploy {
        /// Node ID
        node: String,
        /// App ID
        app: String,
    },

    /// Start a deployed app
    Start {
        node: String,
        app: String,
    },

    /// Stop a deployed app
    Stop {
        node: String,
        app: String,
    },

    /// Restart a deployed app
    Restart {
        node: String,
        app: String,
    },

    /// Remove an app from a node
    Remove {
        node: String,
        app: String,
    },

    /// Traffic policy assigned to a deployed app
    Policy(ResourcePolicyArgs),
}

/// Policy assignment on a node resource (interface or deployed app).
#[derive(Debug, Args)]
pub struct ResourcePolicyArgs {
    #[command(subcommand)]
    pub command: ResourcePolicyCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResourcePolicyCommand {
    /// Show the assigned policy
    Get {
        /// Node ID
        node: String,
        /// Interface or app ID
        resource: String,
    },

    /// Assign a policy
    Assign {
        node: String,
        resource: String,
        /// Policy ID
        policy: String,
    },

    /// Remove the assigned policy
    Remove {
        node: String,
        resource: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DNS / NFD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// Show a node's DNS records and forwarders
    Get {
        /// Node ID
        node: String,
    },

    /// Replace a node's DNS configuration
    Apply {
        /// Node ID
        node: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete a node's DNS configuration
    Delete {
        /// Node ID
        node: String,
    },
}

#[derive(Debug, Args)]
pub struct NfdArgs {
    #[command(subcommand)]
    pub command: NfdCommand,
}

#[derive(Debug, Subcommand)]
pub enum NfdCommand {
    /// List feature discovery tags
    #[command(alias = "ls")]
    List {
        /// Node ID
        node: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPS / POLICIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: CrudCommand,
}

#[derive(Debug, Args)]
pub struct PoliciesArgs {
    #[command(subcommand)]
    pub command: CrudCommand,
}

#[derive(Debug, Args)]
pub struct UserplanesArgs {
    #[command(subcommand)]
    pub command: CrudCommand,
}

/// list/get/create/update/delete over one resource collection.
#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// List resources
    #[command(alias = "ls")]
    List,

    /// Get resource details
    Get {
        /// Resource ID
        id: String,
    },

    /// Create a resource from a JSON file
    Create(PayloadArgs),

    /// Replace a resource from a JSON file
    Update {
        /// Resource ID
        id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete a resource
    #[command(alias = "rm")]
    Delete {
        /// Resource ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CNCA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SubscriptionsArgs {
    #[command(subcommand)]
    pub command: SubscriptionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionsCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Partially update a subscription from a JSON file
    Patch {
        /// Subscription ID
        id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
}

#[derive(Debug, Args)]
pub struct PfdArgs {
    #[command(subcommand)]
    pub command: PfdCommand,
}

#[derive(Debug, Subcommand)]
pub enum PfdCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// One application inside a PFD transaction
    App(PfdAppArgs),
}

#[derive(Debug, Args)]
pub struct PfdAppArgs {
    #[command(subcommand)]
    pub command: PfdAppCommand,
}

#[derive(Debug, Subcommand)]
pub enum PfdAppCommand {
    /// Show an application's PFDs
    Get {
        /// Transaction ID
        transaction: String,
        /// External application ID
        app: String,
    },

    /// Replace an application's PFDs from a JSON file
    Update {
        transaction: String,
        app: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete an application from a transaction
    Delete {
        transaction: String,
        app: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SCHEMA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommand,
}

#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// Print the JSON Schema and form layout for a resource kind
    Show {
        /// Resource kind (e.g. app, node-add, kube-ovn-policy)
        kind: SchemaKind,
    },

    /// List the form fields of a resource kind in display order
    Fields {
        kind: SchemaKind,
    },

    /// Validate a JSON payload against a resource kind
    Validate {
        kind: SchemaKind,
        #[command(flatten)]
        payload: PayloadArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (controller_url, cups_url, cnca_url, username,
        /// orchestration, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
