//! Everything that changes UI state travels as an [`Action`].

use std::fmt;

use edgectl_core::models::PolicySummary;
use edgectl_core::{
    AppView, AppsView, DnsView, InterfacesView, LoginOutcome, NodeAppsView, NodeView, NodesView,
    Notification, Outcome, PoliciesView, PolicyControls, PolicyEditView, Route,
};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ──
    Navigate(Route),
    GoBack,
    ToggleHelp,

    // ── Session ──
    Logout,
    LoggedIn,
    /// The 401 hook fired: the stored token is already gone.
    SessionExpired,

    // ── Background work ──
    /// A spawned view operation finished. Results whose generation is
    /// older than the current screen are dropped.
    Settled {
        generation: u64,
        loaded: Loaded,
        outcome: Outcome,
    },

    // ── Overlays ──
    Notify(Notification),
    Confirm(Confirm),
    Confirmed(Pending),
}

/// A yes/no question guarding a destructive operation.
#[derive(Debug, Clone)]
pub struct Confirm {
    pub prompt: String,
    pub on_yes: Pending,
}

/// Destructive operations that wait on a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    DeleteApp(String),
    DeletePolicy(String),
    RemoveNodeApp(String),
    RemovePolicyAssignment,
    DeleteDns,
}

/// The view (or data) a background task hands back to its screen.
#[derive(Clone)]
pub enum Loaded {
    Login(LoginOutcome),
    Nodes(NodesView),
    Node(NodeView),
    NodeApps(NodeAppsView),
    Interfaces(InterfacesView),
    Dns(DnsView),
    Controls(PolicyControls),
    PolicyChoices(Vec<PolicySummary>),
    Apps(AppsView),
    App(AppView),
    Policies(PoliciesView),
    PolicyEdit(PolicyEditView),
}

impl fmt::Debug for Loaded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login(outcome) => return f.debug_tuple("Login").field(outcome).finish(),
            Self::PolicyChoices(choices) => {
                return write!(f, "PolicyChoices({} policies)", choices.len());
            }
            Self::Nodes(_) => "Nodes",
            Self::Node(_) => "Node",
            Self::NodeApps(_) => "NodeApps",
            Self::Interfaces(_) => "Interfaces",
            Self::Dns(_) => "Dns",
            Self::Controls(_) => "Controls",
            Self::Apps(_) => "Apps",
            Self::App(_) => "App",
            Self::Policies(_) => "Policies",
            Self::PolicyEdit(_) => "PolicyEdit",
        };
        f.write_str(name)
    }
}
