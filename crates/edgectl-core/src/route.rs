// ── Client-side routes and the authentication guard ──
//
// Paths mirror the browser consoles. The guard is a pure function of
// the route and whether a session token exists.

use std::fmt;

use strum::{Display, EnumIter, EnumString};

/// Tabs on a node's detail screen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum NodeTab {
    #[default]
    Dashboard,
    Apps,
    Interfaces,
    Dns,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Landing,

    // ── Controller ──
    Nodes,
    Node { id: String, tab: NodeTab },
    Apps,
    App { id: String },
    Policies,
    PolicyAdd,
    PolicyEdit { id: String },

    // ── CUPS ──
    Userplanes,
    Userplane { id: String },

    // ── CNCA ──
    Services,
    ServiceCreate,
    Service { id: String },
    Subscriptions,
    SubscriptionCreate,
    SubscriptionEdit { id: String },
    SubscriptionPatch { id: String },

    NotFound { path: String },
}

impl Route {
    /// Parse a location path. Query strings and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let clean = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["landing"] => Self::Landing,

            ["nodes"] => Self::Nodes,
            ["nodes", id] => Self::Node {
                id: (*id).to_owned(),
                tab: NodeTab::Dashboard,
            },
            ["nodes", id, tab] => match tab.parse::<NodeTab>() {
                Ok(tab) => Self::Node {
                    id: (*id).to_owned(),
                    tab,
                },
                Err(_) => Self::not_found(clean),
            },
            ["apps"] => Self::Apps,
            ["apps", id] => Self::App {
                id: (*id).to_owned(),
            },
            ["policies"] => Self::Policies,
            ["policies", "add"] => Self::PolicyAdd,
            ["policies", id, "edit"] => Self::PolicyEdit {
                id: (*id).to_owned(),
            },

            ["userplanes"] => Self::Userplanes,
            ["userplanes", id] => Self::Userplane {
                id: (*id).to_owned(),
            },

            ["services"] => Self::Services,
            ["services", "create"] => Self::ServiceCreate,
            ["services", id] => Self::Service {
                id: (*id).to_owned(),
            },
            ["subscriptions"] => Self::Subscriptions,
            ["subscriptions", "create"] => Self::SubscriptionCreate,
            ["subscriptions", "edit", id] => Self::SubscriptionEdit {
                id: (*id).to_owned(),
            },
            ["subscriptions", "patch", id] => Self::SubscriptionPatch {
                id: (*id).to_owned(),
            },

            _ => Self::not_found(clean),
        }
    }

    fn not_found(path: &str) -> Self {
        Self::NotFound {
            path: path.to_owned(),
        }
    }

    /// Routes reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Root | Self::Login | Self::Landing | Self::NotFound { .. }
        )
    }

    pub fn is_protected(&self) -> bool {
        !self.is_public()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::Login => f.write_str("/login"),
            Self::Landing => f.write_str("/landing"),
            Self::Nodes => f.write_str("/nodes"),
            Self::Node {
                id,
                tab: NodeTab::Dashboard,
            } => write!(f, "/nodes/{id}"),
            Self::Node { id, tab } => write!(f, "/nodes/{id}/{tab}"),
            Self::Apps => f.write_str("/apps"),
            Self::App { id } => write!(f, "/apps/{id}"),
            Self::Policies => f.write_str("/policies"),
            Self::PolicyAdd => f.write_str("/policies/add"),
            Self::PolicyEdit { id } => write!(f, "/policies/{id}/edit"),
            Self::Userplanes => f.write_str("/userplanes"),
            Self::Userplane { id } => write!(f, "/userplanes/{id}"),
            Self::Services => f.write_str("/services"),
            Self::ServiceCreate => f.write_str("/services/create"),
            Self::Service { id } => write!(f, "/services/{id}"),
            Self::Subscriptions => f.write_str("/subscriptions"),
            Self::SubscriptionCreate => f.write_str("/subscriptions/create"),
            Self::SubscriptionEdit { id } => write!(f, "/subscriptions/edit/{id}"),
            Self::SubscriptionPatch { id } => write!(f, "/subscriptions/patch/{id}"),
            Self::NotFound { path } => f.write_str(path),
        }
    }
}

// ── Guard ───────────────────────────────────────────────────────────

/// What to show for a requested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect { to: Route, from: Option<Route> },
}

/// Decides between rendering a route and redirecting.
pub struct RouteGuard;

impl RouteGuard {
    /// `/` always goes to the landing page. Protected routes without a
    /// session go to login, remembering where the user was headed.
    pub fn resolve(route: Route, authenticated: bool) -> Resolution {
        if route == Route::Root {
            return Resolution::Redirect {
                to: Route::Landing,
                from: None,
            };
        }

        if route.is_protected() && !authenticated {
            return Resolution::Redirect {
                to: Route::Login,
                from: Some(route),
            };
        }

        Resolution::Render(route)
    }

    /// Where to go after a successful login: back to the remembered
    /// route if there is a useful one, otherwise the node list.
    pub fn after_login(from: Option<Route>) -> Route {
        match from {
            Some(route) if route.is_protected() => route,
            _ => Route::Nodes,
        }
    }
}
