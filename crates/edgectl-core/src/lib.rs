//! View layer between `edgectl-api` and the front ends (CLI / TUI).
//!
//! - **[`Console`]** owns the controller, CUPS, and CNCA clients over one
//!   shared session store, plus [`Auth`] for login and logout.
//!
//! - **Views** ([`views`]) wrap one console screen each: a client handle,
//!   a [`ViewState`], and operations that return an [`Outcome`] (toasts
//!   plus an optional redirect) instead of touching any UI.
//!
//! - **[`Route`] / [`RouteGuard`]** parse console paths and decide what an
//!   unauthenticated user may see.
//!
//! - **Schema forms** ([`schema`]) are static descriptors that drive form
//!   rendering and validate payloads before they are sent.
#![recursion_limit = "256"]

pub mod config;
pub mod console;
pub mod error;
pub mod notify;
pub mod route;
pub mod schema;
pub mod view;
pub mod views;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, TlsVerification};
pub use console::Console;
pub use error::{CoreError, TRY_AGAIN_LATER};
pub use notify::{Notification, NotificationLevel, Outcome};
pub use route::{NodeTab, Resolution, Route, RouteGuard};
pub use schema::{FieldError, FormDescriptor, FormField, SchemaKind};
pub use view::ViewState;
pub use views::{
    AppView, AppsView, DnsView, InterfacesView, NODES_LOAD_ERROR, NfdView, NodeAppRow,
    NodeAppsData, NodeAppsView, NodeView, NodesView, PfdView, PoliciesView, PolicyControls,
    PolicyEditView, SubscriptionsView, UserplanesView,
};

// API types front ends need without depending on `edgectl-api` directly.
pub use edgectl_api::models;
pub use edgectl_api::{
    ApiClient, Auth, FileSessionStore, LOGIN_FAILED_MESSAGE, LOGIN_ROUTE, LoginOutcome,
    MemorySessionStore, OrchestrationMode, PolicyResource, SessionStore, UnauthorizedHook,
};
