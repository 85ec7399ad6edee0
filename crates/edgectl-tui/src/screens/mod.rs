mod apps;
mod landing;
mod login;
mod node;
mod nodes;
mod not_found;
mod policies;

use edgectl_core::Route;

use crate::component::Component;

/// Build the screen for a route the guard has already cleared.
pub fn create(route: &Route, username: Option<&str>) -> Box<dyn Component> {
    match route {
        Route::Login => Box::new(login::LoginScreen::new(username.map(str::to_owned))),
        Route::Root | Route::Landing => Box::new(landing::LandingScreen::new()),
        Route::Nodes => Box::new(nodes::NodesScreen::new()),
        Route::Node { id, tab } => Box::new(node::NodeScreen::new(id, *tab)),
        Route::Apps => Box::new(apps::AppsScreen::new()),
        Route::App { id } => Box::new(apps::AppScreen::new(id)),
        Route::Policies => Box::new(policies::PoliciesScreen::new()),
        Route::PolicyAdd => Box::new(policies::PolicyEditScreen::new(None)),
        Route::PolicyEdit { id } => Box::new(policies::PolicyEditScreen::new(Some(id.clone()))),
        Route::NotFound { path } => Box::new(not_found::NotFoundScreen::missing(path)),
        Route::Userplanes
        | Route::Userplane { .. }
        | Route::Services
        | Route::ServiceCreate
        | Route::Service { .. }
        | Route::Subscriptions
        | Route::SubscriptionCreate
        | Route::SubscriptionEdit { .. }
        | Route::SubscriptionPatch { .. } => Box::new(not_found::NotFoundScreen::cli_only(route)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn routes_map_to_screens() {
        let cases = [
            ("/login", "login"),
            ("/landing", "landing"),
            ("/nodes", "nodes"),
            ("/nodes/n1", "node-dashboard"),
            ("/nodes/n1/apps", "node-apps"),
            ("/nodes/n1/interfaces", "node-interfaces"),
            ("/nodes/n1/dns", "node-dns"),
            ("/apps", "apps"),
            ("/apps/a1", "app"),
            ("/policies", "policies"),
            ("/policies/add", "policy-edit"),
            ("/policies/p1/edit", "policy-edit"),
            ("/userplanes", "not-found"),
            ("/nowhere", "not-found"),
        ];
        for (path, id) in cases {
            assert_eq!(create(&Route::parse(path), None).id(), id, "{path}");
        }
    }
}
