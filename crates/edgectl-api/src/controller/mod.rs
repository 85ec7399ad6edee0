// Controller console endpoints, as inherent impls on `ApiClient`.

mod apps;
mod dns;
mod nodes;
mod policies;

pub use policies::PolicyResource;
