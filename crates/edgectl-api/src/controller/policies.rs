use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::policy::PolicyList;
use crate::models::{
    KubeOvnPolicy, PolicyAssignment, PolicyDocument, PolicySummary, TrafficPolicy,
};
use crate::orchestration::OrchestrationMode;

/// Node resource kinds that can carry a traffic policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PolicyResource {
    Interface,
    App,
}

impl PolicyResource {
    fn collection(self) -> &'static str {
        match self {
            Self::Interface => "interfaces",
            Self::App => "apps",
        }
    }
}

fn policies_path(mode: OrchestrationMode) -> String {
    format!("{}/policies", mode.path_prefix())
}

fn assignment_path(
    mode: OrchestrationMode,
    node_id: &str,
    resource: PolicyResource,
    resource_id: &str,
) -> String {
    format!(
        "/nodes/{node_id}/{}/{resource_id}{}/policy",
        resource.collection(),
        mode.path_prefix()
    )
}

impl ApiClient {
    // ── Policy documents ─────────────────────────────────────────────

    pub async fn list_policies(
        &self,
        mode: OrchestrationMode,
    ) -> Result<Vec<PolicySummary>, Error> {
        let list: PolicyList = self.get(&policies_path(mode)).await?;
        Ok(list.policies)
    }

    /// Fetch one policy, decoded in the shape `mode` uses.
    pub async fn get_policy(
        &self,
        mode: OrchestrationMode,
        policy_id: &str,
    ) -> Result<PolicyDocument, Error> {
        let path = format!("{}/{policy_id}", policies_path(mode));
        if mode.uses_kube_ovn_policies() {
            let policy: KubeOvnPolicy = self.get(&path).await?;
            Ok(PolicyDocument::KubeOvn(policy))
        } else {
            let policy: TrafficPolicy = self.get(&path).await?;
            Ok(PolicyDocument::Native(policy))
        }
    }

    pub async fn create_policy(
        &self,
        mode: OrchestrationMode,
        policy: &PolicyDocument,
    ) -> Result<(), Error> {
        self.post_no_response(&policies_path(mode), policy).await
    }

    pub async fn update_policy(
        &self,
        mode: OrchestrationMode,
        policy: &PolicyDocument,
    ) -> Result<(), Error> {
        let path = format!("{}/{}", policies_path(mode), policy.id());
        self.patch_no_response(&path, policy).await
    }

    pub async fn delete_policy(
        &self,
        mode: OrchestrationMode,
        policy_id: &str,
    ) -> Result<(), Error> {
        self.delete(&format!("{}/{policy_id}", policies_path(mode)))
            .await
    }

    // ── Assignments ──────────────────────────────────────────────────

    /// Id of the policy assigned to a node resource, `None` if there is none.
    pub async fn get_resource_policy(
        &self,
        mode: OrchestrationMode,
        node_id: &str,
        resource: PolicyResource,
        resource_id: &str,
    ) -> Result<Option<String>, Error> {
        let path = assignment_path(mode, node_id, resource, resource_id);
        let assigned: Option<PolicyAssignment> = self.get_optional(&path).await?;
        Ok(assigned.map(|a| a.id).filter(|id| !id.is_empty()))
    }

    pub async fn assign_resource_policy(
        &self,
        mode: OrchestrationMode,
        node_id: &str,
        resource: PolicyResource,
        resource_id: &str,
        policy_id: &str,
    ) -> Result<(), Error> {
        let body = PolicyAssignment {
            id: policy_id.to_owned(),
        };
        self.patch_no_response(&assignment_path(mode, node_id, resource, resource_id), &body)
            .await
    }

    /// Returns `false` when the backend had no assignment to remove.
    pub async fn remove_resource_policy(
        &self,
        mode: OrchestrationMode,
        node_id: &str,
        resource: PolicyResource,
        resource_id: &str,
    ) -> Result<bool, Error> {
        self.delete_optional(&assignment_path(mode, node_id, resource, resource_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_paths_follow_mode_prefix() {
        assert_eq!(
            assignment_path(
                OrchestrationMode::Native,
                "A",
                PolicyResource::Interface,
                "0000:00:1f.6"
            ),
            "/nodes/A/interfaces/0000:00:1f.6/policy"
        );
        assert_eq!(
            assignment_path(OrchestrationMode::KubernetesOvn, "A", PolicyResource::App, "x"),
            "/nodes/A/apps/x/kube_ovn/policy"
        );
        assert_eq!(policies_path(OrchestrationMode::KubernetesOvn), "/kube_ovn/policies");
        assert_eq!(policies_path(OrchestrationMode::Kubernetes), "/policies");
    }
}
