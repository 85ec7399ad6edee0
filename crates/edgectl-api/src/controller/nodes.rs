use crate::client::ApiClient;
use crate::error::Error;
use crate::models::dns::NfdList;
use crate::models::node::{InterfaceList, NodeList};
use crate::models::{Interface, NewNode, NfdTag, Node};

impl ApiClient {
    // ── Nodes ────────────────────────────────────────────────────────

    pub async fn list_nodes(&self) -> Result<Vec<Node>, Error> {
        let list: NodeList = self.get("/nodes").await?;
        Ok(list.nodes)
    }

    pub async fn get_node(&self, node_id: &str) -> Result<Node, Error> {
        self.get(&format!("/nodes/{node_id}")).await
    }

    pub async fn create_node(&self, node: &NewNode) -> Result<(), Error> {
        self.post_no_response("/nodes", node).await
    }

    pub async fn update_node(&self, node: &Node) -> Result<(), Error> {
        self.patch_no_response(&format!("/nodes/{}", node.id), node)
            .await
    }

    // ── Interfaces ───────────────────────────────────────────────────

    pub async fn list_interfaces(&self, node_id: &str) -> Result<Vec<Interface>, Error> {
        let list: InterfaceList = self.get(&format!("/nodes/{node_id}/interfaces")).await?;
        Ok(list.interfaces)
    }

    /// Replace the node's interface set in one PATCH.
    pub async fn update_interfaces(
        &self,
        node_id: &str,
        interfaces: &[Interface],
    ) -> Result<(), Error> {
        let body = InterfaceList {
            interfaces: interfaces.to_vec(),
        };
        self.patch_no_response(&format!("/nodes/{node_id}/interfaces"), &body)
            .await
    }

    // ── Feature discovery ────────────────────────────────────────────

    pub async fn list_nfd(&self, node_id: &str) -> Result<Vec<NfdTag>, Error> {
        let list: NfdList = self.get(&format!("/nodes/{node_id}/nfd")).await?;
        Ok(list.nodenfds)
    }
}
