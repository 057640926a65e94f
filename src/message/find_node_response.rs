use eyre::eyre;
use tracing::warn;

use crate::{
    compact::pack_node_list,
    our_error::OurError,
    types::{NodeId, NodeInfo},
};

use super::{
    ToKrpcBody,
    arguments::{ArgValue, Arguments},
};

/// Which key the compact node list goes under. The caller picks the key, each entry is still
/// packed by its own address family, so an IPv4 node under `nodes6` comes out as 26 bytes.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum CompactNodes {
    /// `nodes`, meant for IPv4 nodes
    V4(Vec<NodeInfo>),
    /// `nodes6`, meant for IPv6 nodes
    V6(Vec<NodeInfo>),
}

impl CompactNodes {
    pub fn key(&self) -> &'static [u8] {
        match self {
            CompactNodes::V4(_) => b"nodes",
            CompactNodes::V6(_) => b"nodes6",
        }
    }

    pub fn nodes(&self) -> &[NodeInfo] {
        match self {
            CompactNodes::V4(nodes) | CompactNodes::V6(nodes) => nodes,
        }
    }

    /// Entries whose address family doesn't match the key
    fn foreign_family_count(&self) -> usize {
        let wants_v6 = matches!(self, CompactNodes::V6(_));
        self.nodes()
            .iter()
            .filter(|node| node.end_point().is_ipv6() != wants_v6)
            .count()
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FindNodeResponse {
    queried: NodeId,
    nodes: CompactNodes,
}

impl FindNodeResponse {
    pub fn queried(&self) -> &NodeId {
        &self.queried
    }

    pub fn nodes(&self) -> &CompactNodes {
        &self.nodes
    }
}

#[derive(Debug, Hash, Clone)]
pub struct Builder {
    queried: NodeId,
    nodes: Option<Vec<NodeInfo>>,
    nodes6: Option<Vec<NodeInfo>>,
}

impl Builder {
    pub fn new(queried: NodeId) -> Builder {
        Self {
            queried,
            nodes: None,
            nodes6: None,
        }
    }

    pub fn with_node(mut self, node: NodeInfo) -> Self {
        self.nodes.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// An empty slice still counts, the reply will carry an empty `nodes`
    pub fn with_nodes(mut self, nodes: &[NodeInfo]) -> Self {
        self.nodes.get_or_insert_with(Vec::new).extend_from_slice(nodes);
        self
    }

    pub fn with_node6(mut self, node: NodeInfo) -> Self {
        self.nodes6.get_or_insert_with(Vec::new).push(node);
        self
    }

    pub fn with_nodes6(mut self, nodes: &[NodeInfo]) -> Self {
        self.nodes6.get_or_insert_with(Vec::new).extend_from_slice(nodes);
        self
    }

    pub fn build(self) -> Result<FindNodeResponse, OurError> {
        let nodes = match (self.nodes, self.nodes6) {
            (Some(nodes), None) => CompactNodes::V4(nodes),
            (None, Some(nodes)) => CompactNodes::V6(nodes),
            (Some(_), Some(_)) => {
                warn!("find_node response given both nodes and nodes6");
                return Err(OurError::ShapeMismatch(eyre!(
                    "find_node response takes either `nodes` or `nodes6`, not both"
                )));
            }
            (None, None) => {
                warn!("find_node response given no nodes");
                return Err(OurError::ShapeMismatch(eyre!(
                    "find_node response needs `nodes` or `nodes6`"
                )));
            }
        };

        let foreign = nodes.foreign_family_count();
        if foreign > 0 {
            warn!(
                "{foreign} node(s) under `{}` have the other address family, packed as is",
                String::from_utf8_lossy(nodes.key())
            );
        }

        Ok(FindNodeResponse {
            queried: self.queried,
            nodes,
        })
    }
}

impl ToKrpcBody for FindNodeResponse {
    fn to_body(&self) -> Arguments<'_> {
        Arguments::new([
            (b"id".as_slice(), ArgValue::bytes(self.queried.as_bytes())),
            (self.nodes.key(), ArgValue::owned(pack_node_list(self.nodes.nodes()))),
        ])
    }
}
