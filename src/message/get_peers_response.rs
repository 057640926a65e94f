use std::net::SocketAddr;

use eyre::eyre;
use tracing::warn;

use crate::{
    compact::{pack_node_list, pack_value_list},
    our_error::OurError,
    types::{NodeId, NodeInfo, Token},
};

use super::{
    ToKrpcBody,
    arguments::{ArgValue, Arguments},
};

/// Either we know peers for the info hash, or we hand back the closest nodes we know of
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum PeersOrNodes {
    Values(Vec<SocketAddr>),
    Nodes(Vec<NodeInfo>),
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GetPeersResponse {
    queried: NodeId,
    token: Token,
    result: PeersOrNodes,
}

impl GetPeersResponse {
    pub fn queried(&self) -> &NodeId {
        &self.queried
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn result(&self) -> &PeersOrNodes {
        &self.result
    }

    pub fn has_peers(&self) -> bool {
        matches!(self.result, PeersOrNodes::Values(_))
    }
}

#[derive(Debug, Hash, Clone)]
pub struct Builder {
    queried: NodeId,
    token: Option<Token>,
    values: Option<Vec<SocketAddr>>,
    nodes: Option<Vec<NodeInfo>>,
}

impl Builder {
    pub fn new(queried: NodeId) -> Builder {
        Self {
            queried,
            token: None,
            values: None,
            nodes: None,
        }
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_node(mut self, node: NodeInfo) -> Self {
        self.nodes.get_or_insert_with(Vec::new).push(node);
        self
    }

    pub fn with_nodes(mut self, nodes: &[NodeInfo]) -> Self {
        self.nodes.get_or_insert_with(Vec::new).extend_from_slice(nodes);
        self
    }

    pub fn with_value(mut self, value: SocketAddr) -> Self {
        self.values.get_or_insert_with(Vec::new).push(value);
        self
    }

    pub fn with_values(mut self, values: &[SocketAddr]) -> Self {
        self.values.get_or_insert_with(Vec::new).extend_from_slice(values);
        self
    }

    pub fn build(self) -> Result<GetPeersResponse, OurError> {
        let Some(token) = self.token else {
            warn!("get_peers response built without a token");
            return Err(OurError::ShapeMismatch(eyre!("get_peers response needs a `token`")));
        };

        let result = match (self.values, self.nodes) {
            (Some(values), None) => PeersOrNodes::Values(values),
            (None, Some(nodes)) => PeersOrNodes::Nodes(nodes),
            (Some(_), Some(_)) => {
                warn!("get_peers response given both values and nodes");
                return Err(OurError::ShapeMismatch(eyre!(
                    "get_peers response takes either `values` or `nodes`, not both"
                )));
            }
            (None, None) => {
                warn!("get_peers response given neither values nor nodes");
                return Err(OurError::ShapeMismatch(eyre!(
                    "get_peers response needs `values` or `nodes`"
                )));
            }
        };

        Ok(GetPeersResponse {
            queried: self.queried,
            token,
            result,
        })
    }
}

impl ToKrpcBody for GetPeersResponse {
    fn to_body(&self) -> Arguments<'_> {
        // unlike BEP 5's list of strings, values goes out as one concatenated compact string
        let found = match &self.result {
            PeersOrNodes::Values(values) => (b"values".as_slice(), ArgValue::owned(pack_value_list(values))),
            PeersOrNodes::Nodes(nodes) => (b"nodes".as_slice(), ArgValue::owned(pack_node_list(nodes))),
        };

        Arguments::new([
            (b"id".as_slice(), ArgValue::bytes(self.queried.as_bytes())),
            (b"token".as_slice(), ArgValue::bytes(self.token.as_bytes())),
            found,
        ])
    }
}
