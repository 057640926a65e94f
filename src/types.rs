use bendy::encoding::ToBencode;
use smallvec::SmallVec;
use std::{
    fmt::Debug,
    net::{IpAddr, SocketAddr},
};

use crate::utils::base64_enc;

pub const NODE_ID_LEN: usize = 20;

/// Node ids are 20 bytes on the Mainline DHT, but nothing here checks that. Whatever bytes are
/// given are what ends up on the wire.
#[derive(PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct NodeId(pub SmallVec<[u8; NODE_ID_LEN]>);

impl Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", base64_enc(&self.0))
    }
}

impl NodeId {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        NodeId(SmallVec::from_slice(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; NODE_ID_LEN]> for NodeId {
    fn from(value: [u8; NODE_ID_LEN]) -> Self {
        NodeId(SmallVec::from_buf(value))
    }
}

impl ToBencode for NodeId {
    const MAX_DEPTH: usize = 0 as usize;

    fn encode(&self, encoder: bendy::encoding::SingleItemEncoder) -> Result<(), bendy::encoding::Error> {
        encoder.emit_bytes(&self.0)
    }
}

#[derive(PartialEq, Eq, Hash, Clone)]
pub struct InfoHash(pub SmallVec<[u8; NODE_ID_LEN]>);

impl InfoHash {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        InfoHash(SmallVec::from_slice(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; NODE_ID_LEN]> for InfoHash {
    fn from(value: [u8; NODE_ID_LEN]) -> Self {
        InfoHash(SmallVec::from_buf(value))
    }
}

impl Debug for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", base64_enc(&self.0))
    }
}

impl ToBencode for InfoHash {
    const MAX_DEPTH: usize = 0 as usize;

    fn encode(&self, encoder: bendy::encoding::SingleItemEncoder) -> Result<(), bendy::encoding::Error> {
        encoder.emit_bytes(&self.0)
    }
}

#[derive(PartialEq, Eq, Hash, Clone)]
pub struct Token(pub SmallVec<[u8; 10]>); // 10 is purely based on vibes

impl Token {
    pub fn from_bytes(bytes: &[u8]) -> Token {
        Token(SmallVec::from_slice(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", base64_enc(&self.0))
    }
}

impl ToBencode for Token {
    const MAX_DEPTH: usize = 0 as usize;

    fn encode(&self, encoder: bendy::encoding::SingleItemEncoder) -> Result<(), bendy::encoding::Error> {
        encoder.emit_bytes(&self.0)
    }
}

/// A node as it appears in a compact node list, the address family of `end_point` decides
/// whether it packs into 26 or 38 bytes
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct NodeInfo {
    id: NodeId,
    end_point: SocketAddr,
}

impl NodeInfo {
    pub fn new(id: NodeId, end_point: SocketAddr) -> NodeInfo {
        NodeInfo { id, end_point }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn end_point(&self) -> SocketAddr {
        self.end_point
    }

    pub fn ip(&self) -> IpAddr {
        self.end_point.ip()
    }

    pub fn port(&self) -> u16 {
        self.end_point.port()
    }
}

#[derive(PartialEq, Eq, Hash, Clone)]
pub struct TransactionId(pub SmallVec<[u8; 2]>);

impl Debug for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", base64_enc(&self.0))
    }
}

impl TransactionId {
    pub fn from_bytes(bytes: &[u8]) -> TransactionId {
        let vec = SmallVec::from_slice(bytes);
        TransactionId(vec)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<[u8; 2]> for TransactionId {
    fn from(value: [u8; 2]) -> Self {
        TransactionId(SmallVec::from_buf(value))
    }
}

impl ToBencode for TransactionId {
    const MAX_DEPTH: usize = 0 as usize;

    fn encode(&self, encoder: bendy::encoding::SingleItemEncoder) -> Result<(), bendy::encoding::Error> {
        encoder.emit_bytes(&self.0)
    }
}
