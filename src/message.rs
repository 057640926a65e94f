use bendy::encoding::Encoder;

use crate::our_error::OurError;
use crate::types::{NodeId, TransactionId};

use crate::message::announce_peer_query::AnnouncePeerQuery;
use crate::message::arguments::Arguments;
use crate::message::error::KrpcError;
use crate::message::find_node_query::FindNodeQuery;
use crate::message::find_node_response::FindNodeResponse;
use crate::message::get_peers_query::GetPeersQuery;
use crate::message::get_peers_response::GetPeersResponse;
use crate::message::ping_query::PingQuery;
use crate::message::ping_response::PingResponse;

pub mod announce_peer_query;
pub mod arguments;
pub mod error;
pub mod find_node_query;
pub mod find_node_response;
pub mod get_peers_query;
pub mod get_peers_response;
pub mod ping_query;
pub mod ping_response;

/// The `a` dictionary of a query or the `r` dictionary of a response
pub trait ToKrpcBody {
    fn to_body(&self) -> Arguments<'_>;
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Query {
    Ping(PingQuery),
    FindNode(FindNodeQuery),
    GetPeers(GetPeersQuery),
    AnnouncePeer(AnnouncePeerQuery),
}

impl Query {
    /// What goes under the `q` key
    pub fn method_name(&self) -> &'static str {
        match self {
            Query::Ping(_) => "ping",
            Query::FindNode(_) => "find_node",
            Query::GetPeers(_) => "get_peers",
            Query::AnnouncePeer(_) => "announce_peer",
        }
    }

    pub fn querier(&self) -> &NodeId {
        match self {
            Query::Ping(q) => q.querier(),
            Query::FindNode(q) => q.querier(),
            Query::GetPeers(q) => q.querier(),
            Query::AnnouncePeer(q) => q.querier(),
        }
    }
}

impl ToKrpcBody for Query {
    fn to_body(&self) -> Arguments<'_> {
        match self {
            Query::Ping(q) => q.to_body(),
            Query::FindNode(q) => q.to_body(),
            Query::GetPeers(q) => q.to_body(),
            Query::AnnouncePeer(q) => q.to_body(),
        }
    }
}

impl From<PingQuery> for Query {
    fn from(value: PingQuery) -> Self {
        Query::Ping(value)
    }
}

impl From<FindNodeQuery> for Query {
    fn from(value: FindNodeQuery) -> Self {
        Query::FindNode(value)
    }
}

impl From<GetPeersQuery> for Query {
    fn from(value: GetPeersQuery) -> Self {
        Query::GetPeers(value)
    }
}

impl From<AnnouncePeerQuery> for Query {
    fn from(value: AnnouncePeerQuery) -> Self {
        Query::AnnouncePeer(value)
    }
}

/// Responses carry no tag saying which query they answer, the transaction id is the only link
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Response {
    /// also used to answer announce_peer
    Ping(PingResponse),
    FindNode(FindNodeResponse),
    GetPeers(GetPeersResponse),
}

impl Response {
    pub fn queried(&self) -> &NodeId {
        match self {
            Response::Ping(r) => r.queried(),
            Response::FindNode(r) => r.queried(),
            Response::GetPeers(r) => r.queried(),
        }
    }
}

impl ToKrpcBody for Response {
    fn to_body(&self) -> Arguments<'_> {
        match self {
            Response::Ping(r) => r.to_body(),
            Response::FindNode(r) => r.to_body(),
            Response::GetPeers(r) => r.to_body(),
        }
    }
}

impl From<PingResponse> for Response {
    fn from(value: PingResponse) -> Self {
        Response::Ping(value)
    }
}

impl From<FindNodeResponse> for Response {
    fn from(value: FindNodeResponse) -> Self {
        Response::FindNode(value)
    }
}

impl From<GetPeersResponse> for Response {
    fn from(value: GetPeersResponse) -> Self {
        Response::GetPeers(value)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum KrpcBody {
    Query(Query),
    Response(Response),
    Error(KrpcError),
}

/// A complete message, ready to be turned into a datagram
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Krpc {
    transaction_id: TransactionId,
    body: KrpcBody,
}

impl Krpc {
    pub fn new_with_body(transaction_id: TransactionId, body: KrpcBody) -> Self {
        Self { transaction_id, body }
    }

    pub fn new_ping_query(transaction_id: TransactionId, query: PingQuery) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Query(query.into()))
    }

    pub fn new_find_node_query(transaction_id: TransactionId, query: FindNodeQuery) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Query(query.into()))
    }

    pub fn new_get_peers_query(transaction_id: TransactionId, query: GetPeersQuery) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Query(query.into()))
    }

    pub fn new_announce_peer_query(transaction_id: TransactionId, query: AnnouncePeerQuery) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Query(query.into()))
    }

    pub fn new_ping_response(transaction_id: TransactionId, response: PingResponse) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Response(response.into()))
    }

    pub fn new_find_node_response(transaction_id: TransactionId, response: FindNodeResponse) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Response(response.into()))
    }

    pub fn new_get_peers_response(transaction_id: TransactionId, response: GetPeersResponse) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Response(response.into()))
    }

    pub fn new_error(transaction_id: TransactionId, error: KrpcError) -> Krpc {
        Krpc::new_with_body(transaction_id, KrpcBody::Error(error))
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn body(&self) -> &KrpcBody {
        &self.body
    }

    pub fn is_query(&self) -> bool {
        matches!(self.body, KrpcBody::Query(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self.body, KrpcBody::Response(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, KrpcBody::Error(_))
    }

    /// The sender's node id, errors don't carry one
    pub fn node_id(&self) -> Option<&NodeId> {
        match &self.body {
            KrpcBody::Query(q) => Some(q.querier()),
            KrpcBody::Response(r) => Some(r.queried()),
            KrpcBody::Error(_) => None,
        }
    }

    /// Serialize into bencode. Either the whole message comes out or nothing does.
    pub fn encode(&self) -> Result<Box<[u8]>, OurError> {
        match self.body() {
            KrpcBody::Query(query) => build_query(query.method_name(), &self.transaction_id, &query.to_body()),
            KrpcBody::Response(response) => build_response(&response.to_body(), &self.transaction_id),
            KrpcBody::Error(error) => build_error(error.code(), error.message(), &self.transaction_id),
        }
    }
}

fn finish<F>(content: F) -> Result<Box<[u8]>, OurError>
where
    F: FnOnce(&mut Encoder) -> Result<(), bendy::encoding::Error>,
{
    let mut encoder = Encoder::new();
    content(&mut encoder).map_err(OurError::BendyEncodeError)?;

    let output = encoder.get_output().map_err(OurError::BendyEncodeError)?;
    Ok(output.into_boxed_slice())
}

/// `{"a": args, "q": method, "t": transaction_id, "y": "q"}`
pub(crate) fn build_query(
    method: &str,
    transaction_id: &TransactionId,
    args: &Arguments<'_>,
) -> Result<Box<[u8]>, OurError> {
    finish(|encoder| {
        encoder.emit_and_sort_dict(|e| {
            e.emit_pair(b"t", transaction_id)?;
            e.emit_pair_with(b"y", |e| e.emit_str("q"))?;
            e.emit_pair_with(b"q", |e| e.emit_str(method))?;
            e.emit_pair(b"a", args)
        })
    })
}

/// `{"r": result, "t": transaction_id, "y": "r"}`
pub(crate) fn build_response(result: &Arguments<'_>, transaction_id: &TransactionId) -> Result<Box<[u8]>, OurError> {
    finish(|encoder| {
        encoder.emit_and_sort_dict(|e| {
            e.emit_pair(b"t", transaction_id)?;
            e.emit_pair_with(b"y", |e| e.emit_str("r"))?;
            e.emit_pair(b"r", result)
        })
    })
}

/// `{"e": [code, message], "t": transaction_id, "y": "e"}`
pub(crate) fn build_error(code: u32, message: &str, transaction_id: &TransactionId) -> Result<Box<[u8]>, OurError> {
    finish(|encoder| {
        encoder.emit_and_sort_dict(|e| {
            e.emit_pair(b"t", transaction_id)?;
            e.emit_pair_with(b"y", |e| e.emit_str("e"))?;
            e.emit_pair_with(b"e", |e| {
                e.emit_list(|e| {
                    e.emit_int(code)?;
                    e.emit_str(message)
                })
            })
        })
    })
}

#[cfg(test)]
mod test {
    use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

    use bendy::decoding::{Decoder, Object};

    use super::*;
    use crate::types::{InfoHash, NodeInfo, Token};

    /// Pull the top level dictionary apart into (key, raw value) pairs, in wire order
    fn top_level(encoded: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut decoder = Decoder::new(encoded);
        let Some(Object::Dict(mut dict)) = decoder.next_object().unwrap() else {
            panic!("not a dict");
        };

        let mut pairs = vec![];
        while let Some((key, value)) = dict.next_pair().unwrap() {
            let raw = match value {
                Object::Bytes(b) => b.to_vec(),
                Object::Dict(d) => d.into_raw().unwrap().to_vec(),
                Object::List(l) => l.into_raw().unwrap().to_vec(),
                Object::Integer(i) => i.as_bytes().to_vec(),
            };
            pairs.push((key.to_vec(), raw));
        }
        pairs
    }

    #[test]
    fn query_envelope_round_trips() {
        let query = GetPeersQuery::new(
            NodeId::from_bytes(*&b"abcdefghij0123456789"),
            InfoHash::from_bytes(*&b"mnopqrstuvwxyz123456"),
        )
        .with_want("n4");
        let message = Krpc::new_get_peers_query(TransactionId::from_bytes(b"xy"), query);
        let encoded = message.encode().unwrap();

        let pairs = top_level(&encoded);
        let keys: Vec<_> = pairs.iter().map(|(k, _)| k.as_slice()).collect();
        assert_eq!(keys, vec![b"a".as_slice(), b"q".as_slice(), b"t".as_slice(), b"y".as_slice()]);

        assert_eq!(
            pairs[0].1,
            b"d2:id20:abcdefghij01234567899:info_hash20:mnopqrstuvwxyz1234564:want2:n4e".to_vec()
        );
        assert_eq!(pairs[1].1, b"get_peers".to_vec());
        assert_eq!(pairs[2].1, b"xy".to_vec());
        assert_eq!(pairs[3].1, b"q".to_vec());
    }

    #[test]
    fn response_envelope_round_trips() {
        let response = get_peers_response::Builder::new(NodeId::from_bytes(*&b"0123456789abcdefghij"))
            .with_token(Token::from_bytes(b"tok"))
            .with_value(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(192, 168, 0, 1), 6881)))
            .build()
            .unwrap();
        let encoded = Krpc::new_get_peers_response(TransactionId::from_bytes(b"aa"), response)
            .encode()
            .unwrap();

        let pairs = top_level(&encoded);
        let keys: Vec<_> = pairs.iter().map(|(k, _)| k.as_slice()).collect();
        assert_eq!(keys, vec![b"r".as_slice(), b"t".as_slice(), b"y".as_slice()]);

        let mut expected_r = b"d2:id20:0123456789abcdefghij5:token3:tok6:values6:".to_vec();
        expected_r.extend_from_slice(&[192, 168, 0, 1, 26, 225]);
        expected_r.push(b'e');
        assert_eq!(pairs[0].1, expected_r);
        assert_eq!(pairs[2].1, b"r".to_vec());
    }

    #[test]
    fn binary_blobs_are_not_escaped() {
        let id = NodeId::from([0xffu8; 20]);
        let encoded = Krpc::new_ping_query(TransactionId::from([0x00, 0xff]), PingQuery::new(id))
            .encode()
            .unwrap();

        let mut expected = b"d1:ad2:id20:".to_vec();
        expected.extend_from_slice(&[0xff; 20]);
        expected.extend_from_slice(b"e1:q4:ping1:t2:");
        expected.extend_from_slice(&[0x00, 0xff]);
        expected.extend_from_slice(b"1:y1:qe");

        assert_eq!(&*encoded, expected.as_slice());
    }

    #[test]
    fn accessors() {
        let query = Krpc::new_ping_query(TransactionId::from_bytes(b"aa"), PingQuery::new(NodeId::from_bytes(b"q")));
        assert!(query.is_query());
        assert_eq!(query.node_id(), Some(&NodeId::from_bytes(b"q")));

        let node = NodeInfo::new(
            NodeId::from_bytes(b"n"),
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1)),
        );
        let response = find_node_response::Builder::new(NodeId::from_bytes(b"r"))
            .with_node(node)
            .build()
            .unwrap();
        let response = Krpc::new_find_node_response(TransactionId::from_bytes(b"bb"), response);
        assert!(response.is_response());
        assert_eq!(response.transaction_id(), &TransactionId::from_bytes(b"bb"));

        let error = Krpc::new_error(TransactionId::from_bytes(b"cc"), KrpcError::protocol());
        assert!(error.is_error());
        assert_eq!(error.node_id(), None);
    }

    #[test]
    fn method_names() {
        let id = NodeId::from_bytes(b"i");
        let hash = InfoHash::from_bytes(b"h");

        assert_eq!(Query::from(PingQuery::new(id.clone())).method_name(), "ping");
        assert_eq!(
            Query::from(FindNodeQuery::new(id.clone(), id.clone())).method_name(),
            "find_node"
        );
        assert_eq!(
            Query::from(GetPeersQuery::new(id.clone(), hash.clone())).method_name(),
            "get_peers"
        );
        assert_eq!(
            Query::from(AnnouncePeerQuery::new(id, hash)).method_name(),
            "announce_peer"
        );
    }
}
