use rand::{RngCore, rngs::SmallRng};
use tracing::{instrument, trace};

use crate::{
    message::{
        Krpc, KrpcBody, Query, Response, announce_peer_query::AnnouncePeerQuery, error::KrpcError,
        find_node_query::FindNodeQuery, find_node_response::FindNodeResponse, get_peers_query::GetPeersQuery,
        get_peers_response::GetPeersResponse, ping_query::PingQuery, ping_response::PingResponse,
    },
    our_error::OurError,
    transaction_id_generator::TransactionIdGenerator,
    types::TransactionId,
};

/// A serialized query along with the transaction id it went out with, the caller needs the
/// latter to match up the response
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EncodedQuery {
    pub transaction_id: TransactionId,
    pub bytes: Box<[u8]>,
}

/// Turns message intents into bencoded KRPC datagrams.
///
/// Encoding itself is pure, the only state is the transaction id generator which is seeded once
/// when the encoder is made. Share it between tasks freely.
#[derive(Debug)]
pub struct KrpcEncoder<R = SmallRng> {
    transaction_ids: TransactionIdGenerator<R>,
}

impl KrpcEncoder<SmallRng> {
    pub fn new() -> Self {
        Self {
            transaction_ids: TransactionIdGenerator::new(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            transaction_ids: TransactionIdGenerator::from_seed(seed),
        }
    }
}

impl Default for KrpcEncoder<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> KrpcEncoder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            transaction_ids: TransactionIdGenerator::with_rng(rng),
        }
    }

    pub fn generate_transaction_id(&self) -> TransactionId {
        self.transaction_ids.generate()
    }

    /// Encode any query, generating a transaction id if `transaction_id` is `None`
    #[instrument(skip_all, fields(method = query.method_name()))]
    pub fn encode_query(
        &self,
        query: Query,
        transaction_id: Option<TransactionId>,
    ) -> Result<EncodedQuery, OurError> {
        let transaction_id = transaction_id.unwrap_or_else(|| self.transaction_ids.generate());
        let message = Krpc::new_with_body(transaction_id, KrpcBody::Query(query));
        let bytes = message.encode()?;

        trace!(
            "encoded query for transaction id {}, {} bytes",
            hex::encode_upper(message.transaction_id().as_bytes()),
            bytes.len()
        );

        let transaction_id = message.transaction_id().clone();
        Ok(EncodedQuery { transaction_id, bytes })
    }

    pub fn encode_ping_query(
        &self,
        query: PingQuery,
        transaction_id: Option<TransactionId>,
    ) -> Result<EncodedQuery, OurError> {
        self.encode_query(query.into(), transaction_id)
    }

    pub fn encode_find_node_query(
        &self,
        query: FindNodeQuery,
        transaction_id: Option<TransactionId>,
    ) -> Result<EncodedQuery, OurError> {
        self.encode_query(query.into(), transaction_id)
    }

    pub fn encode_get_peers_query(
        &self,
        query: GetPeersQuery,
        transaction_id: Option<TransactionId>,
    ) -> Result<EncodedQuery, OurError> {
        self.encode_query(query.into(), transaction_id)
    }

    pub fn encode_announce_peer_query(
        &self,
        query: AnnouncePeerQuery,
        transaction_id: Option<TransactionId>,
    ) -> Result<EncodedQuery, OurError> {
        self.encode_query(query.into(), transaction_id)
    }

    /// Responses always echo the query's transaction id, so it must be given
    #[instrument(skip_all)]
    pub fn encode_response(&self, response: Response, transaction_id: &TransactionId) -> Result<Box<[u8]>, OurError> {
        let message = Krpc::new_with_body(transaction_id.clone(), KrpcBody::Response(response));
        let bytes = message.encode()?;

        trace!(
            "encoded response for transaction id {}, {} bytes",
            hex::encode_upper(transaction_id.as_bytes()),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn encode_ping_response(
        &self,
        response: PingResponse,
        transaction_id: &TransactionId,
    ) -> Result<Box<[u8]>, OurError> {
        self.encode_response(response.into(), transaction_id)
    }

    pub fn encode_find_node_response(
        &self,
        response: FindNodeResponse,
        transaction_id: &TransactionId,
    ) -> Result<Box<[u8]>, OurError> {
        self.encode_response(response.into(), transaction_id)
    }

    pub fn encode_get_peers_response(
        &self,
        response: GetPeersResponse,
        transaction_id: &TransactionId,
    ) -> Result<Box<[u8]>, OurError> {
        self.encode_response(response.into(), transaction_id)
    }

    #[instrument(skip(self, message))]
    pub fn encode_error(&self, code: u32, message: &str, transaction_id: &TransactionId) -> Result<Box<[u8]>, OurError> {
        let error = Krpc::new_error(transaction_id.clone(), KrpcError::new(code, message));
        error.encode()
    }
}
