use crate::types::NodeId;

use super::{
    ToKrpcBody,
    arguments::{ArgValue, Arguments},
};

/// Replies to ping and announce_peer look exactly the same on the wire
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct PingResponse {
    queried: NodeId,
}

impl PingResponse {
    pub fn new(queried: NodeId) -> Self {
        Self { queried }
    }

    pub fn queried(&self) -> &NodeId {
        &self.queried
    }
}

impl ToKrpcBody for PingResponse {
    fn to_body(&self) -> Arguments<'_> {
        Arguments::new([(b"id".as_slice(), ArgValue::bytes(self.queried.as_bytes()))])
    }
}

#[cfg(test)]
mod tests {
    use crate::{message::Krpc, types::TransactionId};

    use super::*;

    #[test]
    fn can_encode_example() {
        use std::str;

        let txn_id = TransactionId::from_bytes(*&b"aa");
        let ping_response = PingResponse::new(NodeId::from_bytes(*&b"mnopqrstuvwxyz123456"));

        let expected = "d1:rd2:id20:mnopqrstuvwxyz123456e1:t2:aa1:y1:re";
        let encoded = Krpc::new_ping_response(txn_id, ping_response).encode().unwrap();

        assert_eq!(expected, str::from_utf8(&encoded).unwrap());
    }
}
