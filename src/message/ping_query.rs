use crate::types::NodeId;

use super::{
    ToKrpcBody,
    arguments::{ArgValue, Arguments},
};

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct PingQuery {
    querier: NodeId,
}

impl PingQuery {
    pub fn new(querier: NodeId) -> Self {
        Self { querier }
    }

    pub fn querier(&self) -> &NodeId {
        &self.querier
    }
}

impl ToKrpcBody for PingQuery {
    fn to_body(&self) -> Arguments<'_> {
        Arguments::new([(b"id".as_slice(), ArgValue::bytes(self.querier.as_bytes()))])
    }
}

#[cfg(test)]
mod tests {
    use crate::{message::Krpc, types::TransactionId};

    use super::*;

    #[test]
    fn can_encode_from_example() {
        use std::str;

        let txn_id = TransactionId::from_bytes(*&b"aa");
        let ping_query = PingQuery::new(NodeId::from_bytes(*&b"abcdefghij0123456789"));

        let serialized = Krpc::new_ping_query(txn_id, ping_query).encode().unwrap();
        let expected = b"d1:ad2:id20:abcdefghij0123456789e1:q4:ping1:t2:aa1:y1:qe";

        assert_eq!(
            str::from_utf8(&*serialized).unwrap(),
            str::from_utf8(expected.as_ref()).unwrap()
        );
    }
}
