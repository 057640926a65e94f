use crate::types::NodeId;

use super::{
    ToKrpcBody,
    arguments::{ArgValue, Arguments},
};

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FindNodeQuery {
    querier: NodeId,
    target: NodeId,
    want: String,
}

impl FindNodeQuery {
    /// Ask for IPv4 nodes unless told otherwise
    pub const DEFAULT_WANT: &'static str = "n4";

    pub fn new(querier: NodeId, target: NodeId) -> Self {
        Self {
            querier,
            target,
            want: Self::DEFAULT_WANT.to_string(),
        }
    }

    pub fn with_want(mut self, want: impl Into<String>) -> Self {
        self.want = want.into();
        self
    }

    pub fn target_id(&self) -> &NodeId {
        &self.target
    }

    pub fn querier(&self) -> &NodeId {
        &self.querier
    }

    pub fn want(&self) -> &str {
        &self.want
    }
}

impl ToKrpcBody for FindNodeQuery {
    fn to_body(&self) -> Arguments<'_> {
        Arguments::new([
            (b"id".as_slice(), ArgValue::bytes(self.querier.as_bytes())),
            (b"target".as_slice(), ArgValue::bytes(self.target.as_bytes())),
            (b"want".as_slice(), ArgValue::bytes(self.want.as_bytes())),
        ])
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
        let query = FindNodeQuery::new(
            NodeId::from_bytes(*&b"abcdefghij0123456789"),
            NodeId::from_bytes(*&b"mnopqrstuvwxyz123456"),
        );

        let encoded = Krpc::new_find_node_query(txn_id, query).encode().unwrap();
        let expected =
            "d1:ad2:id20:abcdefghij01234567896:target20:mnopqrstuvwxyz1234564:want2:n4e1:q9:find_node1:t2:aa1:y1:qe";

        assert_eq!(expected, str::from_utf8(&*encoded).unwrap())
    }

    #[test]
    fn want_can_be_overridden() {
        let query = FindNodeQuery::new(NodeId::from_bytes(b"a"), NodeId::from_bytes(b"b")).with_want("n6");
        assert_eq!(query.to_body().get(b"want"), Some(&ArgValue::bytes(b"n6")));
    }
}
