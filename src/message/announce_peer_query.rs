use crate::types::{InfoHash, NodeId, Token};

use super::{
    ToKrpcBody,
    arguments::{ArgValue, Arguments},
};

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct AnnouncePeerQuery {
    querier: NodeId,
    info_hash: InfoHash,
    implied_port: bool,
    port: Option<u16>,
    token: Option<Token>,
}

impl AnnouncePeerQuery {
    pub fn new(querier: NodeId, info_hash: InfoHash) -> Self {
        Self {
            querier,
            info_hash,
            implied_port: false,
            port: None,
            token: None,
        }
    }

    pub fn with_implied_port(mut self, implied_port: bool) -> Self {
        self.implied_port = implied_port;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn querier(&self) -> &NodeId {
        &self.querier
    }

    pub fn implied_port(&self) -> bool {
        self.implied_port
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn info_hash(&self) -> &InfoHash {
        &self.info_hash
    }
}

impl ToKrpcBody for AnnouncePeerQuery {
    fn to_body(&self) -> Arguments<'_> {
        Arguments::new([
            (b"id".as_slice(), ArgValue::bytes(self.querier.as_bytes())),
            (b"info_hash".as_slice(), ArgValue::bytes(self.info_hash.as_bytes())),
        ])
        .merge_optional([
            (b"implied_port".as_slice(), ArgValue::flag(self.implied_port)),
            (b"port".as_slice(), self.port.map(|p| ArgValue::Int(p.into()))),
            (b"token".as_slice(), self.token.as_ref().map(|t| ArgValue::bytes(t.as_bytes()))),
        ])
    }
}
