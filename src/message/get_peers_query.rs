use crate::types::{InfoHash, NodeId};

use super::{
    ToKrpcBody,
    arguments::{ArgValue, Arguments},
};

/// `want` is only sent when asked for, there's no default like find_node has
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GetPeersQuery {
    querier: NodeId,
    info_hash: InfoHash,
    scrape: bool,
    noseed: bool,
    want: Option<String>,
}

impl GetPeersQuery {
    pub fn new(querier: NodeId, info_hash: InfoHash) -> Self {
        Self {
            querier,
            info_hash,
            scrape: false,
            noseed: false,
            want: None,
        }
    }

    pub fn with_scrape(mut self, scrape: bool) -> Self {
        self.scrape = scrape;
        self
    }

    pub fn with_noseed(mut self, noseed: bool) -> Self {
        self.noseed = noseed;
        self
    }

    pub fn with_want(mut self, want: impl Into<String>) -> Self {
        self.want = Some(want.into());
        self
    }

    pub fn querier(&self) -> &NodeId {
        &self.querier
    }

    pub fn info_hash(&self) -> &InfoHash {
        &self.info_hash
    }

    pub fn scrape(&self) -> bool {
        self.scrape
    }

    pub fn noseed(&self) -> bool {
        self.noseed
    }

    pub fn want(&self) -> Option<&str> {
        self.want.as_deref()
    }
}

impl ToKrpcBody for GetPeersQuery {
    fn to_body(&self) -> Arguments<'_> {
        Arguments::new([
            (b"id".as_slice(), ArgValue::bytes(self.querier.as_bytes())),
            (b"info_hash".as_slice(), ArgValue::bytes(self.info_hash.as_bytes())),
        ])
        .merge_optional([
            (b"scrape".as_slice(), ArgValue::flag(self.scrape)),
            (b"noseed".as_slice(), ArgValue::flag(self.noseed)),
            (b"want".as_slice(), self.want.as_deref().map(|w| ArgValue::bytes(w.as_bytes()))),
        ])
    }
}
