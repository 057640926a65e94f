//! # midwest_mainline_krpc
//!
//! The wire side of the BitTorrent Mainline DHT. Every message on the DHT is a bencoded dictionary
//! sent as a single UDP datagram, and this crate builds those dictionaries byte for byte.
//!
//! ## what goes on the wire?
//! KRPC has three kinds of messages, told apart by the `y` key:
//! - queries (`y = "q"`), with the method name under `q` and its arguments under `a`
//! - responses (`y = "r"`), with the result under `r`
//! - errors (`y = "e"`), with `[code, message]` under `e`
//!
//! All of them carry a transaction id under `t` so a response can be matched to its query. Node
//! and peer lists in responses use the "compact" format, see [`compact`].
//!
//! - For the BitTorrent specification, [see](https://www.bittorrent.org/beps/bep_0005.html)
//! - For the IPv6 extension, [see](https://www.bittorrent.org/beps/bep_0032.html)
//!
//! ## what doesn't go in here?
//! Sockets, routing tables, retries and decoding all live elsewhere. Encoding is synchronous and
//! never touches the network.
//!
//! # TL;DR
//!
//! ``` rust
//! use midwest_mainline_krpc::krpc_encoder::KrpcEncoder;
//! use midwest_mainline_krpc::message::ping_query::PingQuery;
//! use midwest_mainline_krpc::types::{NodeId, TransactionId};
//!
//! let encoder = KrpcEncoder::new();
//! let ping = PingQuery::new(NodeId::from_bytes(b"abcdefghij0123456789"));
//!
//! let encoded = encoder
//!     .encode_ping_query(ping, Some(TransactionId::from_bytes(b"aa")))
//!     .unwrap();
//! assert_eq!(&*encoded.bytes, b"d1:ad2:id20:abcdefghij0123456789e1:q4:ping1:t2:aa1:y1:qe");
//! ```

pub mod compact;
pub mod krpc_encoder;
pub mod message;
pub mod our_error;
pub mod transaction_id_generator;
pub mod types;
pub mod utils;
