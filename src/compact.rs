//! Compact node and peer contact packing.
//!
//! The BitTorrent people decided to send addresses as raw bytes in network/big endian: a peer is
//! its address followed by its port (6 bytes for IPv4, 18 for IPv6) and a node is its id followed
//! by the peer form (26 and 38 bytes for 20 byte ids).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::{our_error::OurError, types::NodeInfo};

pub const COMPACT_PEER_V4_LEN: usize = 4 + 2;
pub const COMPACT_PEER_V6_LEN: usize = 16 + 2;

/// Turn the tuple style representation of an address into an [`IpAddr`]. Four components are
/// IPv4 octets, eight are IPv6 16-bit groups, anything else is an error.
pub fn address_from_components(components: &[u16]) -> Result<IpAddr, OurError> {
    match *components {
        [a, b, c, d] => {
            let mut octets = [0u8; 4];
            for (octet, component) in octets.iter_mut().zip([a, b, c, d]) {
                *octet = u8::try_from(component).map_err(|_| OurError::OctetOutOfRange(component))?;
            }
            Ok(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        [a, b, c, d, e, f, g, h] => Ok(IpAddr::V6(Ipv6Addr::new(a, b, c, d, e, f, g, h))),
        _ => Err(OurError::InvalidAddressArity(components.len())),
    }
}

fn write_address_port(buf: &mut Vec<u8>, address: IpAddr, port: u16) {
    match address {
        IpAddr::V4(ip) => buf.extend_from_slice(&ip.octets()),
        IpAddr::V6(ip) => buf.extend_from_slice(&ip.octets()),
    }
    buf.extend_from_slice(&port.to_be_bytes());
}

/// Pack an address and port into its compact peer form
pub fn pack_address_port(address: IpAddr, port: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(COMPACT_PEER_V6_LEN);
    write_address_port(&mut buf, address, port);
    buf
}

/// Concatenate `id ++ address ++ port` for every node, in the order given. Duplicates are kept.
pub fn pack_node_list(nodes: &[NodeInfo]) -> Vec<u8> {
    nodes.iter().fold(Vec::new(), |mut buf, node| {
        buf.extend_from_slice(node.id().as_bytes());
        write_address_port(&mut buf, node.ip(), node.port());
        buf
    })
}

/// Same as [`pack_node_list`] minus the ids
pub fn pack_value_list(values: &[SocketAddr]) -> Vec<u8> {
    values.iter().fold(Vec::new(), |mut buf, peer| {
        write_address_port(&mut buf, peer.ip(), peer.port());
        buf
    })
}

#[cfg(test)]
mod tests {
    use std::net::{SocketAddrV4, SocketAddrV6};

    use super::*;
    use crate::types::NodeId;

    #[test]
    fn packs_v4_address() {
        let ip = address_from_components(&[192, 168, 0, 1]).unwrap();
        assert_eq!(pack_address_port(ip, 6881), vec![192, 168, 0, 1, 26, 225]);
    }

    #[test]
    fn packs_v6_groups_big_endian() {
        let ip = address_from_components(&[0x2001, 0x0db8, 0, 0, 0, 0, 0xff00, 0x0042]).unwrap();
        let packed = pack_address_port(ip, 0x1AE1);

        let expected = hex::decode("20010db80000000000000000ff0000421ae1").unwrap();
        assert_eq!(packed, expected);
        assert_eq!(packed.len(), COMPACT_PEER_V6_LEN);
    }

    #[test]
    fn rejects_odd_arity() {
        for components in [&[][..], &[1, 2, 3][..], &[1, 2, 3, 4, 5][..], &[0; 9][..]] {
            let err = address_from_components(components).unwrap_err();
            assert!(matches!(err, OurError::InvalidAddressArity(n) if n == components.len()));
        }
    }

    #[test]
    fn rejects_v4_component_above_255() {
        let err = address_from_components(&[10, 0, 256, 1]).unwrap_err();
        assert!(matches!(err, OurError::OctetOutOfRange(256)));
    }

    #[test]
    fn node_list_lengths() {
        let v4 = NodeInfo::new(
            NodeId::from_bytes(b"abcdefghij0123456789"),
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(97, 120, 106, 101), 11893)),
        );
        let v6 = NodeInfo::new(
            NodeId::from_bytes(b"mnopqrstuvwxyz123456"),
            SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 6881, 0, 0)),
        );

        assert_eq!(pack_node_list(&[]).len(), 0);
        assert_eq!(pack_node_list(&[v4.clone(), v4.clone(), v4.clone()]).len(), 26 * 3);
        assert_eq!(pack_node_list(&[v6.clone(), v6.clone()]).len(), 38 * 2);
    }

    #[test]
    fn node_list_keeps_order_and_duplicates() {
        let first = NodeInfo::new(
            NodeId::from_bytes(b"lmnopqrstuvxyz098765"),
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(97, 120, 106, 101), 11893)),
        );
        let second = NodeInfo::new(
            NodeId::from_bytes(b"abcdefghij0123456789"),
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(105, 100, 104, 116), 28269)),
        );

        let packed = pack_node_list(&[first.clone(), second, first]);
        assert_eq!(
            packed,
            b"lmnopqrstuvxyz098765axje.uabcdefghij0123456789idhtnmlmnopqrstuvxyz098765axje.u".to_vec()
        );
    }

    #[test]
    fn value_list_has_no_ids() {
        let values = [
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(97, 120, 106, 101), 11893)),
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(105, 100, 104, 116), 28269)),
            SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 1, 0, 0)),
        ];

        let packed = pack_value_list(&values);
        assert_eq!(packed.len(), 6 + 6 + 18);
        assert_eq!(&packed[..12], b"axje.uidhtnm");
        assert_eq!(&packed[12..], &pack_address_port(IpAddr::V6(Ipv6Addr::LOCALHOST), 1)[..]);
    }
}
