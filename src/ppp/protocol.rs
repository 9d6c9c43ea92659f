//! Protocol tag mapping.
//!
//! The plain table is a bidirectional lookup that can be extended at setup
//! time. The compressed path is deliberately one-way and collapsed: every
//! upper-layer protocol is sent as `PPP_COMPRESSED_IPV4`, and every
//! compressed frame is delivered as IPv4.

use std::collections::HashMap;

use crate::error::{Error, Result};

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_IPV6: u16 = 0x86DD;

pub const PPP_IPV4: u16 = 0x0021;
pub const PPP_IPV6: u16 = 0x0057;
pub const PPP_COMPRESSED_IPV4: u16 = 0x4021;

#[derive(Debug, Clone)]
pub struct ProtocolMap {
    to_wire: HashMap<u16, u16>,
    to_ether: HashMap<u16, u16>,
}

impl Default for ProtocolMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.to_wire.insert(ETHERTYPE_IPV4, PPP_IPV4);
        map.to_ether.insert(PPP_IPV4, ETHERTYPE_IPV4);
        map.to_wire.insert(ETHERTYPE_IPV6, PPP_IPV6);
        map.to_ether.insert(PPP_IPV6, ETHERTYPE_IPV6);
        map
    }
}

impl ProtocolMap {
    pub fn empty() -> Self {
        Self {
            to_wire: HashMap::new(),
            to_ether: HashMap::new(),
        }
    }

    /// Register a new `ether <-> wire` pair. Both sides must be unused and the
    /// wire tag must not collide with the compressed tag.
    pub fn insert(&mut self, ether: u16, wire: u16) -> Result<()> {
        if wire == PPP_COMPRESSED_IPV4 {
            return Err(Error::Config(format!(
                "wire tag {wire:#06x} is reserved for compressed frames"
            )));
        }
        if self.to_wire.contains_key(&ether) || self.to_ether.contains_key(&wire) {
            return Err(Error::Config(format!(
                "protocol {ether:#06x} or wire tag {wire:#06x} already mapped"
            )));
        }
        self.to_wire.insert(ether, wire);
        self.to_ether.insert(wire, ether);
        Ok(())
    }

    pub fn try_ether_to_wire(&self, protocol: u16) -> Result<u16> {
        self.to_wire
            .get(&protocol)
            .copied()
            .ok_or(Error::UnexpectedProtocol(protocol))
    }

    pub fn try_wire_to_ether(&self, tag: u16) -> Result<u16> {
        self.to_ether
            .get(&tag)
            .copied()
            .ok_or(Error::UnexpectedProtocol(tag))
    }

    /// # Panics
    /// On an unmapped protocol number: the topology is misconfigured.
    pub fn ether_to_wire(&self, protocol: u16) -> u16 {
        self.try_ether_to_wire(protocol)
            .unwrap_or_else(|e| panic!("PPP protocol number not defined: {e}"))
    }

    /// # Panics
    /// On an unmapped wire tag.
    pub fn wire_to_ether(&self, tag: u16) -> u16 {
        self.try_wire_to_ether(tag)
            .unwrap_or_else(|e| panic!("PPP protocol number not defined: {e}"))
    }

    /// Always the compressed-IPv4 tag, whatever the input.
    pub fn compressed_ether_to_wire(&self, _protocol: u16) -> u16 {
        PPP_COMPRESSED_IPV4
    }

    /// Always IPv4, whatever the input.
    pub fn wire_to_compressed_ether(&self, _tag: u16) -> u16 {
        ETHERTYPE_IPV4
    }

    pub fn is_compressed_tag(&self, tag: u16) -> bool {
        tag == PPP_COMPRESSED_IPV4
    }

    /// Mapped upper-layer protocol numbers, ascending.
    pub fn protocols(&self) -> Vec<u16> {
        let mut v: Vec<u16> = self.to_wire.keys().copied().collect();
        v.sort_unstable();
        v
    }
}
