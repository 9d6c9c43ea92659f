//! Link-device capability interface.
//!
//! Frames in and out, channel attachment, address / MTU queries. Each link
//! technology provides one implementation; this crate ships the
//! point-to-point one.

use std::net::{Ipv4Addr, Ipv6Addr};

use super::address::Mac48Address;
use super::id::{ChannelId, DeviceId};
use super::network::Network;
use super::packet::Packet;
use crate::sim::Simulator;

/// How a received packet relates to this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    Host,
    Broadcast,
    Multicast,
    OtherHost,
}

/// Packet handed to the primary receive callback (header already stripped).
#[derive(Debug, Clone)]
pub struct RxPacket {
    pub device: DeviceId,
    pub packet: Packet,
    pub protocol: u16,
    pub from: Mac48Address,
}

/// Packet handed to the promiscuous callback.
#[derive(Debug, Clone)]
pub struct PromiscRxPacket {
    pub device: DeviceId,
    /// Independent copy of the frame as it arrived, header included.
    pub frame: Packet,
    pub packet: Packet,
    pub protocol: u16,
    pub from: Mac48Address,
    pub to: Mac48Address,
    pub packet_type: PacketType,
}

/// Upper-layer receive hook. The receiving device is checked out of `Network`
/// while this runs, so the callback may send on any *other* device.
pub type ReceiveCallback = Box<dyn FnMut(RxPacket, &mut Simulator, &mut Network) -> bool>;
pub type PromiscReceiveCallback =
    Box<dyn FnMut(PromiscRxPacket, &mut Simulator, &mut Network) -> bool>;
pub type LinkChangeCallback = Box<dyn FnMut(DeviceId)>;

pub trait NetDevice {
    fn id(&self) -> DeviceId;

    fn if_index(&self) -> u32;
    fn set_if_index(&mut self, index: u32);

    fn channel(&self) -> Option<ChannelId>;

    fn address(&self) -> Mac48Address;
    fn set_address(&mut self, address: Mac48Address);

    fn mtu(&self) -> u16;
    fn set_mtu(&mut self, mtu: u16) -> bool;

    fn is_link_up(&self) -> bool;
    fn add_link_change_callback(&mut self, cb: LinkChangeCallback);

    fn is_broadcast(&self) -> bool {
        true
    }
    fn broadcast(&self) -> Mac48Address {
        Mac48Address::BROADCAST
    }
    fn is_multicast(&self) -> bool {
        true
    }
    fn multicast_v4(&self, _group: Ipv4Addr) -> Mac48Address {
        Mac48Address::MULTICAST_V4
    }
    fn multicast_v6(&self, _group: Ipv6Addr) -> Mac48Address {
        Mac48Address::MULTICAST_V6
    }
    fn is_point_to_point(&self) -> bool;
    fn is_bridge(&self) -> bool {
        false
    }
    fn needs_arp(&self) -> bool;
    fn supports_send_from(&self) -> bool;

    fn send(
        &mut self,
        packet: Packet,
        dest: Mac48Address,
        protocol: u16,
        sim: &mut Simulator,
        net: &mut Network,
    ) -> bool;

    fn send_from(
        &mut self,
        packet: Packet,
        source: Mac48Address,
        dest: Mac48Address,
        protocol: u16,
        sim: &mut Simulator,
        net: &mut Network,
    ) -> bool;

    fn receive(&mut self, frame: Packet, sim: &mut Simulator, net: &mut Network);

    fn set_receive_callback(&mut self, cb: ReceiveCallback);
    fn set_promisc_receive_callback(&mut self, cb: PromiscReceiveCallback);
}
