use crate::Error;
use crate::net::Packet;
use crate::ppp::{CompHeader, PppHeader};

#[test]
fn add_then_remove_header_restores_payload() {
    let mut pkt = Packet::new(1, b"payload".to_vec());
    pkt.add_header(&PppHeader::new(0x0021));
    assert_eq!(pkt.size(), 9);
    assert_eq!(&pkt.bytes()[..2], &[0x00, 0x21]);

    let peeked: PppHeader = pkt.peek_header().expect("peek");
    assert_eq!(peeked.protocol, 0x0021);
    assert_eq!(pkt.size(), 9, "peek must not consume");

    let h: PppHeader = pkt.remove_header().expect("remove");
    assert_eq!(h.protocol, 0x0021);
    assert_eq!(pkt.bytes(), b"payload");
}

#[test]
fn headers_stack_in_front() {
    let mut pkt = Packet::new(1, vec![0xAA]);
    pkt.add_header(&CompHeader::new(9));
    pkt.add_header(&PppHeader::new(0x0057));
    assert_eq!(pkt.bytes(), &[0x00, 0x57, 0xFE, 0xEF, 0, 0, 0, 9, 0xAA]);

    let _: PppHeader = pkt.remove_header().expect("ppp");
    let c: CompHeader = pkt.remove_header().expect("comp");
    assert_eq!(c.data, 9);
    assert_eq!(pkt.bytes(), &[0xAA]);
}

#[test]
fn failed_remove_leaves_packet_untouched() {
    let mut pkt = Packet::new(3, vec![0x00, 0x21, 1, 2]);
    let err = pkt.remove_header::<CompHeader>().expect_err("bad magic");
    assert!(matches!(err, Error::BadMagic { .. }));
    assert_eq!(pkt.bytes(), &[0x00, 0x21, 1, 2]);
}

#[test]
fn clone_is_independent() {
    let original = Packet::new(5, vec![1, 2, 3]);
    let mut copy = original.clone();
    copy.replace_bytes(vec![9]);
    copy.add_header(&PppHeader::new(0x0021));
    assert_eq!(original.bytes(), &[1, 2, 3]);
    assert_eq!(copy.uid, original.uid);
    assert_eq!(copy.into_bytes(), vec![0x00, 0x21, 9]);
}
