use crate::net::Packet;
use crate::queue::{DropTailQueue, PacketQueue};

fn pkt(uid: u64, size: usize) -> Packet {
    Packet::new(uid, vec![0; size])
}

#[test]
fn droptail_queue_enforces_capacity_and_preserves_order() {
    let mut q = DropTailQueue::new(2);
    assert_eq!(q.capacity_packets(), 2);
    assert!(q.is_empty());
    assert_eq!(q.bytes(), 0);

    assert!(q.enqueue(pkt(1, 60)).is_ok());
    assert!(q.enqueue(pkt(2, 40)).is_ok());
    assert_eq!(q.len(), 2);
    assert_eq!(q.bytes(), 100);

    let dropped = q.enqueue(pkt(3, 10)).expect_err("should drop");
    assert_eq!(dropped.uid, 3);
    assert_eq!(q.len(), 2);
    assert_eq!(q.bytes(), 100);
    assert_eq!(q.rejected(), 1);
    assert_eq!(q.front().map(|p| p.uid), Some(1));

    assert_eq!(q.dequeue().expect("pkt").uid, 1);
    assert_eq!(q.bytes(), 40);
    assert_eq!(q.dequeue().expect("pkt").uid, 2);
    assert_eq!(q.bytes(), 0);
    assert!(q.dequeue().is_none());
}

#[test]
fn droptail_queue_clear_drops_everything() {
    let mut q = DropTailQueue::new(10);
    for uid in 0..4 {
        assert!(q.enqueue(pkt(uid, 25)).is_ok());
    }
    q.clear();
    assert!(q.is_empty());
    assert_eq!(q.rejected(), 0);
    assert_eq!(q.bytes(), 0);
    assert!(q.enqueue(pkt(9, 1)).is_ok());
    assert_eq!(q.dequeue().expect("pkt").uid, 9);
}

#[test]
fn zero_capacity_queue_drops_every_packet() {
    let mut q = DropTailQueue::new(0);
    assert!(q.enqueue(pkt(1, 1)).is_err());
    assert!(q.enqueue(pkt(2, 1)).is_err());
    assert!(q.is_empty());
    assert_eq!(q.rejected(), 2);
}
