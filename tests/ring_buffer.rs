use std::collections::VecDeque;

use byte_ring::{Error, RingBuffer, State};
use proptest::prelude::*;

#[test]
fn test_fresh_buffer() {
    for capacity in 2..40 {
        let buf = RingBuffer::new(capacity).unwrap();
        assert_eq!(buf.occupied_size(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.available_size(), capacity - 1);
        assert_eq!(buf.len(), capacity);
    }
}

#[test]
fn test_demo_scenario() {
    let mut buf = RingBuffer::new(16).unwrap();

    buf.push(&[b'0'; 15]).unwrap();
    assert_eq!(buf.occupied_size(), 15);
    assert_eq!(buf.available_size(), 0);

    assert_eq!(buf.pull(10).unwrap(), vec![b'0'; 10]);
    assert_eq!(buf.occupied_size(), 5);
    assert_eq!(buf.available_size(), 10);

    buf.push(&[b'1'; 4]).unwrap();
    assert_eq!(buf.occupied_size(), 9);
    assert_eq!(buf.state(), State::Wrapped);
    assert_eq!(buf.write_cursor(), 3);
    assert_eq!(&buf.as_bytes()[..3], b"111");
    assert_eq!(buf.as_bytes()[15], b'1');

    buf.resize(32).unwrap();
    assert_eq!(buf.occupied_size(), 0);
    assert_eq!(buf.len(), 32);
    assert!(matches!(buf.pull(1), Err(Error::Overflow { .. })));
}

#[test]
fn test_push_exactly_available_then_one_more() {
    let mut buf = RingBuffer::new(9).unwrap();
    buf.push(b"abc").unwrap();
    buf.pull(2).unwrap();

    let available = buf.available_size();
    buf.push(&vec![b'z'; available]).unwrap();
    assert_eq!(buf.available_size(), 0);

    let (write, read) = (buf.write_cursor(), buf.read_cursor());
    assert_eq!(
        buf.push(b"!").unwrap_err(),
        Error::Overflow { requested: 1, available: 0 }
    );
    assert_eq!((buf.write_cursor(), buf.read_cursor()), (write, read));
}

#[test]
fn test_pull_exactly_occupied_then_one_more() {
    let mut buf = RingBuffer::new(5).unwrap();
    buf.push(b"abc").unwrap();
    buf.pull(2).unwrap();
    buf.push(b"de").unwrap();

    let occupied = buf.occupied_size();
    assert_eq!(buf.pull(occupied).unwrap(), b"cde");
    assert!(buf.is_empty());
    assert!(matches!(buf.pull(1), Err(Error::Overflow { .. })));
}

#[derive(Debug, Clone)]
enum Op {
    Push(Vec<u8>),
    Pull(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop::collection::vec(any::<u8>(), 0..48).prop_map(Op::Push),
        4 => (0usize..48).prop_map(Op::Pull),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_behaves_like_fifo(capacity in 2usize..40, ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut buf = RingBuffer::new(capacity).unwrap();
        let mut model: VecDeque<u8> = VecDeque::new();

        for op in ops {
            let before = (buf.write_cursor(), buf.read_cursor());
            match op {
                Op::Push(data) => {
                    let available = capacity - 1 - model.len();
                    if data.len() <= available && !(data.is_empty() && available == 0) {
                        buf.push(&data).unwrap();
                        model.extend(data);
                    } else {
                        let overflowed = matches!(buf.push(&data), Err(Error::Overflow { .. }));
                        prop_assert!(overflowed);
                        prop_assert_eq!((buf.write_cursor(), buf.read_cursor()), before);
                    }
                }
                Op::Pull(n) => {
                    if n == 0 {
                        prop_assert_eq!(buf.pull(n).unwrap_err(), Error::InvalidLength(0));
                    } else if n <= model.len() {
                        let expected: Vec<u8> = model.drain(..n).collect();
                        prop_assert_eq!(buf.pull(n).unwrap(), expected);
                    } else {
                        let overflowed = matches!(buf.pull(n), Err(Error::Overflow { .. }));
                        prop_assert!(overflowed);
                        prop_assert_eq!((buf.write_cursor(), buf.read_cursor()), before);
                    }
                }
                Op::Clear => {
                    buf.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(buf.occupied_size(), model.len());
            prop_assert_eq!(buf.available_size(), capacity - 1 - model.len());
            prop_assert_eq!(buf.is_empty(), model.is_empty());
            prop_assert!(buf.contiguous_readable_size() <= model.len());
            if buf.is_full() {
                prop_assert_eq!(buf.available_size(), 0);
            }
        }
    }

    #[test]
    fn prop_resize_always_empties(
        capacity in 2usize..40,
        fill in 0usize..39,
        new_capacity in 2usize..80,
    ) {
        let mut buf = RingBuffer::new(capacity).unwrap();
        let fill = fill.min(capacity - 1);
        buf.push(&vec![7u8; fill]).unwrap();

        buf.resize(new_capacity).unwrap();
        prop_assert_eq!(buf.len(), new_capacity);
        if new_capacity != capacity {
            prop_assert!(buf.is_empty());
        }
    }
}
