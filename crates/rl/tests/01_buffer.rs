use rl::{ReplayBuffer, RlError, Transition};
use std::collections::HashSet;

/// A transition tagged with its insertion sequence number in `reward`.
fn tagged(seq: usize) -> Transition {
    Transition {
        state: vec![seq as f32],
        action: vec![0.0],
        reward: seq as f32,
        next_state: vec![seq as f32 + 1.0],
        terminal: false,
    }
}

#[test]
fn record_grows_until_capacity() {
    let mut buffer = ReplayBuffer::new(5);
    assert!(buffer.is_empty());
    for i in 0..5 {
        assert_eq!(buffer.len(), i);
        buffer.record(tagged(i));
        assert_eq!(buffer.len(), i + 1);
    }
    assert_eq!(buffer.capacity(), 5);
}

#[test]
fn full_buffer_evicts_oldest_first() {
    let mut buffer = ReplayBuffer::new(3);
    for i in 0..3 {
        buffer.record(tagged(i));
    }
    for i in 3..7 {
        buffer.record(tagged(i));
        assert_eq!(buffer.len(), 3);
        let tags: Vec<f32> = buffer.iter().map(|t| t.reward).collect();
        let expected: Vec<f32> = (i - 2..=i).map(|s| s as f32).collect();
        assert_eq!(tags, expected);
    }
}

#[test]
fn sampling_more_than_stored_fails() {
    let mut buffer = ReplayBuffer::new(10);
    let mut rng = fastrand::Rng::with_seed(0);
    for i in 0..4 {
        buffer.record(tagged(i));
    }
    match buffer.sample(5, &mut rng) {
        Err(RlError::InsufficientData { requested, available }) => {
            assert_eq!(requested, 5);
            assert_eq!(available, 4);
        }
        other => panic!("expected InsufficientData, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn sample_returns_distinct_entries() {
    let mut buffer = ReplayBuffer::new(20);
    let mut rng = fastrand::Rng::with_seed(1);
    for i in 0..20 {
        buffer.record(tagged(i));
    }
    for n in [0, 1, 7, 20] {
        let batch = buffer.sample(n, &mut rng).unwrap();
        assert_eq!(batch.len(), n);
        let tags: HashSet<u32> = batch.iter().map(|t| t.reward as u32).collect();
        assert_eq!(tags.len(), n);
        assert!(tags.iter().all(|&t| t < 20));
    }
}

#[test]
fn every_entry_can_be_sampled() {
    let mut buffer = ReplayBuffer::new(8);
    let mut rng = fastrand::Rng::with_seed(2);
    for i in 0..8 {
        buffer.record(tagged(i));
    }
    let mut seen = HashSet::new();
    for _ in 0..200 {
        for t in buffer.sample(2, &mut rng).unwrap() {
            seen.insert(t.reward as u32);
        }
    }
    assert_eq!(seen.len(), 8);
}
