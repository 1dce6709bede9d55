use gym::Space;

#[test]
fn continuous_samples_stay_in_bounds() {
    let space = Space::continuous(vec![-2.0, 0.0], vec![2.0, 0.5]);
    let mut rng = fastrand::Rng::with_seed(0);
    assert_eq!(space.shape(), 2);
    for _ in 0..1000 {
        let sample = space.sample(&mut rng);
        assert!(space.contains(&sample), "{sample:?}");
    }
}

#[test]
fn discrete_samples_cover_every_action() {
    let space = Space::Discrete(2);
    let mut rng = fastrand::Rng::with_seed(1);
    let mut seen = [false; 2];
    for _ in 0..100 {
        let sample = space.sample(&mut rng);
        assert!(space.contains(&sample));
        seen[sample[0] as usize] = true;
    }
    assert_eq!(seen, [true, true]);
    assert_eq!(space.shape(), 1);
    assert!(!space.contains(&[2.0]));
    assert!(!space.contains(&[0.5]));
}

#[test]
#[should_panic(expected = "low must not exceed high")]
fn inverted_bounds_are_rejected() {
    let _ = Space::continuous(vec![1.0], vec![-1.0]);
}
