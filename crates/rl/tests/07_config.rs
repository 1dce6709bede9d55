use ml::{Activation, OptimizerKind};
use rl::config::{from_str, load};
use rl::{RlError, SearchConfig, TargetUpdate, TrainConfig};
use std::path::PathBuf;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn rejected_field(config: &TrainConfig) -> &'static str {
    match config.validate() {
        Err(RlError::InvalidConfig { field, .. }) => field,
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn defaults_validate() {
    let config = TrainConfig::default();
    config.validate().unwrap();
    assert_eq!(config.gamma, 0.90);
    assert_eq!(config.batch_size, 32);
    assert_eq!(config.buffer_capacity, 2000);
    assert_eq!(config.target.update, TargetUpdate::Soft { tau: 0.125 });
    SearchConfig::default().validate().unwrap();
}

#[test]
fn train_config_loads_from_file() {
    let config: TrainConfig = load(data("pendulum.json")).unwrap();
    config.validate().unwrap();
    assert_eq!(config.episodes, 200);
    assert_eq!(config.batch_size, 64);
    assert_eq!(config.gamma, 0.99);
    assert_eq!(config.target.update, TargetUpdate::Soft { tau: 0.01 });
    assert_eq!(config.target.interval_steps, 1);
    assert_eq!(config.actor.hidden, vec![64, 64]);
    assert_eq!(config.actor.output, Activation::Tanh);
    // unspecified fields keep their defaults
    assert_eq!(config.actor.activation, Activation::Relu);
    assert_eq!(config.optimizer, OptimizerKind::Adam);
    assert_eq!(config.buffer_capacity, 2000);
    assert_eq!(config.seed, 42);
}

#[test]
fn search_config_loads_from_file() {
    let config: SearchConfig = load(data("cartpole_search.json")).unwrap();
    config.validate().unwrap();
    assert_eq!(config.trials, 500);
    assert_eq!(config.noise_scale, 0.5);
    assert_eq!(config.max_steps, 200);
    assert_eq!(config.seed, 7);
}

#[test]
fn unknown_fields_are_errors() {
    let result: rl::Result<TrainConfig> = load(data("unknown_field.json"));
    assert!(matches!(result, Err(RlError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result: rl::Result<SearchConfig> = load(data("does_not_exist.json"));
    assert!(matches!(result, Err(RlError::Io(_))));
}

#[test]
fn hard_target_from_str() {
    let config: TrainConfig = from_str(r#"{"target": {"update": {"kind": "hard"}}}"#).unwrap();
    assert_eq!(config.target.update, TargetUpdate::Hard);
    assert_eq!(config.target.interval_steps, 50);
}

#[test]
fn out_of_range_values_name_their_field() {
    let base = TrainConfig::default();
    let with = |edit: fn(&mut TrainConfig)| {
        let mut config = base.clone();
        edit(&mut config);
        config
    };
    assert_eq!(rejected_field(&with(|c| c.gamma = 1.0)), "gamma");
    assert_eq!(rejected_field(&with(|c| c.gamma = 0.0)), "gamma");
    assert_eq!(rejected_field(&with(|c| c.learning_rate = -0.1)), "learning_rate");
    assert_eq!(rejected_field(&with(|c| c.epsilon_start = 1.5)), "epsilon_start");
    assert_eq!(rejected_field(&with(|c| c.epsilon_decay = 0.0)), "epsilon_decay");
    assert_eq!(rejected_field(&with(|c| c.batch_size = 4000)), "batch_size");

    let mut soft = base.clone();
    soft.target.update = TargetUpdate::Soft { tau: 0.0 };
    assert_eq!(rejected_field(&soft), "target.update.tau");

    let mut narrow = base.clone();
    narrow.critic.merged = 0;
    assert_eq!(rejected_field(&narrow), "critic.merged");

    let mut hidden = base;
    hidden.actor.hidden = vec![16, 0];
    assert_eq!(rejected_field(&hidden), "actor.hidden");
}

#[test]
fn empty_hidden_layers_are_rejected() {
    let mut actor = TrainConfig::default();
    actor.actor.hidden = Vec::new();
    assert_eq!(rejected_field(&actor), "actor.hidden");

    let mut state = TrainConfig::default();
    state.critic.state_hidden = Vec::new();
    assert_eq!(rejected_field(&state), "critic.state_hidden");

    let mut trunk = TrainConfig::default();
    trunk.critic.trunk_hidden = Vec::new();
    assert_eq!(rejected_field(&trunk), "critic.trunk_hidden");
}

#[test]
fn search_config_rejects_zero_trials() {
    let config = SearchConfig { trials: 0, ..Default::default() };
    assert!(matches!(config.validate(), Err(RlError::InvalidConfig { field: "trials", .. })));
}
