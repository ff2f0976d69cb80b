use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::sim::SimTime;
use crate::stream::ForwardingPolicy;

#[test]
fn defaults_match_the_reference_scenario() {
    let cfg = SimConfig::default();
    assert_eq!(cfg.clients, 100);
    assert_eq!(cfg.fanout, 10);
    assert_eq!(cfg.block_size_kb, 1.0);
    assert_eq!(cfg.batch_size, 30);
    assert_eq!(cfg.cache_size, 50);
    assert_eq!((cfg.min_bandwidth_kbps, cfg.max_bandwidth_kbps), (20.0, 100.0));
    assert_eq!(cfg.smooth_threshold, 5);
    assert_eq!(cfg.horizon(), SimTime::from_secs(10));
    assert_eq!(cfg.generate_interval(), Some(SimTime::from_secs(1)));
    assert_eq!(cfg.forwarding, ForwardingPolicy::PushOnly);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg: SimConfig = serde_json::from_str(
        r#"{ "clients": 12, "fanout": 3, "forwarding": "pull_on_miss", "generate_interval_secs": null }"#,
    )
    .expect("parse config");
    assert_eq!(cfg.clients, 12);
    assert_eq!(cfg.fanout, 3);
    assert_eq!(cfg.forwarding, ForwardingPolicy::PullOnMiss);
    assert_eq!(cfg.generate_interval(), None);
    assert_eq!(cfg.cache_size, 50);
}

#[test]
fn validate_rejects_bad_settings() {
    let base = SimConfig::default;

    let cfg = SimConfig {
        clients: 3,
        fanout: 3,
        ..base()
    };
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::FanoutUnsatisfiable {
            fanout: 3,
            clients: 3
        })
    );

    let cfg = SimConfig {
        min_bandwidth_kbps: 0.0,
        ..base()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidBandwidthBounds { .. })
    ));

    let cfg = SimConfig {
        min_bandwidth_kbps: 120.0,
        ..base()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidBandwidthBounds { .. })
    ));

    let cfg = SimConfig {
        cache_size: 0,
        ..base()
    };
    assert_eq!(cfg.validate(), Err(ConfigError::Zero { field: "cache_size" }));

    let cfg = SimConfig {
        generate_interval_secs: Some(0.0),
        ..base()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NotPositive {
            field: "generate_interval_secs",
            ..
        })
    ));

    let cfg = SimConfig {
        horizon_secs: f64::INFINITY,
        ..base()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidHorizon(_))));
}

#[test]
fn server_only_config_is_valid() {
    let cfg = SimConfig {
        clients: 0,
        fanout: 0,
        ..SimConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn sub_nanosecond_interval_and_horizon_are_rejected() {
    let cfg = SimConfig {
        clients: 3,
        fanout: 1,
        generate_interval_secs: Some(1e-10),
        ..SimConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NotPositive {
            field: "generate_interval_secs",
            ..
        })
    ));
    assert!(crate::run::run(&cfg).is_err());

    let cfg = SimConfig {
        horizon_secs: 1e-10,
        ..SimConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidHorizon(_))));

    let cfg = SimConfig {
        generate_interval_secs: Some(1e-9),
        horizon_secs: 0.0,
        ..SimConfig::default()
    };
    assert!(cfg.validate().is_ok());
}
