//! Conversion between configuration-model and domain-model records

mod utils;

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema_bridge::{
    ConversionContext, ConversionError, ConverterConfig, Tri, to_config, to_config_batch,
    to_config_into, to_domain, to_domain_batch, to_domain_into,
};

use utils::{
    Channel, DummyConfig, GaugeConfig, NestedConfig, PortConfig, api, full_config, init_logging,
    nested,
};

fn context() -> ConversionContext {
    ConversionContext::new("dummy.test")
}

#[test]
fn test_to_domain_populates_values_and_markers() -> anyhow::Result<()> {
    init_logging();
    let config = DummyConfig {
        enabled: Tri::Value(false),
        workers: Tri::Value(3),
        channel: Tri::Value(Channel::CURRENT),
        ..DummyConfig::default()
    };

    let domain: api::Dummy = to_domain(&config, &context())?;

    assert!(!domain.enabled);
    assert_eq!(domain.workers, 3);
    assert_eq!(domain.channel, Channel::CURRENT);
    assert_eq!(domain.force_send_fields, vec!["enabled", "workers", "channel"]);
    assert!(domain.nested_pointer.is_none());
    assert!(domain.libraries.is_empty());
    Ok(())
}

#[test]
fn test_round_trip_full_record() -> anyhow::Result<()> {
    init_logging();
    let config = full_config();

    let domain: api::Dummy = to_domain(&config, &context())?;
    assert_eq!(domain.dummy_id, "dummy-1");
    assert_eq!(domain.nested_map["main"].name, "mapped");
    assert_eq!(domain.libraries.len(), 1);
    assert_eq!(domain.nested_pointer_list.len(), 3);
    assert!(domain.nested_pointer_list[1].is_none());
    assert_eq!(
        domain.nested_pointer_list[0].as_deref().map(|n| n.name.as_str()),
        Some("boxed")
    );
    assert!(domain.force_send_fields.contains(&"libraries".to_string()));

    let back: DummyConfig = to_config(&domain, &context())?;
    assert_eq!(back, config);
    Ok(())
}

#[test]
fn test_unset_is_not_a_present_zero() -> anyhow::Result<()> {
    let config = DummyConfig::default();

    let domain: api::Dummy = to_domain(&config, &context())?;
    assert!(!domain.enabled);
    assert_eq!(domain.workers, 0);
    assert!(domain.force_send_fields.is_empty());

    let back: DummyConfig = to_config(&domain, &context())?;
    assert_eq!(back.enabled, Tri::Unset);
    assert_eq!(back.workers, Tri::Unset);
    assert_eq!(back.libraries, None);
    assert_eq!(back, config);
    Ok(())
}

#[test]
fn test_explicit_zero_survives() -> anyhow::Result<()> {
    let config = DummyConfig {
        workers: Tri::Value(0),
        description: Tri::Value(String::new()),
        libraries: Some(Vec::new()),
        ..DummyConfig::default()
    };

    let domain: api::Dummy = to_domain(&config, &context())?;
    assert_eq!(domain.force_send_fields, vec!["workers", "description", "libraries"]);

    let back: DummyConfig = to_config(&domain, &context())?;
    assert_eq!(back.workers, Tri::Value(0));
    assert_eq!(back.description, Tri::Value(String::new()));
    assert_eq!(back.libraries, Some(Vec::new()));
    Ok(())
}

#[test]
fn test_null_lowers_like_unset() -> anyhow::Result<()> {
    let config = DummyConfig {
        workers: Tri::Null,
        ..DummyConfig::default()
    };

    let domain: api::Dummy = to_domain(&config, &context())?;
    assert_eq!(domain.workers, 0);
    assert!(domain.force_send_fields.is_empty());

    let back: DummyConfig = to_config(&domain, &context())?;
    assert_eq!(back.workers, Tri::Unset);
    Ok(())
}

#[test]
fn test_nonzero_without_marker_is_present() -> anyhow::Result<()> {
    let domain = api::Dummy {
        workers: 12,
        nested: api::Nested {
            name: "inner".to_string(),
            ..api::Nested::default()
        },
        ..api::Dummy::default()
    };

    let config: DummyConfig = to_config(&domain, &context())?;
    assert_eq!(config.workers, Tri::Value(12));
    assert_eq!(config.enabled, Tri::Unset);
    assert_eq!(config.nested.name, Tri::Value("inner".to_string()));
    assert_eq!(config.nested.enabled, Tri::Unset);
    Ok(())
}

#[test]
fn test_enum_value_is_not_revalidated() -> anyhow::Result<()> {
    let config = DummyConfig {
        channel: Tri::Value(Channel::from_raw("NIGHTLY")),
        ..DummyConfig::default()
    };

    let domain: api::Dummy = to_domain(&config, &context())?;
    assert_eq!(domain.channel.as_str(), "NIGHTLY");

    let back: DummyConfig = to_config(&domain, &context())?;
    assert_eq!(back.channel, config.channel);
    Ok(())
}

#[test]
fn test_local_field_is_not_converted() -> anyhow::Result<()> {
    let config = DummyConfig {
        scratch: Tri::Value(true),
        ..DummyConfig::default()
    };

    let domain: api::Dummy = to_domain(&config, &context())?;
    assert!(domain.force_send_fields.is_empty());

    let back: DummyConfig = to_config(&domain, &context())?;
    assert_eq!(back.scratch, Tri::Unset);
    Ok(())
}

#[test]
fn test_out_of_range_reports_path() {
    let config = DummyConfig {
        workers: Tri::Value(i64::from(i32::MAX) + 1),
        ..DummyConfig::default()
    };

    let err = to_domain::<_, api::Dummy>(&config, &context()).unwrap_err();
    assert_eq!(
        err,
        ConversionError::OutOfRange {
            operation: "dummy.test".to_string(),
            path: "workers".to_string(),
            value: "2147483648".to_string(),
            target: "i32",
        }
    );
}

#[test]
fn test_out_of_range_in_record_without_markers() {
    let config = PortConfig {
        number: Tri::Value(65_536),
    };
    let err = to_domain::<_, api::Port>(&config, &context()).unwrap_err();
    assert_eq!(err.path(), "number");

    let port: api::Port = to_domain(&PortConfig { number: Tri::Value(443) }, &context()).unwrap();
    assert_eq!(port.number, 443);
    let back: PortConfig = to_config(&api::Port::default(), &context()).unwrap();
    assert_eq!(back.number, Tri::Unset);
}

#[test]
fn test_float_narrowing_must_be_exact() {
    let exact = GaugeConfig {
        ratio: Tri::Value(0.5),
    };
    let gauge: api::Gauge = to_domain(&exact, &context()).unwrap();
    assert_eq!(gauge.force_send_fields, vec!["ratio"]);
    let back: GaugeConfig = to_config(&gauge, &context()).unwrap();
    assert_eq!(back, exact);

    for ratio in [0.1, 1e-50] {
        let config = GaugeConfig {
            ratio: Tri::Value(ratio),
        };
        let err = to_domain::<_, api::Gauge>(&config, &context()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::OutOfRange { ref path, target: "f32", .. } if path == "ratio"
        ));
    }
}

#[test]
fn test_unknown_marker_warns_or_fails() {
    init_logging();
    let domain = api::Dummy {
        force_send_fields: vec!["workers".to_string(), "no_such_field".to_string()],
        ..api::Dummy::default()
    };

    let lenient: DummyConfig = to_config(&domain, &context()).unwrap();
    assert_eq!(lenient.workers, Tri::Value(0));

    let strict = context().with_config(ConverterConfig::default().strict());
    let err = to_config::<DummyConfig, _>(&domain, &strict).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::UnknownExplicitField { ref field, .. } if field == "no_such_field"
    ));
}

#[test]
fn test_nested_marker_errors_carry_nested_path() {
    let domain = api::Dummy {
        nested_list: vec![
            api::Nested::default(),
            api::Nested {
                force_send_fields: vec!["bogus".to_string()],
                ..api::Nested::default()
            },
        ],
        ..api::Dummy::default()
    };
    let strict = context().with_config(ConverterConfig::default().strict());

    let err = to_config::<DummyConfig, _>(&domain, &strict).unwrap_err();
    assert_eq!(err.path(), "nested_list.1");
}

#[test]
fn test_depth_limit() {
    let config = DummyConfig {
        nested_pointer: Some(Box::new(nested("deep", true))),
        ..DummyConfig::default()
    };
    let shallow = context().with_config(ConverterConfig::default().with_max_depth(1));

    let err = to_domain::<_, api::Dummy>(&config, &shallow).unwrap_err();
    assert!(matches!(err, ConversionError::DepthExceeded { max_depth: 1, .. }));
}

#[test]
fn test_into_variants_leave_target_on_error() {
    let mut domain = api::Dummy {
        workers: 5,
        ..api::Dummy::default()
    };
    let bad = DummyConfig {
        workers: Tri::Value(i64::MAX),
        ..DummyConfig::default()
    };
    assert!(to_domain_into(&bad, &mut domain, &context()).is_err());
    assert_eq!(domain.workers, 5);

    to_domain_into(&full_config(), &mut domain, &context()).unwrap();
    assert_eq!(domain.workers, 8);

    let mut config = DummyConfig::default();
    to_config_into(&domain, &mut config, &context()).unwrap();
    assert_eq!(config, full_config());
}

#[test]
fn test_batch_conversion() {
    init_logging();
    let config = ConverterConfig {
        parallel_threshold: 4,
        ..ConverterConfig::default()
    };
    let context = context().with_config(config);

    let mut configs: Vec<DummyConfig> = (0..16)
        .map(|n| DummyConfig {
            workers: Tri::Value(n),
            ..full_config()
        })
        .collect();
    configs[7].workers = Tri::Value(i64::MIN);

    let domains: Vec<_> = to_domain_batch::<_, api::Dummy>(&configs, &context);
    assert_eq!(domains.len(), 16);
    assert!(domains[7].is_err());
    assert_eq!(domains[9].as_ref().map(|d| d.workers), Ok(9));

    let sequential = context.clone().with_config(ConverterConfig {
        parallel_threshold: usize::MAX,
        ..ConverterConfig::default()
    });
    assert_eq!(to_domain_batch::<_, api::Dummy>(&configs, &sequential), domains);

    let valid: Vec<api::Dummy> = domains.into_iter().filter_map(Result::ok).collect();
    let back: Vec<Result<DummyConfig, _>> = to_config_batch(&valid, &context);
    assert!(back.iter().all(Result::is_ok));
    assert_eq!(back[0].as_ref().ok(), configs.first());
}

fn random_tri<T>(rng: &mut StdRng, value: T) -> Tri<T> {
    if rng.random_bool(0.5) {
        Tri::Value(value)
    } else {
        Tri::Unset
    }
}

fn random_nested(rng: &mut StdRng) -> NestedConfig {
    let name = format!("n{}", rng.random_range(0..100));
    let enabled = rng.random_bool(0.5);
    NestedConfig {
        name: random_tri(rng, name),
        enabled: random_tri(rng, enabled),
    }
}

fn random_config(rng: &mut StdRng) -> DummyConfig {
    let workers = rng.random_range(i64::from(i32::MIN)..=i64::from(i32::MAX));
    let ratio = rng.random_range(-1000.0..1000.0);
    let channel = if rng.random_bool(0.5) {
        Channel::CURRENT
    } else {
        Channel::PREVIEW
    };
    let enabled = rng.random_bool(0.5);

    let tag_count = rng.random_range(0..4);
    let list_count = rng.random_range(0..3);
    let map_count = rng.random_range(0..3);

    DummyConfig {
        enabled: random_tri(rng, enabled),
        workers: random_tri(rng, workers),
        ratio: random_tri(rng, ratio),
        description: random_tri(rng, String::new()),
        channel: random_tri(rng, channel),
        tags: (0..tag_count).map(|n| Tri::Value(format!("tag{n}"))).collect(),
        labels: (0..map_count)
            .map(|n| (format!("k{n}"), Tri::Value(format!("v{n}"))))
            .collect::<BTreeMap<_, _>>(),
        nested: random_nested(rng),
        nested_pointer: rng.random_bool(0.5).then(|| Box::new(random_nested(rng))),
        nested_list: (0..list_count).map(|_| random_nested(rng)).collect(),
        nested_pointer_list: (0..list_count)
            .map(|_| rng.random_bool(0.5).then(|| Box::new(random_nested(rng))))
            .collect(),
        nested_map: (0..map_count)
            .map(|n| (format!("m{n}"), random_nested(rng)))
            .collect::<HashMap<_, _>>(),
        libraries: rng.random_bool(0.5).then(|| vec![random_nested(rng)]),
        dummy_id: random_tri(rng, "id".to_string()),
        scratch: Tri::Unset,
    }
}

#[test]
fn test_round_trip_random_records() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let context = context();

    for _ in 0..200 {
        let config = random_config(&mut rng);
        let domain: api::Dummy = to_domain(&config, &context)?;
        let back: DummyConfig = to_config(&domain, &context)?;
        assert_eq!(back, config);
    }
    Ok(())
}
