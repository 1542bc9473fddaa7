//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Once;

use schema_bridge::schema::RecordCustomizer;
use schema_bridge::{Record, Tri, string_enum};

string_enum! {
    /// Release channel of the runtime
    pub struct Channel {
        CURRENT = "CURRENT",
        PREVIEW = "PREVIEW",
    }
}

/// Domain-model records, as sent to the remote API
pub mod api {
    use std::collections::{BTreeMap, HashMap};

    use super::Channel;

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Nested {
        pub name: String,
        pub enabled: bool,
        pub force_send_fields: Vec<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Dummy {
        pub enabled: bool,
        pub workers: i32,
        pub ratio: f64,
        pub description: String,
        pub channel: Channel,
        pub tags: Vec<String>,
        pub labels: BTreeMap<String, String>,
        pub nested: Nested,
        pub nested_pointer: Option<Box<Nested>>,
        pub nested_list: Vec<Nested>,
        pub nested_pointer_list: Vec<Option<Box<Nested>>>,
        pub nested_map: HashMap<String, Nested>,
        pub libraries: Vec<Nested>,
        pub dummy_id: String,
        pub force_send_fields: Vec<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Port {
        pub number: u16,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Gauge {
        pub ratio: f32,
        pub force_send_fields: Vec<String>,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
#[record(domain = "api::Nested", customize = "customize_nested")]
pub struct NestedConfig {
    #[field(tag = "optional")]
    pub name: Tri<String>,
    #[field(tag = "optional")]
    pub enabled: Tri<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
#[record(domain = "api::Dummy", customize = "customize_dummy")]
pub struct DummyConfig {
    pub enabled: Tri<bool>,
    #[field(tag = "optional")]
    pub workers: Tri<i64>,
    #[field(tag = "optional")]
    pub ratio: Tri<f64>,
    #[field(tag = "optional,computed")]
    pub description: Tri<String>,
    #[field(tag = "optional")]
    pub channel: Tri<Channel>,
    #[field(tag = "optional")]
    pub tags: Vec<Tri<String>>,
    #[field(tag = "optional")]
    pub labels: BTreeMap<String, Tri<String>>,
    #[field(tag = "optional")]
    pub nested: NestedConfig,
    #[field(tag = "optional")]
    pub nested_pointer: Option<Box<NestedConfig>>,
    #[field(tag = "optional")]
    pub nested_list: Vec<NestedConfig>,
    #[field(tag = "optional")]
    pub nested_pointer_list: Vec<Option<Box<NestedConfig>>>,
    #[field(tag = "optional")]
    pub nested_map: HashMap<String, NestedConfig>,
    #[field(tag = "optional,max_items:1")]
    pub libraries: Option<Vec<NestedConfig>>,
    /// Carried in the request URL rather than the body
    #[field(name = "-")]
    pub dummy_id: Tri<String>,
    #[field(local)]
    pub scratch: Tri<bool>,
}

/// Record whose domain side has no marker list
#[derive(Debug, Clone, Default, PartialEq, Record)]
#[record(domain = "api::Port", no_explicit)]
pub struct PortConfig {
    pub number: Tri<i64>,
}

/// Record whose domain side stores a narrower float
#[derive(Debug, Clone, Default, PartialEq, Record)]
#[record(domain = "api::Gauge")]
pub struct GaugeConfig {
    #[field(tag = "optional")]
    pub ratio: Tri<f64>,
}

fn customize_nested(record: &mut RecordCustomizer<'_>) {
    record.customize(&["name"]).set_conflicts_with(&["enabled"]);
}

fn customize_dummy(record: &mut RecordCustomizer<'_>) {
    record.customize(&["description"]).set_read_only();
    record.customize(&["workers"]).set_conflicts_with(&["ratio"]);
}

/// Initialize logging once for the test binary
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn nested(name: &str, enabled: bool) -> NestedConfig {
    NestedConfig {
        name: Tri::Value(name.to_string()),
        enabled: Tri::Value(enabled),
    }
}

/// A configuration with every field kind populated
pub fn full_config() -> DummyConfig {
    DummyConfig {
        enabled: Tri::Value(true),
        workers: Tri::Value(8),
        ratio: Tri::Value(0.25),
        description: Tri::Value("nightly ingest".to_string()),
        channel: Tri::Value(Channel::PREVIEW),
        tags: vec![Tri::Value("etl".to_string()), Tri::Value(String::new())],
        labels: BTreeMap::from([
            ("team".to_string(), Tri::Value("data".to_string())),
            ("tier".to_string(), Tri::Value("gold".to_string())),
        ]),
        nested: nested("plain", false),
        nested_pointer: Some(Box::new(nested("pointer", true))),
        nested_list: vec![nested("first", true), NestedConfig::default()],
        nested_pointer_list: vec![
            Some(Box::new(nested("boxed", true))),
            None,
            Some(Box::default()),
        ],
        nested_map: HashMap::from([("main".to_string(), nested("mapped", false))]),
        libraries: Some(vec![nested("lib", true)]),
        dummy_id: Tri::Value("dummy-1".to_string()),
        scratch: Tri::Unset,
    }
}
