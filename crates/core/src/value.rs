//! In-memory values and their wire (JSON) representation.
//!
//! A producer hands back a [`Value`]; the gateway converts it with
//! [`Value::to_wire`]. The set of kinds is closed: every conversion rule is a
//! single `match` arm, so adding a kind means touching exactly one place.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};
use uuid::Uuid;

/// ISO-8601 without offset; the fractional part is only printed when non-zero.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// A value produced by an endpoint, tagged with its semantic kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    /// Ordered sequence (lists and tuples alike).
    Sequence(Vec<Value>),
    /// Unordered collection of unique members.
    UniqueSet(HashSet<SetMember>),
    Mapping(Mapping),
    /// The absence marker (`null` on the wire).
    Absent,
    Record(RecordValue),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Decimal(Decimal),
    Identifier(Uuid),
}

/// The hashable subset of [`Value`]; only these may live in a [`Value::UniqueSet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetMember {
    Integer(i64),
    Text(String),
    Boolean(bool),
    Absent,
}

/// Key-value mapping with unique keys, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

/// A constructed record, flattened to its declared fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    type_name: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl Value {
    /// Build a sequence from anything convertible to values.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a set; duplicates collapse to a single member.
    pub fn unique_set<I, T>(members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SetMember>,
    {
        Self::UniqueSet(members.into_iter().map(Into::into).collect())
    }

    /// Short name of the semantic kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
            Value::Sequence(_) => "sequence",
            Value::UniqueSet(_) => "unique_set",
            Value::Mapping(_) => "mapping",
            Value::Absent => "absent",
            Value::Record(_) => "record",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Decimal(_) => "decimal",
            Value::Identifier(_) => "identifier",
        }
    }

    /// Convert to the canonical wire representation.
    pub fn to_wire(&self) -> JsonValue {
        match self {
            Value::Integer(i) => JsonValue::Number((*i).into()),
            // JSON has no encoding for NaN or infinities.
            Value::Real(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Sequence(items) => JsonValue::Array(items.iter().map(Value::to_wire).collect()),
            Value::UniqueSet(members) => {
                JsonValue::Array(members.iter().map(SetMember::to_wire).collect())
            }
            Value::Mapping(mapping) => JsonValue::Object(
                mapping
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_wire()))
                    .collect::<Map<_, _>>(),
            ),
            Value::Absent => JsonValue::Null,
            Value::Record(record) => JsonValue::Object(
                record
                    .fields()
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.to_wire()))
                    .collect::<Map<_, _>>(),
            ),
            Value::Timestamp(ts) => JsonValue::String(ts.format(TIMESTAMP_FORMAT).to_string()),
            Value::Date(d) => JsonValue::String(d.format(DATE_FORMAT).to_string()),
            Value::Time(t) => JsonValue::String(t.format(TIME_FORMAT).to_string()),
            Value::Decimal(d) => decimal_to_wire(d),
            Value::Identifier(id) => JsonValue::String(id.hyphenated().to_string()),
        }
    }
}

/// Whole decimals become integers, fractional ones become floats. A decimal
/// with no JSON number form is sent as its canonical text.
fn decimal_to_wire(d: &Decimal) -> JsonValue {
    let number = if d.scale() == 0 {
        d.to_i64().map(Number::from)
    } else {
        d.to_f64().and_then(Number::from_f64)
    };
    number.map_or_else(|| JsonValue::String(d.to_string()), JsonValue::Number)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl SetMember {
    pub fn to_wire(&self) -> JsonValue {
        match self {
            SetMember::Integer(i) => JsonValue::Number((*i).into()),
            SetMember::Text(s) => JsonValue::String(s.clone()),
            SetMember::Boolean(b) => JsonValue::Bool(*b),
            SetMember::Absent => JsonValue::Null,
        }
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`Mapping::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl RecordValue {
    pub fn new(type_name: &'static str, fields: Vec<(&'static str, Value)>) -> Self {
        Self { type_name, fields }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::sequence(value)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Sequence(vec![a.into(), b.into()])
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl From<RecordValue> for Value {
    fn from(value: RecordValue) -> Self {
        Value::Record(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Identifier(value)
    }
}

impl From<i64> for SetMember {
    fn from(value: i64) -> Self {
        SetMember::Integer(value)
    }
}

impl From<i32> for SetMember {
    fn from(value: i32) -> Self {
        SetMember::Integer(value.into())
    }
}

impl From<&str> for SetMember {
    fn from(value: &str) -> Self {
        SetMember::Text(value.to_string())
    }
}

impl From<String> for SetMember {
    fn from(value: String) -> Self {
        SetMember::Text(value)
    }
}

impl From<bool> for SetMember {
    fn from(value: bool) -> Self {
        SetMember::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn scalars_convert_to_their_json_counterparts() {
        assert_eq!(Value::from(100).to_wire(), json!(100));
        assert_eq!(Value::from(2.3).to_wire(), json!(2.3));
        assert_eq!(Value::from("text").to_wire(), json!("text"));
        assert_eq!(Value::from(true).to_wire(), json!(true));
        assert_eq!(Value::Absent.to_wire(), json!(null));
    }

    #[test]
    fn non_finite_reals_become_null() {
        assert_eq!(Value::Real(f64::NAN).to_wire(), json!(null));
        assert_eq!(Value::Real(f64::INFINITY).to_wire(), json!(null));
    }

    #[test]
    fn sequences_preserve_order() {
        let v = Value::from(("avinash in tuple", 33));
        assert_eq!(v.to_wire(), json!(["avinash in tuple", 33]));

        let nested = Value::sequence(vec![Value::from(1), Value::from(vec![2, 3]), Value::Absent]);
        assert_eq!(nested.to_wire(), json!([1, [2, 3], null]));
    }

    #[test]
    fn unique_set_emits_each_member_once() {
        let v = Value::unique_set(vec![SetMember::from(33), "a".into(), 33.into(), "a".into()]);
        let wire = v.to_wire();
        let items = wire.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.contains(&json!(33)));
        assert!(items.contains(&json!("a")));
    }

    #[test]
    fn mapping_keeps_insertion_order_and_replaces_in_place() {
        let mut m = Mapping::new().with("name", "avinash").with("age", 33);
        m.insert("zeta", true);
        m.insert("name", "other");

        assert_eq!(m.len(), 3);
        let wire = Value::from(m).to_wire();
        let keys: Vec<&String> = wire.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "age", "zeta"]);
        assert_eq!(wire["name"], json!("other"));
    }

    #[test]
    fn record_converts_to_object_of_declared_fields() {
        let rec = RecordValue::new("Sample", vec![("name", Value::from("Avinash"))]);
        assert_eq!(Value::from(rec).to_wire(), json!({"name": "Avinash"}));
    }

    #[test]
    fn timestamp_uses_iso_format_without_zero_fraction() {
        let ts = NaiveDate::from_ymd_opt(2025, 10, 27)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Value::from(ts).to_wire(), json!("2025-10-27T00:00:00"));

        let with_micros = NaiveDate::from_ymd_opt(2025, 10, 27)
            .unwrap()
            .and_hms_micro_opt(8, 30, 1, 250_000)
            .unwrap();
        assert_eq!(Value::from(with_micros).to_wire(), json!("2025-10-27T08:30:01.250"));
    }

    #[test]
    fn date_and_time_use_iso_format() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 27).unwrap();
        assert_eq!(Value::from(date).to_wire(), json!("2025-10-27"));

        let time = NaiveTime::from_hms_opt(8, 5, 0).unwrap();
        assert_eq!(Value::from(time).to_wire(), json!("08:05:00"));
    }

    #[test]
    fn decimals_become_numbers() {
        assert_eq!(Value::from(Decimal::new(25, 1)).to_wire(), json!(2.5));
        assert_eq!(Value::from(Decimal::new(42, 0)).to_wire(), json!(42));
        assert_eq!(Value::from(Decimal::MAX).to_wire(), json!(Decimal::MAX.to_string()));
    }

    #[test]
    fn identifier_is_hyphenated_string() {
        let id = Uuid::from_u128(0x6f9619ff_8b86_d011_b42d_00c04fc964ff);
        assert_eq!(
            Value::from(id).to_wire(),
            json!("6f9619ff-8b86-d011-b42d-00c04fc964ff")
        );
    }

    #[test]
    fn option_maps_none_to_absent() {
        assert_eq!(Value::from(None::<i64>), Value::Absent);
        assert_eq!(Value::from(Some(5)), Value::Integer(5));
    }

    #[test]
    fn serialize_matches_to_wire() {
        let v = Value::from(Mapping::new().with("k", vec!["x", "y"]));
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"k":["x","y"]}"#);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn set_member() -> impl Strategy<Value = SetMember> {
            prop_oneof![
                any::<i64>().prop_map(SetMember::Integer),
                "[a-z ]{0,8}".prop_map(SetMember::Text),
                any::<bool>().prop_map(SetMember::Boolean),
                Just(SetMember::Absent),
            ]
        }

        fn value_tree() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                any::<i64>().prop_map(Value::Integer),
                any::<f64>().prop_map(Value::Real),
                ".{0,12}".prop_map(Value::Text),
                any::<bool>().prop_map(Value::Boolean),
                Just(Value::Absent),
                (any::<i64>(), 0u32..10).prop_map(|(n, scale)| Value::Decimal(Decimal::new(n, scale))),
                any::<u128>().prop_map(|n| Value::Identifier(Uuid::from_u128(n))),
                prop::collection::vec(set_member(), 0..6).prop_map(Value::unique_set),
            ];
            leaf.prop_recursive(3, 32, 6, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
                    prop::collection::vec(("[a-z]{1,4}", inner), 0..6).prop_map(|entries| {
                        let mut mapping = Mapping::new();
                        for (k, v) in entries {
                            mapping.insert(k, v);
                        }
                        Value::Mapping(mapping)
                    }),
                ]
            })
        }

        /// Sort every array so set output can be compared without regard to order.
        fn order_insensitive(wire: &JsonValue) -> JsonValue {
            match wire {
                JsonValue::Array(items) => {
                    let mut items: Vec<JsonValue> = items.iter().map(order_insensitive).collect();
                    items.sort_by_key(|v| v.to_string());
                    JsonValue::Array(items)
                }
                JsonValue::Object(map) => JsonValue::Object(
                    map.iter().map(|(k, v)| (k.clone(), order_insensitive(v))).collect(),
                ),
                other => other.clone(),
            }
        }

        proptest! {
            /// Property: converting the same value twice, or a clone of it, gives the same wire form.
            #[test]
            fn conversion_is_idempotent(v in value_tree()) {
                let first = v.to_wire();
                prop_assert_eq!(order_insensitive(&first), order_insensitive(&v.to_wire()));
                prop_assert_eq!(order_insensitive(&first), order_insensitive(&v.clone().to_wire()));
            }

            /// Property: a set emits each distinct member once, whatever the insertion order.
            #[test]
            fn set_members_survive_any_insertion_order(members in prop::collection::vec(set_member(), 0..12)) {
                let distinct: HashSet<SetMember> = members.iter().cloned().collect();
                let mut reversed = members.clone();
                reversed.reverse();

                let forward = Value::unique_set(members).to_wire();
                let backward = Value::unique_set(reversed).to_wire();

                let forward_items = forward.as_array().unwrap();
                prop_assert_eq!(forward_items.len(), distinct.len());
                for member in &distinct {
                    prop_assert!(forward_items.contains(&member.to_wire()));
                }
                prop_assert_eq!(order_insensitive(&forward), order_insensitive(&backward));
            }
        }
    }
}
