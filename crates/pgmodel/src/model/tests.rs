use super::*;
use crate::datasource::{DataSource, Persistable};
use crate::error::{OrmError, OrmResult};
use crate::executor::Callback;
use crate::schema::ColumnSpec;
use crate::value::Value;
use std::sync::{Arc, Mutex};

// ── Shared fixtures ──

fn event_columns(builder: ModelDefinitionBuilder) -> ModelDefinitionBuilder {
    builder
        .column("id", ColumnSpec::integer().immutable())
        .column("count", ColumnSpec::integer().default_value(10))
        .column("is_cool", ColumnSpec::boolean().default_value(true))
        .column("name", ColumnSpec::text().default_value("Dave"))
}

struct Event;

impl ModelKind for Event {
    fn definition() -> ModelDefinitionBuilder {
        event_columns(ModelDefinition::builder().key("id"))
    }
}

trait EventExt {
    fn upper_name(&mut self) -> OrmResult<()>;
}

impl EventExt for Model<Event> {
    fn upper_name(&mut self) -> OrmResult<()> {
        let upper = self.get("name").map(|v| v.to_text().to_uppercase());
        self.set("name", upper)?;
        Ok(())
    }
}

fn event() -> Model<Event> {
    ModelType::<Event>::declare().unwrap().new_instance()
}

/// Records every call and fires callbacks with a fixed row count.
#[derive(Default)]
struct RecordingDataSource {
    calls: Mutex<Vec<(&'static str, Dump)>>,
}

impl DataSource for RecordingDataSource {
    fn create(&self, model: &dyn Persistable, callback: Callback) -> OrmResult<()> {
        self.calls.lock().unwrap().push(("create", model.dump()));
        callback(Ok(1));
        Ok(())
    }

    fn update(&self, model: &dyn Persistable, callback: Callback) -> OrmResult<()> {
        self.calls.lock().unwrap().push(("update", model.dump()));
        callback(Ok(1));
        Ok(())
    }
}

// ── Factory ──

#[test]
fn test_missing_schema() {
    let err = create_model_type(ModelDefinition::builder().key("id")).unwrap_err();
    assert!(matches!(err, OrmError::MissingSchema));
}

#[test]
fn test_empty_schema_is_allowed() {
    let empty: [(&str, ColumnSpec); 0] = [];
    let model_type = create_model_type(ModelDefinition::builder().schema(empty)).unwrap();
    assert!(model_type.new_instance().dump().is_empty());
}

#[test]
fn test_key_must_be_a_column() {
    let err = create_model_type(
        ModelDefinition::builder()
            .key("uuid")
            .column("id", ColumnSpec::integer()),
    )
    .unwrap_err();
    assert!(err.to_string().contains("uuid"));
}

#[test]
fn test_schema_is_normalized_once() {
    let model_type = ModelType::<Event>::declare().unwrap();
    let def = model_type.definition();
    let names: Vec<_> = def.column_names().collect();
    assert_eq!(names, vec!["id", "count", "is_cool", "name"]);
    assert!(!def.column("id").unwrap().is_mutable());
    assert!(!def.column("id").unwrap().is_nullable());
    assert_eq!(def.key(), Some("id"));
}

#[test]
fn test_instances_share_definition_not_values() {
    let model_type = ModelType::<Event>::declare().unwrap();
    let mut a = model_type.new_instance();
    let b = model_type.clone().new_instance();

    a.set("name", "Alice").unwrap();
    assert_eq!(a.get("name"), Some(&Value::from("Alice")));
    assert_eq!(b.get("name"), Some(&Value::from("Dave")));
    assert!(std::ptr::eq(a.definition(), b.definition()));
}

// ── Construction ──

#[test]
fn test_undeclared_field_is_absent() {
    assert_eq!(event().get("foo"), None);
}

#[test]
fn test_no_default_is_null() {
    assert_eq!(event().get("id"), Some(&Value::Null));
}

#[test]
fn test_defaults() {
    let e = event();
    assert_eq!(e.get("is_cool"), Some(&Value::Bool(true)));
    assert_eq!(e.get("name"), Some(&Value::from("Dave")));
    assert_eq!(e.get("count"), Some(&Value::Int(10)));
}

#[test]
fn test_set_up_restores_defaults() {
    let mut e = event();
    e.set("count", 99).unwrap();
    e.set_up();
    assert_eq!(e.get("count"), Some(&Value::Int(10)));
}

// ── Writes ──

#[test]
fn test_set_immutable_field_fails() {
    let mut e = event();
    let err = e.set("id", 3).unwrap_err();
    assert!(err.is_immutable_field());
    assert_eq!(e.get("id"), Some(&Value::Null));

    assert!(e.set("id", Value::Null).unwrap_err().is_immutable_field());
}

#[test]
fn test_set_unknown_field_fails() {
    let mut e = event();
    assert!(e.set("foo", "bar").unwrap_err().is_unknown_field());
    assert_eq!(e.get("foo"), None);
}

#[test]
fn test_string_to_integer() {
    let mut e = event();
    assert_eq!(e.set("count", "123").unwrap(), Value::Int(123));
    assert_eq!(e.get("count"), Some(&Value::Int(123)));
}

#[test]
fn test_integer_to_boolean() {
    let mut e = event();
    e.set("is_cool", 0).unwrap();
    assert_eq!(e.get("is_cool"), Some(&Value::Bool(false)));
}

#[test]
fn test_integer_to_string() {
    let mut e = event();
    e.set("name", 200).unwrap();
    assert_eq!(e.get("name"), Some(&Value::from("200")));
}

#[test]
fn test_set_null_is_stored() {
    let mut e = event();
    assert_eq!(e.set("name", Value::Null).unwrap(), Value::Null);
    assert_eq!(e.get("name"), Some(&Value::Null));
}

// ── Dump / load ──

fn populated() -> Model<Event> {
    let mut e = event();
    e.set("name", "John").unwrap();
    e.set("count", 62).unwrap();
    e.set("is_cool", true).unwrap();
    e
}

#[test]
fn test_dump_contents() {
    let dump = populated().dump();
    assert_eq!(dump.get("name"), Some(&Value::from("John")));
    assert_eq!(dump.get("count"), Some(&Value::Int(62)));
    assert_eq!(dump.get("is_cool"), Some(&Value::Bool(true)));
    assert_eq!(dump.get("id"), Some(&Value::Null));
    assert_eq!(dump.len(), 4);
}

#[test]
fn test_load_sets_immutable_fields() {
    let mut dump = populated().dump();
    dump.insert("id", 2);

    let mut other = event();
    other.load(dump).unwrap();
    assert_eq!(other.get("name"), Some(&Value::from("John")));
    assert_eq!(other.get("count"), Some(&Value::Int(62)));
    assert_eq!(other.get("is_cool"), Some(&Value::Bool(true)));
    assert_eq!(other.get("id"), Some(&Value::Int(2)));
}

#[test]
fn test_load_coerces_mutable_fields() {
    let mut e = event();
    e.load(Dump::new().with("count", "7").with("is_cool", "")).unwrap();
    assert_eq!(e.get("count"), Some(&Value::Int(7)));
    assert_eq!(e.get("is_cool"), Some(&Value::Bool(false)));
}

#[test]
fn test_load_unknown_field_changes_nothing() {
    let mut e = event();
    let err = e.load(Dump::new().with("name", "Zed").with("foo", 1)).unwrap_err();
    assert!(err.is_unknown_field());
    assert_eq!(e.get("name"), Some(&Value::from("Dave")));
}

#[test]
fn test_dump_load_round_trip() {
    let mut a = populated();
    a.load(Dump::new().with("id", 41)).unwrap();

    let mut b = event();
    b.load(a.dump()).unwrap();
    for field in a.definition().column_names() {
        assert_eq!(a.get(field), b.get(field), "field {field}");
    }
}

#[test]
fn test_dump_survives_json() {
    let a = populated();
    let json = serde_json::to_string(&a.dump()).unwrap();

    let mut b = event();
    b.load(Dump::from_json(&json).unwrap()).unwrap();
    assert_eq!(a.dump(), b.dump());
}

// ── Instance behavior ──

#[test]
fn test_kind_methods_run_on_instance() {
    let mut e = event();
    e.set("name", "jimmy").unwrap();
    e.upper_name().unwrap();
    assert_eq!(e.get("name"), Some(&Value::from("JIMMY")));
}

// ── Persistence entry points ──

#[test]
fn test_create_delegates_to_datasource() {
    let ds = Arc::new(RecordingDataSource::default());
    let model_type = ModelType::<Event>::declare().unwrap();
    let mut e = model_type.new_instance_with(ds.clone());
    e.set("name", "Fred").unwrap();

    let fired = Arc::new(Mutex::new(None));
    let sink = fired.clone();
    e.create(move |result| *sink.lock().unwrap() = Some(result.unwrap())).unwrap();

    let calls = ds.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "create");
    assert_eq!(calls[0].1, e.dump());
    assert_eq!(*fired.lock().unwrap(), Some(1));
}

#[test]
fn test_update_delegates_to_datasource() {
    let ds = Arc::new(RecordingDataSource::default());
    let mut e = event();
    e.bind_datasource(ds.clone());
    e.update(|_| {}).unwrap();
    assert_eq!(ds.calls.lock().unwrap()[0].0, "update");
}

#[test]
fn test_create_without_datasource_fails() {
    let ds = Arc::new(RecordingDataSource::default());
    let mut e = event();
    e.bind_datasource(ds.clone());
    assert!(e.unbind_datasource().is_some());

    let err = e.create(|_| panic!("callback must not fire")).unwrap_err();
    assert!(matches!(err, OrmError::NoDataSource));
    assert!(ds.calls.lock().unwrap().is_empty());
}

#[test]
fn test_create_without_key_fails() {
    let ds = Arc::new(RecordingDataSource::default());
    let keyless = create_model_type(event_columns(ModelDefinition::builder())).unwrap();
    let instance = keyless.new_instance_with(ds.clone());

    let err = instance.create(|_| panic!("callback must not fire")).unwrap_err();
    assert!(matches!(err, OrmError::NoPrimaryKey));
    let err = instance.update(|_| panic!("callback must not fire")).unwrap_err();
    assert!(matches!(err, OrmError::NoPrimaryKey));
    assert!(ds.calls.lock().unwrap().is_empty());
}
