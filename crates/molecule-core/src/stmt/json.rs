use super::{Record, Value};

impl From<serde_json::Value> for Value {
    fn from(src: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match src {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(v) => match v.as_i64() {
                Some(v) => Value::I64(v),
                None => Value::F64(v.as_f64().unwrap_or_default()),
            },
            Json::String(v) => Value::String(v),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => Value::Record(Record::from(fields)),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        fields
            .into_iter()
            .map(|(field, value)| (field, Value::from(value)))
            .collect()
    }
}

impl From<&Value> for serde_json::Value {
    fn from(src: &Value) -> Self {
        serde_json::to_value(src).unwrap_or(serde_json::Value::Null)
    }
}
