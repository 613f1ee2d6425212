// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Column projection and parallel sorting over records.

use serde_json::Map;
use serde_json::Value;

use crate::options::SortDirection;
use crate::record::Record;

/// The values of `field`, in record order. Records without it are skipped.
pub fn column(records: &[Record], field: &str) -> Vec<Value> {
    return records
        .iter()
        .filter_map(|record| record.get(field).cloned())
        .collect();
}

/// A map from each record's `index_field` to its `field` value, or to the
/// whole record when `field` is `None`.
///
/// Map keys are the index values rendered as strings. Later records
/// overwrite earlier ones with the same key. Records missing either field,
/// or whose index value is not a string or number, are skipped.
pub fn column_keyed(records: &[Record], field: Option<&str>, index_field: &str) -> Map<String, Value> {
    let mut keyed = Map::new();
    for record in records {
        let name = match record.get(index_field) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => continue,
        };
        let value = match field {
            Some(field) => match record.get(field) {
                Some(value) => value.clone(),
                None => continue,
            },
            None => Value::Object(record.clone()),
        };
        keyed.insert(name, value);
    }
    return keyed;
}

/// Sort `values` by the parallel `keys`, reordering both.
///
/// The sort is stable: equal keys keep their relative order in either
/// direction. Panics if the slices differ in length.
pub fn sort_parallel<K: Ord, V>(keys: &mut Vec<K>, values: &mut Vec<V>, direction: SortDirection) {
    assert_eq!(keys.len(), values.len(), "parallel arrays differ in length");

    let mut pairs: Vec<(K, V)> = keys.drain(..).zip(values.drain(..)).collect();
    match direction {
        SortDirection::Asc => pairs.sort_by(|a, b| a.0.cmp(&b.0)),
        SortDirection::Desc => pairs.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    for (key, value) in pairs {
        keys.push(key);
        values.push(value);
    }
}
