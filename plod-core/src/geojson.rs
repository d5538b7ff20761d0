//! GeoJSON shaping for map display

use plod_client::QueryResults;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Set `id` and `properties.title` on a Feature, or on every feature of a
/// FeatureCollection.
pub fn tag_feature(mut value: Value, id: &str) -> Value {
    let is_collection = value.get("type").and_then(Value::as_str) == Some("FeatureCollection");

    if is_collection {
        if let Some(features) = value.get_mut("features").and_then(Value::as_array_mut) {
            for feature in features {
                set_id_and_title(feature, id);
            }
        }
    } else {
        set_id_and_title(&mut value, id);
    }

    value
}

fn set_id_and_title(feature: &mut Value, id: &str) {
    if let Value::Object(map) = feature {
        map.insert("id".to_string(), Value::String(id.to_string()));
        map.insert("properties".to_string(), json!({ "title": id }));
    }
}

/// Build a FeatureCollection from `depicted_where` rows. Rows without a
/// parseable geojson cell are skipped. Returns `None` when no feature survives.
pub fn collection_from_depictions(rows: &QueryResults) -> Option<Value> {
    let (Some(within_col), Some(geojson_col)) = (rows.column("within"), rows.column("geojson"))
    else {
        return None;
    };

    let mut features = Vec::new();
    for row in &rows.rows {
        let (Some(Some(within)), Some(Some(raw))) = (row.get(within_col), row.get(geojson_col))
        else {
            continue;
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(feature)) => {
                let mut feature = Value::Object(feature);
                set_id_and_title(&mut feature, within);
                features.push(feature);
            }
            Ok(_) => debug!("Skipping non-object geojson for {}", within),
            Err(e) => debug!("Skipping unparseable geojson for {}: {}", within, e),
        }
    }

    if features.is_empty() {
        return None;
    }

    let mut collection = Map::new();
    collection.insert("type".to_string(), Value::String("FeatureCollection".to_string()));
    collection.insert("features".to_string(), Value::Array(features));
    Some(Value::Object(collection))
}
