use serde::Deserialize;
use serde_json::Value;
use urania::ChartRef;
use uuid::Uuid;

/// A persisted chart as the storage layer writes it.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredChart {
    pub id: Uuid,
    pub name: String,
    /// Canonical name -> `{ "name", "longitude", ... }`. Shape-checked by the core.
    #[serde(default)]
    pub planets: Value,
}

impl StoredChart {
    pub fn chart_ref(&self) -> ChartRef {
        ChartRef::new(self.id, self.name.clone())
    }
}

/// Drop planets not named in `include`. Non-object values are left for the
/// core to reject.
pub fn filter_stored(planets: &mut Value, include: &[String]) {
    if include.is_empty() {
        return;
    }
    if let Value::Object(map) = planets {
        map.retain(|name, _| include.iter().any(|keep| keep == name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_stored_chart() {
        let chart: StoredChart = serde_json::from_value(json!({
            "id": "6f1c1b7e-4d7a-4a55-9a0e-0d8c7c6a1f00",
            "name": "Alex",
            "planets": { "Sun": { "name": "Sun", "longitude": 15.0 } }
        }))
        .unwrap();

        assert_eq!(chart.chart_ref().name, "Alex");
        assert_eq!(chart.planets["Sun"]["longitude"], 15.0);
    }

    #[test]
    fn test_filter_stored() {
        let mut planets = json!({
            "Sun": { "name": "Sun", "longitude": 15.0 },
            "Moon": { "name": "Moon", "longitude": 75.0 }
        });

        filter_stored(&mut planets, &[]);
        assert_eq!(planets.as_object().unwrap().len(), 2);

        filter_stored(&mut planets, &["Moon".to_string()]);
        assert!(planets.get("Sun").is_none());
        assert!(planets.get("Moon").is_some());

        let mut malformed = json!([1, 2]);
        filter_stored(&mut malformed, &["Moon".to_string()]);
        assert_eq!(malformed, json!([1, 2]));
    }
}
