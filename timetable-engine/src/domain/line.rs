//! Lines and the schedule legend.
//!
//! Neither takes part in scheduling or conflict detection; they are carried
//! so that a snapshot contains everything the editor shows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ids::{LineId, ScheduleId};
use super::train::TrainType;

/// A named, coloured grouping of stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub color: String,
}

/// How one train type is drawn in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendItem {
    pub id: i64,
    #[serde(default)]
    pub schedule_id: ScheduleId,
    #[serde(rename = "type")]
    pub train_type: TrainType,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub dashed: bool,
}

/// Legend lookup for one schedule.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    items: HashMap<TrainType, LegendItem>,
}

impl Legend {
    /// Build the lookup. A later item for the same type replaces an earlier one.
    pub fn new(items: impl IntoIterator<Item = LegendItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.train_type, item))
                .collect(),
        }
    }

    /// Legend entry for a train type.
    pub fn get(&self, train_type: TrainType) -> Option<&LegendItem> {
        self.items.get(&train_type)
    }

    /// Display label, defaulting to the type name.
    pub fn label(&self, train_type: TrainType) -> String {
        self.get(train_type)
            .map(|item| item.label.clone())
            .unwrap_or_else(|| train_type.to_string())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, train_type: TrainType, label: &str) -> LegendItem {
        LegendItem {
            id,
            schedule_id: ScheduleId(1),
            train_type,
            label: label.to_string(),
            color: "#000000".to_string(),
            dashed: false,
        }
    }

    #[test]
    fn lookup_by_type() {
        let legend = Legend::new(vec![
            item(1, TrainType::Freight, "Goods"),
            item(2, TrainType::Passenger, "Passenger"),
        ]);

        assert_eq!(legend.len(), 2);
        assert_eq!(legend.label(TrainType::Freight), "Goods");
        assert_eq!(legend.get(TrainType::Passenger).unwrap().id, 2);
    }

    #[test]
    fn missing_type_falls_back_to_name() {
        let legend = Legend::default();
        assert!(legend.is_empty());
        assert_eq!(legend.label(TrainType::Service), "service");
    }

    #[test]
    fn later_item_wins() {
        let legend = Legend::new(vec![
            item(1, TrainType::Freight, "Old"),
            item(2, TrainType::Freight, "New"),
        ]);
        assert_eq!(legend.len(), 1);
        assert_eq!(legend.label(TrainType::Freight), "New");
    }

    #[test]
    fn deserialize_legend_record() {
        let json = r##"{
            "id": 3, "schedule_id": 1, "type": "service",
            "label": "Works", "color": "#F59E0B", "dashed": true
        }"##;
        let item: LegendItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.train_type, TrainType::Service);
        assert!(item.dashed);
    }
}
