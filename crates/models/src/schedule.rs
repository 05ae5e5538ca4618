use serde::{Deserialize, Serialize};

/// One weekly meeting slot of a class, as sent over the wire
///
/// Times are kept as the `HH:MM` strings the backend stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_wire_names() {
        let slot: Schedule = serde_json::from_value(
            json!({ "day": "Monday", "startTime": "09:00", "endTime": "10:30" }),
        )
        .unwrap();

        assert_eq!(slot.start_time, "09:00");
        assert_eq!(
            serde_json::to_value(&slot).unwrap()["endTime"],
            json!("10:30")
        );
    }
}
