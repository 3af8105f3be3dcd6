//! Entity identifier types.
//!
//! Identifiers are assigned by the store. Each entity kind gets its own
//! newtype so a station id can never be passed where a train id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a station.
    StationId
);
id_type!(
    /// Identifies a train.
    TrainId
);
id_type!(
    /// Identifies a recorded stop.
    StopId
);
id_type!(
    /// Identifies a line (station grouping).
    LineId
);
id_type!(
    /// Identifies a schedule (a set of trains and its legend).
    ScheduleId
);

impl Default for ScheduleId {
    fn default() -> Self {
        ScheduleId(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", StationId(4)), "StationId(4)");
        assert_eq!(format!("{:?}", TrainId(7)), "TrainId(7)");
    }

    #[test]
    fn display_is_the_number() {
        assert_eq!(StopId(12).to_string(), "12");
    }

    #[test]
    fn default_schedule_is_one() {
        assert_eq!(ScheduleId::default(), ScheduleId(1));
    }

    #[test]
    fn serde_transparent() {
        assert_eq!(serde_json::to_string(&LineId(3)).unwrap(), "3");
        let id: TrainId = serde_json::from_str("42").unwrap();
        assert_eq!(id, TrainId(42));
    }
}
