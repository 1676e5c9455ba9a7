//! Audit metadata embedded in every persisted entity

use serde::{Deserialize, Serialize};

/// Creation / modification bookkeeping.
///
/// Flattened into each entity row (`created_at`, `updated_at`, `created_by`,
/// `updated_by` columns). The fields are private: only the persistence layer
/// writes the columns, application code can read them through the getters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Audit {
    created_at: i64,
    updated_at: i64,
    created_by: Option<i64>,
    updated_by: Option<i64>,
}

impl Audit {
    /// Insert time (epoch millis)
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Last update time (epoch millis), equal to `created_at` until the first update
    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// User id that inserted the row, `None` for system writes
    pub fn created_by(&self) -> Option<i64> {
        self.created_by
    }

    /// User id of the last writer, `None` for system writes
    pub fn updated_by(&self) -> Option<i64> {
        self.updated_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_flattens_into_entity_json() {
        #[derive(Serialize, Deserialize)]
        struct Row {
            id: i64,
            #[serde(flatten)]
            audit: Audit,
        }

        let json = r#"{"id":1,"created_at":10,"updated_at":20,"created_by":null,"updated_by":7}"#;
        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(row.audit.created_at(), 10);
        assert_eq!(row.audit.updated_at(), 20);
        assert_eq!(row.audit.created_by(), None);
        assert_eq!(row.audit.updated_by(), Some(7));
    }
}
