//! SQLite serialization for typed ids and enums
//!
//! Implements ToSql and FromSql for EntityId, RobotStatus, and PriceTrend
//! to enable typed storage and retrieval from SQLite.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::core::identity::EntityId;
use crate::entities::market::PriceTrend;
use crate::entities::robot::RobotStatus;

// =========================================================================
// EntityId - ToSql/FromSql
// =========================================================================

impl ToSql for EntityId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntityId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        EntityId::parse(s).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

// =========================================================================
// RobotStatus - ToSql/FromSql
// =========================================================================

impl ToSql for RobotStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for RobotStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse().map_err(|e: String| {
            FromSqlError::Other(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            )))
        })
    }
}

// =========================================================================
// PriceTrend - ToSql/FromSql
// =========================================================================

impl ToSql for PriceTrend {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for PriceTrend {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse().map_err(|e: String| {
            FromSqlError::Other(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;
    use rusqlite::Connection;

    #[test]
    fn test_robot_status_roundtrip() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE test (status TEXT)", []).unwrap();

        for status in [
            RobotStatus::Active,
            RobotStatus::Inactive,
            RobotStatus::Maintenance,
        ] {
            conn.execute("DELETE FROM test", []).unwrap();
            conn.execute("INSERT INTO test VALUES (?1)", [&status])
                .unwrap();

            let retrieved: RobotStatus = conn
                .query_row("SELECT status FROM test", [], |row| row.get(0))
                .unwrap();

            assert_eq!(status, retrieved);
        }
    }

    #[test]
    fn test_price_trend_roundtrip() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE test (trend TEXT)", []).unwrap();

        for trend in [PriceTrend::Up, PriceTrend::Down, PriceTrend::Stable] {
            conn.execute("DELETE FROM test", []).unwrap();
            conn.execute("INSERT INTO test VALUES (?1)", [&trend])
                .unwrap();

            let retrieved: PriceTrend = conn
                .query_row("SELECT trend FROM test", [], |row| row.get(0))
                .unwrap();

            assert_eq!(trend, retrieved);
        }
    }

    #[test]
    fn test_entity_id_roundtrip() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE test (id TEXT)", []).unwrap();

        let id = EntityId::new(EntityPrefix::Robot);
        conn.execute("INSERT INTO test VALUES (?1)", [&id]).unwrap();

        let retrieved: EntityId = conn
            .query_row("SELECT id FROM test", [], |row| row.get(0))
            .unwrap();
        assert_eq!(id, retrieved);
    }

    #[test]
    fn test_invalid_status_fails() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE test (status TEXT)", []).unwrap();
        conn.execute("INSERT INTO test VALUES ('exploded')", [])
            .unwrap();

        let result: rusqlite::Result<RobotStatus> =
            conn.query_row("SELECT status FROM test", [], |row| row.get(0));
        assert!(result.is_err());
    }
}
