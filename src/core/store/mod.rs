//! Telemetry store - SQLite persistence for robots, readings, and prices
//!
//! One database file per project (`.finca/telemetry.db`). Sensor samples are
//! stored in per-sensor tables keyed by reading id, mirroring how the robots
//! report them; window queries flatten the tables with outer joins, using 0
//! as the NULL sentinel.

pub mod serialize;

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::core::identity::EntityId;
use crate::core::project::Project;
use crate::entities::market::{MarketPrice, PriceAlert, PriceHistory, PricePoint, PriceTrend};
use crate::entities::reading::{
    AirSample, AtmosphereSample, ClimateSample, HistoricalPoint, LightSample, Reading, SoilSample,
};
use crate::entities::robot::{Robot, RobotSummary};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Robot reference '{0}' matches more than one robot")]
    AmbiguousRobot(String),
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS robots (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    location    TEXT,
    latitude    REAL,
    longitude   REAL,
    status      TEXT NOT NULL,
    created     TEXT NOT NULL,
    updated     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS readings (
    id          TEXT PRIMARY KEY,
    robot_id    TEXT NOT NULL REFERENCES robots(id),
    timestamp   TEXT NOT NULL,
    latitude    REAL,
    longitude   REAL
);
CREATE INDEX IF NOT EXISTS idx_readings_robot_time ON readings(robot_id, timestamp);

CREATE TABLE IF NOT EXISTS sensor_atmosphere (
    reading_id      TEXT PRIMARY KEY REFERENCES readings(id),
    temperature_c   REAL,
    pressure_hpa    REAL
);

CREATE TABLE IF NOT EXISTS sensor_air (
    reading_id      TEXT PRIMARY KEY REFERENCES readings(id),
    humidity_pct    REAL,
    co2_ppm         REAL,
    temperature_c   REAL
);

CREATE TABLE IF NOT EXISTS sensor_light (
    reading_id  TEXT PRIMARY KEY REFERENCES readings(id),
    lux         REAL,
    uv_index    REAL
);

CREATE TABLE IF NOT EXISTS sensor_soil (
    reading_id      TEXT PRIMARY KEY REFERENCES readings(id),
    moisture_raw    REAL,
    temperature_c   REAL
);

CREATE TABLE IF NOT EXISTS climate (
    reading_id              TEXT PRIMARY KEY REFERENCES readings(id),
    temperature_2m          REAL NOT NULL,
    temperature_max         REAL NOT NULL,
    temperature_min         REAL NOT NULL,
    temperature_range       REAL NOT NULL,
    dew_point               REAL NOT NULL,
    wet_bulb                REAL NOT NULL,
    surface_temperature     REAL NOT NULL,
    precipitation_mm        REAL NOT NULL,
    relative_humidity       REAL NOT NULL,
    specific_humidity       REAL NOT NULL,
    wind_speed              REAL NOT NULL,
    wind_speed_max          REAL NOT NULL,
    wind_speed_min          REAL NOT NULL,
    longwave_radiation      REAL NOT NULL,
    shortwave_radiation     REAL NOT NULL,
    clear_sky_radiation     REAL NOT NULL,
    clarity_index           REAL NOT NULL,
    evaporation             REAL NOT NULL,
    surface_pressure        REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS market_prices (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    product         TEXT NOT NULL,
    region          TEXT NOT NULL,
    price           REAL NOT NULL,
    previous_price  REAL,
    change_pct      REAL,
    unit            TEXT NOT NULL,
    trend           TEXT,
    date            TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_prices_product_region_date
    ON market_prices(product, region, date);
";

/// SQLite-backed telemetry store
pub struct TelemetryStore {
    conn: Connection,
}

impl TelemetryStore {
    /// Open (and initialize if needed) the store for a project
    pub fn open(project: &Project) -> Result<Self, StoreError> {
        Self::open_at(&project.db_path())
    }

    /// Open a store at an explicit path
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(TelemetryStore { conn })
    }

    /// Open an in-memory store (tests)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(TelemetryStore { conn })
    }

    // =====================================================================
    // Robots
    // =====================================================================

    pub fn insert_robot(&self, robot: &Robot) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO robots (id, name, location, latitude, longitude, status, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                robot.id,
                robot.name,
                robot.location,
                robot.latitude,
                robot.longitude,
                robot.status,
                robot.created.to_rfc3339(),
                robot.updated.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn list_robots(&self) -> Result<Vec<Robot>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, location, latitude, longitude, status, created, updated
             FROM robots ORDER BY name",
        )?;
        let robots = stmt
            .query_map([], row_to_robot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(robots)
    }

    /// Resolve a robot by exact id, exact name, or unique id prefix
    pub fn find_robot(&self, reference: &str) -> Result<Option<Robot>, StoreError> {
        let exact = self
            .conn
            .query_row(
                "SELECT id, name, location, latitude, longitude, status, created, updated
                 FROM robots WHERE id = ?1 OR name = ?1",
                [reference],
                row_to_robot,
            )
            .optional()?;
        if exact.is_some() {
            return Ok(exact);
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, name, location, latitude, longitude, status, created, updated
             FROM robots WHERE id LIKE ?1 || '%'",
        )?;
        let mut matches = stmt
            .query_map([reference], row_to_robot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches.remove(0))),
            _ => Err(StoreError::AmbiguousRobot(reference.to_string())),
        }
    }

    /// Fleet listing with per-robot aggregates, most active first
    pub fn robot_summaries(&self) -> Result<Vec<RobotSummary>, StoreError> {
        let today = Utc::now()
            .date_naive()
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .to_rfc3339();

        let mut stmt = self.conn.prepare(
            "SELECT
                r.id,
                r.name,
                r.location,
                r.status,
                r.updated,
                COUNT(g.id) AS total_readings,
                COUNT(CASE WHEN g.timestamp >= ?1 THEN 1 END) AS readings_today,
                AVG(a.temperature_c) AS avg_temperature,
                AVG(air.humidity_pct) AS avg_humidity
             FROM robots r
             LEFT JOIN readings g ON g.robot_id = r.id
             LEFT JOIN sensor_atmosphere a ON a.reading_id = g.id
             LEFT JOIN sensor_air air ON air.reading_id = g.id
             GROUP BY r.id, r.name, r.location, r.status, r.updated
             ORDER BY total_readings DESC",
        )?;

        let summaries = stmt
            .query_map([today], |row| {
                Ok(RobotSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    location: row.get(2)?,
                    status: row.get(3)?,
                    last_activity: timestamp_col(row, 4)?,
                    total_readings: row.get(5)?,
                    readings_today: row.get(6)?,
                    avg_temperature: row.get(7)?,
                    avg_humidity: row.get(8)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    // =====================================================================
    // Readings
    // =====================================================================

    /// Insert a reading and its sensor samples; bumps the robot's position
    /// and update timestamp.
    pub fn insert_reading(&mut self, reading: &Reading) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO readings (id, robot_id, timestamp, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                reading.id,
                reading.robot_id,
                reading.timestamp.to_rfc3339(),
                reading.latitude,
                reading.longitude,
            ],
        )?;

        if let Some(a) = &reading.atmosphere {
            tx.execute(
                "INSERT INTO sensor_atmosphere (reading_id, temperature_c, pressure_hpa)
                 VALUES (?1, ?2, ?3)",
                params![reading.id, a.temperature_c, a.pressure_hpa],
            )?;
        }
        if let Some(a) = &reading.air {
            tx.execute(
                "INSERT INTO sensor_air (reading_id, humidity_pct, co2_ppm, temperature_c)
                 VALUES (?1, ?2, ?3, ?4)",
                params![reading.id, a.humidity_pct, a.co2_ppm, a.temperature_c],
            )?;
        }
        if let Some(l) = &reading.light {
            tx.execute(
                "INSERT INTO sensor_light (reading_id, lux, uv_index) VALUES (?1, ?2, ?3)",
                params![reading.id, l.lux, l.uv_index],
            )?;
        }
        if let Some(s) = &reading.soil {
            tx.execute(
                "INSERT INTO sensor_soil (reading_id, moisture_raw, temperature_c)
                 VALUES (?1, ?2, ?3)",
                params![reading.id, s.moisture_raw, s.temperature_c],
            )?;
        }
        if let Some(c) = &reading.climate {
            tx.execute(
                "INSERT INTO climate (
                    reading_id,
                    temperature_2m, temperature_max, temperature_min, temperature_range,
                    dew_point, wet_bulb, surface_temperature,
                    precipitation_mm, relative_humidity, specific_humidity,
                    wind_speed, wind_speed_max, wind_speed_min,
                    longwave_radiation, shortwave_radiation, clear_sky_radiation,
                    clarity_index, evaporation, surface_pressure
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                           ?15, ?16, ?17, ?18, ?19, ?20)",
                params![
                    reading.id,
                    c.temperature_2m,
                    c.temperature_max,
                    c.temperature_min,
                    c.temperature_range,
                    c.dew_point,
                    c.wet_bulb,
                    c.surface_temperature,
                    c.precipitation_mm,
                    c.relative_humidity,
                    c.specific_humidity,
                    c.wind_speed,
                    c.wind_speed_max,
                    c.wind_speed_min,
                    c.longwave_radiation,
                    c.shortwave_radiation,
                    c.clear_sky_radiation,
                    c.clarity_index,
                    c.evaporation,
                    c.surface_pressure,
                ],
            )?;
        }

        tx.execute(
            "UPDATE robots SET
                latitude = COALESCE(?2, latitude),
                longitude = COALESCE(?3, longitude),
                updated = ?4
             WHERE id = ?1",
            params![
                reading.robot_id,
                reading.latitude,
                reading.longitude,
                Utc::now().to_rfc3339(),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// The most recent reading for a robot, with all sensor samples attached
    pub fn latest_reading(&self, robot_id: &EntityId) -> Result<Option<Reading>, StoreError> {
        let base = self
            .conn
            .query_row(
                "SELECT id, robot_id, timestamp, latitude, longitude
                 FROM readings WHERE robot_id = ?1
                 ORDER BY timestamp DESC LIMIT 1",
                [robot_id],
                |row| {
                    Ok((
                        row.get::<_, EntityId>(0)?,
                        row.get::<_, EntityId>(1)?,
                        timestamp_col(row, 2)?,
                        row.get::<_, Option<f64>>(3)?,
                        row.get::<_, Option<f64>>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, robot_id, timestamp, latitude, longitude)) = base else {
            return Ok(None);
        };

        let atmosphere = self
            .conn
            .query_row(
                "SELECT temperature_c, pressure_hpa FROM sensor_atmosphere WHERE reading_id = ?1",
                [&id],
                |row| {
                    Ok(AtmosphereSample {
                        temperature_c: row.get(0)?,
                        pressure_hpa: row.get(1)?,
                    })
                },
            )
            .optional()?;

        let air = self
            .conn
            .query_row(
                "SELECT humidity_pct, co2_ppm, temperature_c FROM sensor_air WHERE reading_id = ?1",
                [&id],
                |row| {
                    Ok(AirSample {
                        humidity_pct: row.get(0)?,
                        co2_ppm: row.get(1)?,
                        temperature_c: row.get(2)?,
                    })
                },
            )
            .optional()?;

        let light = self
            .conn
            .query_row(
                "SELECT lux, uv_index FROM sensor_light WHERE reading_id = ?1",
                [&id],
                |row| {
                    Ok(LightSample {
                        lux: row.get(0)?,
                        uv_index: row.get(1)?,
                    })
                },
            )
            .optional()?;

        let soil = self
            .conn
            .query_row(
                "SELECT moisture_raw, temperature_c FROM sensor_soil WHERE reading_id = ?1",
                [&id],
                |row| {
                    Ok(SoilSample {
                        moisture_raw: row.get(0)?,
                        temperature_c: row.get(1)?,
                    })
                },
            )
            .optional()?;

        let climate = self
            .conn
            .query_row(
                "SELECT temperature_2m, temperature_max, temperature_min, temperature_range,
                        dew_point, wet_bulb, surface_temperature,
                        precipitation_mm, relative_humidity, specific_humidity,
                        wind_speed, wind_speed_max, wind_speed_min,
                        longwave_radiation, shortwave_radiation, clear_sky_radiation,
                        clarity_index, evaporation, surface_pressure
                 FROM climate WHERE reading_id = ?1",
                [&id],
                |row| {
                    Ok(ClimateSample {
                        temperature_2m: row.get(0)?,
                        temperature_max: row.get(1)?,
                        temperature_min: row.get(2)?,
                        temperature_range: row.get(3)?,
                        dew_point: row.get(4)?,
                        wet_bulb: row.get(5)?,
                        surface_temperature: row.get(6)?,
                        precipitation_mm: row.get(7)?,
                        relative_humidity: row.get(8)?,
                        specific_humidity: row.get(9)?,
                        wind_speed: row.get(10)?,
                        wind_speed_max: row.get(11)?,
                        wind_speed_min: row.get(12)?,
                        longwave_radiation: row.get(13)?,
                        shortwave_radiation: row.get(14)?,
                        clear_sky_radiation: row.get(15)?,
                        clarity_index: row.get(16)?,
                        evaporation: row.get(17)?,
                        surface_pressure: row.get(18)?,
                    })
                },
            )
            .optional()?;

        Ok(Some(Reading {
            id,
            robot_id,
            timestamp,
            latitude,
            longitude,
            atmosphere,
            air,
            light,
            soil,
            climate,
        }))
    }

    /// Flattened history window for a robot covering the last `hours` hours
    pub fn history(
        &self,
        robot_id: &EntityId,
        hours: i64,
    ) -> Result<Vec<HistoricalPoint>, StoreError> {
        let cutoff = (Utc::now() - Duration::hours(hours)).to_rfc3339();

        let mut stmt = self.conn.prepare(
            "SELECT
                r.timestamp,
                COALESCE(a.temperature_c, 0),
                COALESCE(air.humidity_pct, 0),
                COALESCE(l.lux, 0),
                COALESCE(s.moisture_raw, 0),
                COALESCE(air.co2_ppm, 0),
                COALESCE(a.pressure_hpa, 0),
                COALESCE(l.uv_index, 0),
                COALESCE(s.temperature_c, 0)
             FROM readings r
             LEFT JOIN sensor_atmosphere a ON a.reading_id = r.id
             LEFT JOIN sensor_air air ON air.reading_id = r.id
             LEFT JOIN sensor_light l ON l.reading_id = r.id
             LEFT JOIN sensor_soil s ON s.reading_id = r.id
             WHERE r.robot_id = ?1 AND r.timestamp >= ?2
             ORDER BY r.timestamp ASC",
        )?;

        let points = stmt
            .query_map(params![robot_id, cutoff], |row| {
                Ok(HistoricalPoint {
                    timestamp: timestamp_col(row, 0)?,
                    temperature_c: row.get(1)?,
                    humidity_pct: row.get(2)?,
                    lux: row.get(3)?,
                    soil_moisture: row.get(4)?,
                    co2_ppm: row.get(5)?,
                    pressure_hpa: row.get(6)?,
                    uv_index: row.get(7)?,
                    soil_temperature_c: row.get(8)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(points)
    }

    // =====================================================================
    // Market prices
    // =====================================================================

    pub fn insert_market_price(&self, price: &MarketPrice) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO market_prices
                (product, region, price, previous_price, change_pct, unit, trend, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                price.product,
                price.region,
                price.price,
                price.previous_price,
                price.change_pct,
                price.unit,
                price.trend,
                price.date.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Most recent price per product/region pair
    pub fn latest_market_prices(&self) -> Result<Vec<MarketPrice>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT p.product, p.region, p.price, p.previous_price, p.change_pct,
                    p.unit, p.trend, p.date
             FROM market_prices p
             INNER JOIN (
                 SELECT product, region, MAX(date) AS max_date
                 FROM market_prices
                 GROUP BY product, region
             ) latest ON p.product = latest.product
                     AND p.region = latest.region
                     AND p.date = latest.max_date
             ORDER BY p.product, p.region",
        )?;

        let prices = stmt
            .query_map([], row_to_price)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(prices)
    }

    /// Most recent price for one product/region pair
    pub fn latest_price(
        &self,
        product: &str,
        region: &str,
    ) -> Result<Option<MarketPrice>, StoreError> {
        let price = self
            .conn
            .query_row(
                "SELECT product, region, price, previous_price, change_pct, unit, trend, date
                 FROM market_prices WHERE product = ?1 AND region = ?2
                 ORDER BY date DESC LIMIT 1",
                [product, region],
                row_to_price,
            )
            .optional()?;
        Ok(price)
    }

    /// Price history for one product/region pair over the last `days` days
    pub fn price_history(
        &self,
        product: &str,
        region: &str,
        days: i64,
    ) -> Result<PriceHistory, StoreError> {
        let cutoff = (Utc::now() - Duration::days(days)).to_rfc3339();

        let mut stmt = self.conn.prepare(
            "SELECT date, price FROM market_prices
             WHERE product = ?1 AND region = ?2 AND date >= ?3
             ORDER BY date ASC",
        )?;
        let points = stmt
            .query_map(params![product, region, cutoff], |row| {
                Ok(PricePoint {
                    date: timestamp_col(row, 0)?,
                    price: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(PriceHistory {
            product: product.to_string(),
            region: region.to_string(),
            points,
        })
    }

    /// Significant price movements: |change| >= 5% within the last week,
    /// largest first, at most ten.
    pub fn price_alerts(&self) -> Result<Vec<PriceAlert>, StoreError> {
        let cutoff = (Utc::now() - Duration::days(7)).to_rfc3339();

        let mut stmt = self.conn.prepare(
            "SELECT product, region, change_pct, previous_price, price, date
             FROM market_prices
             WHERE ABS(change_pct) >= 5 AND date >= ?1
             ORDER BY ABS(change_pct) DESC, date DESC
             LIMIT 10",
        )?;

        let alerts = stmt
            .query_map([cutoff], |row| {
                let change_pct: f64 = row.get(2)?;
                Ok(PriceAlert {
                    product: row.get(0)?,
                    region: row.get(1)?,
                    trend: if change_pct > 0.0 {
                        PriceTrend::Up
                    } else {
                        PriceTrend::Down
                    },
                    change_pct: change_pct.abs(),
                    previous_price: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
                    price: row.get(4)?,
                    date: timestamp_col(row, 5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(alerts)
    }
}

fn row_to_robot(row: &Row<'_>) -> rusqlite::Result<Robot> {
    Ok(Robot {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
        status: row.get(5)?,
        created: timestamp_col(row, 6)?,
        updated: timestamp_col(row, 7)?,
    })
}

fn row_to_price(row: &Row<'_>) -> rusqlite::Result<MarketPrice> {
    Ok(MarketPrice {
        product: row.get(0)?,
        region: row.get(1)?,
        price: row.get(2)?,
        previous_price: row.get(3)?,
        change_pct: row.get(4)?,
        unit: row.get(5)?,
        trend: row.get(6)?,
        date: timestamp_col(row, 7)?,
    })
}

/// Read an RFC 3339 timestamp column
fn timestamp_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::reading::{AirSample, AtmosphereSample};
    use crate::entities::robot::RobotStatus;

    fn store_with_robot() -> (TelemetryStore, Robot) {
        let store = TelemetryStore::open_in_memory().unwrap();
        let robot = Robot::new("valley-1".to_string()).with_position(9.93, -84.08);
        store.insert_robot(&robot).unwrap();
        (store, robot)
    }

    fn reading_at(robot: &Robot, minutes_ago: i64, temperature: f64) -> Reading {
        let mut reading = Reading::new(
            robot.id.clone(),
            Utc::now() - Duration::minutes(minutes_ago),
        );
        reading.atmosphere = Some(AtmosphereSample {
            temperature_c: Some(temperature),
            pressure_hpa: Some(1010.0),
        });
        reading.air = Some(AirSample {
            humidity_pct: Some(55.0),
            co2_ppm: Some(480.0),
            temperature_c: Some(temperature),
        });
        reading
    }

    #[test]
    fn test_robot_roundtrip() {
        let (store, robot) = store_with_robot();
        let robots = store.list_robots().unwrap();
        assert_eq!(robots.len(), 1);
        assert_eq!(robots[0].id, robot.id);
        assert_eq!(robots[0].name, "valley-1");
        assert_eq!(robots[0].status, RobotStatus::Active);
        assert_eq!(robots[0].latitude, Some(9.93));
    }

    #[test]
    fn test_find_robot_by_name_and_prefix() {
        let (store, robot) = store_with_robot();

        let by_name = store.find_robot("valley-1").unwrap().unwrap();
        assert_eq!(by_name.id, robot.id);

        let prefix = &robot.id.as_str()[..10];
        let by_prefix = store.find_robot(prefix).unwrap().unwrap();
        assert_eq!(by_prefix.id, robot.id);

        assert!(store.find_robot("nope").unwrap().is_none());
    }

    #[test]
    fn test_find_robot_ambiguous_prefix() {
        let (store, _) = store_with_robot();
        let other = Robot::new("valley-2".to_string());
        store.insert_robot(&other).unwrap();

        // Every robot id shares the "ROB-" prefix
        assert!(matches!(
            store.find_robot("ROB-"),
            Err(StoreError::AmbiguousRobot(_))
        ));
    }

    #[test]
    fn test_latest_reading_roundtrip() {
        let (mut store, robot) = store_with_robot();
        store
            .insert_reading(&reading_at(&robot, 60, 21.0))
            .unwrap();
        store
            .insert_reading(&reading_at(&robot, 5, 24.0))
            .unwrap();

        let latest = store.latest_reading(&robot.id).unwrap().unwrap();
        assert_eq!(latest.temperature(), Some(24.0));
        assert!(latest.light.is_none());
        assert!(latest.climate.is_none());
        let air = latest.air.unwrap();
        assert_eq!(air.co2_ppm, Some(480.0));
    }

    #[test]
    fn test_climate_sample_roundtrip() {
        let (mut store, robot) = store_with_robot();
        let mut reading = reading_at(&robot, 0, 23.0);
        reading.climate = Some(ClimateSample {
            temperature_2m: 23.4,
            temperature_max: 28.1,
            temperature_min: 18.9,
            temperature_range: 9.2,
            precipitation_mm: 4.5,
            relative_humidity: 71.0,
            wind_speed: 2.1,
            ..ClimateSample::default()
        });
        store.insert_reading(&reading).unwrap();

        let latest = store.latest_reading(&robot.id).unwrap().unwrap();
        let climate = latest.climate.unwrap();
        assert_eq!(climate.temperature_2m, 23.4);
        assert_eq!(climate.precipitation_mm, 4.5);
        assert_eq!(climate.wind_speed_max, 0.0);
    }

    #[test]
    fn test_latest_reading_none_for_silent_robot() {
        let (store, robot) = store_with_robot();
        assert!(store.latest_reading(&robot.id).unwrap().is_none());
    }

    #[test]
    fn test_history_window_and_sentinels() {
        let (mut store, robot) = store_with_robot();
        store
            .insert_reading(&reading_at(&robot, 120, 20.0))
            .unwrap();
        store
            .insert_reading(&reading_at(&robot, 30, 22.0))
            .unwrap();
        // Outside a 1-hour window
        store
            .insert_reading(&reading_at(&robot, 600, 18.0))
            .unwrap();

        let window = store.history(&robot.id, 3).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].temperature_c, 20.0);
        assert_eq!(window[1].temperature_c, 22.0);
        // Missing light sensor flattens to the zero sentinel
        assert_eq!(window[0].lux, 0.0);
    }

    #[test]
    fn test_reading_bumps_robot_updated() {
        let (mut store, robot) = store_with_robot();
        let before = store.find_robot("valley-1").unwrap().unwrap().updated;
        let mut reading = reading_at(&robot, 0, 22.0);
        reading.latitude = Some(10.0);
        reading.longitude = Some(-83.5);
        store.insert_reading(&reading).unwrap();

        let after = store.find_robot("valley-1").unwrap().unwrap();
        assert!(after.updated >= before);
        assert_eq!(after.latitude, Some(10.0));
    }

    #[test]
    fn test_market_price_queries() {
        let store = TelemetryStore::open_in_memory().unwrap();
        let insert = |price: f64, days_ago: i64, change: f64| {
            store
                .insert_market_price(&MarketPrice {
                    product: "Coffee".to_string(),
                    region: "National".to_string(),
                    price,
                    previous_price: Some(price / (1.0 + change / 100.0)),
                    change_pct: Some(change),
                    unit: "kg".to_string(),
                    trend: Some(PriceTrend::from_change(change)),
                    date: Utc::now() - Duration::days(days_ago),
                })
                .unwrap();
        };
        insert(850.0, 3, 1.0);
        insert(910.0, 1, 7.1);
        insert(800.0, 40, -2.0);

        let latest = store.latest_market_prices().unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].price, 910.0);
        assert_eq!(latest[0].trend, Some(PriceTrend::Up));

        let history = store.price_history("Coffee", "National", 30).unwrap();
        assert_eq!(history.points.len(), 2);
        assert_eq!(history.points[0].price, 850.0);

        let alerts = store.price_alerts().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].trend, PriceTrend::Up);
        assert!((alerts[0].change_pct - 7.1).abs() < 1e-9);
    }

    #[test]
    fn test_summaries_aggregate_counts() {
        let (mut store, robot) = store_with_robot();
        let quiet = Robot::new("ridge-2".to_string());
        store.insert_robot(&quiet).unwrap();

        store.insert_reading(&reading_at(&robot, 10, 20.0)).unwrap();
        store.insert_reading(&reading_at(&robot, 20, 24.0)).unwrap();

        let summaries = store.robot_summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        // Most active robot sorts first
        assert_eq!(summaries[0].name, "valley-1");
        assert_eq!(summaries[0].total_readings, 2);
        assert_eq!(summaries[0].readings_today, 2);
        assert_eq!(summaries[0].avg_temperature, Some(22.0));
        assert_eq!(summaries[1].total_readings, 0);
        assert!(summaries[1].avg_temperature.is_none());
    }
}
