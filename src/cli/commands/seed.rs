//! `finca seed` command - synthetic market and telemetry history

use chrono::{Duration, Utc};
use console::style;
use miette::Result;
use rand::Rng;

use crate::cli::commands::open_store;
use crate::cli::GlobalOpts;
use crate::entities::market::{MarketPrice, PriceTrend, PRODUCTS, REGIONS};
use crate::entities::reading::{AirSample, AtmosphereSample, LightSample, Reading, SoilSample};
use crate::entities::Robot;

#[derive(clap::Args, Debug)]
pub struct SeedArgs {
    /// Days of market history to generate
    #[arg(long, default_value_t = 90)]
    pub days: i64,

    /// Hours of synthetic readings to generate per registered robot
    #[arg(long, default_value_t = 24)]
    pub reading_hours: i64,

    /// Seed even if market data already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: SeedArgs, global: &GlobalOpts) -> Result<()> {
    let (_, mut store) = open_store(global)?;

    let existing = store
        .latest_market_prices()
        .map_err(|e| miette::miette!("{}", e))?;
    if !existing.is_empty() && !args.force {
        return Err(miette::miette!(
            "Market data already present ({} quotes). Re-run with --force to append a fresh history.",
            existing.len()
        ));
    }

    let mut rng = rand::rng();
    let now = Utc::now();
    let mut inserted = 0usize;

    for product in PRODUCTS {
        for region in REGIONS {
            // Each region trades at a fixed factor of the national baseline
            let regional_factor = 0.85 + rng.random::<f64>() * 0.3;
            let mut previous: Option<f64> = None;

            for day in 0..args.days {
                let date = now - Duration::days(args.days - 1 - day);
                let price =
                    product.base_price * regional_factor * (0.98 + rng.random::<f64>() * 0.04);

                let change_pct = previous.map(|prev| (price - prev) / prev * 100.0);

                store
                    .insert_market_price(&MarketPrice {
                        product: product.name.to_string(),
                        region: region.to_string(),
                        price,
                        previous_price: previous,
                        change_pct,
                        unit: product.unit.to_string(),
                        trend: change_pct.map(PriceTrend::from_change),
                        date,
                    })
                    .map_err(|e| miette::miette!("{}", e))?;

                previous = Some(price);
                inserted += 1;
            }
        }
    }

    println!(
        "{} Seeded {} price record(s) across {} product(s) and {} region(s) ({} days)",
        style("✓").green(),
        style(inserted).cyan(),
        PRODUCTS.len(),
        REGIONS.len(),
        args.days
    );

    let mut robots = store.list_robots().map_err(|e| miette::miette!("{}", e))?;
    if robots.is_empty() {
        // Empty fleet gets a pair of demo robots so the readings have owners
        for (name, location) in [("demo-1", "Plot A"), ("demo-2", "Greenhouse 1")] {
            let robot = Robot::new(name.to_string())
                .with_location(location.to_string())
                .with_position(
                    9.0 + rng.random::<f64>() * 2.0,
                    -84.0 + rng.random::<f64>() * 2.0,
                );
            store
                .insert_robot(&robot)
                .map_err(|e| miette::miette!("{}", e))?;
            robots.push(robot);
        }
        println!(
            "{} Registered {} demo robot(s)",
            style("✓").green(),
            robots.len()
        );
    }

    let now = Utc::now();
    let mut readings = 0usize;
    for robot in &robots {
        for hour in 0..args.reading_hours {
            let mut reading =
                Reading::new(robot.id.clone(), now - Duration::hours(args.reading_hours - hour));
            reading.atmosphere = Some(AtmosphereSample {
                temperature_c: Some(rng.random_range(18.0..30.0)),
                pressure_hpa: Some(rng.random_range(1000.0..1020.0)),
            });
            reading.air = Some(AirSample {
                humidity_pct: Some(rng.random_range(40.0..80.0)),
                co2_ppm: Some(rng.random_range(400.0..800.0)),
                temperature_c: None,
            });
            reading.light = Some(LightSample {
                lux: Some(rng.random_range(200.0..1200.0)),
                uv_index: Some(rng.random_range(0.0..8.0)),
            });
            reading.soil = Some(SoilSample {
                moisture_raw: Some(rng.random_range(300.0..700.0)),
                temperature_c: Some(rng.random_range(15.0..28.0)),
            });
            store
                .insert_reading(&reading)
                .map_err(|e| miette::miette!("{}", e))?;
            readings += 1;
        }
    }

    println!(
        "{} Seeded {} reading(s) across {} robot(s) (last {}h)",
        style("✓").green(),
        style(readings).cyan(),
        robots.len(),
        args.reading_hours
    );

    Ok(())
}
