//! `finca market` command - price board, history, and alerts

use chrono::Utc;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use rand::Rng;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::commands::open_store;
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::market::{MarketPrice, PriceTrend, PRODUCTS, REGIONS};

#[derive(Subcommand, Debug)]
pub enum MarketCommands {
    /// Show the latest price per product and region
    List(ListArgs),

    /// Show price history for one product
    History(HistoryArgs),

    /// Show significant price movements from the last week
    Alerts(AlertsArgs),

    /// Apply a weekly price update to the whole board
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by product
    #[arg(long, short = 'p')]
    pub product: Option<String>,

    /// Filter by region
    #[arg(long, short = 'r')]
    pub region: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// Product name
    pub product: String,

    /// Region
    #[arg(long, short = 'r', default_value = "National")]
    pub region: String,

    /// Days of history
    #[arg(long, default_value_t = 30)]
    pub days: i64,
}

#[derive(clap::Args, Debug)]
pub struct AlertsArgs {}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {}

pub fn run(cmd: MarketCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MarketCommands::List(args) => run_list(args, global),
        MarketCommands::History(args) => run_history(args, global),
        MarketCommands::Alerts(args) => run_alerts(args, global),
        MarketCommands::Update(args) => run_update(args, global),
    }
}

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "REGION")]
    region: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "CHANGE")]
    change: String,
    #[tabled(rename = "TREND")]
    trend: String,
    #[tabled(rename = "DATE")]
    date: String,
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let mut prices = store
        .latest_market_prices()
        .map_err(|e| miette::miette!("{}", e))?;

    if let Some(product) = &args.product {
        prices.retain(|p| p.product.eq_ignore_ascii_case(product));
    }
    if let Some(region) = &args.region {
        prices.retain(|p| p.region.eq_ignore_ascii_case(region));
    }

    if prices.is_empty() {
        println!("No market data.");
        println!();
        println!("Seed the board with: {}", style("finca seed").yellow());
        return Ok(());
    }

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&prices).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&prices).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("product,region,price,change_pct,trend,unit,date");
            for p in &prices {
                println!(
                    "{},{},{:.2},{},{},{},{}",
                    p.product,
                    p.region,
                    p.price,
                    p.change_pct.map(|c| format!("{:.2}", c)).unwrap_or_default(),
                    p.trend.map(|t| t.to_string()).unwrap_or_default(),
                    p.unit,
                    p.date.to_rfc3339(),
                );
            }
        }
        _ => {
            let rows: Vec<PriceRow> = prices.iter().map(price_row).collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
            println!("{} quote(s)", style(prices.len()).cyan());
        }
    }

    Ok(())
}

fn price_row(p: &MarketPrice) -> PriceRow {
    PriceRow {
        product: p.product.clone(),
        region: p.region.clone(),
        price: format!("₡{:.2}/{}", p.price, p.unit),
        change: p
            .change_pct
            .map(|c| format!("{:+.1}%", c))
            .unwrap_or_else(|| "-".to_string()),
        trend: p
            .trend
            .map(|t| trend_cell(t))
            .unwrap_or_else(|| "-".to_string()),
        date: p.date.format("%Y-%m-%d").to_string(),
    }
}

fn trend_cell(trend: PriceTrend) -> String {
    match trend {
        PriceTrend::Up => format!("{}", style("↑ up").green()),
        PriceTrend::Down => format!("{}", style("↓ down").red()),
        PriceTrend::Stable => format!("{}", style("→ stable").dim()),
    }
}

fn run_history(args: HistoryArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let history = store
        .price_history(&args.product, &args.region, args.days)
        .map_err(|e| miette::miette!("{}", e))?;

    if history.points.is_empty() {
        println!(
            "No price history for {} in {} over the last {} day(s).",
            style(&args.product).cyan(),
            args.region,
            args.days
        );
        return Ok(());
    }

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&history).into_diagnostic()?
            );
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&history).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Csv => {
            println!("date,price");
            for point in &history.points {
                println!("{},{:.2}", point.date.format("%Y-%m-%d"), point.price);
            }
            return Ok(());
        }
        _ => {}
    }

    println!(
        "{} {} ({}, last {} days)",
        style("Price history:").bold(),
        style(&history.product).cyan(),
        history.region,
        args.days
    );
    println!("{}", style("─".repeat(40)).dim());

    let mut previous: Option<f64> = None;
    for point in &history.points {
        let marker = match previous {
            Some(prev) if point.price > prev => style("↑").green(),
            Some(prev) if point.price < prev => style("↓").red(),
            _ => style("·").dim(),
        };
        println!(
            "{}  {:>10.2}  {}",
            point.date.format("%Y-%m-%d"),
            point.price,
            marker
        );
        previous = Some(point.price);
    }

    let first = history.points[0].price;
    let last = history.points[history.points.len() - 1].price;
    if first != 0.0 {
        let change = (last - first) / first * 100.0;
        println!();
        println!(
            "{}: {:+.1}% over {} point(s)",
            style("Net change").bold(),
            change,
            history.points.len()
        );
    }

    Ok(())
}

fn run_alerts(_args: AlertsArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let alerts = store
        .price_alerts()
        .map_err(|e| miette::miette!("{}", e))?;

    if alerts.is_empty() {
        println!("No significant price movements in the last week.");
        return Ok(());
    }

    match effective_format(global.format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&alerts).into_diagnostic()?);
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&alerts).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    println!("{}", style("Price alerts (last 7 days)").bold());
    println!("{}", style("─".repeat(60)).dim());
    for alert in &alerts {
        let arrow = match alert.trend {
            PriceTrend::Up => style("▲").green(),
            _ => style("▼").red(),
        };
        println!(
            "{} {} ({}) {} {:.1}%: {:.2} -> {:.2} on {}",
            arrow,
            style(&alert.product).cyan(),
            alert.region,
            alert.trend,
            alert.change_pct,
            alert.previous_price,
            alert.price,
            alert.date.format("%Y-%m-%d"),
        );
    }

    Ok(())
}

fn run_update(_args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (_, store) = open_store(global)?;
    let latest = store
        .latest_market_prices()
        .map_err(|e| miette::miette!("{}", e))?;

    if latest.is_empty() {
        return Err(miette::miette!(
            "No market data to update. Seed the board first with: finca seed"
        ));
    }

    let mut rng = rand::rng();
    let now = Utc::now();
    let mut updated = 0usize;

    for product in PRODUCTS {
        for region in REGIONS {
            let Some(current) = latest
                .iter()
                .find(|p| p.product == product.name && p.region == *region)
            else {
                continue;
            };

            // Weekly drift of -5%..+5%
            let new_price = current.price * rng.random_range(0.95..1.05);
            let change_pct = (new_price - current.price) / current.price * 100.0;

            store
                .insert_market_price(&MarketPrice {
                    product: product.name.to_string(),
                    region: region.to_string(),
                    price: new_price,
                    previous_price: Some(current.price),
                    change_pct: Some(change_pct),
                    unit: product.unit.to_string(),
                    trend: Some(PriceTrend::from_change(change_pct)),
                    date: now,
                })
                .map_err(|e| miette::miette!("{}", e))?;
            updated += 1;
        }
    }

    println!(
        "{} Updated {} price quote(s)",
        style("✓").green(),
        style(updated).cyan()
    );

    Ok(())
}
