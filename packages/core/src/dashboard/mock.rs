//! Mock dashboard data.
//!
//! The starter template ships without a real analytics source, so the
//! dashboard renders randomly generated KPIs and time series. Data is
//! regenerated on every request and never persisted.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    pub delta_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub revenue: f64,
    pub users: u64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The four KPI cards shown at the top of the dashboard page.
pub fn kpi_cards() -> Vec<KpiCard> {
    let mut rng = rand::thread_rng();

    vec![
        KpiCard {
            label: "Revenue".to_string(),
            value: format!("${:.0}", rng.gen_range(30_000.0..60_000.0)),
            delta_pct: round2(rng.gen_range(-15.0..15.0)),
        },
        KpiCard {
            label: "Active Users".to_string(),
            value: format!("{}", rng.gen_range(500_u32..2_500)),
            delta_pct: round2(rng.gen_range(-15.0..15.0)),
        },
        KpiCard {
            label: "Sessions".to_string(),
            value: format!("{}", rng.gen_range(3_000_u32..12_000)),
            delta_pct: round2(rng.gen_range(-15.0..15.0)),
        },
        KpiCard {
            label: "Conversion Rate".to_string(),
            value: format!("{:.1}%", rng.gen_range(1.0..8.0)),
            delta_pct: round2(rng.gen_range(-15.0..15.0)),
        },
    ]
}

/// Hourly metric points covering the last `days` days, oldest first.
///
/// Revenue follows a bounded random walk so consecutive points chart
/// plausibly; user counts are independent draws.
pub fn timeseries(days: u32) -> Vec<MetricPoint> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let hours = i64::from(days) * 24;

    let mut revenue: f64 = rng.gen_range(800.0..1_200.0);
    (0..hours)
        .map(|hour| {
            revenue = (revenue + rng.gen_range(-50.0..50.0)).max(0.0);
            MetricPoint {
                timestamp: now - Duration::hours(hours - hour),
                revenue: round2(revenue),
                users: rng.gen_range(50_u64..500),
            }
        })
        .collect()
}
