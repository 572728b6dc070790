//! Server-rendered dashboard pages.
//!
//! Pages are plain `format!` templates returned as `Html<String>`; the
//! shared stylesheet is inlined so the dashboard process serves no static
//! files. The API status badge on both pages goes through the memoized
//! backend client, so rendering never issues more than one health request
//! per cache window.

use axum::{extract::State, response::Html};

use super::{mock, DashboardState};

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f0f2f6; color: #262730; }
    header { background: #fff; padding: 1rem 2rem; border-bottom: 1px solid #ddd;
             display: flex; justify-content: space-between; align-items: center; }
    nav a { margin-right: 1rem; text-decoration: none; color: #262730; font-weight: 600; }
    main { padding: 2rem; max-width: 1100px; margin: 0 auto; }
    .badge { padding: 0.25rem 0.75rem; border-radius: 1rem; font-size: 0.85rem; color: #fff; }
    .badge.online { background: #21a366; }
    .badge.offline { background: #d64545; }
    .cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; margin: 1.5rem 0; }
    .card { background: #fff; border-radius: 8px; padding: 1.25rem; box-shadow: 0 1px 3px rgba(0,0,0,0.08); }
    .card .value { font-size: 1.6rem; font-weight: 700; }
    .card .delta.up { color: #21a366; }
    .card .delta.down { color: #d64545; }
    table { width: 100%; border-collapse: collapse; background: #fff; border-radius: 8px; }
    th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid #eee; }
"#;

pub async fn index_page(State(state): State<DashboardState>) -> Html<String> {
    let api_online = state.backend.get_health().await.is_ok();
    Html(render_index(
        &state.config.app_name,
        &state.config.app_version,
        state.backend.base_url(),
        api_online,
    ))
}

pub async fn dashboard_page(State(state): State<DashboardState>) -> Html<String> {
    let api_online = state.backend.get_health().await.is_ok();
    let cards = mock::kpi_cards();
    let points = mock::timeseries(1);
    Html(render_dashboard(
        &state.config.app_name,
        api_online,
        &cards,
        &points,
    ))
}

fn status_badge(api_online: bool) -> &'static str {
    if api_online {
        r#"<span class="badge online">API online</span>"#
    } else {
        r#"<span class="badge offline">API offline</span>"#
    }
}

fn render_index(app_name: &str, version: &str, api_base_url: &str, api_online: bool) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{app_name}</title>
    <style>{style}</style>
</head>
<body>
<header>
    <nav><a href="/">Home</a><a href="/dashboard">Dashboard</a></nav>
    {badge}
</header>
<main>
    <h1>Welcome to {app_name}</h1>
    <p>A production-ready API + dashboard starter. Version {version}.</p>
    <div class="card">
        <h2>Quick start</h2>
        <ul>
            <li>Browse the <a href="/dashboard">analytics dashboard</a></li>
            <li>API health: <code>{api_base_url}/health</code></li>
            <li>Mock data endpoints: <code>/data/kpis</code>, <code>/data/timeseries</code></li>
        </ul>
    </div>
</main>
</body>
</html>"#,
        app_name = app_name,
        version = version,
        api_base_url = api_base_url,
        badge = status_badge(api_online),
        style = STYLE,
    )
}

fn render_dashboard(
    app_name: &str,
    api_online: bool,
    cards: &[mock::KpiCard],
    points: &[mock::MetricPoint],
) -> String {
    let cards_html: String = cards
        .iter()
        .map(|card| {
            let (class, arrow) = if card.delta_pct >= 0.0 {
                ("up", "▲")
            } else {
                ("down", "▼")
            };
            format!(
                r#"<div class="card">
    <div class="label">{}</div>
    <div class="value">{}</div>
    <div class="delta {}">{} {:.1}%</div>
</div>"#,
                card.label, card.value, class, arrow, card.delta_pct
            )
        })
        .collect();

    // Show the most recent points first; the full series is available
    // as JSON from /data/timeseries.
    let rows_html: String = points
        .iter()
        .rev()
        .take(12)
        .map(|point| {
            format!(
                "<tr><td>{}</td><td>${:.2}</td><td>{}</td></tr>",
                point.timestamp.format("%Y-%m-%d %H:%M"),
                point.revenue,
                point.users
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Dashboard — {app_name}</title>
    <style>{style}</style>
</head>
<body>
<header>
    <nav><a href="/">Home</a><a href="/dashboard">Dashboard</a></nav>
    {badge}
</header>
<main>
    <h1>Analytics Dashboard</h1>
    <p>Mock data, regenerated on every refresh.</p>
    <div class="cards">{cards}</div>
    <h2>Recent activity</h2>
    <table>
        <thead><tr><th>Hour</th><th>Revenue</th><th>Users</th></tr></thead>
        <tbody>{rows}</tbody>
    </table>
</main>
</body>
</html>"#,
        app_name = app_name,
        badge = status_badge(api_online),
        cards = cards_html,
        rows = rows_html,
        style = STYLE,
    )
}
