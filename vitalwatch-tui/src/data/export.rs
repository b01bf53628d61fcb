//! JSON export of the current vitals state.

use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};
use vitalwatch_types::format_age;

use super::monitor::VitalsData;

/// Build the export document: a status summary, one entry per child and
/// the current alerts.
pub fn to_json(data: &VitalsData) -> Value {
    let counts = data.status_counts();

    let children: Vec<Value> = data
        .children
        .iter()
        .map(|c| {
            json!({
                "name": c.name,
                "age_months": c.age_months,
                "age": format_age(c.age_months),
                "band": c.band.label(),
                "normal_range": c.band.normal_range_label(),
                "status": c.status,
                "reading": c.reading,
                "alert_count": c.alert_count,
                "series": c.series.points,
            })
        })
        .collect();

    let alerts: Vec<Value> = data
        .alerts()
        .iter()
        .map(|(child, alert)| {
            json!({
                "child": child.name,
                "vital": alert.label(),
                "value": alert.value(),
                "when": alert.when(),
                "status": alert.status(),
            })
        })
        .collect();

    json!({
        "summary": {
            "total_children": data.children.len(),
            "normal": counts.normal,
            "warning": counts.warning,
            "critical": counts.critical,
            "overall": counts.overall(),
            "timestamp_ms": data.timestamp_ms,
        },
        "children": children,
        "alerts": alerts,
    })
}

/// Write the export document as pretty JSON.
pub fn write(data: &VitalsData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(data))?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "exported vitals");
    Ok(())
}
