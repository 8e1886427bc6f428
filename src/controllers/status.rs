use axum::response::Json;
use once_cell::sync::Lazy;
use serde_json::json;
use std::time::Instant;

pub static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

fn format_uptime(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

pub async fn root() -> Json<serde_json::Value> {
    let uptime_message = format_uptime(START_TIME.elapsed().as_secs());

    Json(json!({
        "status": "ok",
        "message": format!("Backend is running! Uptime: {}", uptime_message)
    }))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "message": "api is running" }))
}

#[cfg(test)]
mod tests {
    use super::format_uptime;

    #[test]
    fn uptime_uses_largest_unit() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(3 * 3600 + 61), "3h 1m 1s");
        assert_eq!(format_uptime(2 * 86400 + 3600), "2d 1h 0m 0s");
    }
}
