//! API endpoint URL builders
//!
//! Helper functions to construct API endpoint URLs.

use uuid::Uuid;

/// Build health check URL
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base_url)
}

/// Build token issuance URL
pub fn token_url(base_url: &str) -> String {
    format!("{}/api/v1/auth/token", base_url)
}

/// Build dataset upload URL
pub fn upload_url(base_url: &str) -> String {
    format!("{}/api/v1/datasets/upload", base_url)
}

/// Build recent datasets listing URL
pub fn datasets_url(base_url: &str) -> String {
    format!("{}/api/v1/datasets", base_url)
}

/// Build dataset summary URL
pub fn summary_url(base_url: &str, id: Uuid) -> String {
    format!("{}/api/v1/datasets/{}/summary", base_url, id)
}

/// Build dataset PDF report URL
pub fn report_url(base_url: &str, id: Uuid) -> String {
    format!("{}/api/v1/datasets/{}/report/pdf", base_url, id)
}

/// Build equipment CSV export URL with optional filters
pub fn export_url(
    base_url: &str,
    search: Option<&str>,
    material: Option<&str>,
    min_pressure: Option<f64>,
    min_temperature: Option<f64>,
) -> String {
    let mut url = format!("{}/api/v1/equipment/export/csv", base_url);
    let mut sep = '?';

    let mut push = |url: &mut String, key: &str, value: String| {
        url.push(sep);
        url.push_str(key);
        url.push('=');
        url.push_str(&value);
        sep = '&';
    };

    if let Some(search) = search {
        push(&mut url, "search", urlencoding::encode(search).into_owned());
    }
    if let Some(material) = material {
        push(&mut url, "material", urlencoding::encode(material).into_owned());
    }
    if let Some(min_pressure) = min_pressure {
        push(&mut url, "min_pressure", min_pressure.to_string());
    }
    if let Some(min_temperature) = min_temperature {
        push(&mut url, "min_temperature", min_temperature.to_string());
    }

    url
}
