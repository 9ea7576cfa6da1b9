use hotel_core::HotelApp;
use serde_json::Value;

use crate::services::HotelParams;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "3000";

/// Variables under this prefix map onto dotted keys:
/// `HOTEL__HTTP__PORT` → `http.port`.
pub const ENV_PREFIX: &str = "HOTEL__";

/// Configure the app from the process environment.
pub fn config(app: &HotelApp<Value, HotelParams>) {
    apply(app, std::env::vars());
}

/// Lowest priority first: defaults, then `HTTP_HOST` / `HTTP_PORT`, then
/// `HOTEL__*`.
pub fn apply<I>(app: &HotelApp<Value, HotelParams>, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: Vec<(String, String)> = vars.into_iter().collect();

    app.set("http.host", DEFAULT_HOST);
    app.set("http.port", DEFAULT_PORT);

    for (name, value) in &vars {
        match name.as_str() {
            "HTTP_HOST" => app.set("http.host", value.as_str()),
            "HTTP_PORT" => app.set("http.port", value.as_str()),
            _ => {}
        }
    }

    for (name, value) in &vars {
        if let Some(key) = env_key(name) {
            app.set(key, value.as_str());
        }
    }
}

fn env_key(name: &str) -> Option<String> {
    let rest = name.strip_prefix(ENV_PREFIX)?;
    if rest.is_empty() {
        return None;
    }

    Some(
        rest.split("__")
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("."),
    )
}

/// `host:port` to bind.
pub fn addr(app: &HotelApp<Value, HotelParams>) -> String {
    let host = app.get("http.host").unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = app.get("http.port").unwrap_or_else(|| DEFAULT_PORT.to_string());
    format!("{host}:{port}")
}
