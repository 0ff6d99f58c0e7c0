use crate::{
    error::{AppError, Result},
    state::AppState,
};
use serde::{Deserialize, Serialize};

/// A current-weather snapshot for an apiary location, in metric units.
#[derive(Debug, Serialize)]
pub struct WeatherReport {
    pub location: String,
    /// Rounded to the nearest degree Celsius.
    pub temperature: i32,
    pub condition: String,
    pub humidity: i32,
    /// Wind speed in m/s.
    pub wind_speed: f64,
}

#[derive(Deserialize)]
struct UpstreamWeather {
    name: String,
    main: UpstreamMain,
    weather: Vec<UpstreamCondition>,
    wind: UpstreamWind,
}

#[derive(Deserialize)]
struct UpstreamMain {
    temp: f64,
    humidity: i32,
}

#[derive(Deserialize)]
struct UpstreamCondition {
    main: String,
}

#[derive(Deserialize)]
struct UpstreamWind {
    speed: f64,
}

#[derive(Deserialize)]
struct UpstreamError {
    message: String,
}

fn to_report(raw: UpstreamWeather) -> Result<WeatherReport> {
    let condition = raw
        .weather
        .into_iter()
        .next()
        .map(|c| c.main)
        .ok_or_else(|| AppError::Upstream("Weather response contained no conditions".to_string()))?;

    Ok(WeatherReport {
        location: raw.name,
        temperature: raw.main.temp.round() as i32,
        condition,
        humidity: raw.main.humidity,
        wind_speed: raw.wind.speed,
    })
}

/// Fetches the current weather for a coordinate pair. The upstream API key
/// stays server-side.
pub async fn current(state: &AppState, lat: f64, lon: f64) -> Result<WeatherReport> {
    let api_key = state
        .config
        .weather_api_key
        .as_deref()
        .ok_or_else(|| AppError::Upstream("Weather API key is not configured".to_string()))?;

    let response = state
        .http
        .get(&state.config.weather_url)
        .query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ])
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Weather request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response
            .json::<UpstreamError>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("Weather request failed with status {}", status));
        return Err(AppError::Upstream(message));
    }

    let raw: UpstreamWeather = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid weather response: {}", e)))?;

    to_report(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(temp: f64, conditions: Vec<&str>) -> UpstreamWeather {
        UpstreamWeather {
            name: "Thessaloniki".to_string(),
            main: UpstreamMain {
                temp,
                humidity: 58,
            },
            weather: conditions
                .into_iter()
                .map(|c| UpstreamCondition {
                    main: c.to_string(),
                })
                .collect(),
            wind: UpstreamWind { speed: 3.4 },
        }
    }

    #[test]
    fn report_rounds_temperature_to_the_nearest_degree() {
        let report = to_report(raw(21.6, vec!["Clouds"])).unwrap();
        assert_eq!(report.temperature, 22);
        assert_eq!(report.condition, "Clouds");
        assert_eq!(report.location, "Thessaloniki");
    }

    #[test]
    fn report_uses_the_first_condition() {
        let report = to_report(raw(10.0, vec!["Rain", "Clouds"])).unwrap();
        assert_eq!(report.condition, "Rain");
    }

    #[test]
    fn report_without_conditions_is_an_upstream_error() {
        assert!(to_report(raw(21.6, vec![])).is_err());
    }
}
