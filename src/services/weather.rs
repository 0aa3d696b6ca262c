//! Current-conditions client for OpenWeatherMap, plus IP geolocation used
//! when the user asks for weather without naming a city.

use anyhow::{anyhow, Result};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temp_c: f64,
    pub humidity: u8,
}

impl WeatherReport {
    /// Render the report the way the assistant speaks it.
    pub fn summary(&self) -> String {
        format!(
            "The weather in {} is {} with a temperature of {:.0} degrees and humidity of {}%",
            self.city, self.description, self.temp_c, self.humidity
        )
    }
}

#[derive(Deserialize)]
struct OwmResponse {
    main: OwmMain,
    weather: Vec<OwmCondition>,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u8,
}

#[derive(Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        WeatherClient { client, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn current(&self, city: &str) -> Result<WeatherReport> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("weather service is not configured"))?;

        debug!("fetching weather for {city}");
        let response = self
            .client
            .get("https://api.openweathermap.org/data/2.5/weather")
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow!("no weather data for {city}"));
        }
        let data: OwmResponse = response.error_for_status()?.json().await?;

        Ok(WeatherReport {
            city: city.to_string(),
            description: data
                .weather
                .first()
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "unknown conditions".to_string()),
            temp_c: data.main.temp,
            humidity: data.main.humidity,
        })
    }
}

#[derive(Deserialize)]
struct GeoResponse {
    city: Option<String>,
}

/// Best-effort city lookup from the caller's public IP. Any failure is a
/// plain None; the handler falls back to asking the user.
pub async fn locate_city(client: &reqwest::Client) -> Option<String> {
    let response = client
        .get("http://ip-api.com/json/")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .ok()?;
    let data: GeoResponse = response.json().await.ok()?;
    data.city
}
