use async_trait::async_trait;
use serde_json::{json, Value};

use super::registry::ToolHandler;
use crate::errors::{ToolError, ToolResult};
use crate::models::tool::Tool;

// Hardcoded weather data for demo purposes
const WEATHER_DATA: &[(&str, i32, &str, i32)] = &[
    ("new york", 72, "Sunny", 45),
    ("london", 58, "Cloudy", 78),
    ("tokyo", 68, "Partly Cloudy", 60),
    ("paris", 65, "Rainy", 82),
    ("sydney", 77, "Clear", 55),
    ("mumbai", 88, "Humid", 85),
    ("singapore", 86, "Thunderstorms", 90),
];

/// Demo lookup tool returning canned weather data for a handful of cities.
/// Unknown cities produce an error payload listing the known cities, which
/// goes back to the model as a normal tool result.
pub struct WeatherTool;

#[async_trait]
impl ToolHandler for WeatherTool {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "get_weather",
            "Get the current weather for a specified city. Returns temperature in Fahrenheit, \
             weather condition, and humidity percentage.",
            json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "The name of the city to get weather for"
                    }
                },
                "required": ["city"]
            }),
        )
    }

    async fn call(&self, arguments: Value) -> ToolResult<String> {
        let city = arguments
            .get("city")
            .and_then(|c| c.as_str())
            .ok_or_else(|| ToolError::InvalidParameters("'city' must be a string".to_string()))?;

        let normalized = city.trim().to_lowercase();
        let entry = WEATHER_DATA.iter().find(|(name, ..)| *name == normalized);

        let payload = match entry {
            Some((_, temperature, condition, humidity)) => json!({
                "city": city,
                "temperature": format!("{temperature}°F"),
                "condition": condition,
                "humidity": format!("{humidity}%"),
            }),
            None => json!({
                "city": city,
                "error": "Weather data not available for this city",
                "available_cities": WEATHER_DATA.iter().map(|(name, ..)| *name).collect::<Vec<_>>(),
            }),
        };

        Ok(payload.to_string())
    }
}
