pub mod openweathermap;
pub mod retry;
pub mod stadium_directory;

pub use openweathermap::OpenWeatherMapClient;
pub use retry::RetryPolicy;
pub use stadium_directory::{StadiumDirectory, BUILTIN_STADIUMS};

use crate::error::Result;
use crate::models::WeatherSample;

/// A provider of timestamped forecast samples for a coordinate
#[allow(async_fn_in_trait)]
pub trait ForecastSource {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<WeatherSample>>;
}
