use tracing::{info, instrument};

use crate::{
    config::Config,
    current::fetch_current_conditions,
    error::Result,
    forecast::fetch_daily_forecast,
    geo::Coordinate,
    hourly::fetch_hourly_forecast,
    icons::IconTable,
    location::{fetch_station_info, resolve_location},
    model::WeatherReport,
    source::{Endpoints, HttpSource, JsonSource},
};

/// One fetch cycle: resolve the location, then fetch station info, current
/// conditions, the daily forecast and the hourly series concurrently.
///
/// Holds no state between cycles, so running it twice against the same
/// upstream data yields equal reports.
#[derive(Debug)]
pub struct Pipeline {
    source: Box<dyn JsonSource>,
    endpoints: Endpoints,
    icons: IconTable,
}

impl Pipeline {
    pub fn new(source: Box<dyn JsonSource>, endpoints: Endpoints, icons: IconTable) -> Self {
        Self {
            source,
            endpoints,
            icons,
        }
    }

    /// Pipeline talking to the configured API over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpSource::new(&config.api)?;
        Ok(Self::new(
            Box::new(source),
            Endpoints::new(config.api.base_url.as_str()),
            config.icon_table(),
        ))
    }

    /// Any failure fails the whole cycle; there is no partial report.
    #[instrument(skip(self))]
    pub async fn fetch_report(&self, coordinate: Coordinate) -> Result<WeatherReport> {
        let source = self.source.as_ref();
        let location = resolve_location(source, &self.endpoints, coordinate).await?;

        let station_url = self.endpoints.station(&location.station.id);
        let observation_url = self.endpoints.latest_observation(&location.station.id);
        let forecast_url = self.endpoints.forecast(&location.grid_id);
        let gridpoint_url = self.endpoints.gridpoint(&location.grid_id);

        let (station_info, current_conditions, daily_forecast, hourly_forecast) = tokio::try_join!(
            fetch_station_info(source, &station_url, coordinate),
            fetch_current_conditions(source, &observation_url, &self.icons),
            fetch_daily_forecast(source, &forecast_url, &self.icons),
            fetch_hourly_forecast(source, &gridpoint_url),
        )?;

        info!(
            station = %station_info.id,
            grid = %location.grid_id,
            days = daily_forecast.len(),
            "weather report ready"
        );

        Ok(WeatherReport {
            station_info,
            current_conditions,
            daily_forecast,
            hourly_forecast,
        })
    }
}
