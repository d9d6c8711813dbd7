use tracing::{debug, instrument};

use crate::{
    api::{PointResponse, StationCollection, StationFeature},
    error::{Error, Result},
    geo::Coordinate,
    model::StationInfo,
    source::{Endpoints, JsonSource, fetch},
};

/// Observation station as listed for a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRef {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
}

/// Where to fetch forecasts and observations for a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub grid_id: String,
    pub station: StationRef,
}

/// Look up the forecast grid for `coordinate`, then take the first
/// observation station listed for that grid.
#[instrument(skip(source, endpoints))]
pub async fn resolve_location(
    source: &dyn JsonSource,
    endpoints: &Endpoints,
    coordinate: Coordinate,
) -> Result<Location> {
    let point: PointResponse = fetch(source, &endpoints.point(coordinate)).await?;
    let grid_id = point.properties.grid_id();

    let stations_url = endpoints.grid_stations(&grid_id);
    let stations: StationCollection = fetch(source, &stations_url).await?;
    let feature = stations
        .features
        .into_iter()
        .next()
        .ok_or(Error::NoStation { url: stations_url })?;

    let station = StationRef {
        id: feature.properties.station_identifier,
        name: feature.properties.name,
        coordinate: feature.geometry.coordinates.into(),
    };
    debug!(%grid_id, station = %station.id, "resolved location");

    Ok(Location { grid_id, station })
}

/// Station metadata, placed relative to `reference`.
#[instrument(skip(source))]
pub async fn fetch_station_info(
    source: &dyn JsonSource,
    url: &str,
    reference: Coordinate,
) -> Result<StationInfo> {
    let feature: StationFeature = fetch(source, url).await?;
    Ok(station_info(feature, reference))
}

pub fn station_info(feature: StationFeature, reference: Coordinate) -> StationInfo {
    let coordinate: Coordinate = feature.geometry.coordinates.into();
    StationInfo {
        id: feature.properties.station_identifier,
        name: feature.properties.name,
        time_zone: feature.properties.time_zone,
        distance: reference.distance_to(&coordinate),
        bearing: reference.bearing_to(&coordinate),
        coordinate,
    }
}
