//! GPX route reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::TrackPoint;
use crate::error::{PlanError, Result};

/// A parsed route: optional name plus ordered samples
#[derive(Debug, Clone)]
pub struct Route {
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
}

fn gpx_time_to_chrono(time: gpx::Time) -> Option<DateTime<Utc>> {
    // gpx::Time wraps time::OffsetDateTime; go through RFC 3339
    let formatted = time.format().ok()?;
    DateTime::parse_from_rfc3339(&formatted)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn to_track_point(waypoint: gpx::Waypoint) -> TrackPoint {
    let geo = waypoint.point();
    TrackPoint {
        time: waypoint.time.and_then(gpx_time_to_chrono),
        latitude: geo.y(),
        longitude: geo.x(),
        elevation: waypoint.elevation,
    }
}

/// Read a GPX document.
///
/// Track points from every track and segment, in file order. Falls back to
/// route points, then waypoints, when the file has no tracks.
pub fn read_track<R: Read>(reader: R) -> Result<Route> {
    let data = gpx::read(reader).map_err(|e| PlanError::Gpx(e.to_string()))?;

    let name = data
        .tracks
        .first()
        .and_then(|t| t.name.clone())
        .or_else(|| data.routes.first().and_then(|r| r.name.clone()))
        .or_else(|| data.metadata.as_ref().and_then(|m| m.name.clone()));

    let mut points: Vec<TrackPoint> = data
        .tracks
        .into_iter()
        .flat_map(|track| track.segments)
        .flat_map(|segment| segment.points)
        .map(to_track_point)
        .collect();

    if points.is_empty() {
        debug!("no track points, trying route points");
        points = data
            .routes
            .into_iter()
            .flat_map(|route| route.points)
            .map(to_track_point)
            .collect();
    }

    if points.is_empty() {
        debug!("no route points, trying waypoints");
        points = data.waypoints.into_iter().map(to_track_point).collect();
    }

    if points.is_empty() {
        return Err(PlanError::Gpx("no GPS points found".to_string()));
    }

    Ok(Route { name, points })
}

/// Open and read a GPX file from disk
pub fn load_track(path: impl AsRef<Path>) -> Result<Route> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let route = read_track(BufReader::new(file))?;
    info!(path = %path.display(), points = route.points.len(), "route loaded");
    Ok(route)
}
