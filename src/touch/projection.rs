//! Portrait map pixels to geographic coordinates to the server's
//! equirectangular raster.

use crate::{config::TouchConfig, ui::ViewBounds};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lon: f32,
    pub lat: f32,
}

pub fn portrait_to_geo(config: &TouchConfig, bounds: &ViewBounds, x: u16, y: u16) -> GeoPoint {
    let nx = (f32::from(x) / f32::from(config.layout.map_width)).clamp(0.0, 1.0);
    let ny = (f32::from(y) / f32::from(config.layout.map_height)).clamp(0.0, 1.0);

    let mut lon_span = bounds.lon_max - bounds.lon_min;
    if bounds.lon_max < bounds.lon_min {
        lon_span += 360.0;
    }
    let mut lon = bounds.lon_min + nx * lon_span;
    if lon > 180.0 {
        lon -= 360.0;
    }

    let lat = bounds.lat_max - ny * (bounds.lat_max - bounds.lat_min);

    GeoPoint { lon, lat }
}

pub fn geo_to_server(config: &TouchConfig, point: GeoPoint) -> (i32, i32) {
    let width = i32::from(config.projection.width);
    let height = i32::from(config.projection.height);

    let x = ((point.lon + 180.0) / 360.0 * width as f32) as i32;
    let y = ((90.0 - point.lat) / 180.0 * height as f32) as i32;

    (x.clamp(0, width), y.clamp(0, height))
}

pub fn project_tap(config: &TouchConfig, bounds: &ViewBounds, x: u16, y: u16) -> (i32, i32) {
    geo_to_server(config, portrait_to_geo(config, bounds, x, y))
}
