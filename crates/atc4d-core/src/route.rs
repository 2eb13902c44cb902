//! Route string parsing: whitespace separated `LAT/LON` tokens such as
//! `51.2N/3.4W`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CoreError, Result};
use crate::geodesy::Point2D;

fn bad_token(token: &str) -> CoreError {
    CoreError::BadCoordToken {
        token: token.to_string(),
    }
}

/// Signed decimal followed by a hemisphere letter, e.g. `51.2N`, `-3.4w`.
static COORD_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(-?[0-9]+(?:\.[0-9]+)?)([NSEW])$").unwrap());

/// Parse one signed coordinate like `51.2N` or `3.4w`. S and W are negative
/// regardless of any sign on the number; N and E are positive.
pub fn parse_coord_token(token: &str) -> Result<f64> {
    let caps = COORD_TOKEN_RE
        .captures(token.trim())
        .ok_or_else(|| bad_token(token))?;
    let value: f64 = caps[1].parse().map_err(|_| bad_token(token))?;

    match caps[2].to_ascii_uppercase().as_str() {
        "N" | "E" => Ok(value.abs()),
        "S" | "W" => Ok(-value.abs()),
        _ => Err(bad_token(token)),
    }
}

/// Parse a `LAT/LON` pair.
pub fn parse_lat_lon_pair(pair: &str) -> Result<Point2D> {
    let (lat, lon) = pair.split_once('/').ok_or_else(|| bad_token(pair))?;
    if lon.contains('/') {
        return Err(bad_token(pair));
    }
    Ok(Point2D::new(parse_coord_token(lat)?, parse_coord_token(lon)?))
}

/// Parse a whole route. A blank route has no fixes.
pub fn parse_route(route: &str) -> Result<Vec<Point2D>> {
    route.split_whitespace().map(parse_lat_lon_pair).collect()
}
