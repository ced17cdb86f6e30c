use crate::kml_types::GeoPoint;

/// Parse a KML `<coordinates>` body into points.
///
/// Tuples are whitespace separated, each `lon,lat[,ele]`. Short or
/// non-numeric tuples are dropped one at a time; the parse itself never fails.
pub fn parse_coordinates(text: &str) -> Vec<GeoPoint> {
    text.split_whitespace().filter_map(parse_tuple).collect()
}

fn parse_tuple(tuple: &str) -> Option<GeoPoint> {
    let mut fields = tuple.split(',');
    let (Some(lon), Some(lat)) = (fields.next(), fields.next()) else {
        log::debug!("dropping short coordinate tuple {tuple:?}");
        return None;
    };

    let parsed = parse_fields(lon, lat, fields.next());
    if parsed.is_none() {
        log::debug!("dropping non-numeric coordinate tuple {tuple:?}");
    }
    parsed
}

fn parse_fields(lon: &str, lat: &str, ele: Option<&str>) -> Option<GeoPoint> {
    let lon = parse_number(lon)?;
    let lat = parse_number(lat)?;
    let ele = match ele {
        Some(ele) => Some(parse_number(ele)?),
        None => None,
    };
    Some(GeoPoint::new(lat, lon, ele))
}

/// `f64` parsing also accepts `nan` and `inf`; those count as non-numeric.
fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
