//! Wind direction degrees to 16-point compass labels.

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a wind direction to its compass label.
///
/// The circle is divided into 16 sectors of 22.5 degrees, each centered on
/// its label, so every boundary sits at a label center plus or minus 11.25
/// degrees. Values of 360 and above wrap.
pub fn compass_direction(degrees: u16) -> &'static str {
    let sector = ((f64::from(degrees % 360) + 11.25) / 22.5) as usize % 16;
    COMPASS_POINTS[sector]
}
