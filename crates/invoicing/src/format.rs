//! Number display conventions shared by the printed invoice and the sheet row.

/// Shortest round-trip representation: `2` for 2.0, `2.5` for 2.5.
pub fn plain(value: f64) -> String {
    format!("{value}")
}

/// Two decimal places, as used for every money column.
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}
