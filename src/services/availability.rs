//! Lógica de disponibilidad
//!
//! Predicado de solapamiento entre rangos de fechas y generación del
//! identificador legible de rentals. Todo es puro y sin I/O.

use chrono::{DateTime, Utc};

use crate::models::Rental;

/// Prefijo del identificador legible
pub const RENTAL_CODE_PREFIX: &str = "RNT-";

/// Predicado de solapamiento inclusivo entre un rental existente
/// `[existing_start, existing_end]` y un rango solicitado `[start, end]`.
///
/// Tres formas de solape: el nuevo empieza dentro del existente, el nuevo
/// termina dentro del existente, o el nuevo contiene al existente. Los
/// extremos que se tocan cuentan como solape.
pub fn overlaps(
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    let starts_inside = existing_start <= start && existing_end >= start;
    let ends_inside = existing_start <= end && existing_end >= end;
    let contains = existing_start >= start && existing_end <= end;

    starts_inside || ends_inside || contains
}

/// Filtra los rentals que bloquean el vehículo y se solapan con el rango
pub fn conflicting_rentals<'a, I>(rentals: I, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Rental>
where
    I: IntoIterator<Item = &'a Rental>,
{
    rentals
        .into_iter()
        .filter(|r| r.status.blocks_vehicle())
        .filter(|r| overlaps(r.start_date, r.end_date, start, end))
        .cloned()
        .collect()
}

/// `RNT-` + número con relleno de ceros a 4 dígitos
pub fn format_rental_code(sequence: i64) -> String {
    format!("{}{:04}", RENTAL_CODE_PREFIX, sequence)
}

/// Siguiente identificador a partir del mayor número ya asignado
pub fn next_rental_code(highest_sequence: i64) -> String {
    format_rental_code(highest_sequence + 1)
}

/// Número de un identificador `RNT-NNNN`; `None` si no tiene esa forma
pub fn rental_code_sequence(code: &str) -> Option<i64> {
    let digits = code.strip_prefix(RENTAL_CODE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
