//! Card assembly: turns decisions and snapshot fields into display strings

use chrono::{DateTime, FixedOffset};
use stayview_api::{
    Classification, Eligibility, Reservation, ReservationAction, ReservationView,
};
use stayview_config::{is_valid_date_format, DisplaySettings};
use stayview_util::BOOKED_AT_FORMAT;

/// "1 guest", "3 guests"
pub fn guests_label(num_guests: u32) -> String {
    if num_guests > 1 {
        format!("{} guests", num_guests)
    } else {
        format!("{} guest", num_guests)
    }
}

/// Currency-prefixed total: "₹1250", "$99.5"
pub fn price_label(currency_symbol: &str, total_price: f64) -> String {
    format!("{}{}", currency_symbol, total_price)
}

/// "3 nights in Cabin 001"
pub fn title_label(num_nights: u32, unit_name: &str) -> String {
    format!("{} nights in Cabin {}", num_nights, unit_name)
}

/// "Tue, May 14 2024 (in 3 days) — Fri, May 17 2024"
pub fn date_line(classification: &Classification) -> String {
    format!(
        "{} ({}) — {}",
        classification.start_label, classification.relative_label, classification.end_label
    )
}

/// "Booked Tue, May 14 2024, 3:04 PM"
pub fn booked_label(created_at: &DateTime<FixedOffset>, format: &str) -> String {
    let format = if is_valid_date_format(format) {
        format
    } else {
        BOOKED_AT_FORMAT
    };
    format!("Booked {}", created_at.format(format))
}

/// Assemble the presentation payload for one reservation.
///
/// `edit_route` is only kept when editing is allowed.
pub fn assemble_view(
    reservation: &Reservation,
    classification: Classification,
    eligibility: Eligibility,
    display: &DisplaySettings,
    edit_route: Option<String>,
) -> ReservationView {
    let date_line = date_line(&classification);
    let created_at = display.zone.localize(&reservation.created_at);

    ReservationView {
        booking_id: reservation.id,
        title: title_label(reservation.num_nights, &reservation.unit.name),
        image: reservation.unit.image.clone(),
        image_alt: format!("Cabin {}", reservation.unit.name),
        status: classification.status,
        start_label: classification.start_label,
        end_label: classification.end_label,
        relative_label: classification.relative_label,
        date_line,
        price: price_label(&display.currency_symbol, reservation.total_price),
        guests: guests_label(reservation.num_guests),
        paid_badge: reservation.is_paid,
        booked_at: booked_label(&created_at, &display.booked_at_format),
        actions: eligibility.actions.actions(),
        paid_indicator: eligibility.paid_indicator,
        edit_route: edit_route.filter(|_| eligibility.allows(ReservationAction::Edit)),
    }
}
