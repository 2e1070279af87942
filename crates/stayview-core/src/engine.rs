//! Reservation state engine

use chrono::{DateTime, Utc};
use stayview_actions::{EditNavigator, TemplateNavigator};
use stayview_api::{Classification, Eligibility, Reservation, ReservationView};
use stayview_config::{DisplaySettings, Settings};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{assemble_view, resolve_actions, ClassifyResult, TemporalClassifier};

/// Classifier and resolver output for one reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub classification: Classification,
    pub eligibility: Eligibility,
}

/// Derives display state for reservation snapshots.
///
/// Holds only configuration; every call is a pure function of the snapshot
/// and the `now` passed in, so one engine can serve any number of callers.
pub struct ReservationStateEngine {
    classifier: TemporalClassifier,
    display: DisplaySettings,
    navigator: Arc<dyn EditNavigator>,
}

impl ReservationStateEngine {
    /// Create a new engine
    pub fn new(settings: &Settings) -> Self {
        info!(
            zone = %settings.display.zone,
            edit_route = %settings.routes.edit,
            "Reservation state engine initialized"
        );

        Self {
            classifier: TemporalClassifier::from_settings(&settings.display),
            display: settings.display.clone(),
            navigator: Arc::new(TemplateNavigator::new(settings.routes.edit.clone())),
        }
    }

    /// Replace the edit navigator
    pub fn with_navigator(mut self, navigator: Arc<dyn EditNavigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn navigator(&self) -> Arc<dyn EditNavigator> {
        Arc::clone(&self.navigator)
    }

    /// Wall-clock instant (mock time aware)
    pub fn now(&self) -> DateTime<Utc> {
        stayview_util::now().with_timezone(&Utc)
    }

    /// Classify a reservation and resolve its actions
    pub fn evaluate(&self, reservation: &Reservation, now: DateTime<Utc>) -> ClassifyResult<Evaluation> {
        let local_now = self.display.zone.localize(&now);
        let classification =
            self.classifier
                .classify(&reservation.start, &reservation.end, &local_now)?;
        let eligibility = resolve_actions(classification.status, reservation.is_paid);

        debug!(
            booking_id = %reservation.id,
            status = %classification.status,
            is_paid = reservation.is_paid,
            actions = ?eligibility.actions,
            paid_indicator = eligibility.paid_indicator,
            "Reservation evaluated"
        );

        Ok(Evaluation {
            classification,
            eligibility,
        })
    }

    /// Build the card payload for a reservation
    pub fn present(&self, reservation: &Reservation, now: DateTime<Utc>) -> ClassifyResult<ReservationView> {
        let Evaluation {
            classification,
            eligibility,
        } = self.evaluate(reservation, now)?;

        let edit_route = self.navigator.edit_route(reservation.id);
        Ok(assemble_view(
            reservation,
            classification,
            eligibility,
            &self.display,
            Some(edit_route),
        ))
    }

    /// Build card payloads for a list, skipping (and logging) any that fail
    pub fn present_all<'a>(
        &self,
        reservations: impl IntoIterator<Item = &'a Reservation>,
        now: DateTime<Utc>,
    ) -> Vec<ReservationView> {
        reservations
            .into_iter()
            .filter_map(|reservation| match self.present(reservation, now) {
                Ok(view) => Some(view),
                Err(e) => {
                    warn!(booking_id = %reservation.id, error = %e, "Skipping reservation");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use stayview_api::{AccommodationUnit, ReservationAction, ReservationStatus};
    use stayview_util::{BookingId, DisplayZone, GuestId};

    fn utc_settings() -> Settings {
        let mut settings = Settings::default();
        settings.display.zone = DisplayZone::Utc;
        settings
    }

    fn make_reservation(start: DateTime<Utc>, nights: i64, is_paid: bool) -> Reservation {
        Reservation {
            id: BookingId::new(31),
            guest_id: GuestId::new(4),
            start,
            end: start + Duration::days(nights),
            num_nights: nights as u32,
            total_price: 1250.0,
            num_guests: 2,
            is_paid,
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 15, 4, 0).unwrap(),
            backend_status: Some("unconfirmed".into()),
            unit: AccommodationUnit {
                name: "001".into(),
                image: Some("cabin-001.jpg".into()),
            },
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_upcoming_unpaid_card() {
        let engine = ReservationStateEngine::new(&utc_settings());
        let reservation = make_reservation(now() + Duration::days(3), 2, false);

        let view = engine.present(&reservation, now()).unwrap();
        assert_eq!(view.status, ReservationStatus::Upcoming);
        assert_eq!(view.title, "2 nights in Cabin 001");
        assert_eq!(view.image_alt, "Cabin 001");
        assert_eq!(view.relative_label, "in 3 days");
        assert_eq!(
            view.date_line,
            "Thu, Mar 13 2025 (in 3 days) — Sat, Mar 15 2025"
        );
        assert_eq!(view.price, "₹1250");
        assert_eq!(view.guests, "2 guests");
        assert_eq!(view.booked_at, "Booked Sat, Feb 01 2025, 3:04 PM");
        assert_eq!(
            view.actions,
            vec![ReservationAction::Edit, ReservationAction::Delete, ReservationAction::Pay]
        );
        assert!(!view.paid_indicator);
        assert!(!view.paid_badge);
        assert_eq!(view.edit_route.as_deref(), Some("/account/reservations/edit/31"));
    }

    #[test]
    fn test_upcoming_paid_card() {
        let engine = ReservationStateEngine::new(&utc_settings());
        let reservation = make_reservation(now() + Duration::days(10), 4, true);

        let view = engine.present(&reservation, now()).unwrap();
        assert_eq!(view.actions, vec![ReservationAction::Edit]);
        assert!(view.paid_indicator);
        assert!(view.paid_badge);
    }

    #[test]
    fn test_past_paid_card_keeps_badge_only() {
        let engine = ReservationStateEngine::new(&utc_settings());
        let reservation = make_reservation(now() - Duration::days(1), 2, true);

        let view = engine.present(&reservation, now()).unwrap();
        assert_eq!(view.status, ReservationStatus::Past);
        assert!(view.actions.is_empty());
        assert!(!view.paid_indicator);
        assert!(view.paid_badge);
        assert_eq!(view.edit_route, None);
    }

    #[test]
    fn test_same_day_checkin_already_started() {
        let engine = ReservationStateEngine::new(&utc_settings());
        let reservation = make_reservation(now() - Duration::hours(3), 1, true);

        let evaluation = engine.evaluate(&reservation, now()).unwrap();
        assert_eq!(evaluation.classification.status, ReservationStatus::Past);
        assert_eq!(evaluation.classification.relative_label, "Today");
        assert_eq!(evaluation.eligibility, Eligibility::none());
    }

    #[test]
    fn test_zone_changes_today() {
        // 20:00 UTC on the 10th is already the 11th at UTC+09:00
        let mut settings = utc_settings();
        settings.display.zone = "+09:00".parse().unwrap();
        let engine = ReservationStateEngine::new(&settings);

        let now = Utc.with_ymd_and_hms(2025, 3, 10, 20, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2025, 3, 11, 1, 0, 0).unwrap();
        let reservation = make_reservation(start, 2, false);

        let view = engine.present(&reservation, now).unwrap();
        assert_eq!(view.relative_label, "Today");
        assert_eq!(view.status, ReservationStatus::Upcoming);

        let utc_engine = ReservationStateEngine::new(&utc_settings());
        let view = utc_engine.present(&reservation, now).unwrap();
        assert_eq!(view.relative_label, "in 5 hours");
    }

    #[test]
    fn test_present_all_skips_invalid() {
        let engine = ReservationStateEngine::new(&utc_settings());
        let good = make_reservation(now() + Duration::days(3), 2, false);
        let mut bad = make_reservation(now() + Duration::days(3), 2, false);
        bad.end = bad.start;

        let views = engine.present_all([&good, &bad], now());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].booking_id, good.id);
    }
}
