//! Route-template based edit navigation

use stayview_util::BookingId;

use crate::EditNavigator;

/// Builds edit links by substituting `{id}` in a path template
#[derive(Debug, Clone)]
pub struct TemplateNavigator {
    template: String,
}

impl TemplateNavigator {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl EditNavigator for TemplateNavigator {
    fn edit_route(&self, booking_id: BookingId) -> String {
        self.template.replace("{id}", &booking_id.to_string())
    }
}
