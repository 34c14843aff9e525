use crate::core::locale::Locale;
use crate::core::models::{
    OrderStatusDetail, ProcessingStep, TrackerResult, OPTIONAL_ATTRIBUTE_KEYS, STATE_UNKNOWN,
};

/// Step title the API reports while the rider collects an order.
pub const MULTI_ORDER_STEP_TITLE: &str = "Rider is picking up your order";

/// Maps a detail payload to the displayed state and attributes.
pub fn interpret(detail: &OrderStatusDetail, locale: Locale, advisory_marker: &str) -> TrackerResult {
    let title = detail.current_step().and_then(ProcessingStep::display_title);
    let state = match title {
        None => STATE_UNKNOWN.to_string(),
        Some(title) if is_multi_order_pickup(title, detail.advisory.as_deref(), advisory_marker) => {
            locale.multi_order_label().to_string()
        }
        Some(title) => title.to_string(),
    };

    let attributes = detail
        .optional_fields
        .iter()
        .filter(|(key, _)| OPTIONAL_ATTRIBUTE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    TrackerResult { state, attributes }
}

fn is_multi_order_pickup(title: &str, advisory: Option<&str>, marker: &str) -> bool {
    title == MULTI_ORDER_STEP_TITLE
        && !marker.is_empty()
        && advisory.is_some_and(|text| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const MARKER: &str = "another order";

    fn detail(steps: &[(&str, bool)], advisory: Option<&str>) -> OrderStatusDetail {
        OrderStatusDetail {
            ui_status: None,
            processing_steps: steps
                .iter()
                .map(|(title, is_current)| ProcessingStep {
                    title: Some(title.to_string()),
                    is_current: *is_current,
                })
                .collect(),
            advisory: advisory.map(str::to_string),
            optional_fields: BTreeMap::new(),
        }
    }

    #[test]
    fn test_current_step_title_passes_through() {
        let d = detail(&[("Order placed", false), ("Preparing your order", true)], None);
        assert_eq!(interpret(&d, Locale::En, MARKER).state, "Preparing your order");
    }

    #[test]
    fn test_empty_steps_are_unknown() {
        let d = detail(&[], Some("Rider is collecting another order"));
        assert_eq!(interpret(&d, Locale::En, MARKER).state, STATE_UNKNOWN);
    }

    #[test]
    fn test_untitled_current_step_is_unknown() {
        let mut d = detail(&[("Order placed", false), ("On the way", false)], None);
        d.processing_steps.insert(
            1,
            ProcessingStep {
                title: None,
                is_current: true,
            },
        );
        assert_eq!(interpret(&d, Locale::En, MARKER).state, STATE_UNKNOWN);

        d.processing_steps[1].title = Some(String::new());
        assert_eq!(interpret(&d, Locale::En, MARKER).state, STATE_UNKNOWN);
    }

    #[test]
    fn test_multi_order_rewrite_per_locale() {
        let d = detail(
            &[("Order placed", false), (MULTI_ORDER_STEP_TITLE, true)],
            Some("Your rider is picking up another order on the way"),
        );

        assert_eq!(
            interpret(&d, Locale::En, MARKER).state,
            "Picking up another order"
        );
        assert_eq!(
            interpret(&d, Locale::ZhHk, MARKER).state,
            Locale::ZhHk.multi_order_label()
        );
    }

    #[test]
    fn test_multi_order_needs_marker_in_advisory() {
        let without_advisory = detail(&[(MULTI_ORDER_STEP_TITLE, true)], None);
        assert_eq!(
            interpret(&without_advisory, Locale::En, MARKER).state,
            MULTI_ORDER_STEP_TITLE
        );

        let other_advisory = detail(&[(MULTI_ORDER_STEP_TITLE, true)], Some("Heavy rain today"));
        assert_eq!(
            interpret(&other_advisory, Locale::En, MARKER).state,
            MULTI_ORDER_STEP_TITLE
        );
    }

    #[test]
    fn test_multi_order_only_applies_to_pickup_step() {
        let d = detail(
            &[("On the way", true)],
            Some("Your rider is picking up another order"),
        );
        assert_eq!(interpret(&d, Locale::En, MARKER).state, "On the way");
    }

    #[test]
    fn test_multi_order_uses_fallback_step() {
        let d = detail(
            &[(MULTI_ORDER_STEP_TITLE, false), ("On the way", false)],
            Some("another order first"),
        );
        assert_eq!(
            interpret(&d, Locale::En, MARKER).state,
            "Picking up another order"
        );
    }

    #[test]
    fn test_attributes_limited_to_allow_list() {
        let mut d = detail(&[("Preparing", true)], None);
        d.optional_fields
            .insert("eta_message".to_string(), "12:45".to_string());
        d.optional_fields
            .insert("rider_phone".to_string(), "555-0100".to_string());

        let result = interpret(&d, Locale::En, MARKER);
        assert_eq!(result.attributes.len(), 1);
        assert_eq!(result.attributes["eta_message"], "12:45");
    }
}
