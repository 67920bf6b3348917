mod formatting;

pub use formatting::{format_duration, format_relative_time};

use crate::data::{DisplayOutage, Outage, OutageStatus};
use crate::place::PlaceName;
use itertools::Itertools;
use shared_kernel::warsaw_date_time::WarsawTZDateTime;

const UNKNOWN: &str = "unknown";

/// Region and description match on substrings, address cities
/// only on equality.
pub fn matches_place(place: &PlaceName, outage: &Outage) -> bool {
    let contains_place = |value: &Option<String>| {
        value
            .as_deref()
            .map(|value| value.to_lowercase().contains(place.as_str()))
            .unwrap_or(false)
    };

    contains_place(&outage.region_name)
        || contains_place(&outage.description)
        || outage
            .addresses()
            .iter()
            .any(|address| is_place_city(place, address.city_name()))
}

fn is_place_city(place: &PlaceName, city_name: Option<&str>) -> bool {
    city_name
        .map(|city| city.to_lowercase() == place.as_str())
        .unwrap_or(false)
}

fn affected_addresses(place: &PlaceName, outage: &Outage) -> Vec<String> {
    outage
        .addresses()
        .iter()
        .filter(|address| is_place_city(place, address.city_name()))
        .map(|address| match address.numbers.as_deref() {
            Some(numbers) if !numbers.is_empty() => numbers.to_string(),
            _ => UNKNOWN.to_string(),
        })
        .collect_vec()
}

fn parse_timestamp(outage_id: i64, field: &'static str, value: &str) -> Option<WarsawTZDateTime> {
    WarsawTZDateTime::parse(value)
        .map_err(|err| tracing::warn!(outage_id, field, error = %err, "Unparseable outage timestamp"))
        .ok()
}

fn display_outage(place: &PlaceName, outage: &Outage, now: &WarsawTZDateTime) -> DisplayOutage {
    let start = parse_timestamp(outage.id, "startAt", &outage.start_at);
    let stop = parse_timestamp(outage.id, "stopAt", &outage.stop_at);
    let relative = |date_time: &Option<WarsawTZDateTime>| {
        date_time
            .as_ref()
            .map(|date_time| format_relative_time(date_time, now))
            .unwrap_or_else(|| UNKNOWN.to_string())
    };
    let total_duration = match (&start, &stop) {
        (Some(start), Some(stop)) => format_duration(start, stop),
        _ => UNKNOWN.to_string(),
    };

    DisplayOutage {
        id: outage.id,
        region: outage.region_name.clone(),
        description: outage.description.clone(),
        start_at: outage.start_at.clone(),
        start_at_relative: relative(&start),
        stop_at: outage.stop_at.clone(),
        stop_at_relative: relative(&stop),
        total_duration,
        revoked: outage.revoked,
        affected_addresses: affected_addresses(place, outage),
    }
}

/// Narrows the fetched outages down to `place`, keeping their upstream order.
pub fn resolve_status(place: &PlaceName, outages: &[Outage], now: WarsawTZDateTime) -> OutageStatus {
    let outages = outages
        .iter()
        .filter(|outage| matches_place(place, outage))
        .map(|outage| display_outage(place, outage, &now))
        .collect_vec();

    OutageStatus {
        has_outage: !outages.is_empty(),
        outages,
        checked_at: now.to_rfc3339(),
    }
}
