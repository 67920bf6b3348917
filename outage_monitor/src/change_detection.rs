use crate::data::{OutageStatus, PersistedStatus};

/// Whether `current` differs from the last persisted status in a way worth a notification.
///
/// Timestamps are compared as the exact strings the outage API returned, so a
/// reformatted but equal timestamp counts as a change.
pub fn has_status_changed(current: &OutageStatus, previous: Option<&PersistedStatus>) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    if current.has_outage != previous.has_outage {
        return true;
    }

    if current.outages.len() != previous.outages.len() {
        return true;
    }

    let appeared_or_moved = current.outages.iter().any(|current_outage| {
        match previous
            .outages
            .iter()
            .find(|previous_outage| previous_outage.id == current_outage.id)
        {
            None => true,
            Some(previous_outage) => {
                previous_outage.start_at != current_outage.start_at
                    || previous_outage.stop_at != current_outage.stop_at
            }
        }
    });
    if appeared_or_moved {
        return true;
    }

    previous.outages.iter().any(|previous_outage| {
        !current
            .outages
            .iter()
            .any(|current_outage| current_outage.id == previous_outage.id)
    })
}
