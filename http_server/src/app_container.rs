use crate::sessions::SessionRegistry;
use outage_monitor::query::OutageStatusQuery;

/// Shared by every worker. Built once in `main`.
pub struct Application {
    pub query: OutageStatusQuery,
    pub sessions: SessionRegistry,
}

impl Application {
    pub fn new(query: OutageStatusQuery) -> Self {
        Application {
            query,
            sessions: SessionRegistry::default(),
        }
    }
}
