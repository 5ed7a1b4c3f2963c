//! Shared fixtures for the in-crate test modules.

pub(crate) mod helpers {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};

    use crate::PlanDb;
    use crate::clock::ManualClock;
    use crate::service::PlanService;

    /// Fixed starting instant for every test clock.
    pub(crate) fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    /// Fresh in-memory service whose clock starts at [`t0`].
    pub(crate) async fn test_service() -> (PlanService, Arc<ManualClock>) {
        let db = PlanDb::open_local(":memory:").await.unwrap();
        let clock = ManualClock::new(t0());
        (PlanService::from_db(db, clock.clone()), clock)
    }

    /// Create a list and return its ID.
    pub(crate) async fn test_list(svc: &PlanService) -> String {
        svc.create_list("Home", None).await.unwrap().id
    }
}
