use chrono::Utc;

/// Clock seam of the context. Reminder scheduling and the send job read
/// "now" through this trait so tests can pin it to a fixed instant.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// The real wall clock, used outside of tests
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a fixed instant. Tests swap this into the context
/// when the outcome depends on the exact value of "now".
pub struct StaticTimeSys {
    pub timestamp_millis: i64,
}
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn static_time_does_not_advance() {
        let sys = StaticTimeSys {
            timestamp_millis: 1893456000000,
        };
        assert_eq!(sys.get_timestamp_millis(), 1893456000000);
        assert_eq!(sys.get_timestamp_millis(), sys.get_timestamp_millis());
    }
}
