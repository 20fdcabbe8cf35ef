use shared_types::RoutePath;

/// Token identifying one route request generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteToken(u64);

/// Owns the at-most-one active route. Requests are generation-counted: a
/// response is applied only if its token is still the current generation,
/// so a reply that lands after "Clear Route" or after a newer request is
/// discarded instead of resurrecting a stale overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSession {
    generation: u64,
    pending: Option<u64>,
    active: Option<RoutePath>,
}

impl RouteSession {
    /// Starts a new request, superseding whatever was pending or rendered.
    pub fn begin(&mut self) -> RouteToken {
        self.generation += 1;
        self.pending = Some(self.generation);
        RouteToken(self.generation)
    }

    /// Applies a resolved path if the request is still current. Returns
    /// whether the path was accepted (and should be fitted into view).
    pub fn complete(&mut self, token: RouteToken, path: RoutePath) -> bool {
        if self.pending != Some(token.0) {
            return false;
        }
        self.pending = None;
        self.active = Some(path);
        true
    }

    /// The request failed or found no path. Returns whether this rejection
    /// was for the current request; prior rendered state is kept.
    pub fn reject(&mut self, token: RouteToken) -> bool {
        if self.pending == Some(token.0) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Drops the overlay and invalidates any in-flight request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.active = None;
    }

    pub fn active(&self) -> Option<&RoutePath> {
        self.active.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Coordinate;

    fn path(tag: f64) -> RoutePath {
        RoutePath {
            points: vec![Coordinate::new(13.0, 80.0), Coordinate::new(13.0 + tag, 80.0)],
            distance_meters: 100.0 * tag,
            duration_seconds: 60.0,
        }
    }

    #[test]
    fn second_request_leaves_exactly_one_overlay() {
        let mut session = RouteSession::default();
        let first = session.begin();
        assert!(session.complete(first, path(1.0)));

        let second = session.begin();
        assert!(session.complete(second, path(2.0)));
        assert_eq!(session.active(), Some(&path(2.0)));
    }

    #[test]
    fn response_after_clear_is_discarded() {
        let mut session = RouteSession::default();
        let token = session.begin();
        session.clear();
        assert!(!session.complete(token, path(1.0)));
        assert_eq!(session.active(), None);
    }

    #[test]
    fn stale_response_loses_to_a_newer_request() {
        let mut session = RouteSession::default();
        let stale = session.begin();
        let current = session.begin();
        assert!(!session.complete(stale, path(1.0)));
        assert!(session.complete(current, path(2.0)));
        assert_eq!(session.active(), Some(&path(2.0)));
    }

    #[test]
    fn rejection_keeps_the_previous_overlay() {
        let mut session = RouteSession::default();
        let first = session.begin();
        assert!(session.complete(first, path(1.0)));

        let second = session.begin();
        assert!(session.reject(second));
        assert_eq!(session.active(), Some(&path(1.0)));
        assert!(!session.is_pending());
    }

    #[test]
    fn stale_rejection_is_not_reported_as_current() {
        let mut session = RouteSession::default();
        let token = session.begin();
        session.clear();
        assert!(!session.reject(token));
    }
}
