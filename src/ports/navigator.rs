//! Navigator port - the host router as seen by the route guard.

use crate::domain::navigation::Route;

/// Navigation substrate the shell drives.
///
/// Calls are synchronous: routers apply transitions on their own schedule
/// and only report the location they currently consider current.
pub trait Navigator: Send + Sync {
    /// History-replacing transition. Never grows the screen stack.
    fn replace(&self, route: &Route);

    /// Location the router currently considers current.
    fn current_location(&self) -> Route;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigator_is_object_safe() {
        fn _assert_trait_object(_: &dyn Navigator) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn Navigator>>();
    }
}
