use axum::Router;

/// A group of handlers that can mount itself onto a [`Router`].
///
/// Implemented by the `#[controller]` attribute from `launchpad_macros`;
/// `S` is the router state the handlers extract.
pub trait Controller<S = ()>
where
    S: Clone + Send + Sync + 'static,
{
    fn router() -> Router<S>;
}
