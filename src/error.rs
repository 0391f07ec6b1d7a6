use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    /// An edge path needs at least the two anchor points.
    #[error("edge path needs at least 2 points, got {0}")]
    InvalidPath(usize),
    /// A supplied coordinate was NaN, infinite or outside the scene bounds.
    #[error("coordinate not finite or out of scene bounds")]
    NonFinite,
}
