//! Success envelope shared by every user endpoint.

use serde::Serialize;

/// `{"success": true, "data": …, "message": "…"}` wrapper.
///
/// # Examples
/// ```
/// use users_backend::inbound::http::envelope::ApiSuccess;
///
/// let body = serde_json::to_value(ApiSuccess::new(3, "Listo")).expect("serialise");
/// assert_eq!(body["success"], true);
/// assert_eq!(body["data"], 3);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiSuccess<T> {
    success: bool,
    data: T,
    message: &'static str,
}

impl<T> ApiSuccess<T> {
    /// Wrap `data` with an operation summary.
    pub fn new(data: T, message: &'static str) -> Self {
        Self {
            success: true,
            data,
            message,
        }
    }
}
