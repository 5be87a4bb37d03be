//! Access-token source for the HTTP clients.

/// Supplies the bearer token the remote services expect.
///
/// Implemented by the identity client; the registry, model-host, and
/// connection clients consume it so they never talk to the identity
/// provider directly.
pub trait TokenProvider: Send + Sync {
    /// The current access token, if a signed-in session holds one.
    fn access_token(&self) -> Option<String>;
}
