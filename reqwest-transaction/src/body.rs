use reqwest::Response;

/// Reads whatever is left of the response body and releases the response.
///
/// Use this for responses that will never be handed to a caller, so their connection can go
/// back to the pool. A missing response is a no-op and read errors end the drain early.
pub async fn drain_and_close(response: Option<Response>) {
    if let Some(mut response) = response {
        while let Ok(Some(_)) = response.chunk().await {}
    }
}
