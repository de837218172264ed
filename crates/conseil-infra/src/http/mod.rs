//! HTTP collaborators built on a shared reqwest client.
//!
//! Neither collaborator sets a request timeout; a hung reply call keeps the
//! session in `AwaitingReply` until the inactivity deadline ends it.

pub mod reply;
pub mod summary;

/// Keep at most this many bytes of an error body for logs.
const ERROR_BODY_LIMIT: usize = 512;

fn truncate_body(mut body: String) -> String {
    if body.len() > ERROR_BODY_LIMIT {
        let mut cut = ERROR_BODY_LIMIT;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

#[cfg(test)]
pub(crate) mod stub {
    use axum::Router;

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}
