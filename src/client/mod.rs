pub mod api;
pub mod fetcher;
pub mod session;

pub use api::{ApiClient, ClientError};
pub use fetcher::{DashboardData, DashboardFetcher, LoadHandle};
pub use session::{Route, Session};

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    use crate::config::settings::ClientSettings;

    /// Serves `router` on an ephemeral local port and points a client at it.
    pub async fn serve(router: Router) -> ClientSettings {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        ClientSettings {
            base_url: format!("http://{addr}"),
            ..ClientSettings::default()
        }
    }
}
