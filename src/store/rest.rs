//! Hosted store reached over its REST interface (`/rest/v1/<table>`).

use super::{Record, RowStore};
use crate::config::{RestSettings, Table, DEFAULT_SCHEMA};
use crate::error::StoreError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use url::Url;

const MAX_ERROR_BODY: usize = 256;

pub struct RestStore {
    client: reqwest::Client,
    base: Url,
}

impl RestStore {
    /// Client with the service credential attached to every request. No request timeout is set.
    pub fn new(settings: &RestSettings) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let mut apikey =
            HeaderValue::from_str(&settings.service_key).map_err(|_| StoreError::InvalidCredential)?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", settings.service_key))
            .map_err(|_| StoreError::InvalidCredential)?;
        bearer.set_sensitive(true);
        headers.insert(HeaderName::from_static("apikey"), apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if settings.schema != DEFAULT_SCHEMA {
            if let Ok(profile) = HeaderValue::from_str(&settings.schema) {
                headers.insert(HeaderName::from_static("accept-profile"), profile);
            }
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(RestStore {
            client,
            base: settings.url.clone(),
        })
    }

    /// `<base>/rest/v1/<table>?select=*`, keeping any path prefix on the base URL.
    pub fn table_url(&self, table: &str) -> Url {
        self.rest_url(table, &[("select", "*")])
    }

    /// Single-column, single-row read used for readiness.
    pub fn ready_check_url(&self) -> Url {
        self.rest_url(Table::Users.name(), &[("select", "id"), ("limit", "1")])
    }

    fn rest_url(&self, table: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["rest", "v1", table]);
        }
        url.set_query(None);
        url.query_pairs_mut().extend_pairs(query);
        url
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>, StoreError> {
        tracing::debug!(url = %url, "rest get");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let body: String = String::from_utf8_lossy(&bytes).chars().take(MAX_ERROR_BODY).collect();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl RowStore for RestStore {
    async fn select_all(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        let bytes = self.fetch(self.table_url(table)).await?;
        let rows: Vec<Record> = serde_json::from_slice(&bytes)?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.fetch(self.ready_check_url()).await.map(|_| ())
    }

    fn backend(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(url: &str, schema: &str) -> RestStore {
        RestStore::new(&RestSettings {
            url: Url::parse(url).unwrap(),
            service_key: "key".into(),
            schema: schema.into(),
        })
        .unwrap()
    }

    #[test]
    fn table_url_appends_rest_path() {
        let s = store("https://abc.supabase.co", "public");
        assert_eq!(s.table_url("users").as_str(), "https://abc.supabase.co/rest/v1/users?select=*");
    }

    #[test]
    fn table_url_keeps_prefix_and_drops_trailing_slash() {
        let s = store("http://localhost:54321/proxy/", "public");
        assert_eq!(
            s.table_url("church_programs").as_str(),
            "http://localhost:54321/proxy/rest/v1/church_programs?select=*"
        );
    }

    #[test]
    fn ready_check_reads_one_id() {
        let s = store("https://abc.supabase.co", "public");
        assert_eq!(
            s.ready_check_url().as_str(),
            "https://abc.supabase.co/rest/v1/users?select=id&limit=1"
        );
    }

    #[test]
    fn credential_with_newline_is_rejected() {
        let err = RestStore::new(&RestSettings {
            url: Url::parse("https://abc.supabase.co").unwrap(),
            service_key: "bad\nkey".into(),
            schema: "public".into(),
        })
        .err()
        .unwrap();
        assert!(matches!(err, StoreError::InvalidCredential));
    }
}
