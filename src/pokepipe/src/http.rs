//! PokéAPI-compatible catalog over HTTP.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::fetch::{Catalog, CatalogEntry};

/// Public PokéAPI endpoint
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Per-request timeout unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog backed by `GET {base}/pokemon/{id}`
pub struct HttpCatalog {
    agent: ureq::Agent,
    base: String,
}

impl HttpCatalog {
    pub fn new(base: &str) -> Self {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("pokepipe/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn entry_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.base, id)
    }
}

impl Catalog for HttpCatalog {
    fn fetch_entry(&self, id: u32) -> Result<CatalogEntry> {
        let url = self.entry_url(id);
        tracing::trace!("GET {}", url);
        read_entry(self.agent.get(&url).call(), url)
    }
}

/// Map a call result to an entry: error statuses become [`Error::Status`],
/// transport failures [`Error::Http`] and undecodable bodies [`Error::Io`].
fn read_entry(
    response: std::result::Result<ureq::Response, ureq::Error>,
    url: String,
) -> Result<CatalogEntry> {
    match response {
        Ok(resp) => {
            let entry: CatalogEntry = resp.into_json()?;
            Ok(entry)
        }
        Err(ureq::Error::Status(code, _)) => Err(Error::Status { code, url }),
        Err(e) => Err(Error::Http(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_url() {
        let catalog = HttpCatalog::new("https://pokeapi.co/api/v2/");
        assert_eq!(catalog.base(), "https://pokeapi.co/api/v2");
        assert_eq!(catalog.entry_url(25), "https://pokeapi.co/api/v2/pokemon/25");
    }

    const URL: &str = "https://pokeapi.co/api/v2/pokemon/1";

    #[test]
    fn test_read_entry_ok() {
        let body = r#"{
            "name": "bulbasaur",
            "types": [{"slot": 1, "type": {"name": "grass"}}],
            "stats": [{"base_stat": 45, "stat": {"name": "hp"}}]
        }"#;
        let resp = ureq::Response::new(200, "OK", body).unwrap();
        let entry = read_entry(Ok(resp), URL.to_string()).unwrap();
        assert_eq!(entry.name, "bulbasaur");
        assert_eq!(entry.base_stat("hp"), Some(45));
    }

    #[test]
    fn test_read_entry_not_found() {
        let resp = ureq::Response::new(404, "Not Found", "Not Found").unwrap();
        let err = read_entry(Err(ureq::Error::Status(404, resp)), URL.to_string()).unwrap_err();
        match err {
            Error::Status { code, url } => {
                assert_eq!(code, 404);
                assert_eq!(url, URL);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_entry_malformed_body() {
        let resp = ureq::Response::new(200, "OK", "<html>maintenance</html>").unwrap();
        let err = read_entry(Ok(resp), URL.to_string()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        // valid JSON, wrong shape
        let resp = ureq::Response::new(200, "OK", r#"{"count": 1}"#).unwrap();
        assert!(matches!(
            read_entry(Ok(resp), URL.to_string()),
            Err(Error::Io(_))
        ));
    }
}
