use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, ORIGIN, REFERER,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::model::Query;

pub const DEFAULT_ENDPOINT: &str = "https://www.findmywipers.com/blade-size-finder/";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Anything that can answer a finder query with page HTML.
pub trait PageSource {
    fn fetch(&self, query: &Query) -> Result<String>;
}

/// Blocking client for the blade size finder form.
pub struct FinderClient {
    client: Client,
    endpoint: Url,
    search_url: String,
}

impl FinderClient {
    /// `timeout` of `None` keeps reqwest's default.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
        let site = site_root(&endpoint)?;
        let headers = browser_headers(&site)?;

        let mut builder = Client::builder().default_headers(headers).cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(FinderClient {
            client: builder.build()?,
            endpoint,
            search_url: site,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PageSource for FinderClient {
    fn fetch(&self, query: &Query) -> Result<String> {
        debug!("POST {} [{}]", self.endpoint, query);
        let resp = self
            .client
            .post(self.endpoint.clone())
            .form(&form_fields(&self.search_url, query))
            .send()?
            .error_for_status()?;
        Ok(resp.text()?)
    }
}

/// Form body in the order the site's own form submits it.
pub fn form_fields(search_url: &str, query: &Query) -> Vec<(&'static str, String)> {
    vec![
        ("search_url", search_url.to_string()),
        ("action", "submit".to_string()),
        ("bf-year", query.year.to_string()),
        ("bf-make", query.make.clone()),
        ("bf-model", query.model.clone()),
    ]
}

/// `scheme://host[:port]/` of the endpoint; doubles as Referer and `search_url`.
pub fn site_root(endpoint: &Url) -> Result<String> {
    match endpoint.origin() {
        url::Origin::Tuple(..) => Ok(format!("{}/", endpoint.origin().ascii_serialization())),
        url::Origin::Opaque(_) => Err(ScrapeError::Config(format!(
            "endpoint {} has no usable origin",
            endpoint
        ))),
    }
}

/// Header set of a desktop Firefox submitting the form from `site`.
pub fn browser_headers(site: &str) -> Result<HeaderMap> {
    let origin = site.trim_end_matches('/');
    let invalid = |e: reqwest::header::InvalidHeaderValue| ScrapeError::Config(format!("bad header value for {}: {}", site, e));

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(REFERER, HeaderValue::from_str(site).map_err(invalid)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"));
    headers.insert(ORIGIN, HeaderValue::from_str(origin).map_err(invalid)?);
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    Ok(headers)
}
