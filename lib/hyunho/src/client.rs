mod error;
pub use error::Error;

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chipp_http::{HttpClient, NoInterceptor};
use log::trace;
use serde::de::DeserializeOwned;

use crate::{Endpoint, Result};

/// Issues a single GET against the control server. Any status code is a
/// successful transport round trip; callers decide what a status means.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: Endpoint) -> Result<Response>;
}

#[derive(Clone)]
pub struct Client {
    base_url: String,
    http_client: Arc<HttpClient<NoInterceptor>>,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Client> {
        let http_client = HttpClient::new(base_url)?;

        Ok(Client {
            base_url: base_url.to_string(),
            http_client: Arc::new(http_client),
        })
    }
}

#[async_trait]
impl Transport for Client {
    async fn get(&self, endpoint: Endpoint) -> Result<Response> {
        let url = endpoint.url(&self.base_url);
        trace!("GET {url}");

        let request = self.http_client.new_request_with_url(url)?;

        let response = self
            .http_client
            .perform_request(request, |_, response| {
                Ok(Response::new(response.status_code as u16, response.body))
            })
            .await?;

        trace!(
            "response: {} {}",
            response.status,
            String::from_utf8_lossy(&response.body)
        );

        Ok(response)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Response {
        Response {
            status,
            body: body.into(),
        }
    }

    /// A 200 response carrying `value` serialized as JSON.
    pub fn ok(value: serde_json::Value) -> Response {
        Response::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Reads the body as JSON, falling back to the bare text for servers that
    /// answer `on` instead of `"on"`.
    pub fn parse<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + FromStr,
    {
        match self.json() {
            Ok(value) => Ok(value),
            Err(err) => {
                let text = self.text();
                let text = text.trim();

                if text.is_empty() {
                    return Err(err);
                }

                T::from_str(text).map_err(|_| Error::UnexpectedBody(text.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;
    use serde_json::json;

    #[test]
    fn test_success_is_200_only() {
        assert!(Response::new(200, "").is_success());
        assert!(!Response::new(201, "").is_success());
        assert!(!Response::new(500, "").is_success());
    }

    #[test]
    fn test_parse_json_token() {
        let response = Response::ok(json!("mid"));
        assert_eq!(response.parse::<Token>().unwrap(), Token::Mid);
    }

    #[test]
    fn test_parse_bare_token() {
        let response = Response::new(200, "off\n");
        assert_eq!(response.parse::<Token>().unwrap(), Token::Off);
    }

    #[test]
    fn test_parse_numbers_and_booleans() {
        assert_eq!(Response::ok(json!(24.5)).parse::<f32>().unwrap(), 24.5);
        assert!(Response::ok(json!(true)).parse::<bool>().unwrap());
    }

    #[test]
    fn test_parse_unexpected_body() {
        let response = Response::new(200, "Internal Server Error");

        match response.parse::<Token>() {
            Err(Error::UnexpectedBody(body)) => assert_eq!(body, "Internal Server Error"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(matches!(
            Response::new(200, "").parse::<Token>(),
            Err(Error::Json(_))
        ));
    }
}
