use std::fmt;

use url::form_urlencoded;

/// A path on the control server plus its query parameters, in the order they
/// are sent.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    path: String,
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Endpoint {
        Endpoint {
            path: path.into(),
            query: vec![],
        }
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Endpoint {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn url(&self, base: &str) -> String {
        let mut url = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );

        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();

            url.push('?');
            url.push_str(&query);
        }

        url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;

        for (index, (key, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{key}={value}")?;
        }

        Ok(())
    }
}
