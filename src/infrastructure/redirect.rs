use crate::domain::ports::{Redirect, Redirector};

/// Builds redirects from the terminal page's route template.
///
/// Placeholders look like `:username`, with a trailing `?` marking them
/// optional, e.g. `/pos/:username?`. Placeholders without a value are
/// dropped from the URL.
#[derive(Debug, Clone)]
pub struct RouteRedirector {
    template: String,
}

impl RouteRedirector {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn url(&self, params: &[(&str, &str)]) -> String {
        let segments: Vec<String> = self
            .template
            .split('/')
            .filter_map(|segment| match segment.strip_prefix(':') {
                Some(name) => {
                    let name = name.trim_end_matches('?');
                    params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| urlencoding::encode(value).into_owned())
                }
                None => Some(segment.to_string()),
            })
            .collect();

        let url = segments.join("/");
        if url.is_empty() { "/".to_string() } else { url }
    }
}

impl Redirector for RouteRedirector {
    fn to_current_page(&self, params: &[(&str, &str)]) -> Redirect {
        Redirect {
            location: self.url(params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_placeholder() {
        let redirector = RouteRedirector::new("/pos/:username?");
        let redirect = redirector.to_current_page(&[("username", "bob")]);
        assert_eq!(redirect.location, "/pos/bob");
    }

    #[test]
    fn test_encodes_value() {
        let redirector = RouteRedirector::new("/pos/:username");
        assert_eq!(redirector.url(&[("username", "bob smith")]), "/pos/bob%20smith");
    }

    #[test]
    fn test_drops_missing_placeholder() {
        let redirector = RouteRedirector::new("/pos/:username?");
        assert_eq!(redirector.url(&[]), "/pos");
    }
}
