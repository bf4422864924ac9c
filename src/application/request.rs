use crate::domain::ports::FormInput;
use std::collections::HashMap;

/// Form fields and route parameters of a single kiosk request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    post: HashMap<String, String>,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.post.insert(key.into(), value.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl FormInput for Request {
    fn post(&self, key: &str) -> Option<&str> {
        self.post.get(key).map(String::as_str)
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_param_are_separate() {
        let request = Request::new()
            .with_post("keypad_value", "500")
            .with_param("username", "bob");

        assert_eq!(request.post("keypad_value"), Some("500"));
        assert_eq!(request.post("username"), None);
        assert_eq!(request.param("username"), Some("bob"));
    }
}
