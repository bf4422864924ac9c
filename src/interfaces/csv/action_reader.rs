use crate::application::action::Action;
use crate::application::request::Request;
use crate::error::{PosError, Result};
use serde::Deserialize;
use std::io::Read;

/// One kiosk interaction from a script: the handler to call and the form
/// fields the operator submitted with it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScriptedAction {
    pub action: Action,
    pub username: Option<String>,
    /// Overrides the username route parameter carried from earlier redirects.
    pub route_username: Option<String>,
    pub keypad_value: Option<String>,
    pub sale_hash: Option<String>,
    pub notes: Option<String>,
}

impl ScriptedAction {
    /// Builds the request as the browser would send it from the page
    /// currently at `route_username`.
    pub fn to_request(&self, route_username: Option<&str>) -> Request {
        let mut request = Request::new();

        if let Some(username) = self.route_username.as_deref().or(route_username) {
            request = request.with_param("username", username);
        }

        let fields = [
            ("username", &self.username),
            ("keypad_value", &self.keypad_value),
            ("sale_hash", &self.sale_hash),
            ("notes", &self.notes),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                request = request.with_post(key, value.as_str());
            }
        }

        request
    }
}

/// Reads a kiosk action script from CSV.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes the script, one action per row.
    pub fn actions(self) -> impl Iterator<Item = Result<ScriptedAction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PosError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FormInput;

    const HEADER: &str = "action,username,route_username,keypad_value,sale_hash,notes";

    #[test]
    fn test_reader_valid_script() {
        let data = format!("{HEADER}\nonCheckUsername, bob,,,,\nonCheckPin,,,1234,,");
        let reader = ActionReader::new(data.as_bytes());
        let actions: Vec<Result<ScriptedAction>> = reader.actions().collect();

        assert_eq!(actions.len(), 2);
        let first = actions[0].as_ref().unwrap();
        assert_eq!(first.action, Action::CheckUsername);
        assert_eq!(first.username.as_deref(), Some("bob"));
        assert_eq!(first.keypad_value, None);

        let second = actions[1].as_ref().unwrap();
        assert_eq!(second.keypad_value.as_deref(), Some("1234"));
    }

    #[test]
    fn test_reader_unknown_handler() {
        let data = format!("{HEADER}\nonExplode,,,,,");
        let reader = ActionReader::new(data.as_bytes());
        let actions: Vec<Result<ScriptedAction>> = reader.actions().collect();

        assert!(actions[0].is_err());
    }

    #[test]
    fn test_to_request_carries_route_username() {
        let data = format!("{HEADER}\nonConfirmAmount,,,500,,");
        let action = ActionReader::new(data.as_bytes())
            .actions()
            .next()
            .unwrap()
            .unwrap();

        let request = action.to_request(Some("bob"));
        assert_eq!(request.param("username"), Some("bob"));
        assert_eq!(request.post("keypad_value"), Some("500"));
        assert_eq!(request.post("username"), None);
    }

    #[test]
    fn test_to_request_explicit_route_wins() {
        let data = format!("{HEADER}\nonRun,,carol,,,");
        let action = ActionReader::new(data.as_bytes())
            .actions()
            .next()
            .unwrap()
            .unwrap();

        let request = action.to_request(Some("bob"));
        assert_eq!(request.param("username"), Some("carol"));
    }
}
