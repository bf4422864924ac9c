use crate::application::action::Action;
use crate::application::page::Response;
use crate::error::{PosError, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ErrorRecord<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
    message: String,
}

#[derive(Serialize)]
struct ResponseRecord<'a> {
    action: &'static str,
    #[serde(flatten)]
    response: Option<&'a Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flash: Option<&'a [String]>,
}

/// Writes one JSON object per handled action.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(
        &mut self,
        action: Action,
        outcome: &Result<Response>,
        flash: &[String],
    ) -> Result<()> {
        let flash = (!flash.is_empty()).then_some(flash);
        let record = match outcome {
            Ok(response) => ResponseRecord {
                action: action.handler_name(),
                response: Some(response),
                error: None,
                flash,
            },
            Err(err) => ResponseRecord {
                action: action.handler_name(),
                response: None,
                error: Some(error_record(err)),
                flash,
            },
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn error_record(err: &PosError) -> ErrorRecord<'_> {
    ErrorRecord {
        kind: err.kind(),
        field: err.field(),
        message: err.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::page::Page;
    use crate::domain::ports::Redirect;
    use crate::domain::slide::SlideMode;

    fn written(action: Action, outcome: Result<Response>, flash: &[String]) -> serde_json::Value {
        let mut buffer = Vec::new();
        let mut writer = ResponseWriter::new(&mut buffer);
        writer.write_response(action, &outcome, flash).unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn test_writes_page() {
        let page = Page {
            slide_mode: Some(SlideMode::Amount),
            ..Default::default()
        };
        let flash = vec!["Authentication successful".to_string()];

        let json = written(Action::CheckPin, Ok(page.into()), &flash);

        assert_eq!(
            json,
            serde_json::json!({
                "action": "onCheckPin",
                "page": { "slideMode": "amount" },
                "flash": ["Authentication successful"],
            })
        );
    }

    #[test]
    fn test_writes_redirect() {
        let redirect = Redirect {
            location: "/pos/bob".to_string(),
        };
        let json = written(Action::CheckUsername, Ok(redirect.into()), &[]);

        assert_eq!(
            json,
            serde_json::json!({
                "action": "onCheckUsername",
                "redirect": { "location": "/pos/bob" },
            })
        );
    }

    #[test]
    fn test_writes_validation_error() {
        let err = PosError::validation("username", "Unable to find that account");
        let json = written(Action::CheckUsername, Err(err), &[]);

        assert_eq!(
            json,
            serde_json::json!({
                "action": "onCheckUsername",
                "error": {
                    "kind": "validation",
                    "field": "username",
                    "message": "Unable to find that account",
                },
            })
        );
    }
}
