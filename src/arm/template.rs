// ABOUTME: Embedded ARM templates and parameter injection.
// ABOUTME: Callers mutate the parsed template in place before submission.

use serde_json::{Value, json};

use crate::error::{Error, Result};

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedTemplate {
    /// App Service plan plus a web app.
    WebApp,
}

impl EmbeddedTemplate {
    pub fn source(&self) -> &'static str {
        match self {
            EmbeddedTemplate::WebApp => include_str!("../../templates/webapp.json"),
        }
    }

    /// Parse the embedded JSON into a mutable template document.
    pub fn load(&self) -> Result<Value> {
        Ok(serde_json::from_str(self.source())?)
    }
}

/// Set one named parameter's type and default value in a template.
///
/// A non-blank value writes `{type, defaultValue}` under the parameter name,
/// replacing any existing entry; type "int" stores the value as a JSON
/// number. A blank value with a non-blank `error_message` fails with
/// `Error::MissingField`. A blank value with a blank message leaves the
/// template untouched.
pub fn set_parameter(
    template: &mut Value,
    name: &str,
    param_type: &str,
    value: &str,
    error_message: &str,
) -> Result<()> {
    if !value.trim().is_empty() {
        let default_value = if param_type == "int" {
            let number: i64 = value.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("parameter {} is not numeric: {}", name, value))
            })?;
            Value::from(number)
        } else {
            Value::from(value)
        };

        let parameters = template
            .get_mut("parameters")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                Error::InvalidConfig("template has no parameters object".to_string())
            })?;

        parameters.insert(
            name.to_string(),
            json!({ "type": param_type, "defaultValue": default_value }),
        );

        Ok(())
    } else if !error_message.trim().is_empty() {
        Err(Error::MissingField(error_message.to_string()))
    } else {
        Ok(())
    }
}
