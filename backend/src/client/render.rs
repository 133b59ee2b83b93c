//! Terminal rendering of API responses.
//!
//! Rendering is pure: it turns an [`ApiResponse`] into the text destined for
//! stdout and stderr plus the process exit code, leaving the actual writes to
//! the binary.

use serde_json::{Map, Value};

use super::{ApiResponse, ResponseBody, UnreachableError};

/// Exit code for a response with an expected status.
pub const EXIT_OK: u8 = 0;
/// Exit code for an API error response.
pub const EXIT_API_ERROR: u8 = 1;
/// Exit code when the API could not be reached.
pub const EXIT_UNREACHABLE: u8 = 2;

/// Text to print and the exit code to terminate with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Text for standard output.
    pub stdout: String,
    /// Text for standard error.
    pub stderr: String,
    /// Process exit status.
    pub exit_code: u8,
}

fn request_id_line(response: &ApiResponse) -> Option<String> {
    response
        .request_id
        .as_deref()
        .map(|id| format!("(request_id: {id})"))
}

fn status_line(response: &ApiResponse) -> String {
    format!("{} {}", response.status, response.reason)
        .trim_end()
        .to_owned()
}

fn raw_text(response: &ApiResponse) -> String {
    match &response.body {
        ResponseBody::Text(text) => text.clone(),
        ResponseBody::Json(value) => value.to_string(),
        ResponseBody::Empty => status_line(response),
    }
}

fn push_line(buffer: &mut String, line: &str) {
    buffer.push_str(line);
    buffer.push('\n');
}

fn loc_path(issue: &Map<String, Value>) -> String {
    issue
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map(|part| match part {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default()
}

fn text_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn describe_envelope(response: &ApiResponse, error: &Map<String, Value>) -> String {
    let mut out = String::new();
    let status = error
        .get("status")
        .filter(|value| !value.is_null())
        .map_or_else(|| response.status.to_string(), ToString::to_string);
    let code = text_field(error, "code").unwrap_or("HTTP_ERROR");
    let message = text_field(error, "message").unwrap_or(response.reason.as_str());
    push_line(&mut out, &format!("[{status}] {code}: {message}"));

    if let Some(hint) = text_field(error, "hint").filter(|hint| !hint.is_empty()) {
        push_line(&mut out, &format!("Hint: {hint}"));
    }

    let issues = error
        .get("validation_errors")
        .and_then(Value::as_array)
        .filter(|issues| !issues.is_empty());
    if let Some(issues) = issues {
        push_line(&mut out, "Validation errors:");
        for issue in issues.iter().filter_map(Value::as_object) {
            let line = format!(
                "  • {}: {} ({})",
                loc_path(issue),
                text_field(issue, "msg").unwrap_or_default(),
                text_field(issue, "type").unwrap_or_default(),
            );
            push_line(&mut out, &line);
        }
    }
    out
}

fn render_success(response: &ApiResponse) -> Rendered {
    let mut stdout = String::new();
    let body = match &response.body {
        ResponseBody::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ResponseBody::Text(text) => text.clone(),
        ResponseBody::Empty => status_line(response),
    };
    push_line(&mut stdout, &body);
    if let Some(line) = request_id_line(response) {
        push_line(&mut stdout, &line);
    }
    Rendered {
        stdout,
        stderr: String::new(),
        exit_code: EXIT_OK,
    }
}

fn render_failure(response: &ApiResponse) -> Rendered {
    let envelope = match &response.body {
        ResponseBody::Json(Value::Object(body)) => body.get("error").and_then(Value::as_object),
        _ => None,
    };
    let mut stderr = match envelope {
        Some(error) => describe_envelope(response, error),
        None => {
            let mut out = String::new();
            push_line(&mut out, &raw_text(response));
            out
        }
    };
    if let Some(line) = request_id_line(response) {
        push_line(&mut stderr, &line);
    }
    Rendered {
        stdout: String::new(),
        stderr,
        exit_code: EXIT_API_ERROR,
    }
}

/// Render a response, treating any status in `expected` as success.
///
/// Successful JSON bodies are pretty-printed to stdout. Error envelopes are
/// summarised on stderr as `[status] CODE: message`, followed by the hint and
/// any validation issues.
#[must_use]
pub fn render(response: &ApiResponse, expected: &[u16]) -> Rendered {
    if expected.contains(&response.status) {
        render_success(response)
    } else {
        render_failure(response)
    }
}

/// Render the outcome of a cancellation: `204` prints `OK`.
#[must_use]
pub fn render_cancel(response: &ApiResponse) -> Rendered {
    if response.status != 204 {
        return render_failure(response);
    }
    let mut stdout = String::new();
    push_line(&mut stdout, "OK");
    if let Some(line) = request_id_line(response) {
        push_line(&mut stdout, &line);
    }
    Rendered {
        stdout,
        stderr: String::new(),
        exit_code: EXIT_OK,
    }
}

/// Render a transport failure.
#[must_use]
pub fn render_unreachable(error: &UnreachableError) -> Rendered {
    let mut stderr = String::new();
    push_line(&mut stderr, &error.to_string());
    Rendered {
        stdout: String::new(),
        stderr,
        exit_code: EXIT_UNREACHABLE,
    }
}
