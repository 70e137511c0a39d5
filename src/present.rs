//! Rendering of round outcomes for the terminal.

use hedged_curl::HttpResponse;

pub const TIMEOUT_MESSAGE: &str = "error: requests timed out";
pub const FAILURE_MESSAGE: &str = "error: all requests failed";

/// Formats a response as status line, protocol, headers, blank line, body.
///
/// Repeated headers are folded into one line, values joined by ", ".
pub fn render(resp: &HttpResponse) -> String {
    let mut out = String::new();
    out.push_str(&resp.status.to_string());
    out.push('\n');
    out.push_str(&format!("{:?}\n", resp.version));

    for name in resp.headers.keys() {
        let values: Vec<_> = resp
            .headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        out.push_str(&format!("{}: {}\n", name, values.join(", ")));
    }

    out.push('\n');
    out.push_str(&String::from_utf8_lossy(&resp.body));
    out.push('\n');
    out
}
