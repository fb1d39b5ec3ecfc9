// Completion broadcast fragments appended to every generated script.
//
// Both dialects deliver the same notification: one HTTP `POST /broadcast`
// to the listener at `host:port` carrying `{"command":..,"status":"done"}`.
// Animate (JSFL) has no socket object and shells out to curl; the
// ExtendScript apps write the request through a `Socket`.

use serde_json::json;

use crate::app::AppName;
use crate::args::js_string_literal;

/// Path the listener accepts completion notifications on.
pub const BROADCAST_PATH: &str = "/broadcast";

/// Signature shared by both fragment generators.
pub type BroadcastFn = fn(host: &str, port: u16, command: &str) -> String;

/// Broadcast mechanism understood by a host application's scripting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Animate JSFL, via `FLfile.runCommandLine`.
    Animate,
    /// ExtendScript `Socket`, tagged with `BridgeTalk.appName`.
    BridgeTalk,
}

impl Dialect {
    pub fn for_app(app: AppName) -> Self {
        match app {
            AppName::Animate => Dialect::Animate,
            AppName::Photoshop | AppName::Illustrator | AppName::InDesign => Dialect::BridgeTalk,
        }
    }

    pub fn generator(self) -> BroadcastFn {
        match self {
            Dialect::Animate => animate_broadcast,
            Dialect::BridgeTalk => bridge_talk_broadcast,
        }
    }

    pub fn render(self, host: &str, port: u16, command: &str) -> String {
        (self.generator())(host, port, command)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Animate => "animate",
            Dialect::BridgeTalk => "bridgetalk",
        }
    }
}

/// JSON body sent by both dialects.
pub fn completion_payload(command: &str) -> String {
    json!({ "command": command, "status": "done" }).to_string()
}

/// JSFL fragment: runs curl against the listener.
pub fn animate_broadcast(host: &str, port: u16, command: &str) -> String {
    let payload = shell_double_quoted(&completion_payload(command));
    let url = shell_double_quoted(&format!("http://{host}:{port}{BROADCAST_PATH}"));
    let command_line = format!(
        "curl -s -m 5 -X POST -H \"Content-Type: application/json\" \
         -H \"X-Host-App: animate\" -d {payload} {url}"
    );
    format!("FLfile.runCommandLine({});", js_string_literal(&command_line))
}

// Inside sh double quotes only `\`, `"`, `$` and backtick stay special.
fn shell_double_quoted(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// ExtendScript fragment: writes the request over a `Socket`.
pub fn bridge_talk_broadcast(host: &str, port: u16, command: &str) -> String {
    let payload = completion_payload(command);
    let address = format!("{host}:{port}");
    let head = format!(
        "POST {BROADCAST_PATH} HTTP/1.1\r\nHost: {address}\r\n\
         Content-Type: application/json\r\nX-Host-App: "
    );
    let tail = format!(
        "\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );

    [
        "(function () {".to_string(),
        "    var connection = new Socket();".to_string(),
        "    connection.encoding = \"UTF-8\";".to_string(),
        format!("    if (connection.open({})) {{", js_string_literal(&address)),
        format!(
            "        connection.write({} + BridgeTalk.appName + {});",
            js_string_literal(&head),
            js_string_literal(&tail)
        ),
        "        connection.close();".to_string(),
        "    }".to_string(),
        "})();".to_string(),
    ]
    .join("\n")
}
