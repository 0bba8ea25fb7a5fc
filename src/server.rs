// File: src/server.rs
//
// Web UI for rendering definitions in the browser.
// Serves a form at `/` and renders submitted definitions at
// `/graph?definition=...`, with optional `format=dot` or `format=json`
// for the raw graph description. The HTML view ships the DOT text to the
// browser and lets viz.js lay it out client-side.
//
// Requests are handled sequentially on the accepting thread; each one
// builds a fresh graph context, so there is no shared state to guard.

use crate::errors::DefGraphError;
use crate::graph::GraphContext;
use crate::parser::parse_definition;
use crate::translate::translate;
use colored::Colorize;
use std::io::Cursor;
use tiny_http::{Header, Response, Server};

type HttpResponse = Response<Cursor<Vec<u8>>>;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>defgraph</title>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <style>
            body {
                font-family: sans-serif;
            }

            input[type="text"] {
                width: 100%;
                padding: 12px 20px;
                margin: 8px 0;
                box-sizing: border-box;
                border: 2px solid #ccc;
                border-radius: 4px;
            }

            button {
                background-color: #4CAF50;
                color: white;
                padding: 12px 20px;
                margin: 8px 0;
                border: none;
                border-radius: 4px;
                cursor: pointer;
            }

            button:hover {
                background-color: #45a049;
            }
        </style>
    </head>
    <body>
        <form action="/graph" method="get">
            <input type="text" name="definition" placeholder="definition" />
            <button type="submit">Submit</button>
        </form>
    </body>
</html>
"#;

/// Starts the web UI on the given port and serves requests until the
/// process is stopped.
pub fn serve(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let server = Server::http(format!("0.0.0.0:{}", port))?;

    println!(
        "Server listening on {}",
        format!("http://localhost:{}", port).bright_cyan()
    );
    println!("Press Ctrl+C to stop");

    // Main server loop
    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url.as_str(), ""),
        };
        let _ = request.respond(route(path, query));
    }

    Ok(())
}

fn route(path: &str, query: &str) -> HttpResponse {
    match path {
        "/" => html_response(INDEX_HTML.to_string()),
        "/graph" => graph_response(query),
        _ => Response::from_string("Not Found").with_status_code(404),
    }
}

fn graph_response(query: &str) -> HttpResponse {
    let params = parse_query(query);
    // A missing definition renders as the empty string and fails in the
    // parser with the standard error text.
    let definition = param(&params, "definition").unwrap_or_default();
    let format = param(&params, "format").unwrap_or_default();

    match render_definition(&definition, &format) {
        Ok((content_type, body)) => {
            with_content_type(Response::from_string(body), content_type)
        }
        Err(message) => Response::from_string(message).with_status_code(400),
    }
}

/// Renders a definition for the web endpoint.
///
/// Returns the content type and body on success. On failure the error
/// text already carries the offending definition, ready for a 400 body.
fn render_definition(definition: &str, format: &str) -> Result<(&'static str, String), String> {
    let expr = parse_definition(definition).map_err(|err| match err {
        DefGraphError::Parse(message) => {
            format!("error parsing definition `{}`:\n {}", definition, message)
        }
        other => other.to_string(),
    })?;

    let mut ctx = GraphContext::new();
    translate(&expr, &mut ctx).map_err(|err| err.to_string())?;

    match format {
        "dot" => Ok(("text/vnd.graphviz; charset=utf-8", crate::dot::to_dot(&ctx))),
        "json" => match serde_json::to_string_pretty(&ctx) {
            Ok(body) => Ok(("application/json", body)),
            Err(err) => Err(format!("serialization failed: {}", err)),
        },
        _ => Ok((
            "text/html; charset=utf-8",
            graph_page(definition, &crate::dot::to_dot(&ctx)),
        )),
    }
}

/// Builds the HTML page for a rendered definition. The DOT text rides
/// along in a hidden element and viz.js turns it into an SVG in the
/// browser.
fn graph_page(definition: &str, dot: &str) -> String {
    let encoded = urlencoding::encode(definition);
    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <title>defgraph</title>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <style>
            body {{
                font-family: sans-serif;
            }}

            input[type="text"] {{
                width: 100%;
                padding: 12px 20px;
                margin: 8px 0;
                box-sizing: border-box;
                border: 2px solid #ccc;
                border-radius: 4px;
            }}

            button {{
                background-color: #4CAF50;
                color: white;
                padding: 12px 20px;
                margin: 8px 0;
                border: none;
                border-radius: 4px;
                cursor: pointer;
            }}

            button:hover {{
                background-color: #45a049;
            }}
        </style>
    </head>
    <body>
        <form action="/graph" method="get">
            <input type="text" name="definition" value="{definition}" />
            <button type="submit">Submit</button>
        </form>
        <div id="graph"></div>
        <p>
            <a href="/graph?definition={encoded}&amp;format=dot">DOT source</a> |
            <a href="/graph?definition={encoded}&amp;format=json">JSON</a>
        </p>
        <pre id="dot" hidden>{dot}</pre>
        <script src="https://cdn.jsdelivr.net/npm/@viz-js/viz@3.2.4/lib/viz-standalone.js"></script>
        <script>
            Viz.instance().then(function (viz) {{
                var dot = document.getElementById("dot").textContent;
                document.getElementById("graph").appendChild(viz.renderSVGElement(dot));
            }});
        </script>
    </body>
</html>
"#,
        definition = escape_html(definition),
        encoded = encoded,
        dot = escape_html(dot),
    )
}

/// Splits a query string into decoded key/value pairs
fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn param(params: &[(String, String)], name: &str) -> Option<String> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

/// Percent-decodes a form value. Forms encode spaces as `+`, which
/// `urlencoding` leaves alone, so those are rewritten first.
fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn html_response(body: String) -> HttpResponse {
    with_content_type(Response::from_string(body), "text/html; charset=utf-8")
}

fn with_content_type(response: HttpResponse, value: &str) -> HttpResponse {
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], value.as_bytes()) {
        response.with_header(header)
    } else {
        response
    }
}
