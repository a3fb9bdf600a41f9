//! Drives a `Session` from parsed arguments.
//!
//! Results go to `out`; progress labels, prompts and notices go to `err`.
//! Every entry point returns whether all submissions stored a result, which
//! `main` turns into the exit code.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use watchskip_core::{ClientConfig, PredictClient, Session, Transport};

use crate::cli::Cli;
use crate::ui;

pub fn run(
    cli: &Cli,
    transport: &mut impl Transport,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    let config = cli.config();
    if cli.check {
        return check(&config, transport, out);
    }

    let mut session = Session::new(&config);
    match cli.url.as_deref() {
        Some(url) => analyze(&mut session, transport, url, cli.json, out, err),
        None => interactive(&mut session, transport, input, cli.json, out, err),
    }
}

pub fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn check(
    config: &ClientConfig,
    transport: &mut impl Transport,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let client = PredictClient::from_config(config);
    let response = transport.execute(&client.build_health())?;
    let health = client.parse_health(response)?;
    writeln!(out, "{}: {}", client.base_url(), health.message)?;
    Ok(true)
}

/// Run one submission for `input` and draw the outcome.
pub fn analyze(
    session: &mut Session,
    transport: &mut impl Transport,
    input: &str,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    session.set_input(input);
    let submission = match session.begin_submit() {
        Ok(submission) => submission,
        Err(e) => {
            ui::notice(err, &e)?;
            return Ok(false);
        }
    };
    ui::status(err, session.view().trigger_label)?;

    let outcome = transport.execute(&submission.request);
    if let Err(e) = session.complete(submission.id, outcome) {
        ui::notice(err, &e)?;
        return Ok(false);
    }

    if json {
        if let Some(result) = session.last_result() {
            writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        }
    } else if let Some(panel) = session.view().panel {
        ui::write_panel(out, &panel)?;
    }
    Ok(true)
}

/// One submission per input line until EOF. Lines are trimmed, so a blank
/// line gets the validation notice.
pub fn interactive(
    session: &mut Session,
    transport: &mut impl Transport,
    input: impl BufRead,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    let mut all_ok = true;
    ui::status(err, ui::PROMPT)?;
    for line in input.lines() {
        let line = line?;
        if !analyze(session, transport, line.trim(), json, out, err)? {
            all_ok = false;
        }
        ui::status(err, ui::PROMPT)?;
    }
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::Cursor;

    use clap::Parser;
    use watchskip_core::{HttpRequest, HttpResponse, TransportError};

    use super::*;

    /// Replays canned outcomes and records every request it was asked to send.
    #[derive(Default)]
    struct ScriptedTransport {
        outcomes: VecDeque<Result<HttpResponse, TransportError>>,
        sent: Vec<HttpRequest>,
    }

    impl ScriptedTransport {
        fn replying(outcomes: impl IntoIterator<Item = Result<HttpResponse, TransportError>>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                sent: Vec::new(),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.push(request.clone());
            self.outcomes
                .pop_front()
                .unwrap_or(Err(TransportError::Connection("script exhausted".to_string())))
        }
    }

    const WATCH_BODY: &str =
        r#"{"decision":"Watch","features":{"sentiment":0.732,"likes":150,"comments":42}}"#;

    struct Captured {
        ok: bool,
        out: String,
        err: String,
    }

    fn drive(args: &[&str], stdin: &str, transport: &mut ScriptedTransport) -> Captured {
        let cli = Cli::try_parse_from(std::iter::once("watchskip").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = run(&cli, transport, Cursor::new(stdin.to_string()), &mut out, &mut err).unwrap();
        Captured {
            ok,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    #[test]
    fn single_url_prints_panel() {
        let mut transport = ScriptedTransport::replying([Ok(HttpResponse::new(200, WATCH_BODY))]);
        let got = drive(&["https://youtu.be/abc123"], "", &mut transport);

        assert!(got.ok);
        assert_eq!(transport.sent.len(), 1);
        assert!(got.err.contains("Analyzing..."));
        assert!(got.out.contains("Watch"));
        assert!(got.out.contains("Sentiment Score: 0.73 | Likes: 150 | Comments: 42"));
        assert_eq!(format!("{:?}", exit_code(got.ok)), format!("{:?}", ExitCode::SUCCESS));
    }

    #[test]
    fn network_failure_prints_notice_and_fails() {
        let mut transport = ScriptedTransport::replying([Err(TransportError::Connection(
            "connection refused".to_string(),
        ))]);
        let got = drive(&["https://youtu.be/abc123"], "", &mut transport);

        assert!(!got.ok);
        assert!(got.err.contains("Error fetching prediction"));
        assert!(got.out.is_empty());
        assert_eq!(format!("{:?}", exit_code(got.ok)), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn undecodable_body_fails() {
        let mut transport =
            ScriptedTransport::replying([Ok(HttpResponse::new(502, "<html>Bad Gateway</html>"))]);
        let got = drive(&["https://youtu.be/abc123"], "", &mut transport);

        assert!(!got.ok);
        assert!(got.err.contains("Error fetching prediction"));
    }

    #[test]
    fn json_flag_prints_last_result() {
        let mut transport = ScriptedTransport::replying([Ok(HttpResponse::new(500, WATCH_BODY))]);
        let got = drive(&["--json", "https://youtu.be/abc123"], "", &mut transport);

        assert!(got.ok);
        let printed: serde_json::Value = serde_json::from_str(&got.out).unwrap();
        let expected: serde_json::Value = serde_json::from_str(WATCH_BODY).unwrap();
        assert_eq!(printed, expected);
    }

    #[test]
    fn blank_line_gets_validation_notice_without_request() {
        let mut transport = ScriptedTransport::replying([Ok(HttpResponse::new(200, WATCH_BODY))]);
        let got = drive(&[], "   \nhttps://youtu.be/abc123\n", &mut transport);

        assert!(!got.ok);
        assert!(got.err.contains("Please enter a YouTube URL"));
        assert_eq!(transport.sent.len(), 1);
        let body: serde_json::Value =
            serde_json::from_str(transport.sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["url"], "https://youtu.be/abc123");
        assert!(got.out.contains("Watch"));
    }

    #[test]
    fn interactive_succeeds_when_every_line_does() {
        let mut transport = ScriptedTransport::replying([
            Ok(HttpResponse::new(200, WATCH_BODY)),
            Ok(HttpResponse::new(200, r#"{"decision":"Skip","features":{}}"#)),
        ]);
        let got = drive(&[], "https://youtu.be/a\nhttps://youtu.be/b\n", &mut transport);

        assert!(got.ok);
        assert_eq!(transport.sent.len(), 2);
        assert!(got.out.contains("Skip"));
        assert_eq!(got.err.matches(ui::PROMPT).count(), 3);
    }

    #[test]
    fn check_prints_health_message() {
        let mut transport = ScriptedTransport::replying([Ok(HttpResponse::new(
            200,
            r#"{"message":"Backend is running"}"#,
        ))]);
        let got = drive(&["--check", "--base-url", "http://predictor:9000"], "", &mut transport);

        assert!(got.ok);
        assert_eq!(transport.sent[0].url, "http://predictor:9000/");
        assert_eq!(got.out.trim(), "http://predictor:9000: Backend is running");
    }
}
