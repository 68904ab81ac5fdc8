//! `calrecur expand`: print the occurrences of one event.

use std::io::Read;

use chrono::SecondsFormat;

use calrecur_protocol::{EventPayload, OccurrencesQuery, OccurrencesResponse, occurrences_for};

use crate::cli::ExpandArgs;
use crate::config::{ClientConfig, OutputFormat};
use crate::error::ClientResult;

/// Reads the event named by `args`, expands it and prints the result.
pub fn run(args: &ExpandArgs, config: &ClientConfig) -> ClientResult<()> {
    let event_json = if args.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.event)?
    };

    let response = expand_document(&event_json, args, config)?;
    let output = render(&response, args.output_format(config.output.format))?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Validates and expands an event JSON document.
pub fn expand_document(
    event_json: &str,
    args: &ExpandArgs,
    config: &ClientConfig,
) -> ClientResult<OccurrencesResponse> {
    let range = config.allowed_range()?;
    let mut options = config.expand_options();
    if let Some(max) = args.max_occurrences {
        options = options.with_max_occurrences(max);
    }

    let event = EventPayload::from_json(event_json)?.into_event(&range)?;
    let query = OccurrencesQuery::parse(&args.from, &args.to, &range)?;
    tracing::debug!(
        from = %query.from(),
        to = %query.to(),
        max_occurrences = options.max_occurrences,
        "expanding event"
    );
    Ok(occurrences_for(&event, &query, options)?)
}

/// Formats a response for the terminal.
pub fn render(response: &OccurrencesResponse, format: OutputFormat) -> ClientResult<String> {
    Ok(match format {
        OutputFormat::Text => response
            .occurrences
            .iter()
            .map(|o| o.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(response)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::path::PathBuf;

    fn args(from: &str, to: &str) -> ExpandArgs {
        ExpandArgs {
            event: PathBuf::from("-"),
            from: from.to_string(),
            to: to.to_string(),
            json: false,
            max_occurrences: None,
        }
    }

    const WEEKLY: &str = r#"{
        "startAt": "2026-01-05T08:30:00Z",
        "endAt": "2026-01-05T09:00:00Z",
        "recurrence": { "freq": "WEEKLY", "byWeekday": [1, 3, 5] }
    }"#;

    #[test]
    fn text_output_one_per_line() {
        let response = expand_document(
            WEEKLY,
            &args("2026-01-05T00:00:00Z", "2026-01-11T23:59:59Z"),
            &ClientConfig::default(),
        )
        .unwrap();
        let text = render(&response, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "2026-01-05T08:30:00Z\n2026-01-07T08:30:00Z\n2026-01-09T08:30:00Z"
        );
    }

    #[test]
    fn json_output_is_response_body() {
        let response = expand_document(
            WEEKLY,
            &args("2026-01-05T00:00:00Z", "2026-01-06T00:00:00Z"),
            &ClientConfig::default(),
        )
        .unwrap();
        let json = render(&response, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["occurrences"][0], "2026-01-05T08:30:00Z");
        assert_eq!(parsed["occurrences"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn empty_window_renders_nothing() {
        let response = expand_document(
            WEEKLY,
            &args("2026-01-10T00:00:00Z", "2026-01-11T23:59:59Z"),
            &ClientConfig::default(),
        )
        .unwrap();
        assert!(render(&response, OutputFormat::Text).unwrap().is_empty());
    }

    #[test]
    fn max_occurrences_flag_overrides_config() {
        let mut capped = args("2026-01-05T00:00:00Z", "2026-03-01T00:00:00Z");
        capped.max_occurrences = Some(4);
        let err = expand_document(WEEKLY, &capped, &ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)));
        assert!(err.to_string().contains("more than 4 occurrences"));
    }

    #[test]
    fn configured_range_applies() {
        let mut config = ClientConfig::default();
        config.range.max_year = 2025;
        let err = expand_document(
            WEEKLY,
            &args("2025-01-05T00:00:00Z", "2025-01-11T23:59:59Z"),
            &config,
        )
        .unwrap_err();
        assert!(err.to_string().contains("startAt must be between"));
    }
}
