//! Checks applied to a parsed fixture document.

use crate::types::{LintIssue, LintOptions, LintResult};
use http::{HeaderName, HeaderValue};
use regex::Regex;
use serde_json::Value;
use std::path::Path;

const CONTEXT_KINDS: [&str; 3] = ["document", "worker", "detached"];
const ACTIONS: [&str; 4] = ["respond", "reject", "abort", "passthrough"];

/// Queue layers a persistent fixture overwrites when registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Layers {
    decision: bool,
    behavior: bool,
}

/// Validate a complete fixture document.
pub fn validate_config(file: &Path, config: &Value, result: &mut LintResult, options: &LintOptions) {
    if !config.is_object() {
        result.add_issue(
            LintIssue::error("E003", "Config must be a mapping with a 'fixtures' list", file)
                .with_suggestion("Start the file with 'fixtures:'"),
        );
        return;
    }

    let resolves_relative = match config.get("context") {
        Some(context) => validate_context(file, context, result),
        None => false,
    };

    let fixtures = match config.get("fixtures") {
        Some(Value::Array(fixtures)) => fixtures,
        Some(_) => {
            result.add_issue(
                LintIssue::error("E003", "'fixtures' must be a list", file)
                    .with_location("fixtures"),
            );
            return;
        }
        None => {
            result.add_issue(
                LintIssue::error("E003", "Missing required field: fixtures", file)
                    .with_suggestion("Add a 'fixtures' list, even an empty one"),
            );
            return;
        }
    };

    let mut persistent = Vec::new();
    for (idx, fixture) in fixtures.iter().enumerate() {
        if let Some(layers) = validate_fixture(file, fixture, idx, resolves_relative, result, options) {
            persistent.push((idx, layers));
        }
    }
    check_shadowing(file, fixtures, &persistent, result);
}

/// Validate the `context` block.
///
/// Returns whether relative URLs will be resolved against a base.
pub fn validate_context(file: &Path, context: &Value, result: &mut LintResult) -> bool {
    let Some(obj) = context.as_object() else {
        result.add_issue(
            LintIssue::error("E004", "'context' must be a mapping", file).with_location("context"),
        );
        return false;
    };

    let kind = match obj.get("kind") {
        None => "detached",
        Some(Value::String(kind)) if CONTEXT_KINDS.contains(&kind.as_str()) => kind.as_str(),
        Some(other) => {
            result.add_issue(
                LintIssue::error("E004", format!("Unknown context kind: {other}"), file)
                    .with_location("context.kind")
                    .with_suggestion(format!("Use one of: {}", CONTEXT_KINDS.join(", "))),
            );
            return false;
        }
    };
    let needs_base = kind != "detached";

    match obj.get("baseUrl") {
        Some(Value::String(base)) => match url::Url::parse(base) {
            Ok(_) => needs_base,
            Err(e) => {
                result.add_issue(
                    LintIssue::error("E005", format!("Invalid baseUrl '{base}': {e}"), file)
                        .with_location("context.baseUrl"),
                );
                false
            }
        },
        Some(other) => {
            result.add_issue(
                LintIssue::error("E005", format!("baseUrl must be a string, got {other}"), file)
                    .with_location("context.baseUrl"),
            );
            false
        }
        None if needs_base => {
            result.add_issue(
                LintIssue::error("E005", format!("Context kind '{kind}' requires a baseUrl"), file)
                    .with_location("context")
                    .with_suggestion("Add an absolute URL, e.g. baseUrl: https://app.test/"),
            );
            false
        }
        None => false,
    }
}

/// Validate a single fixture.
///
/// Returns the layers it overwrites when it is persistent and well formed.
fn validate_fixture(
    file: &Path,
    fixture: &Value,
    idx: usize,
    resolves_relative: bool,
    result: &mut LintResult,
    options: &LintOptions,
) -> Option<Layers> {
    let location = format!("fixtures[{idx}]");

    let Some(obj) = fixture.as_object() else {
        result.add_issue(
            LintIssue::error("E006", "Fixture must be a mapping", file).with_location(location),
        );
        return None;
    };

    let actions: Vec<&str> = ACTIONS
        .into_iter()
        .filter(|action| match obj.get(*action) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(set)) => *set || matches!(*action, "respond" | "reject"),
            Some(_) => true,
        })
        .collect();

    match actions.len() {
        0 => result.add_issue(
            LintIssue::error("E006", "Fixture has no action", file)
                .with_location(&location)
                .with_suggestion(format!("Set exactly one of: {}", ACTIONS.join(", "))),
        ),
        1 => {}
        _ => result.add_issue(
            LintIssue::error(
                "E006",
                format!("Fixture has {} actions: {}", actions.len(), actions.join(", ")),
                file,
            )
            .with_location(&location)
            .with_suggestion("Split it into one fixture per action"),
        ),
    }

    let matcher = obj.get("match").filter(|m| !m.is_null());
    if let Some(matcher) = matcher {
        validate_match(
            file,
            matcher,
            &format!("{location}.match"),
            resolves_relative,
            result,
            options,
        );
        if let [action @ ("reject" | "abort")] = actions.as_slice() {
            result.add_issue(
                LintIssue::warning(
                    "W001",
                    format!("'match' is ignored on a {action} fixture"),
                    file,
                )
                .with_location(format!("{location}.match"))
                .with_suggestion("Remove 'match'; reject and abort apply to every mocked call"),
            );
        }
    }

    if let Some(respond) = obj.get("respond").filter(|r| !r.is_null()) {
        validate_respond(file, respond, &format!("{location}.respond"), result);
    }

    let once = obj.get("once").and_then(Value::as_bool).unwrap_or(false);
    match actions.as_slice() {
        [_] if once => None,
        ["respond" | "reject" | "abort"] => Some(Layers {
            decision: false,
            behavior: true,
        }),
        ["passthrough"] => Some(Layers {
            decision: true,
            behavior: false,
        }),
        _ => None,
    }
}

/// Validate a `match` block.
pub fn validate_match(
    file: &Path,
    matcher: &Value,
    location: &str,
    resolves_relative: bool,
    result: &mut LintResult,
    options: &LintOptions,
) {
    let url = matcher.get("url").and_then(Value::as_str);
    let pattern = matcher.get("pattern").and_then(Value::as_str);

    match (url, pattern) {
        (Some(_), Some(_)) => {
            result.add_issue(
                LintIssue::error("E010", "'match' sets both 'url' and 'pattern'", file)
                    .with_location(location)
                    .with_suggestion("Keep only one of them"),
            );
        }
        (None, None) => {
            result.add_issue(
                LintIssue::error("E010", "'match' must set 'url' or 'pattern'", file)
                    .with_location(location),
            );
        }
        (None, Some(pattern)) => {
            if let Err(e) = Regex::new(pattern) {
                result.add_issue(
                    LintIssue::error("E007", format!("Invalid regex pattern: {e}"), file)
                        .with_location(format!("{location}.pattern"))
                        .with_suggestion("Check regex syntax"),
                );
            }
        }
        (Some(url), None) => {
            let relative = matches!(
                url::Url::parse(url),
                Err(url::ParseError::RelativeUrlWithoutBase)
            );
            if relative && resolves_relative && options.verbose {
                result.add_issue(
                    LintIssue::info(
                        "I001",
                        format!("Relative match url '{url}' never equals a resolved request URL"),
                        file,
                    )
                    .with_location(format!("{location}.url"))
                    .with_suggestion("Use the absolute URL, or a pattern"),
                );
            }
        }
    }
}

/// Validate a `respond` descriptor.
pub fn validate_respond(file: &Path, respond: &Value, location: &str, result: &mut LintResult) {
    let Some(obj) = respond.as_object() else {
        result.add_issue(
            LintIssue::error("E006", "'respond' must be a mapping", file)
                .with_location(location)
                .with_suggestion("Use e.g. respond: { body: \"ok\" }"),
        );
        return;
    };

    if let Some(status) = obj.get("status") {
        let in_range = status
            .as_u64()
            .is_some_and(|code| (200..=599).contains(&code));
        if !in_range {
            result.add_issue(
                LintIssue::error("E008", format!("Status {status} is outside 200..=599"), file)
                    .with_location(format!("{location}.status")),
            );
        }
    }

    if let Some(headers) = obj.get("headers") {
        validate_headers(file, headers, &format!("{location}.headers"), result);
    }

    if obj.contains_key("counter") && !obj.contains_key("url") {
        result.add_issue(
            LintIssue::warning("W003", "'counter' is set without 'url'", file)
                .with_location(format!("{location}.counter"))
                .with_suggestion("A redirected response usually reports its final url"),
        );
    }
}

/// Validate response headers.
pub fn validate_headers(file: &Path, headers: &Value, location: &str, result: &mut LintResult) {
    let Some(obj) = headers.as_object() else {
        result.add_issue(
            LintIssue::error("E009", "Headers must be a name: value mapping", file)
                .with_location(location),
        );
        return;
    };

    for (name, value) in obj {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            result.add_issue(
                LintIssue::error("E009", format!("Invalid header name '{name}'"), file)
                    .with_location(format!("{location}.{name}")),
            );
            continue;
        }
        let valid_value = value
            .as_str()
            .is_some_and(|v| HeaderValue::from_str(v).is_ok());
        if !valid_value {
            result.add_issue(
                LintIssue::error("E009", format!("Invalid value for header '{name}'"), file)
                    .with_location(format!("{location}.{name}"))
                    .with_suggestion("Header values must be quoted strings"),
            );
        }
    }
}

/// Warn about persistent fixtures whose every layer is replaced by later ones.
fn check_shadowing(
    file: &Path,
    fixtures: &[Value],
    persistent: &[(usize, Layers)],
    result: &mut LintResult,
) {
    for (pos, (idx, layers)) in persistent.iter().enumerate() {
        let later = &persistent[pos + 1..];
        let last_writer = |wanted: fn(&Layers) -> bool| {
            later
                .iter()
                .rev()
                .find(|(_, l)| wanted(l))
                .map(|(j, _)| *j)
        };

        let decision = if layers.decision {
            last_writer(|l| l.decision)
        } else {
            Some(*idx)
        };
        let behavior = if layers.behavior {
            last_writer(|l| l.behavior)
        } else {
            Some(*idx)
        };

        let (Some(decision), Some(behavior)) = (decision, behavior) else {
            continue;
        };
        let winner = decision.max(behavior);
        result.add_issue(
            LintIssue::warning(
                "W002",
                format!(
                    "Persistent {} is replaced by {}",
                    describe(fixtures, *idx),
                    describe(fixtures, winner)
                ),
                file,
            )
            .with_location(format!("fixtures[{idx}]"))
            .with_suggestion("Remove it, or mark it 'once: true'"),
        );
    }
}

fn describe(fixtures: &[Value], idx: usize) -> String {
    match fixtures[idx].get("name").and_then(Value::as_str) {
        Some(name) => format!("fixture '{name}'"),
        None => format!("fixtures[{idx}]"),
    }
}
