//! Catalog text parser.
//!
//! A catalog is a table: the first row names the columns
//! `service name url method headers body`, every further non-empty row is one
//! API definition. The first four columns never contain whitespace and are
//! split on any run of spaces or tabs. The rest of the row holds `headers`
//! and `body`: when it contains a tab it is split on runs of tabs, so JSON
//! may contain spaces, otherwise on runs of whitespace. Lines starting with
//! `#` are comments.

use crate::error::ApiError;
use crate::models::{ApiDefinition, HttpMethod};
use std::collections::HashSet;

/// Column names, in order, expected in the header row.
pub const COLUMNS: [&str; 6] = ["service", "name", "url", "method", "headers", "body"];

/// `headers` value meaning "no headers".
pub const NO_HEADERS: &str = "{}";

/// `body` value meaning "no body". The column may also be left off entirely.
pub const NO_BODY: &str = "-";

/// Columns before `headers`; none of them may contain whitespace.
const LEADING_COLUMNS: usize = 4;

/// Splits a row into fields, tolerating repeated and mixed separators.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(COLUMNS.len());
    let mut rest = line.trim();

    while fields.len() < LEADING_COLUMNS && !rest.is_empty() {
        let (field, tail) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));
        fields.push(field);
        rest = tail.trim_start();
    }

    if rest.contains('\t') {
        fields.extend(rest.split('\t').map(str::trim).filter(|f| !f.is_empty()));
    } else {
        fields.extend(rest.split_whitespace());
    }
    fields
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Parses catalog text into API definitions, in source order.
///
/// # Errors
///
/// Returns [`ApiError::MalformedRecord`] when the header row is missing or
/// wrong, a row has the wrong number of fields, a method is unknown, the
/// headers column is not `{}` or a JSON object, or a `(service, name)` pair
/// repeats.
///
/// # Examples
///
/// ```
/// use apicat::catalog::parse_catalog;
///
/// let source = "service name url method headers body\n\
///               local test http://localhost/$VAR GET {}\n";
/// let apis = parse_catalog(source).unwrap();
/// assert_eq!(apis.len(), 1);
/// assert_eq!(apis[0].id(), "local.test");
/// assert!(apis[0].body.is_none());
/// ```
pub fn parse_catalog(source: &str) -> Result<Vec<ApiDefinition>, ApiError> {
    let normalized = source.replace("\r\n", "\n");
    let mut rows = normalized
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty() && !is_comment(line));

    let (header_line, header) = rows
        .next()
        .ok_or_else(|| ApiError::malformed(1, "catalog is empty, expected a header row"))?;
    validate_header(header_line, header)?;

    let mut definitions = Vec::new();
    let mut seen = HashSet::new();

    for (line_number, line) in rows {
        let definition = parse_record(line_number, line)?;
        if !seen.insert((definition.service.clone(), definition.name.clone())) {
            return Err(ApiError::malformed(
                line_number,
                format!("duplicate API '{}'", definition.id()),
            ));
        }
        definitions.push(definition);
    }

    log::debug!("parsed {} API definitions", definitions.len());
    Ok(definitions)
}

fn validate_header(line_number: usize, line: &str) -> Result<(), ApiError> {
    let fields = split_fields(line);
    let matches = fields.len() == COLUMNS.len()
        && fields
            .iter()
            .zip(COLUMNS.iter())
            .all(|(field, column)| field.eq_ignore_ascii_case(column));

    if matches {
        Ok(())
    } else {
        Err(ApiError::malformed(
            line_number,
            format!(
                "expected header '{}', found '{}'",
                COLUMNS.join(" "),
                line.trim()
            ),
        ))
    }
}

/// Parses one data row.
fn parse_record(line_number: usize, line: &str) -> Result<ApiDefinition, ApiError> {
    let fields = split_fields(line);
    if fields.len() != COLUMNS.len() && fields.len() != COLUMNS.len() - 1 {
        return Err(ApiError::malformed(
            line_number,
            format!(
                "expected {} fields, found {}",
                COLUMNS.len(),
                fields.len()
            ),
        ));
    }

    let service = fields[0];
    if service.contains('.') {
        return Err(ApiError::malformed(
            line_number,
            format!("service '{}' must not contain '.'", service),
        ));
    }

    let method = HttpMethod::parse(fields[3]).ok_or_else(|| {
        ApiError::malformed(
            line_number,
            format!("unsupported HTTP method '{}'", fields[3]),
        )
    })?;

    let headers = parse_headers(line_number, fields[4])?;

    let body = match fields.get(5) {
        None => None,
        Some(&NO_BODY) => None,
        Some(body) => Some(body.to_string()),
    };

    Ok(ApiDefinition {
        service: service.to_string(),
        name: fields[1].to_string(),
        url: fields[2].to_string(),
        method,
        headers,
        body,
        line: line_number,
    })
}

/// Parses the headers column: `{}` or a JSON object of header name to value.
fn parse_headers(line_number: usize, field: &str) -> Result<Vec<(String, String)>, ApiError> {
    if field == NO_HEADERS {
        return Ok(Vec::new());
    }

    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(field)
        .map_err(|e| {
            ApiError::malformed(line_number, format!("headers must be a JSON object: {}", e))
        })?;

    object
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(ApiError::malformed(
                        line_number,
                        format!(
                            "header '{}' has invalid type (must be string, number, or boolean)",
                            name
                        ),
                    ))
                }
            };
            Ok((name, value))
        })
        .collect()
}
