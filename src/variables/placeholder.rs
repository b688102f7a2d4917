//! Placeholder scanning for templates.
//!
//! Templates mark substitution points with `$NAME` (optional) or `!$NAME`
//! (required). A single left-to-right pass splits a template into literal
//! text and placeholder tokens; anything that does not form a complete marker
//! stays literal.

/// A named substitution point inside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder<'a> {
    /// Identifier referenced by the marker, without `$` or `!`.
    pub name: &'a str,
    /// `true` for `!$NAME`, `false` for `$NAME`.
    pub required: bool,
}

impl Placeholder<'_> {
    /// The marker text as written in the template.
    pub fn marker(&self) -> String {
        if self.required {
            format!("!${}", self.name)
        } else {
            format!("${}", self.name)
        }
    }
}

/// One piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text copied to the output unchanged.
    Literal(&'a str),
    /// A marker to be replaced by a resolved value.
    Placeholder(Placeholder<'a>),
}

fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_identifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Returns the end of the identifier starting at `start`, or `start` if there is none.
fn identifier_end(bytes: &[u8], start: usize) -> usize {
    match bytes.get(start) {
        Some(&b) if is_identifier_start(b) => {}
        _ => return start,
    }
    let mut end = start + 1;
    while end < bytes.len() && is_identifier_char(bytes[end]) {
        end += 1;
    }
    end
}

/// Splits a template into literal and placeholder tokens.
///
/// Identifiers are `[A-Za-z_][A-Za-z0-9_]*`, so `$5` or a trailing `$` are
/// literal text. Concatenating the literals with each placeholder's
/// [`marker`](Placeholder::marker) reproduces the template exactly.
///
/// # Examples
///
/// ```
/// use apicat::variables::{tokenize, Placeholder, Token};
///
/// let tokens = tokenize("Bearer !$API_KEY");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Literal("Bearer "),
///         Token::Placeholder(Placeholder { name: "API_KEY", required: true }),
///     ]
/// );
/// ```
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let (required, dollar) = match bytes[i] {
            b'!' if bytes.get(i + 1) == Some(&b'$') => (true, i + 1),
            b'$' => (false, i),
            _ => {
                i += 1;
                continue;
            }
        };

        let name_start = dollar + 1;
        let name_end = identifier_end(bytes, name_start);
        if name_end == name_start {
            i = name_start;
            continue;
        }

        if literal_start < i {
            tokens.push(Token::Literal(&template[literal_start..i]));
        }
        tokens.push(Token::Placeholder(Placeholder {
            name: &template[name_start..name_end],
            required,
        }));
        i = name_end;
        literal_start = i;
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }

    tokens
}

/// Lists the distinct placeholders of a template in order of first appearance.
///
/// A name that appears both optional and required is reported once, as required.
pub fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    let mut found: Vec<Placeholder<'_>> = Vec::new();
    for token in tokenize(template) {
        if let Token::Placeholder(p) = token {
            match found.iter_mut().find(|f| f.name == p.name) {
                Some(existing) => existing.required |= p.required,
                None => found.push(p),
            }
        }
    }
    found
}
