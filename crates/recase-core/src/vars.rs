//! `$name` / `${name}` variable expansion
//!
//! A single left-to-right scan driven by [`transition`], a pure function from the current
//! [`ScanState`] and the next character to the following state and a [`ScanAction`].
//! Names start with `_` or a lowercase letter and continue with `_`, letters, or digits.
//! Malformed references are never errors: whatever was collected is copied through
//! literally and scanning resumes.

use std::collections::HashMap;

/// Where the scanner is relative to a variable reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Outside any reference
    #[default]
    Plain,
    /// Just read a `$`
    SawDollar,
    /// Reading the name of a `$name` reference
    BareName,
    /// Reading the name of a `${name}` reference
    BracedName,
}

/// What the scanner does with the character it was handed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    /// Copy the character to the output
    Emit,
    /// Start a pending reference with this `$`
    Open,
    /// Record the `{` of a braced reference
    Brace,
    /// Append the character to the pending name
    Name,
    /// The `}` closing a braced reference: expand it
    Close,
    /// The bare name ended: expand it, then rescan this character from `Plain`
    ExpandAndRescan,
    /// The reference is malformed: copy it through literally, then rescan this character
    /// from `Plain`
    FlushAndRescan,
}

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_lowercase()
}

fn is_name_char(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic() || ch.is_numeric()
}

fn lookup<'v>(vars: &'v HashMap<String, String>, name: &str) -> &'v str {
    vars.get(name).map(String::as_str).unwrap_or_default()
}

/// Advance the scanner by one character
///
/// `has_name` tells whether the pending braced reference already holds at least one name
/// character, since `${}` is not a reference.
pub fn transition(state: ScanState, ch: char, has_name: bool) -> (ScanState, ScanAction) {
    use ScanAction::*;
    use ScanState::*;

    match state {
        Plain if ch == '$' => (SawDollar, Open),
        Plain => (Plain, Emit),
        SawDollar if ch == '{' => (BracedName, Brace),
        SawDollar if is_name_start(ch) => (BareName, Name),
        SawDollar => (Plain, FlushAndRescan),
        BareName if is_name_char(ch) => (BareName, Name),
        BareName => (Plain, ExpandAndRescan),
        BracedName if ch == '}' && has_name => (Plain, Close),
        BracedName if !has_name && is_name_start(ch) => (BracedName, Name),
        BracedName if has_name && is_name_char(ch) => (BracedName, Name),
        BracedName => (Plain, FlushAndRescan),
    }
}

/// Expand every `$name` and `${name}` in `text` from `vars`
///
/// Names missing from `vars` expand to the empty string.
///
/// # Examples
///
/// ```
/// use recase_core::vars::expand_vars;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("text".to_string(), "string".to_string())]);
/// assert_eq!(
///     expand_vars("$text plain ${text} input $text", &vars),
///     "string plain string input string"
/// );
/// assert_eq!(expand_vars("Plain ${ text} input", &vars), "Plain ${ text} input");
/// ```
pub fn expand_vars(text: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = ScanState::Plain;
    // Everything collected for the pending reference, starting with its `$`
    let mut pending = String::new();
    let mut name = String::new();

    for ch in text.chars() {
        let (next, action) = transition(state, ch, !name.is_empty());
        match action {
            ScanAction::Emit => out.push(ch),
            ScanAction::Open | ScanAction::Brace => pending.push(ch),
            ScanAction::Name => {
                pending.push(ch);
                name.push(ch);
            }
            ScanAction::Close | ScanAction::ExpandAndRescan => out.push_str(lookup(vars, &name)),
            ScanAction::FlushAndRescan => out.push_str(&pending),
        }
        state = next;

        if next == ScanState::Plain && action != ScanAction::Emit {
            pending.clear();
            name.clear();
        }

        if matches!(
            action,
            ScanAction::ExpandAndRescan | ScanAction::FlushAndRescan
        ) {
            // The character that ended a reference may open the next one
            let (next, action) = transition(ScanState::Plain, ch, false);
            match action {
                ScanAction::Open => pending.push(ch),
                _ => out.push(ch),
            }
            state = next;
        }
    }

    match state {
        ScanState::BareName => out.push_str(lookup(vars, &name)),
        ScanState::SawDollar | ScanState::BracedName => out.push_str(&pending),
        ScanState::Plain => {}
    }

    out
}
