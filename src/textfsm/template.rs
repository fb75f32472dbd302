// file: src/textfsm/template.rs
// version: 1.1.0
// guid: cfada151-bd92-4d90-bd8f-fc0020df0bf9

//! TextFSM template compilation
//!
//! A template is a list of `Value` definitions followed by one or more state
//! blocks. Each state holds ordered rules: an anchored regex that may
//! reference values as `${NAME}`, plus an optional `-> Action`.
//!
//! ```text
//! Value Required VLAN_ID (\d+)
//! Value NAME (\S+)
//!
//! Start
//!   ^${VLAN_ID}\s+${NAME} -> Record
//! ```

use crate::error::VlanAssignError;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name of the state every template starts in
pub const START_STATE: &str = "Start";
/// Reserved state that stops processing without the implicit record
pub const END_STATE: &str = "End";
/// Reserved state that stops processing and suppresses the implicit record when declared
pub const EOF_STATE: &str = "EOF";

/// Options attached to a value definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueOptions {
    pub filldown: bool,
    pub fillup: bool,
    pub required: bool,
    pub list: bool,
    pub key: bool,
}

impl ValueOptions {
    fn parse(raw: &str, line_no: usize) -> Result<Self> {
        let mut options = Self::default();
        for option in raw.split(',').map(str::trim) {
            let flag = match option {
                "Filldown" => &mut options.filldown,
                "Fillup" => &mut options.fillup,
                "Required" => &mut options.required,
                "List" => &mut options.list,
                "Key" => &mut options.key,
                other => {
                    return Err(VlanAssignError::template(format!(
                        "line {}: unknown value option '{}'",
                        line_no, other
                    )))
                }
            };
            if *flag {
                return Err(VlanAssignError::template(format!(
                    "line {}: duplicate value option '{}'",
                    line_no, option
                )));
            }
            *flag = true;
        }
        Ok(options)
    }
}

/// A `Value` line from the template header
#[derive(Debug, Clone)]
pub struct ValueDef {
    pub name: String,
    pub regex: String,
    pub options: ValueOptions,
}

impl ValueDef {
    /// Named capture group that replaces `${NAME}` inside rules
    fn capture_group(&self) -> String {
        format!("(?P<{}>{})", self.name, &self.regex[1..self.regex.len() - 1])
    }
}

/// What happens to the input line after a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOp {
    Next,
    Continue,
}

/// What happens to the current row after a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOp {
    NoRecord,
    Record,
    Clear,
    ClearAll,
}

/// Parsed `-> Action` clause of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Proceed {
        line_op: LineOp,
        record_op: RecordOp,
        new_state: Option<String>,
    },
    Error(Option<String>),
}

impl Default for Action {
    fn default() -> Self {
        Action::Proceed {
            line_op: LineOp::Next,
            record_op: RecordOp::NoRecord,
            new_state: None,
        }
    }
}

impl Action {
    fn parse(raw: &str, line_no: usize) -> Result<Self> {
        let raw = raw.trim();
        if raw == "Error" || raw.starts_with("Error ") {
            let message = raw["Error".len()..].trim().trim_matches('"');
            return Ok(Action::Error(if message.is_empty() {
                None
            } else {
                Some(message.to_string())
            }));
        }

        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let (ops, new_state) = match tokens.as_slice() {
            [] => return Ok(Action::default()),
            [first] if is_operation(first) => (Some(*first), None),
            [first] => (None, Some(*first)),
            [first, second] if is_operation(first) => (Some(*first), Some(*second)),
            _ => {
                return Err(VlanAssignError::template(format!(
                    "line {}: malformed action '{}'",
                    line_no, raw
                )))
            }
        };

        let (line_op, record_op) = match ops {
            Some(ops) => parse_operations(ops, line_no)?,
            None => (LineOp::Next, RecordOp::NoRecord),
        };

        if line_op == LineOp::Continue && new_state.is_some() {
            return Err(VlanAssignError::template(format!(
                "line {}: 'Continue' cannot change state",
                line_no
            )));
        }

        Ok(Action::Proceed {
            line_op,
            record_op,
            new_state: new_state.map(str::to_string),
        })
    }
}

fn line_op_from(token: &str) -> Option<LineOp> {
    match token {
        "Next" => Some(LineOp::Next),
        "Continue" => Some(LineOp::Continue),
        _ => None,
    }
}

fn record_op_from(token: &str) -> Option<RecordOp> {
    match token {
        "NoRecord" => Some(RecordOp::NoRecord),
        "Record" => Some(RecordOp::Record),
        "Clear" => Some(RecordOp::Clear),
        "Clearall" => Some(RecordOp::ClearAll),
        _ => None,
    }
}

fn is_operation(token: &str) -> bool {
    token.contains('.') || line_op_from(token).is_some() || record_op_from(token).is_some()
}

fn parse_operations(token: &str, line_no: usize) -> Result<(LineOp, RecordOp)> {
    let unknown = || {
        VlanAssignError::template(format!("line {}: unknown action '{}'", line_no, token))
    };

    if let Some((line, record)) = token.split_once('.') {
        let line_op = line_op_from(line).ok_or_else(unknown)?;
        let record_op = record_op_from(record).ok_or_else(unknown)?;
        return Ok((line_op, record_op));
    }
    if let Some(line_op) = line_op_from(token) {
        return Ok((line_op, RecordOp::NoRecord));
    }
    record_op_from(token)
        .map(|record_op| (LineOp::Next, record_op))
        .ok_or_else(unknown)
}

/// A compiled rule inside a state
#[derive(Debug, Clone)]
pub struct Rule {
    pub regex: Regex,
    pub action: Action,
    pub line_no: usize,
}

/// A compiled TextFSM template
#[derive(Debug, Clone)]
pub struct Template {
    values: Vec<ValueDef>,
    states: HashMap<String, Vec<Rule>>,
}

impl Template {
    /// Load and compile a template file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VlanAssignError::template(format!(
                "Failed to read template {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Compiling template {}", path.display());
        Self::parse(&content)
    }

    /// Compile template text
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));
        let mut values: Vec<ValueDef> = Vec::new();

        // Value section runs until the first blank line
        for (line_no, line) in lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if trimmed.is_empty() {
                if values.is_empty() {
                    continue;
                }
                break;
            }
            let Some(rest) = trimmed.strip_prefix("Value ") else {
                return Err(VlanAssignError::template(format!(
                    "line {}: expected a 'Value' definition, found '{}'",
                    line_no, trimmed
                )));
            };
            let value = parse_value(rest, line_no)?;
            if values.iter().any(|existing| existing.name == value.name) {
                return Err(VlanAssignError::template(format!(
                    "line {}: duplicate value '{}'",
                    line_no, value.name
                )));
            }
            values.push(value);
        }

        if values.is_empty() {
            return Err(VlanAssignError::template("template defines no values"));
        }

        let mut states: HashMap<String, Vec<Rule>> = HashMap::new();
        let mut current: Option<String> = None;

        for (line_no, line) in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                current = None;
                continue;
            }
            if trimmed.starts_with('#') {
                continue;
            }

            let indented = line.starts_with(' ') || line.starts_with('\t');
            if !indented {
                if !is_identifier(trimmed) {
                    return Err(VlanAssignError::template(format!(
                        "line {}: invalid state name '{}'",
                        line_no, trimmed
                    )));
                }
                if states.contains_key(trimmed) {
                    return Err(VlanAssignError::template(format!(
                        "line {}: duplicate state '{}'",
                        line_no, trimmed
                    )));
                }
                if trimmed == END_STATE {
                    return Err(VlanAssignError::template(format!(
                        "line {}: '{}' is reserved and cannot be declared",
                        line_no, END_STATE
                    )));
                }
                states.insert(trimmed.to_string(), Vec::new());
                current = Some(trimmed.to_string());
                continue;
            }

            let Some(state) = current.as_ref() else {
                return Err(VlanAssignError::template(format!(
                    "line {}: rule outside of a state",
                    line_no
                )));
            };
            if !trimmed.starts_with('^') {
                return Err(VlanAssignError::template(format!(
                    "line {}: rules must start with '^'",
                    line_no
                )));
            }
            let rule = compile_rule(trimmed, line_no, &values)?;
            if let Some(rules) = states.get_mut(state) {
                rules.push(rule);
            }
        }

        if !states.contains_key(START_STATE) {
            return Err(VlanAssignError::template("missing 'Start' state"));
        }

        for rules in states.values() {
            for rule in rules {
                if let Action::Proceed {
                    new_state: Some(next),
                    ..
                } = &rule.action
                {
                    let reserved = next == END_STATE || next == EOF_STATE;
                    if !reserved && !states.contains_key(next) {
                        return Err(VlanAssignError::template(format!(
                            "line {}: transition to undefined state '{}'",
                            rule.line_no, next
                        )));
                    }
                }
            }
        }

        Ok(Self { values, states })
    }

    pub fn values(&self) -> &[ValueDef] {
        &self.values
    }

    /// Column names in definition order
    pub fn header(&self) -> Vec<String> {
        self.values.iter().map(|v| v.name.clone()).collect()
    }

    pub fn rules(&self, state: &str) -> &[Rule] {
        self.states.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(rest: &str, line_no: usize) -> Result<ValueDef> {
    let regex_start = rest.find('(').ok_or_else(|| {
        VlanAssignError::template(format!("line {}: value is missing its regex", line_no))
    })?;
    let (head, regex) = rest.split_at(regex_start);
    let regex = regex.trim();

    let head: Vec<&str> = head.split_whitespace().collect();
    let (options, name) = match head.as_slice() {
        [name] => (ValueOptions::default(), *name),
        [options, name] => (ValueOptions::parse(options, line_no)?, *name),
        _ => {
            return Err(VlanAssignError::template(format!(
                "line {}: malformed value definition",
                line_no
            )))
        }
    };

    if !is_identifier(name) {
        return Err(VlanAssignError::template(format!(
            "line {}: invalid value name '{}'",
            line_no, name
        )));
    }
    if !regex.ends_with(')') || regex.len() < 2 {
        return Err(VlanAssignError::template(format!(
            "line {}: value regex must be wrapped in parentheses",
            line_no
        )));
    }
    Regex::new(regex).map_err(|e| {
        VlanAssignError::template(format!("line {}: invalid value regex: {}", line_no, e))
    })?;

    Ok(ValueDef {
        name: name.to_string(),
        regex: regex.to_string(),
        options,
    })
}

/// Split a rule into its pattern and the text after `->`
fn split_action(rule: &str) -> (&str, Option<&str>) {
    let bytes = rule.as_bytes();
    let arrow = rule
        .match_indices("->")
        .map(|(idx, _)| idx)
        .filter(|idx| *idx > 0 && (bytes[idx - 1] == b' ' || bytes[idx - 1] == b'\t'))
        .last();
    match arrow {
        Some(idx) => (rule[..idx].trim_end(), Some(&rule[idx + 2..])),
        None => (rule, None),
    }
}

fn expand_variables(pattern: &str, values: &[ValueDef], line_no: usize) -> Result<String> {
    let mut expanded = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(idx) = rest.find('$') {
        expanded.push_str(&rest[..idx]);
        let tail = &rest[idx + 1..];
        if let Some(after) = tail.strip_prefix('$') {
            expanded.push('$');
            rest = after;
        } else if let Some(after) = tail.strip_prefix('{') {
            let close = after.find('}').ok_or_else(|| {
                VlanAssignError::template(format!("line {}: unterminated '${{'", line_no))
            })?;
            let name = &after[..close];
            let value = values.iter().find(|v| v.name == name).ok_or_else(|| {
                VlanAssignError::template(format!(
                    "line {}: unknown variable '{}'",
                    line_no, name
                ))
            })?;
            expanded.push_str(&value.capture_group());
            rest = &after[close + 1..];
        } else {
            expanded.push('$');
            rest = tail;
        }
    }
    expanded.push_str(rest);
    Ok(expanded)
}

fn compile_rule(line: &str, line_no: usize, values: &[ValueDef]) -> Result<Rule> {
    let (pattern, action) = split_action(line);
    let action = match action {
        Some(raw) => Action::parse(raw, line_no)?,
        None => Action::default(),
    };
    let expanded = expand_variables(pattern, values, line_no)?;
    let regex = Regex::new(&expanded).map_err(|e| {
        VlanAssignError::template(format!("line {}: invalid rule regex: {}", line_no, e))
    })?;

    Ok(Rule {
        regex,
        action,
        line_no,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "Value Required ID (\\d+)\nValue Filldown,List NAME (\\S+)\n\nStart\n  ^${ID}\\s+${NAME}$$ -> Record\n";

    #[test]
    fn test_parse_values_and_options() {
        // Act
        let template = Template::parse(MINIMAL).unwrap();

        // Assert
        assert_eq!(template.header(), vec!["ID".to_string(), "NAME".to_string()]);
        assert!(template.values()[0].options.required);
        assert!(template.values()[1].options.filldown);
        assert!(template.values()[1].options.list);
        assert_eq!(template.rules(START_STATE).len(), 1);
    }

    #[test]
    fn test_variable_expansion_builds_named_groups() {
        let template = Template::parse(MINIMAL).unwrap();
        let rule = &template.rules(START_STATE)[0];

        assert_eq!(rule.regex.as_str(), "^(?P<ID>\\d+)\\s+(?P<NAME>\\S+)$");
        assert_eq!(
            rule.action,
            Action::Proceed {
                line_op: LineOp::Next,
                record_op: RecordOp::Record,
                new_state: None,
            }
        );
    }

    #[test]
    fn test_action_forms() {
        assert_eq!(
            Action::parse("Continue.Record", 1).unwrap(),
            Action::Proceed {
                line_op: LineOp::Continue,
                record_op: RecordOp::Record,
                new_state: None,
            }
        );
        assert_eq!(
            Action::parse("Interfaces", 1).unwrap(),
            Action::Proceed {
                line_op: LineOp::Next,
                record_op: RecordOp::NoRecord,
                new_state: Some("Interfaces".to_string()),
            }
        );
        assert_eq!(
            Action::parse("Clearall End", 1).unwrap(),
            Action::Proceed {
                line_op: LineOp::Next,
                record_op: RecordOp::ClearAll,
                new_state: Some("End".to_string()),
            }
        );
        assert_eq!(
            Action::parse("Error \"bad line\"", 1).unwrap(),
            Action::Error(Some("bad line".to_string()))
        );
    }

    #[test]
    fn test_continue_with_state_change_is_rejected() {
        let text = "Value A (\\S+)\n\nStart\n  ^${A} -> Continue Other\n\nOther\n  ^x\n";
        let err = Template::parse(text).unwrap_err();
        assert!(err.to_string().contains("cannot change state"));
    }

    #[test]
    fn test_undefined_state_is_rejected() {
        let text = "Value A (\\S+)\n\nStart\n  ^${A} -> Missing\n";
        let err = Template::parse(text).unwrap_err();
        assert!(err.to_string().contains("undefined state 'Missing'"));
    }

    #[test]
    fn test_unknown_variable_is_rejected() {
        let text = "Value A (\\S+)\n\nStart\n  ^${B}\n";
        let err = Template::parse(text).unwrap_err();
        assert!(err.to_string().contains("unknown variable 'B'"));
    }

    #[test]
    fn test_missing_start_state_is_rejected() {
        let text = "Value A (\\S+)\n\nBegin\n  ^${A}\n";
        let err = Template::parse(text).unwrap_err();
        assert!(err.to_string().contains("missing 'Start' state"));
    }

    #[test]
    fn test_unknown_option_and_duplicate_value() {
        let err = Template::parse("Value Sticky A (\\S+)\n\nStart\n  ^x\n").unwrap_err();
        assert!(err.to_string().contains("unknown value option 'Sticky'"));

        let err = Template::parse("Value A (\\S+)\nValue A (\\d+)\n\nStart\n  ^x\n").unwrap_err();
        assert!(err.to_string().contains("duplicate value 'A'"));
    }

    #[test]
    fn test_arrow_inside_pattern_without_whitespace_is_literal() {
        let (pattern, action) = split_action("^a->b -> Record");
        assert_eq!(pattern, "^a->b");
        assert_eq!(action, Some(" Record"));

        let (pattern, action) = split_action("^a->b");
        assert_eq!(pattern, "^a->b");
        assert_eq!(action, None);
    }

    #[test]
    fn test_comments_are_ignored() {
        let text = "# leading comment\nValue A (\\S+)\n\n# state comment\nStart\n  # rule comment\n  ^${A} -> Record\n";
        let template = Template::parse(text).unwrap();
        assert_eq!(template.rules(START_STATE).len(), 1);
    }

    #[test]
    fn test_invalid_regexes_are_template_errors() {
        let err = Template::parse("Value A ([a-)\n\nStart\n  ^x\n").unwrap_err();
        assert!(matches!(err, VlanAssignError::Template(_)));
        assert!(err.to_string().contains("line 1: invalid value regex"));

        let err = Template::parse("Value A (\\S+)\n\nStart\n  ^${A}[\n").unwrap_err();
        assert!(err.to_string().contains("line 4: invalid rule regex"));
    }
}
