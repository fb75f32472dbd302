// file: src/textfsm/engine.rs
// version: 1.1.0
// guid: 4cc7ff63-708f-4313-bd8a-554520d2c9a3

//! Runs a compiled template over command output and collects the records

use super::template::{
    Action, LineOp, RecordOp, Template, ValueDef, END_STATE, EOF_STATE, START_STATE,
};
use crate::error::VlanAssignError;
use crate::Result;
use tracing::{debug, trace};

/// One cell of a parsed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    Single(String),
    List(Vec<String>),
}

impl ParsedValue {
    fn empty_for(value: &ValueDef) -> Self {
        if value.options.list {
            ParsedValue::List(Vec::new())
        } else {
            ParsedValue::Single(String::new())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ParsedValue::Single(s) => s.is_empty(),
            ParsedValue::List(items) => items.is_empty(),
        }
    }

    /// Scalar text, `None` for list values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParsedValue::Single(s) => Some(s),
            ParsedValue::List(_) => None,
        }
    }

    fn assign(&mut self, text: &str) {
        match self {
            ParsedValue::Single(s) => *s = text.to_string(),
            ParsedValue::List(items) => items.push(text.to_string()),
        }
    }
}

/// Rows produced by a template, addressed by value name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    header: Vec<String>,
    rows: Vec<Vec<ParsedValue>>,
}

impl ParsedTable {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            header: &self.header,
            values,
        })
    }
}

/// Borrowed view of a single row
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    header: &'a [String],
    values: &'a [ParsedValue],
}

impl<'a> Record<'a> {
    pub fn get(&self, name: &str) -> Option<&'a ParsedValue> {
        self.header
            .iter()
            .position(|h| h == name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Scalar text of a column, empty when missing or a list
    pub fn text(&self, name: &str) -> &'a str {
        self.get(name).and_then(ParsedValue::as_str).unwrap_or("")
    }
}

struct Run<'t> {
    template: &'t Template,
    current: Vec<ParsedValue>,
    rows: Vec<Vec<ParsedValue>>,
}

impl<'t> Run<'t> {
    fn new(template: &'t Template) -> Self {
        Self {
            template,
            current: template.values().iter().map(ParsedValue::empty_for).collect(),
            rows: Vec::new(),
        }
    }

    fn assign(&mut self, idx: usize, text: &str) {
        self.current[idx].assign(text);

        if self.template.values()[idx].options.fillup {
            for row in self.rows.iter_mut().rev() {
                if !row[idx].is_empty() {
                    break;
                }
                row[idx] = self.current[idx].clone();
            }
        }
    }

    fn record(&mut self) {
        let values = self.template.values();
        let all_empty = self.current.iter().all(ParsedValue::is_empty);
        let missing_required = values
            .iter()
            .zip(&self.current)
            .any(|(def, value)| def.options.required && value.is_empty());

        if all_empty || missing_required {
            trace!("Dropping incomplete record");
        } else {
            self.rows.push(self.current.clone());
        }
        self.clear(false);
    }

    fn clear(&mut self, all: bool) {
        for (def, value) in self.template.values().iter().zip(self.current.iter_mut()) {
            if all || !def.options.filldown {
                *value = ParsedValue::empty_for(def);
            }
        }
    }

    fn apply(&mut self, op: RecordOp) {
        match op {
            RecordOp::NoRecord => {}
            RecordOp::Record => self.record(),
            RecordOp::Clear => self.clear(false),
            RecordOp::ClearAll => self.clear(true),
        }
    }
}

/// Parse command output with a compiled template
pub fn parse_text(template: &Template, text: &str) -> Result<ParsedTable> {
    let mut run = Run::new(template);
    let mut state = START_STATE.to_string();

    'lines: for (idx, line) in text.lines().enumerate() {
        for rule in template.rules(&state) {
            let Some(captures) = rule.regex.captures(line) else {
                continue;
            };

            for (value_idx, def) in template.values().iter().enumerate() {
                if let Some(m) = captures.name(&def.name) {
                    run.assign(value_idx, m.as_str());
                }
            }

            match &rule.action {
                Action::Error(message) => {
                    return Err(VlanAssignError::parse(format!(
                        "template rule on line {} rejected input line {}: {}",
                        rule.line_no,
                        idx + 1,
                        message.as_deref().unwrap_or(line)
                    )));
                }
                Action::Proceed {
                    line_op,
                    record_op,
                    new_state,
                } => {
                    run.apply(*record_op);
                    if let Some(next) = new_state {
                        trace!("State {} -> {}", state, next);
                        state = next.clone();
                    }
                    if state == END_STATE || state == EOF_STATE {
                        break 'lines;
                    }
                    if *line_op == LineOp::Next {
                        continue 'lines;
                    }
                }
            }
        }
    }

    if state != END_STATE && !template.has_state(EOF_STATE) {
        run.record();
    }

    debug!("Template produced {} record(s)", run.rows.len());
    Ok(ParsedTable {
        header: template.header(),
        rows: run.rows,
    })
}

impl Template {
    /// Parse command output into a table
    pub fn parse_text(&self, text: &str) -> Result<ParsedTable> {
        parse_text(self, text)
    }
}
