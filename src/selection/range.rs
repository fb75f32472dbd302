// file: src/selection/range.rs
// version: 1.0.0
// guid: 3244b9ef-8f38-4a82-8a44-c5db84e1361a

//! Parsing of comma/range interface selections such as `1,3-5,8`

use std::collections::BTreeSet;
use thiserror::Error;

/// Why a selection was refused; the message is shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Do not enter blank values.")]
    Blank,

    #[error("Looks like there was an issue with the value you entered, please try again.")]
    InvalidValue(String),

    #[error("Looks like you made an invalid selection, please try again.")]
    OutOfRange(usize),
}

fn parse_number(token: &str) -> Result<usize, SelectionError> {
    token
        .trim()
        .parse()
        .map_err(|_| SelectionError::InvalidValue(token.trim().to_string()))
}

fn check_bounds(index: usize, max: usize) -> Result<usize, SelectionError> {
    if index == 0 || index > max {
        Err(SelectionError::OutOfRange(index))
    } else {
        Ok(index)
    }
}

/// Parse 1-based indices, unique and ascending, each within `1..=max`
///
/// Tokens are separated by commas; `a-b` is an inclusive range.
pub fn parse_index_selection(input: &str, max: usize) -> Result<Vec<usize>, SelectionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SelectionError::Blank);
    }

    let mut indices = BTreeSet::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once('-') {
            Some((low, high)) => {
                let low = parse_number(low)?;
                let high = parse_number(high)?;
                if low > high {
                    return Err(SelectionError::InvalidValue(token.to_string()));
                }
                check_bounds(low, max)?;
                check_bounds(high, max)?;
                indices.extend(low..=high);
            }
            None => {
                indices.insert(check_bounds(parse_number(token)?, max)?);
            }
        }
    }

    if indices.is_empty() {
        return Err(SelectionError::Blank);
    }
    Ok(indices.into_iter().collect())
}

/// Map 1-based indices onto the list that was shown to the operator
pub fn resolve_selection(indices: &[usize], available: &[String]) -> Result<Vec<String>, SelectionError> {
    indices
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .and_then(|i| available.get(i))
                .cloned()
                .ok_or(SelectionError::OutOfRange(index))
        })
        .collect()
}
