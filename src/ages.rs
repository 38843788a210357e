//! Household age input
//!
//! Ages travel between views as `?ages=23,45,67`. Unset form slots are
//! dropped, and an input with nothing usable left is reported as
//! [`DistancingError::NoValidAges`] so the caller can send the visitor back
//! to the form.

use crate::error::{DistancingError, Result};
use log::warn;

/// Placeholder value of an age selector nobody touched
pub const UNSET_OPTION: &str = "UNSET";

/// Age preselected for the visitor themself
pub const DEFAULT_VISITOR_AGE: i32 = 23;

/// Parse `?ages=1,2`, `ages=1,2` or a bare `1,2` list
pub fn parse_ages(input: &str) -> Result<Vec<i32>> {
    let input = input.trim().trim_start_matches('?');

    let list = if input.contains('=') {
        input
            .split('&')
            .find_map(|pair| match pair.split_once('=') {
                Some(("ages", value)) => Some(value),
                _ => None,
            })
            .ok_or(DistancingError::NoValidAges)?
    } else {
        input
    };

    let list = list.replace("%2C", ",").replace("%2c", ",");
    let mut ages = Vec::new();
    for token in list.split(',').map(str::trim) {
        if token.is_empty() || token == UNSET_OPTION {
            continue;
        }
        match token.parse::<i32>() {
            Ok(age) => ages.push(age),
            Err(_) => warn!("skipping unparsable age {:?}", token),
        }
    }

    if ages.is_empty() {
        return Err(DistancingError::NoValidAges);
    }
    Ok(ages)
}

/// Serialize ages back into the query form
pub fn to_query(ages: &[i32]) -> String {
    let list: Vec<String> = ages.iter().map(i32::to_string).collect();
    format!("?ages={}", list.join(","))
}
