//! Travel authorization number generation.
//!
//! Numbers take the form `TA-{code}-{yy}-{nnn}`, where `code` is derived
//! from the traveler's name, `yy` is the two-digit year and `nnn` is the
//! traveler's running count of authorizations.

use crate::error::{EngineError, EngineResult};

/// Derives the three-letter traveler code from a name.
///
/// The code is the first letter of the first word followed by the first two
/// letters of the second word. A single-word name uses its second and third
/// letters instead.
fn traveler_code(name: &str) -> Option<String> {
    let mut words = name.split_whitespace();
    let first = words.next()?;
    let initial: String = first.chars().take(1).collect();

    let rest: String = match words.next() {
        Some(second) => second.chars().take(2).collect(),
        None => first.chars().skip(1).take(2).collect(),
    };

    Some(format!("{}{}", initial, rest).to_uppercase())
}

/// Generates the next travel authorization number for a traveler.
///
/// `existing_for_name` is the number of authorizations already issued to
/// this exact name.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::generate_ta_number;
///
/// assert_eq!(generate_ta_number("Rania Haddad", 2025, 0)?, "TA-RHA-25-001");
/// assert_eq!(generate_ta_number("Rania Haddad", 2025, 11)?, "TA-RHA-25-012");
/// assert_eq!(generate_ta_number("Omar", 2026, 0)?, "TA-OMA-26-001");
/// # Ok::<(), dsa_engine::error::EngineError>(())
/// ```
pub fn generate_ta_number(name: &str, year: i32, existing_for_name: usize) -> EngineResult<String> {
    let code = traveler_code(name).ok_or_else(|| EngineError::InvalidInput {
        field: "name".to_string(),
        message: "a traveler name is required".to_string(),
    })?;

    Ok(format!(
        "TA-{}-{:02}-{:03}",
        code,
        year.rem_euclid(100),
        existing_for_name + 1
    ))
}
