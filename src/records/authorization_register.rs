//! Register of issued travel authorizations.

use crate::calculation::generate_ta_number;
use crate::error::EngineResult;
use crate::models::TravelAuthorization;

/// Every travel authorization issued so far, in issue order.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationRegister {
    authorizations: Vec<TravelAuthorization>,
}

impl AuthorizationRegister {
    /// Creates an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the authorizations issued to exactly this name.
    pub fn count_for(&self, name: &str) -> usize {
        self.authorizations
            .iter()
            .filter(|ta| ta.name == name)
            .count()
    }

    /// Numbers an authorization for `year` and appends it.
    ///
    /// Any `ta_number` already on `authorization` is replaced.
    pub fn issue(
        &mut self,
        mut authorization: TravelAuthorization,
        year: i32,
    ) -> EngineResult<TravelAuthorization> {
        let existing = self.count_for(&authorization.name);
        authorization.ta_number = generate_ta_number(&authorization.name, year, existing)?;
        self.authorizations.push(authorization.clone());
        Ok(authorization)
    }

    /// Returns every issued authorization.
    pub fn all(&self) -> &[TravelAuthorization] {
        &self.authorizations
    }
}
