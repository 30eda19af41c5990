//! Request-scoped caller context

/// Who is calling and on behalf of which company.
///
/// Built once per request by the interface layer and passed into every
/// application operation; stamps `created_by`/audit rows and scopes every
/// query by company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_name: String,
    pub company: String,
}

impl RequestContext {
    pub fn new(user_name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            company: company.into(),
        }
    }

    pub fn owns(&self, company: &str) -> bool {
        self.company == company
    }
}
