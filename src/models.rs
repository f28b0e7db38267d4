use serde::{Deserialize, Serialize};

/// JWT claims issued by the external identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account username.
    pub sub: String,
    /// Display name, mirrored into attendance records.
    pub name: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,

    pub token_type: TokenType,
    /// Present only if this account is linked to an employee directory entry
    pub employee_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
