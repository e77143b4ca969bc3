//! Ownership rules for the prompt archive.

use crate::error::CoreError;
use crate::types::UserId;

/// A save must be made on behalf of the signed-in user.
///
/// `requested` is the owner named in the request, if any; omitting it means
/// "me".
pub fn resolve_owner(caller: UserId, requested: Option<UserId>) -> Result<UserId, CoreError> {
    match requested {
        Some(owner) if owner != caller => Err(CoreError::Validation(
            "user_id does not match the authenticated user".into(),
        )),
        _ => Ok(caller),
    }
}
