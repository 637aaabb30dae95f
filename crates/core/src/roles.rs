//! User roles and the action → role permission table.
//!
//! The HTTP layer resolves a caller to an optional [`Role`] (none when the
//! request carries no valid token) and asks [`check`] whether an [`Action`]
//! is allowed. Missing credentials and insufficient privileges are distinct
//! failures: [`CoreError::Unauthorized`] vs [`CoreError::Forbidden`].

use crate::error::CoreError;

define_text_enum! {
    /// Permission tier of a user account.
    Role("role") {
        Admin => "ADMIN",
        Editor => "EDITOR",
        Translator => "TRANSLATOR",
        Viewer => "VIEWER",
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Viewer
    }
}

impl Role {
    /// Parse a requested role, falling back to [`Role::Viewer`] when the value
    /// is absent or not a known role. Used by self-registration.
    pub fn parse_or_default(value: Option<&str>) -> Role {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

/// Gated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewContent,
    CreateContent,
    EditContent,
    DeleteContent,
    EditTranslations,
    DeleteTranslations,
}

const ANY_ROLE: &[Role] = &[Role::Admin, Role::Editor, Role::Translator, Role::Viewer];
const CONTENT_AUTHORS: &[Role] = &[Role::Admin, Role::Editor];
const TRANSLATION_EDITORS: &[Role] = &[Role::Admin, Role::Editor, Role::Translator];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl Action {
    /// Roles permitted to perform this action.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Action::ViewContent => ANY_ROLE,
            Action::CreateContent | Action::EditContent => CONTENT_AUTHORS,
            Action::EditTranslations => TRANSLATION_EDITORS,
            Action::DeleteContent | Action::DeleteTranslations => ADMIN_ONLY,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Action::ViewContent => "view content",
            Action::CreateContent => "create content",
            Action::EditContent => "edit content",
            Action::DeleteContent => "delete content",
            Action::EditTranslations => "edit translations",
            Action::DeleteTranslations => "delete translations",
        }
    }
}

/// Whether `role` may perform `action`.
pub fn authorize(role: Role, action: Action) -> bool {
    action.allowed_roles().contains(&role)
}

/// Gate an action for a possibly unauthenticated caller.
///
/// - `None` fails with [`CoreError::Unauthorized`].
/// - A role outside the action's table fails with [`CoreError::Forbidden`].
pub fn check(role: Option<Role>, action: Action) -> Result<(), CoreError> {
    let role = role.ok_or_else(|| CoreError::Unauthorized("Authentication required".into()))?;
    if authorize(role, action) {
        Ok(())
    } else {
        let allowed: Vec<&str> = action.allowed_roles().iter().map(|r| r.as_str()).collect();
        Err(CoreError::Forbidden(format!(
            "Role {role} may not {}. Required: {}",
            action.describe(),
            allowed.join(" or ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" TRANSLATOR ".parse::<Role>().unwrap(), Role::Translator);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn unknown_registration_role_defaults_to_viewer() {
        assert_eq!(Role::parse_or_default(None), Role::Viewer);
        assert_eq!(Role::parse_or_default(Some("superuser")), Role::Viewer);
        assert_eq!(Role::parse_or_default(Some("EDITOR")), Role::Editor);
    }

    #[test]
    fn content_mutation_is_limited_to_admins_and_editors() {
        for action in [Action::CreateContent, Action::EditContent] {
            assert!(authorize(Role::Admin, action));
            assert!(authorize(Role::Editor, action));
            assert!(!authorize(Role::Translator, action));
            assert!(!authorize(Role::Viewer, action));
        }
    }

    #[test]
    fn deletion_is_admin_only() {
        for action in [Action::DeleteContent, Action::DeleteTranslations] {
            assert!(authorize(Role::Admin, action));
            assert!(!authorize(Role::Editor, action));
            assert!(!authorize(Role::Translator, action));
            assert!(!authorize(Role::Viewer, action));
        }
    }

    #[test]
    fn translators_may_edit_translations() {
        assert!(authorize(Role::Translator, Action::EditTranslations));
        assert!(authorize(Role::Editor, Action::EditTranslations));
        assert!(!authorize(Role::Viewer, Action::EditTranslations));
    }

    #[test]
    fn every_role_may_view() {
        for role in Role::ALL {
            assert!(authorize(*role, Action::ViewContent));
        }
    }

    #[test]
    fn missing_role_is_unauthorized_not_forbidden() {
        assert_matches!(
            check(None, Action::ViewContent),
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(
            check(Some(Role::Viewer), Action::DeleteContent),
            Err(CoreError::Forbidden(_))
        );
        assert!(check(Some(Role::Admin), Action::DeleteContent).is_ok());
    }
}
