use std::borrow::Cow;

/// Who can see an entry, stored as `status_permission` 0..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPermission {
    LoggedIn,
    MatchingPlan,
    AdminOnly,
}

impl StatusPermission {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LoggedIn => "visible when logged in",
            Self::MatchingPlan => "visible to users with matching plan",
            Self::AdminOnly => "admin only",
        }
    }
}

impl TryFrom<i64> for StatusPermission {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::LoggedIn),
            1 => Ok(Self::MatchingPlan),
            2 => Ok(Self::AdminOnly),
            other => Err(other),
        }
    }
}

/// Cell text for a raw `status_permission` value.
///
/// Values outside 0..=2 are labelled `unknown (<n>)` rather than clamped.
/// Called for every visible cell each frame, so it only logs at debug level.
pub fn permission_label(value: i64) -> Cow<'static, str> {
    match StatusPermission::try_from(value) {
        Ok(permission) => Cow::Borrowed(permission.label()),
        Err(other) => {
            log::debug!("status_permission out of range: {other}");
            Cow::Owned(format!("unknown ({other})"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_map_to_fixed_labels() {
        assert_eq!(permission_label(0), "visible when logged in");
        assert_eq!(permission_label(1), "visible to users with matching plan");
        assert_eq!(permission_label(2), "admin only");
    }

    #[test]
    fn out_of_range_values_are_labelled_unknown() {
        assert_eq!(permission_label(3), "unknown (3)");
        assert_eq!(permission_label(-1), "unknown (-1)");
    }
}
