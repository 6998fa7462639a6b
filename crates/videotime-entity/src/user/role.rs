//! LMS role of the calling user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use videotime_core::AppError;

/// Role asserted by the LMS gateway for the current request.
///
/// Ordered by privilege: Admin > Teacher > Student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Site administrator: may change settings and erase data.
    Admin,
    /// Course teacher: may configure instances and read reports.
    Teacher,
    /// Learner: may only track their own sessions.
    Student,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Teacher => 2,
            Self::Student => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "teacher" | "editingteacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            _ => Err(AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, teacher, student"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Teacher));
        assert!(UserRole::Teacher.has_at_least(&UserRole::Teacher));
        assert!(!UserRole::Student.has_at_least(&UserRole::Teacher));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(
            "editingteacher".parse::<UserRole>().unwrap(),
            UserRole::Teacher
        );
        assert!("guest".parse::<UserRole>().is_err());
    }
}
