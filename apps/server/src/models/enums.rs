//! Enumerations shared by the production workflow.
//!
//! Every enumeration is stored as its lowercase snake_case token and parsed back with
//! [`StoredEnum::parse`]. Display labels for the boundary layer are derived from the token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// An enumeration persisted as a fixed string token.
pub trait StoredEnum: Sized + Copy + 'static {
    /// Name used in validation messages (e.g. "part status").
    const NAME: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Human-readable label: first letter upper case, underscores become spaces.
    fn label(&self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Token as it appears in rendered reports (e.g. `IN_PROGRESS`).
    fn report_token(&self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Parse caller input, rejecting values outside the recognised set.
pub fn parse_input<T: StoredEnum>(value: &str) -> AppResult<T> {
    let normalized = value.trim().to_lowercase();
    T::parse(&normalized).ok_or_else(|| {
        let allowed: Vec<&str> = T::ALL.iter().map(|v| v.as_str()).collect();
        AppError::InvalidInput(format!(
            "'{}' is not a valid {} (expected one of: {})",
            value,
            T::NAME,
            allowed.join(", ")
        ))
    })
}

/// Parse a token read back from the store.
pub fn decode<T: StoredEnum>(value: &str) -> AppResult<T> {
    T::parse(value).ok_or_else(|| {
        AppError::Database(format!("Unrecognised {} '{}' in store", T::NAME, value))
    })
}

macro_rules! stored_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl StoredEnum for $name {
            const NAME: &'static str = $label;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

stored_enum! {
    /// Aircraft category.
    AircraftType, "aircraft type" {
        Commercial => "commercial",
        Military => "military",
    }
}

stored_enum! {
    /// Part origin.
    PartType, "part type" {
        National => "national",
        Imported => "imported",
    }
}

stored_enum! {
    /// Part supply status. Any value may be set at any time; `Ready` gates reports.
    PartStatus, "part status" {
        InProduction => "in_production",
        InTransit => "in_transit",
        Ready => "ready",
    }
}

stored_enum! {
    /// Production stage lifecycle state.
    StageStatus, "stage status" {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

stored_enum! {
    TestType, "test type" {
        Electrical => "electrical",
        Hydraulic => "hydraulic",
        Aerodynamic => "aerodynamic",
    }
}

stored_enum! {
    TestResult, "test result" {
        Approved => "approved",
        Rejected => "rejected",
    }
}

// Declaration order is the privilege order: derived `Ord` makes
// `Administrator > Engineer > Operator`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    Operator,
    Engineer,
    Administrator,
}

impl StoredEnum for PermissionLevel {
    const NAME: &'static str = "permission level";
    const ALL: &'static [Self] = &[Self::Operator, Self::Engineer, Self::Administrator];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Engineer => "engineer",
            Self::Administrator => "administrator",
        }
    }
}

impl PermissionLevel {
    /// True when this level may perform actions that require `required`.
    pub fn satisfies(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}

impl std::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One value/label pair of the enumeration catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

impl EnumOption {
    pub fn all_of<T: StoredEnum>() -> Vec<EnumOption> {
        T::ALL
            .iter()
            .map(|v| EnumOption {
                value: v.as_str().to_string(),
                label: v.label(),
            })
            .collect()
    }
}

/// Every enumeration's options, keyed for form dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnumCatalogue {
    pub aircraft_types: Vec<EnumOption>,
    pub part_types: Vec<EnumOption>,
    pub part_statuses: Vec<EnumOption>,
    pub stage_statuses: Vec<EnumOption>,
    pub test_types: Vec<EnumOption>,
    pub test_results: Vec<EnumOption>,
    pub permission_levels: Vec<EnumOption>,
}

impl EnumCatalogue {
    pub fn build() -> Self {
        EnumCatalogue {
            aircraft_types: EnumOption::all_of::<AircraftType>(),
            part_types: EnumOption::all_of::<PartType>(),
            part_statuses: EnumOption::all_of::<PartStatus>(),
            stage_statuses: EnumOption::all_of::<StageStatus>(),
            test_types: EnumOption::all_of::<TestType>(),
            test_results: EnumOption::all_of::<TestResult>(),
            permission_levels: EnumOption::all_of::<PermissionLevel>(),
        }
    }
}
