//! Fixed field schema for cheque register records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Value type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
}

/// Static description of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub required: bool,
    pub display_title: &'static str,
    /// Displayed with thousands separators and sorted numerically
    pub grouped: bool,
}

/// A column of the register, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Narration,
    Amount,
    ChequeNo,
    Category,
    Status,
}

impl Field {
    /// Every field in schema order.
    pub const ALL: [Field; 5] = [
        Field::Narration,
        Field::Amount,
        Field::ChequeNo,
        Field::Category,
        Field::Status,
    ];

    /// Element name used in the source markup.
    pub fn name(self) -> &'static str {
        match self {
            Field::Narration => "Narration",
            Field::Amount => "Amount",
            Field::ChequeNo => "ChequeNo",
            Field::Category => "Category",
            Field::Status => "Status",
        }
    }

    pub fn spec(self) -> FieldSpec {
        match self {
            Field::Narration => FieldSpec {
                kind: FieldKind::String,
                required: true,
                display_title: "Narration",
                grouped: false,
            },
            Field::Amount => FieldSpec {
                kind: FieldKind::Number,
                required: true,
                display_title: "Amount",
                grouped: true,
            },
            Field::ChequeNo => FieldSpec {
                kind: FieldKind::Number,
                required: true,
                display_title: "Cheque No.",
                grouped: false,
            },
            Field::Category => FieldSpec {
                kind: FieldKind::String,
                required: false,
                display_title: "Category",
                grouped: false,
            },
            Field::Status => FieldSpec {
                kind: FieldKind::String,
                required: false,
                display_title: "Status",
                grouped: false,
            },
        }
    }

    /// Position in schema order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| {
                field.name().eq_ignore_ascii_case(wanted)
                    || field.spec().display_title.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| AppError::validation(format!("Unknown column '{wanted}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_matches_index() {
        for (position, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), position);
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("amount".parse::<Field>().unwrap(), Field::Amount);
        assert_eq!("CHEQUENO".parse::<Field>().unwrap(), Field::ChequeNo);
        assert_eq!("Cheque No.".parse::<Field>().unwrap(), Field::ChequeNo);
        assert!("payee".parse::<Field>().is_err());
    }

    #[test]
    fn test_only_amount_is_grouped() {
        let grouped: Vec<_> = Field::ALL.into_iter().filter(|f| f.spec().grouped).collect();
        assert_eq!(grouped, vec![Field::Amount]);
    }
}
