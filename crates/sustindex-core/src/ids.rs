//! Typed identifiers. The backend hands out integer primary keys; wrapping
//! them keeps a `QuestionId` from being passed where a `ChoiceId` belongs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! id_type {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub i64);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<i64> for $name {
                fn from(value: i64) -> Self {
                    Self(value)
                }
            }

            impl FromStr for $name {
                type Err = CoreError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.trim()
                        .parse::<i64>()
                        .map(Self)
                        .map_err(|_| CoreError::InvalidId(s.to_string()))
                }
            }
        )*
    };
}

id_type!(
    UserId, SurveyId, AttemptId, QuestionId, ChoiceId, AnswerId, DocumentId, CategoryId,
);
