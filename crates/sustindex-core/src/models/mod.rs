pub mod answer;
pub mod attempt;
pub mod document;
pub mod question;
pub mod recommendation;
pub mod survey;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
///
/// The backend serializes traversed relations (`survey.name`, `choice.text`)
/// as `null` when the relation is unset.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
