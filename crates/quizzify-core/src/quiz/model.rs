//! Test, question and result models as exchanged with `/api/tests`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reads `null` the same as a missing field.
///
/// The backend encodes empty slices as `null`, which plain
/// `#[serde(default)]` does not accept.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Kind of test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Form,
    Quiz,
    Test,
    StrictTest,
    #[serde(other)]
    Unknown,
}

/// Kind of question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    ManualInput,
    #[serde(other)]
    Unknown,
}

/// An image attached to a test or a variant. `content` is base64 as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A test as returned by the backend.
///
/// Collections are fetched with or without `answers` on each question
/// depending on the `withAnswers` flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Test {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<TestKind>,
    /// Creator of the test.
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub short_text: String,
    #[serde(default)]
    pub long_text: String,
    #[serde(default)]
    pub main_image: Option<Image>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub questions: Vec<Question>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<QuestionKind>,
    #[serde(default)]
    pub long_text: Option<String>,
    #[serde(default)]
    pub short_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Weight of the question in strict tests.
    #[serde(default)]
    pub points: Option<i32>,
    #[serde(default)]
    pub variants: Option<Variants>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Answer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_choice: Option<SingleChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_choice: Option<MultipleChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleChoice {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub fields: Vec<VariantField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoice {
    #[serde(default)]
    pub max: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub fields: Vec<VariantField>,
}

/// One selectable option. `id` links the option to the answer model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantField {
    pub id: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// Correct answer for a question; which field is set depends on the question kind.
///
/// The backend stores answers without field tags, so they come back as
/// `CorrectID`, `CorrectIDs` and `CorrectText`. Both spellings are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, alias = "CorrectID")]
    pub correct_id: Option<i64>,
    #[serde(default, alias = "CorrectIDs")]
    pub correct_ids: Option<Vec<i64>>,
    #[serde(default, alias = "CorrectText")]
    pub correct_text: Option<String>,
}

/// A user's answer to one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswer {
    pub question_id: i64,
    #[serde(default)]
    pub chosen_id: Option<i64>,
    #[serde(default)]
    pub chosen_ids: Option<Vec<i64>>,
    #[serde(rename = "writed_text", default)]
    pub written_text: Option<String>,
}

impl UserAnswer {
    pub fn single(question_id: i64, chosen_id: i64) -> Self {
        Self {
            question_id,
            chosen_id: Some(chosen_id),
            ..Self::default()
        }
    }

    pub fn multiple(question_id: i64, chosen_ids: Vec<i64>) -> Self {
        Self {
            question_id,
            chosen_ids: Some(chosen_ids),
            ..Self::default()
        }
    }

    pub fn text(question_id: i64, text: impl Into<String>) -> Self {
        Self {
            question_id,
            written_text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// A submitted result as listed by `GET /api/tests/results`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default)]
    pub test_id: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub user_answers: Vec<UserAnswer>,
    /// Outcome id for plain tests.
    #[serde(default)]
    pub result_id: Option<i64>,
    /// Share of correct answers for strict tests.
    #[serde(default)]
    pub percentage: Option<i32>,
}

/// Payload for `POST /api/tests`.
///
/// `creator_id` is stamped by the client from the current profile just
/// before submission. Fields not modelled here travel in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TestKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<Image>,
    #[serde(
        default,
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewTest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
