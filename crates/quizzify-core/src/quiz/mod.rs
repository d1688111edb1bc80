//! Tests, questions and submitted results.

pub mod model;
pub mod state;

pub use model::{
    Answer, Image, MultipleChoice, NewTest, Question, QuestionKind, SingleChoice, Test, TestKind,
    TestResult, UserAnswer, VariantField, Variants,
};
pub use state::ResourceState;
