//! The greeting tool's output.

use chrono::{DateTime, Utc};

use crate::content::{iso_timestamp, Annotations, ToolOutput, PRIORITY_HIGH};
use crate::{Language, NonEmptyString};

/// Build the greeting result for `name` in `language`, stamped with the current time.
pub fn greeting(name: &NonEmptyString, language: Language) -> ToolOutput {
    greeting_at(name, language, Utc::now())
}

/// Build the greeting result with an explicit timestamp.
pub fn greeting_at(name: &NonEmptyString, language: Language, at: DateTime<Utc>) -> ToolOutput {
    let annotations = Annotations::for_user(PRIORITY_HIGH)
        .with_metadata("language", language.code())
        .with_metadata("description", language.description())
        .with_metadata("timestamp", iso_timestamp(at));

    ToolOutput::text(language.greet(name.as_str())).with_annotations(annotations)
}
