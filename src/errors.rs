use thiserror::Error;

/// One variant per failure kind so callers can branch on the kind instead of
/// matching message text. Every variant carries the message shown to the user.
/// Nothing here is ever retried; any failure aborts the whole request.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("configuration error: {0}")] Config(String),
    #[error("invalid input: {0}")] InvalidInput(String),
    #[error("failed to fetch source: {0}")] SourceFetch(String),
    #[error("generation failed: {0}")] Generation(String),
    #[error("could not parse model response as JSON: {0}")] Parse(String),
    #[error("model response missing usable test cases: {0}")] Schema(String),
    #[error("workbook error: {0}")] Workbook(String),
}
