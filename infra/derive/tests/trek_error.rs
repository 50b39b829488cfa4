use std::borrow::Cow;
use trek_derive::trek_error;

#[trek_error]
pub enum SampleError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid input{}: {message}", format_context(.context))]
    Invalid { message: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<(), SampleError> {
    Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).context("reading seed")
}

#[test]
fn source_errors_convert_with_context() {
    let err = read_missing().unwrap_err();
    assert!(matches!(err, SampleError::Io { .. }));
    assert_eq!(err.to_string(), "I/O failure (reading seed): gone");
}

#[test]
fn question_mark_converts_without_context() {
    fn inner() -> Result<(), SampleError> {
        Err::<(), _>(std::io::Error::other("boom"))?;
        Ok(())
    }

    assert_eq!(inner().unwrap_err().to_string(), "I/O failure: boom");
}

#[test]
fn context_can_be_attached_to_own_results() {
    let result: Result<(), SampleError> =
        Err(SampleError::Invalid { message: "blank name".to_owned(), context: None });

    let err = result.context("submit").unwrap_err();
    assert_eq!(err.to_string(), "Invalid input (submit): blank name");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: SampleError = "static failure".into();
    let from_owned: SampleError = String::from("owned failure").into();

    assert_eq!(from_static.to_string(), "Internal error: static failure");
    assert_eq!(from_owned.to_string(), "Internal error: owned failure");
}
