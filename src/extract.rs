//! Field extraction from one Selenium HTML report.
//!
//! A report carries its summary as table rows of the form
//! `<td>numTestPasses:</td><td>4</td>`. Extraction is a streaming scan over
//! the `<td>` cell texts in document order: once a cell matches the wanted
//! field name, the very next cell is the value and the scan stops. Each
//! field gets its own early-terminating pass, so a name that occurs twice
//! is only ever honored at its first occurrence.

use crate::error::ExtractError;
use crate::types::TestResult;
use quick_xml::events::Event;
use quick_xml::Reader;

pub const RESULT: &str = "result:";
pub const TOTAL_TIME: &str = "totalTime:";
pub const NUM_TEST_PASSES: &str = "numTestPasses:";
pub const NUM_TEST_FAILURES: &str = "numTestFailures:";
pub const NUM_COMMAND_PASSES: &str = "numCommandPasses:";
pub const NUM_COMMAND_FAILURES: &str = "numCommandFailures:";
pub const NUM_COMMAND_ERRORS: &str = "numCommandErrors:";

/// Lazy iterator over the trimmed text content of each `<td>` element, in
/// document order. Tokenizer failures end the iteration with an error for
/// the whole file.
pub struct CellTexts<'a> {
    reader: Reader<&'a [u8]>,
    done: bool,
}

impl<'a> CellTexts<'a> {
    pub fn new(doc: &'a str) -> Self {
        let mut reader = Reader::from_str(doc);
        let config = reader.config_mut();
        // Report files are HTML-ish, not strict XML
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        CellTexts {
            reader,
            done: false,
        }
    }

    fn fail(&mut self, err: ExtractError) -> Option<Result<String, ExtractError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl Iterator for CellTexts<'_> {
    type Item = Result<String, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut text = String::new();
        let mut in_cell = false;
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"td" => {
                    in_cell = true;
                    text.clear();
                }
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"td" => {
                    return Some(Ok(String::new()));
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"td" => {
                    if in_cell {
                        return Some(Ok(text.trim().to_string()));
                    }
                }
                Ok(Event::Text(t)) if in_cell => match t.unescape() {
                    Ok(s) => text.push_str(&s),
                    Err(e) => return self.fail(ExtractError::Markup(e.into())),
                },
                Ok(Event::Eof) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => return self.fail(ExtractError::Markup(e)),
            }
        }
    }
}

/// Scan for `name` and return the text of the cell right after it, or
/// `None` if the name never appears. Stops at the first match.
pub fn field(doc: &str, name: &str) -> Result<Option<String>, ExtractError> {
    let mut armed = false;
    for cell in CellTexts::new(doc) {
        let cell = cell?;
        if armed {
            return Ok(Some(cell));
        }
        if cell == name {
            armed = true;
        }
    }
    Ok(None)
}

/// Textual field: absent is an empty string, not an error.
pub fn text_field(doc: &str, name: &str) -> Result<String, ExtractError> {
    Ok(field(doc, name)?.unwrap_or_default())
}

/// Numeric field: absent or non-numeric text fails the file.
pub fn int_field(doc: &str, name: &str) -> Result<u32, ExtractError> {
    let value = field(doc, name)?.unwrap_or_default();
    value.trim().parse().map_err(|_| ExtractError::BadInt {
        name: name.to_string(),
        value,
    })
}

/// Parse one report document into a `TestResult`. Seven independent scans,
/// one per field, each terminating at its first match.
pub fn parse_report(result_file_name: &str, doc: &str) -> Result<TestResult, ExtractError> {
    Ok(TestResult {
        result_file_name: result_file_name.to_string(),
        result: text_field(doc, RESULT)?,
        total_time: int_field(doc, TOTAL_TIME)?,
        num_test_passes: int_field(doc, NUM_TEST_PASSES)?,
        num_test_failures: int_field(doc, NUM_TEST_FAILURES)?,
        num_command_passes: int_field(doc, NUM_COMMAND_PASSES)?,
        num_command_failures: int_field(doc, NUM_COMMAND_FAILURES)?,
        num_command_errors: int_field(doc, NUM_COMMAND_ERRORS)?,
    })
}
