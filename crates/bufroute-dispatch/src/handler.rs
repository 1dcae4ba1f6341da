//! Line-oriented serve loop.
//!
//! The plugin host writes one JSONL request per line and reads one JSONL
//! response per request, in order. A failing request yields an error response
//! and the loop carries on; only failures of the streams themselves end it.

use std::io::{BufRead, Read, Write};

use bufroute::Host;
use tracing::{debug, warn};

use crate::dispatcher::{DISPATCH_TARGET, Dispatcher};
use crate::errors::DispatchError;
use crate::request::RpcRequest;
use crate::response::ResponseWriter;

/// Maximum size of a single request line in bytes.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Counters reported when the input stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    /// Requests answered.
    pub requests: usize,
    /// Requests answered with an error.
    pub failures: usize,
}

/// Serves requests from `reader` until end of input.
///
/// # Errors
///
/// Returns [`DispatchError::Io`] when reading or writing fails and
/// [`DispatchError::SerializeResponse`] when a response cannot be encoded.
pub fn serve<H, R, W>(
    dispatcher: &mut Dispatcher<H>,
    mut reader: R,
    writer: W,
) -> Result<ServeSummary, DispatchError>
where
    H: Host,
    R: BufRead,
    W: Write,
{
    let mut writer = ResponseWriter::new(writer);
    let mut summary = ServeSummary::default();

    loop {
        let outcome = match read_request_line(&mut reader) {
            Ok(None) => break,
            Ok(Some(line)) => handle_line(dispatcher, &line),
            Err(error @ DispatchError::RequestTooLarge { .. }) => Err(error),
            Err(error) => return Err(error),
        };
        summary.requests += 1;
        match outcome {
            Ok(value) => writer.write_result(value)?,
            Err(error) => {
                summary.failures += 1;
                warn!(target: DISPATCH_TARGET, %error, "request failed");
                writer.write_error(&error)?;
            }
        }
    }

    debug!(
        target: DISPATCH_TARGET,
        requests = summary.requests,
        failures = summary.failures,
        "input closed"
    );
    Ok(summary)
}

/// Parses and dispatches one request line.
///
/// # Errors
///
/// Returns the parse, validation or dispatch failure for the line.
pub fn handle_line<H: Host>(
    dispatcher: &mut Dispatcher<H>,
    line: &[u8],
) -> Result<serde_json::Value, DispatchError> {
    let request = RpcRequest::parse(line)?;
    dispatcher.dispatch(request)
}

/// Reads a bounded request line.
///
/// Returns `Ok(None)` at end of input. An oversized line is consumed up to
/// its newline so the next request starts cleanly.
fn read_request_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, DispatchError> {
    let mut buffer = Vec::new();
    let limit = u64::try_from(MAX_REQUEST_BYTES + 1).unwrap_or(u64::MAX);
    let read = reader
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut buffer)?;
    if read == 0 {
        return Ok(None);
    }

    let terminated = buffer.last() == Some(&b'\n');
    if buffer.len() > MAX_REQUEST_BYTES && !terminated {
        let discarded = discard_line(reader)?;
        return Err(DispatchError::request_too_large(
            buffer.len() + discarded,
            MAX_REQUEST_BYTES,
        ));
    }
    Ok(Some(buffer))
}

/// Skips input up to and including the next newline, returning the bytes
/// skipped.
fn discard_line<R: BufRead>(reader: &mut R) -> Result<usize, DispatchError> {
    let mut discarded = 0;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(discarded);
        }
        let (consumed, done) = match available.iter().position(|b| *b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };
        reader.consume(consumed);
        discarded += consumed;
        if done {
            return Ok(discarded);
        }
    }
}
