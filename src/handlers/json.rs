//! JSON response bodies
//!
//! Bodies are rendered with `", "` and `": "` separators, e.g.
//! `{"status": "healthy"}`, which clients of the service already match on.
//! Otherwise this behaves like `axum::Json`.

use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

use crate::error::AppError;

const APPLICATION_JSON: &str = "application/json";

/// Compact formatter with a space after each `,` and `:`
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize `value` with [`SpacedFormatter`]
pub fn to_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(64);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// `application/json` response rendered with [`SpacedFormatter`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedJson<T>(pub T);

impl<T> IntoResponse for SpacedJson<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match to_vec(&self.0) {
            Ok(buf) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(APPLICATION_JSON),
                )],
                buf,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize JSON response body");
                AppError::Internal(err.to_string()).into_response()
            }
        }
    }
}
