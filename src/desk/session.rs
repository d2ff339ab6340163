//! Line-oriented session driver behind `helpdesk session`.
//!
//! Each input line is one query, answered by the same [`QueryResponder`] so its
//! context carries across lines. Input is read as raw bytes: a line that is not valid
//! UTF-8 is answered from its lossy decoding instead of ending the session.

use log::warn;
use std::borrow::Cow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::errors::DeskError;
use super::responder::QueryResponder;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: u32,
    /// Lines that needed replacement characters to decode.
    pub lossy_lines: u32,
}

/// Answer every line of `reader` on behalf of `user_id`, one reply per line to `writer`.
pub async fn run_session<R, W>(
    desk: &mut QueryResponder,
    user_id: &str,
    mut reader: R,
    writer: &mut W,
) -> Result<SessionSummary, DeskError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            summary.lossy_lines += 1;
            warn!(
                "line {} is not valid UTF-8; answering its lossy decoding",
                summary.answered + 1
            );
        }

        let reply = desk.process_query(&line, user_id);
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        summary.answered += 1;
    }
    writer.flush().await?;
    Ok(summary)
}
