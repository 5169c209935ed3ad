use super::{Handler, Reply};
use crate::metrics::Metrics;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

/// Feed newline-separated commands from `reader` through `handler`, writing
/// one rendered reply per command to `writer`.
///
/// Stops at end of input or on a `QUIT` line. A line that is not valid UTF-8
/// gets an error reply and the session carries on.
pub async fn run_session<R, W>(handler: &Handler, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.split(b'\n');

    while let Some(raw) = lines.next_segment().await? {
        let reply = match std::str::from_utf8(&raw) {
            Ok(line) if line.trim().eq_ignore_ascii_case("quit") => break,
            Ok(line) => match handler.handle_line(line) {
                Some(reply) => reply,
                None => continue,
            },
            Err(e) => {
                warn!("Skipping line that is not valid UTF-8: {}", e);
                Metrics::get().record_error("protocol_error", None);
                Reply::Error("ERR Protocol error: line is not valid UTF-8".to_string())
            }
        };

        writer.write_all(format!("{reply}\n").as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
