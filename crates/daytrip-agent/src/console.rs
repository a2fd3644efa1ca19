use futures::future::BoxFuture;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

use daytrip_core::error::{DaytripError, Result};
use daytrip_core::traits::Console;

/// Console over any async line reader and writer.
pub struct LineConsole<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
}

impl LineConsole<BufReader<Stdin>, Stdout> {
    /// Console bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }
}

/// Drop the line terminator and nothing else.
fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

impl<R, W> Console for LineConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    fn prompt_line(&self, prompt: &str) -> BoxFuture<'_, Result<String>> {
        let prompt = prompt.to_string();
        Box::pin(async move {
            {
                let mut writer = self.writer.lock().await;
                writer.write_all(prompt.as_bytes()).await?;
                writer.flush().await?;
            }

            let mut line = String::new();
            let read = self.reader.lock().await.read_line(&mut line).await?;
            if read == 0 {
                return Err(DaytripError::Input(
                    "input closed before a line was entered".to_string(),
                ));
            }
            Ok(strip_line_ending(line))
        })
    }

    fn print_line(&self, text: &str) -> BoxFuture<'_, Result<()>> {
        let text = format!("{}\n", text);
        Box::pin(async move {
            let mut writer = self.writer.lock().await;
            writer.write_all(text.as_bytes()).await?;
            writer.flush().await?;
            Ok(())
        })
    }
}
