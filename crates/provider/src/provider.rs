use futures::stream::{self, BoxStream, StreamExt};
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader},
};
use tracing::info;
use types::ChainEvent;

use crate::error::ProviderError;

/// Source path that selects standard input
pub const STDIN_SOURCE: &str = "-";

/// Delivers chain events from newline-delimited JSON, one event per line.
#[derive(Debug, Clone)]
pub struct Provider {
    source: String,
}

impl Provider {
    pub fn new(source: String) -> Self {
        Self { source }
    }

    pub async fn subscribe_chain_events(
        &self,
    ) -> Result<BoxStream<'static, Result<ChainEvent, ProviderError>>, ProviderError> {
        let reader: Box<dyn AsyncRead + Unpin + Send> = if self.source == STDIN_SOURCE {
            Box::new(tokio::io::stdin())
        } else {
            Box::new(File::open(&self.source).await?)
        };
        info!("Reading chain events from {}", self.source);
        Ok(chain_events(BufReader::new(reader)))
    }
}

/// Parses chain events line by line. Blank lines are skipped.
pub fn chain_events<R>(reader: R) -> BoxStream<'static, Result<ChainEvent, ProviderError>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    stream::unfold(
        (reader.lines(), 0usize),
        |(mut lines, mut line)| async move {
            loop {
                line += 1;
                match lines.next_line().await {
                    Ok(Some(text)) if text.trim().is_empty() => continue,
                    Ok(Some(text)) => {
                        let event = serde_json::from_str::<ChainEvent>(&text)
                            .map_err(|source| ProviderError::Json { line, source });
                        return Some((event, (lines, line)));
                    }
                    Ok(None) => return None,
                    Err(err) => return Some((Err(ProviderError::from(err)), (lines, line))),
                }
            }
        },
    )
    .boxed()
}
