//! Ordered collection of per-ticker work under an optional deadline.

use futures::{Stream, StreamExt};
use tokio::time::{timeout_at, Instant};

/// Collect every item of `stream`, or the items ready before `deadline`.
///
/// Returns the items in stream order and whether the deadline cut the
/// stream short.
pub(crate) async fn collect_until<S, T>(stream: S, deadline: Option<Instant>) -> (Vec<T>, bool)
where
    S: Stream<Item = T>,
{
    futures::pin_mut!(stream);
    let mut items = Vec::new();

    loop {
        let next = match deadline {
            Some(deadline) => match timeout_at(deadline, stream.next()).await {
                Ok(next) => next,
                Err(_) => return (items, true),
            },
            None => stream.next().await,
        };

        match next {
            Some(item) => items.push(item),
            None => return (items, false),
        }
    }
}
