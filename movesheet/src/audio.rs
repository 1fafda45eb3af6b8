use std::fmt::Display;
use std::future::Future;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::OnceCell;

static GENERATION: AtomicU64 = AtomicU64::new(0);

const POLL: Duration = Duration::from_millis(10);

/// Clip bytes fetched at most once per run. A failed fetch is remembered
/// too, so a missing clip is not requested again on every keypress.
#[derive(Default)]
pub struct ClipCache {
    clip: OnceCell<Option<Arc<[u8]>>>,
}

impl ClipCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Option<Arc<[u8]>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
        E: Display,
    {
        self.clip
            .get_or_init(|| async move {
                match load().await {
                    Ok(bytes) => Some(Arc::from(bytes)),
                    Err(error) => {
                        log::debug!("scroll tick unavailable: {error}");
                        None
                    }
                }
            })
            .await
            .clone()
    }
}

/// Plays a WAV clip to completion on the calling thread.
///
/// A later call stops any clip still playing from an earlier one.
pub fn play_wav(bytes: Arc<[u8]>, volume: f32) -> Result<(), String> {
    let generation = GENERATION.fetch_add(1, Ordering::SeqCst) + 1;
    let cursor = Cursor::new(bytes);
    let (_stream, handle) = rodio::OutputStream::try_default().map_err(|err| err.to_string())?;
    let sink = rodio::Sink::try_new(&handle).map_err(|err| err.to_string())?;
    let source = rodio::Decoder::new(cursor).map_err(|err| err.to_string())?;
    sink.set_volume(volume.clamp(0.0, 1.0));
    sink.append(source);
    while !sink.empty() {
        if GENERATION.load(Ordering::SeqCst) != generation {
            sink.stop();
            break;
        }
        std::thread::sleep(POLL);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::AtomicUsize;

    #[test]
    fn garbage_bytes_are_an_error() {
        // Fails at device or decoder setup, never panics.
        assert!(play_wav(Arc::from(vec![0u8, 1, 2, 3]), 0.5).is_err());
    }

    #[tokio::test]
    async fn clip_is_loaded_once() {
        let cache = ClipCache::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let clip = cache
                .get_or_load(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(vec![1u8, 2, 3])
                })
                .await;
            assert_eq!(clip.as_deref(), Some(&[1u8, 2, 3][..]));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_load_is_not_retried() {
        let cache = ClipCache::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            let clip = cache
                .get_or_load(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<Vec<u8>, _>("missing file")
                })
                .await;
            assert!(clip.is_none());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
