use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::event::PageEvent;

use super::event_bus::LoopEvent;

const CHUNK_BYTES: usize = 64 * 1024;

/// Streams the 3D model from disk and reports progress the way a browser
/// loader would: progress events, then loaded or failed.
pub(crate) fn spawn_model_loader(path: PathBuf, tx: UnboundedSender<LoopEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match read_model(&path, &tx).await {
            Ok(bytes) => {
                tracing::info!(path = %path.display(), bytes, "model loaded");
                PageEvent::AssetLoaded
            }
            Err(err) => PageEvent::AssetFailed {
                reason: format!("{}: {err}", path.display()),
            },
        };
        let _ = tx.send(LoopEvent::Asset(event));
    })
}

async fn read_model(path: &Path, tx: &UnboundedSender<LoopEvent>) -> std::io::Result<u64> {
    let mut file = File::open(path).await?;
    let total = file.metadata().await?.len();
    let mut buf = vec![0; CHUNK_BYTES];
    let mut loaded = 0u64;
    loop {
        let read = file.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        loaded += read as u64;
        let progress = PageEvent::AssetProgress { loaded, total };
        if tx.send(LoopEvent::Asset(progress)).is_err() {
            break;
        }
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokio::sync::mpsc::unbounded_channel;

    use super::spawn_model_loader;
    use crate::app::event_bus::LoopEvent;
    use crate::event::PageEvent;

    #[tokio::test]
    async fn missing_model_reports_failure() {
        let (tx, mut rx) = unbounded_channel();
        let path = std::env::temp_dir().join(format!("msite-missing-{}.glb", std::process::id()));
        spawn_model_loader(path, tx)
            .await
            .expect("loader task should finish");
        match rx.recv().await {
            Some(LoopEvent::Asset(PageEvent::AssetFailed { reason })) => {
                assert!(reason.contains("msite-missing"));
            }
            other => panic!("expected a failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn present_model_streams_progress_then_loads() {
        let path: PathBuf =
            std::env::temp_dir().join(format!("msite-model-{}.glb", std::process::id()));
        std::fs::write(&path, vec![7u8; 100_000]).expect("model file should be written");

        let (tx, mut rx) = unbounded_channel();
        spawn_model_loader(path.clone(), tx)
            .await
            .expect("loader task should finish");

        let mut events = Vec::new();
        while let Ok(LoopEvent::Asset(event)) = rx.try_recv() {
            events.push(event);
        }
        assert!(matches!(
            events.first(),
            Some(PageEvent::AssetProgress { total: 100_000, .. })
        ));
        let (done, rest) = events.split_last().expect("loader reports something");
        assert_eq!(done, &PageEvent::AssetLoaded);
        assert_eq!(
            rest.last(),
            Some(&PageEvent::AssetProgress {
                loaded: 100_000,
                total: 100_000
            })
        );
        std::fs::remove_file(&path).expect("model file should be removed");
    }
}
