use anyhow::{Context, Result};
use magic_output_core::LineStream;
use notify::{EventKind, RecursiveMode, Watcher};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::mpsc;

use crate::input::decode_available;
use crate::render::Render;

/// Tail state for a file that is being appended to.
struct Follower {
    file: File,
    offset: u64,
    pending: Vec<u8>,
    stream: LineStream,
}

impl Follower {
    /// Renders everything appended since the last call.
    fn drain(&mut self, out: &mut dyn Render) -> Result<()> {
        let len = self.file.metadata()?.len();
        if len < self.offset {
            log::warn!("file shrank from {} to {} bytes, rereading", self.offset, len);
            self.offset = 0;
            self.pending.clear();
            // The old partial line must not be joined to the new content.
            let fresh = LineStream::new(self.stream.classifier().clone());
            let stale = std::mem::replace(&mut self.stream, fresh);
            for event in stale.finish() {
                out.render(&event)?;
            }
        }
        self.file.seek(SeekFrom::Start(self.offset))?;
        let read = self.file.read_to_end(&mut self.pending)?;
        self.offset += read as u64;

        for event in self.stream.update(&decode_available(&mut self.pending)) {
            out.render(&event)?;
        }
        Ok(())
    }
}

/// Renders the current content of `path`, then keeps rendering appended lines
/// until the file is removed or the watcher channel closes.
pub fn follow(path: &Path, stream: LineStream, out: &mut dyn Render) -> Result<()> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut follower = Follower {
        file,
        offset: 0,
        pending: Vec::new(),
        stream,
    };
    follower.drain(out)?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let _ = tx.send(res);
    })?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    log::info!("watching {}", path.display());

    for res in rx {
        match res {
            Ok(event) => match event.kind {
                EventKind::Modify(_) | EventKind::Create(_) => follower.drain(out)?,
                EventKind::Remove(_) => {
                    log::info!("{} was removed", path.display());
                    break;
                }
                _ => {}
            },
            Err(err) => log::warn!("watch error: {err}"),
        }
    }

    for event in follower.stream.finish() {
        out.render(&event)?;
    }
    Ok(())
}
