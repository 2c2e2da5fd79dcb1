//=========================================================================
// Image Loading
//=========================================================================
//
// Asynchronous provisioning for image shapes.
//
// Architecture:
//   registry ──load(url, reply)──> ImageLoader (any thread)
//                                       │
//   engine tick <── HostEvent::ImageLoaded{ticket, result} ──┘
//
// The ticket is the cancellation token: the registry remembers which
// ticket each loading identifier waits for, and a completion whose
// ticket is no longer wanted is dropped on arrival.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::platform_bridge::HostEvent;

//=== LoadTicket ==========================================================

/// Identifies one image load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub(crate) u64);

//=== ImageData ===========================================================

/// Raw image bytes as provisioned by a loader. Decoding is up to the
/// renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub source: String,
    pub bytes: Vec<u8>,
}

//=== LoadReply ===========================================================

/// One-shot completion channel handed to a loader.
#[derive(Debug)]
pub struct LoadReply {
    ticket: LoadTicket,
    sender: Sender<HostEvent>,
}

impl LoadReply {
    pub(crate) fn new(ticket: LoadTicket, sender: Sender<HostEvent>) -> Self {
        Self { ticket, sender }
    }

    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Delivers the load result to the engine.
    ///
    /// If the engine is gone the result is dropped.
    pub fn complete(self, result: Result<ImageData, String>) {
        let event = HostEvent::ImageLoaded {
            ticket: self.ticket,
            result,
        };
        if self.sender.send(event).is_err() {
            debug!("Engine gone, dropping image load {:?}", self.ticket);
        }
    }
}

//=== ImageLoader =========================================================

/// Provisions image data for image shapes.
pub trait ImageLoader {
    /// Starts loading `url`. Must not block; the result is delivered
    /// later through `reply`.
    fn load(&mut self, url: &str, reply: LoadReply);
}

//=== FileImageLoader =====================================================

/// Reads image files from disk on a background thread.
#[derive(Debug, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&mut self, url: &str, reply: LoadReply) {
        let path = url.to_string();
        let spawned = thread::Builder::new()
            .name("image-loader".to_string())
            .spawn(move || {
                let result = std::fs::read(&path)
                    .map(|bytes| ImageData {
                        source: path.clone(),
                        bytes,
                    })
                    .map_err(|e| format!("{path}: {e}"));
                reply.complete(result);
            });

        if let Err(e) = spawned {
            warn!("Could not spawn image loader thread: {}", e);
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
