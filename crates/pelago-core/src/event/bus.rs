// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log;

/// A thread-safe channel for fanning signals out of the core.
///
/// In practice this is MPSC: any number of producers (sequencer, recovery
/// controller) and one consumer, the shell loop that drives the loading
/// screen and error banner. Publishing never blocks and never fails the
/// publisher; a disconnected consumer is logged and the event dropped.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Creates a bus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Sends an event. A disconnected receiver is not an error for the
    /// publisher; boot transitions must go through whether or not anybody
    /// is watching.
    pub fn publish(&self, event: T) {
        if self.sender.send(event).is_err() {
            log::warn!("EventBus: dropped event, consumer disconnected.");
        }
    }

    /// A clone of the sender end, for handing to other producers.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// The receiver end. Intended for the single consumer owning the bus.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Removes and returns every event currently queued, oldest first.
    ///
    /// Convenience for per-frame consumers that poll rather than block.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
