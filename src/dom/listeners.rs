//! Listener Registry
//!
//! Owns event-listener handles for as long as their node is in the document.
//! Handlers capture the overlay, so a handle that outlives its node keeps the
//! whole overlay alive until the next navigation.

pub struct Listeners<N, H> {
    entries: Vec<(N, H)>,
}

impl<N, H> Default for Listeners<N, H> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<N, H> Listeners<N, H> {
    pub fn hold(&mut self, node: N, handle: H) {
        self.entries.push((node, handle));
    }

    /// Drop every handle whose node left the document; returns how many
    pub fn release_detached(&mut self, is_connected: impl Fn(&N) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(node, _)| is_connected(node));
        before - self.entries.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
