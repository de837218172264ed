//! Navigation signal produced once a session has ended.

use tokio::sync::mpsc;

/// Port for the router/presentation layer.
///
/// The controller calls `go_to_confirmation` exactly once per session,
/// a fixed delay after termination.
pub trait Navigator: Send + Sync + 'static {
    fn go_to_confirmation(&self, destination: &str);
}

/// In-process navigator that forwards the destination over a channel.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<String>,
}

impl ChannelNavigator {
    /// Create a navigator and the receiver the presentation layer awaits.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for ChannelNavigator {
    fn go_to_confirmation(&self, destination: &str) {
        // Receiver gone means the view was already torn down.
        let _ = self.sender.send(destination.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forwards_destination() {
        let (navigator, mut rx) = ChannelNavigator::channel();
        navigator.go_to_confirmation("/merci");
        assert_eq!(rx.recv().await.as_deref(), Some("/merci"));
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let (navigator, rx) = ChannelNavigator::channel();
        drop(rx);
        navigator.go_to_confirmation("/merci");
    }
}
