use recipebox_core::domain::authentication::entities::AuthUser;
use tokio::sync::watch;

/// Observable "current user" of the session. Signing out is local only.
#[derive(Debug)]
pub struct SessionIdentity {
    sender: watch::Sender<Option<AuthUser>>,
}

impl Default for SessionIdentity {
    fn default() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }
}

impl SessionIdentity {
    pub fn current(&self) -> Option<AuthUser> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.sender.subscribe()
    }

    pub fn sign_in(&self, user: AuthUser) {
        self.sender.send_replace(Some(user));
    }

    pub fn sign_out(&self) -> Option<AuthUser> {
        self.sender.send_replace(None)
    }
}
