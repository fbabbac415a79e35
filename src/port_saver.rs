use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use tokio::sync::watch;

/// Creates a fairing that publishes the port Rocket bound to, and the handle
/// that waits for it. Needed when the configured port is 0.
pub fn create_pair() -> (PortSaver, Port) {
    let (tx, rx) = watch::channel(None);
    (PortSaver { sender: tx }, Port { receiver: rx })
}

pub struct Port {
    receiver: watch::Receiver<Option<u16>>,
}

impl Port {
    /// Waits until the server has lifted off.
    ///
    /// Fails if the server is dropped before it started listening.
    pub async fn get(&self) -> anyhow::Result<u16> {
        let mut receiver = self.receiver.clone();
        loop {
            if let Some(port) = *receiver.borrow() {
                return Ok(port);
            }
            receiver
                .changed()
                .await
                .map_err(|_| anyhow::anyhow!("The server shut down before reporting its port."))?;
        }
    }
}

pub struct PortSaver {
    sender: watch::Sender<Option<u16>>,
}

#[rocket::async_trait]
impl Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let port = rocket.config().port;
        tracing::info!(port, "Listening");
        if self.sender.send(Some(port)).is_err() {
            tracing::debug!("Nobody is waiting for the bound port");
        }
    }
}
