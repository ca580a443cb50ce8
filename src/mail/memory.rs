//! Recording transport for tests

use super::{MailError, MailTransport, OutgoingEmail};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// How the transport should behave on a given call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Deliver,
    Fail,
    Hang,
}

/// Records every email it is asked to send.
///
/// Call outcomes are scripted per call index; calls past the script deliver.
pub struct MemoryTransport {
    script: Vec<Behaviour>,
    attempts: Mutex<Vec<OutgoingEmail>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(script: Vec<Behaviour>) -> Self {
        Self {
            script,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Every email handed to `send`, in call order, whether or not it was delivered.
    pub fn attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for MemoryTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let index = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(email.clone());
            attempts.len() - 1
        };

        match self.script.get(index).copied().unwrap_or(Behaviour::Deliver) {
            Behaviour::Deliver => Ok(()),
            Behaviour::Fail => Err(MailError::Smtp("connection refused".to_string())),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }
}
